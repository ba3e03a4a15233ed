//! Request and response bodies for the HTTP surface

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Greeting returned by `GET /`
pub const ROOT_MESSAGE: &str = "Привіт від сервера!";

/// Processing status reported for an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Document parsed, chunked and stored
    Processed,
}

/// Result of one ingestion run
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Original filename
    pub filename: String,
    /// Ids of the stored chunks, in chunk order
    pub chunk_ids: Vec<Uuid>,
}

impl IngestOutcome {
    /// Number of chunks written to the store
    pub fn chunks_added(&self) -> usize {
        self.chunk_ids.len()
    }
}

/// Response for `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub status: UploadStatus,
    pub chunks_added: usize,
}

impl From<&IngestOutcome> for UploadResponse {
    fn from(outcome: &IngestOutcome) -> Self {
        Self {
            filename: outcome.filename.clone(),
            status: UploadStatus::Processed,
            chunks_added: outcome.chunks_added(),
        }
    }
}

/// Request body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Response body for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: ROOT_MESSAGE.to_string(),
        }
    }
}
