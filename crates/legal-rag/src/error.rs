//! Error types for the ingestion pipeline and chat relay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for legal-rag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix attached to every ingestion failure surfaced over HTTP
pub const PROCESSING_ERROR_PREFIX: &str = "An error occurred during file processing";

/// System errors
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input shape (wrong extension, malformed request body)
    #[error("{0}")]
    Validation(String),

    /// Source document unreadable or corrupt
    #[error("Error reading docx file '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Content store rejected the batch
    #[error("Content store error: {0}")]
    Storage(String),

    /// Completion service failure (network, auth, quota, malformed response)
    #[error("Completion service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create an external service error
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalService(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short machine-readable kind, used in HTTP error bodies and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::Extraction { .. } => "extraction_error",
            Error::Storage(_) => "storage_error",
            Error::ExternalService(_) => "external_service_error",
            Error::Config(_) => "config_error",
            Error::Io(_) => "io_error",
            Error::Json(_) => "json_error",
            Error::Http(_) => "http_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for errors that surface as protocol failures.
    ///
    /// Completion service errors never reach this path: the chat relay folds
    /// them into a normal reply.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Extraction { .. }
            | Error::Storage(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::ExternalService(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message shown to the client in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            other => format!("{}: {}", PROCESSING_ERROR_PREFIX, other),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // `detail` matches the shape the web frontend reads
        let body = Json(json!({
            "detail": self.detail(),
            "type": self.kind(),
        }));

        (status, body).into_response()
    }
}
