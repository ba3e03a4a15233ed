//! Document upload endpoint

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{SourceDocument, UploadResponse};

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

/// POST /upload - Parse, chunk and store one `.docx` document
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart =
        multipart.map_err(|e| Error::validation(format!("Invalid multipart request: {}", e)))?;

    let mut document = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        Error::validation(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::validation("Uploaded file has no filename"))?;

        // Fail before buffering the body when the type is wrong
        state.pipeline().check_extension(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;

        document = Some(SourceDocument::new(filename, data.to_vec()));
        break;
    }

    let document =
        document.ok_or_else(|| Error::validation(format!("Missing '{}' field", FILE_FIELD)))?;
    let filename = document.filename.clone();

    tracing::info!("Processing file: {} ({} bytes)", filename, document.size());

    match state.pipeline().ingest(document).await {
        Ok(outcome) => Ok(Json(UploadResponse::from(&outcome))),
        Err(e) => {
            tracing::error!("Failed to process {}: {}", filename, e);
            Err(e)
        }
    }
}
