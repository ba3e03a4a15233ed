//! HTTP routes

pub mod chat;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;
use crate::types::RootResponse;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        // Upload - with larger body limit for files
        .route(
            "/upload",
            post(upload::upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/chat", post(chat::chat))
}

/// Liveness greeting
async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}
