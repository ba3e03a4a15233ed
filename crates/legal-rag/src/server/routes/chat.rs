//! Chat relay endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

/// POST /chat - Relay one message; always 200 once the body parses
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(request) = payload.map_err(|e| Error::validation(e.body_text()))?;

    let reply = state.chat().reply(&request.message).await;

    Ok(Json(ChatResponse { reply }))
}
