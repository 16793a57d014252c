//! Conversation and summarization HTTP handlers.
//!
//! Endpoints:
//! - POST /api/chat/send      - Run one conversation exchange
//! - POST /api/chat/summarize - Summarize free-standing text

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /api/chat/send.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /api/chat/send.
///
/// `message_id` is null when the assistant turn could not be persisted;
/// the generated response is returned regardless.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub message_id: Option<i64>,
}

/// Request body for POST /api/chat/summarize.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
}

/// Response body for POST /api/chat/summarize.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// POST /api/chat/send - Run one conversation exchange.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let outcome = state
        .chat_service
        .converse(request.session_id.as_deref(), &request.message)
        .await?;

    Ok(Json(ChatResponse {
        response: outcome.response,
        session_id: outcome.session_id,
        message_id: outcome.turn_id,
    }))
}

/// POST /api/chat/summarize - Summarize free-standing text.
pub async fn summarize_text(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let summary = state.chat_service.summarize(&request.text).await?;
    Ok(Json(SummaryResponse { summary }))
}
