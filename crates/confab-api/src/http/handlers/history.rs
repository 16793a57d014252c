//! History HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/chat/history/{sessionId} - Full ordered history for a session
//! - GET    /api/chat/recent              - Most-recent 10 turns globally
//! - DELETE /api/chat/history/{sessionId} - Purge a session's history

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use confab_types::turn::Turn;

use crate::http::error::AppError;
use crate::state::AppState;

/// Response body for DELETE /api/chat/history/{sessionId}.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

/// GET /api/chat/history/{sessionId} - Full ordered history for a session.
///
/// An unknown session yields an empty array, not an error.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Turn>>, AppError> {
    let turns = state.chat_service.history(&session_id).await?;
    Ok(Json(turns))
}

/// GET /api/chat/recent - Most-recent 10 turns across all sessions.
pub async fn get_recent(State(state): State<AppState>) -> Result<Json<Vec<Turn>>, AppError> {
    let turns = state.chat_service.recent().await?;
    Ok(Json(turns))
}

/// DELETE /api/chat/history/{sessionId} - Purge a session's history.
///
/// Reports success even when zero turns were removed; absence of history
/// is not an error.
pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ClearResponse>, AppError> {
    state.chat_service.clear_history(&session_id).await?;
    Ok(Json(ClearResponse {
        message: "Chat history cleared successfully".to_string(),
    }))
}
