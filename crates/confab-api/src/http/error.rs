//! Application error type mapping to HTTP status codes.
//!
//! Validation failures are reported with their message; any core failure
//! maps to one generic server error so store/gateway diagnostics never
//! reach clients. The full error chain still lands in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use confab_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Empty or malformed request field, rejected before the core runs.
    Validation(String),
    /// Failure inside the conversation pipeline.
    Chat(ChatError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Chat(err) => {
                tracing::error!(error = %err, "chat pipeline failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::error::{GatewayError, StorageError};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_message() {
        let response = AppError::Validation("message cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "message cannot be empty");
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic_500() {
        let err: ChatError = StorageError::Query("UNIQUE constraint failed".to_string()).into();
        let response = AppError::Chat(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // No internal diagnostics leak to the client.
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal server error");
    }

    #[tokio::test]
    async fn test_gateway_timeout_is_generic_500() {
        let err: ChatError = GatewayError::Timeout.into();
        let response = AppError::Chat(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal server error");
    }
}
