use thiserror::Error;

/// Errors from the turn store (used by trait definitions in confab-core).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from the model gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited by provider")]
    RateLimited,

    #[error("gateway request timed out")]
    Timeout,

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors surfaced by the conversation pipeline.
///
/// A `Gateway` error after the user turn was appended leaves that turn
/// committed -- the caller sees the error, the message is not lost.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Provider {
            message: "HTTP 500".to_string(),
        };
        assert_eq!(err.to_string(), "provider error: HTTP 500");
        assert_eq!(GatewayError::Timeout.to_string(), "gateway request timed out");
    }

    #[test]
    fn test_chat_error_is_transparent() {
        let err: ChatError = StorageError::Connection.into();
        assert_eq!(err.to_string(), "database connection error");

        let err: ChatError = GatewayError::RateLimited.into();
        assert_eq!(err.to_string(), "rate limited by provider");
    }
}
