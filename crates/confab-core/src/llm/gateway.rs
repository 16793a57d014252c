//! LlmGateway trait definition.
//!
//! The model backend boundary: an ordered list of role-tagged messages goes
//! in, generated text comes out. Opaque beyond that contract -- the call may
//! be slow (seconds) and is the only long suspension point in the pipeline.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in confab-infra (e.g., `OpenAiChatGateway`).

use confab_types::error::GatewayError;
use confab_types::llm::{CompletionRequest, CompletionResponse};

/// Trait for language-model backends.
///
/// Implementations own their timeout: a request exceeding the bound surfaces
/// as [`GatewayError::Timeout`]. No retries are performed here or above.
pub trait LlmGateway: Send + Sync {
    /// Human-readable backend name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, GatewayError>> + Send;
}
