//! OpenAiChatGateway -- concrete [`LlmGateway`] implementation for any
//! OpenAI-compatible chat completions endpoint.
//!
//! Sends non-streaming requests to `{base_url}/chat/completions` with bearer
//! authentication. The API key is wrapped in [`secrecy::SecretString`] and is
//! never logged or included in `Debug` output. The request timeout lives on
//! the HTTP client, so a slow backend surfaces as `GatewayError::Timeout`
//! rather than hanging the pipeline.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use confab_core::llm::gateway::LlmGateway;
use confab_types::error::GatewayError;
use confab_types::llm::{CompletionRequest, CompletionResponse};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

/// Gateway for OpenAI-compatible backends (OpenAI, Mistral, local proxies).
pub struct OpenAiChatGateway {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiChatGateway {
    /// Create a new gateway.
    ///
    /// # Arguments
    ///
    /// * `api_key` - backend API key wrapped in SecretString
    /// * `base_url` - API base (e.g., "https://api.openai.com/v1")
    /// * `timeout` - per-request bound; exceeding it yields `GatewayError::Timeout`
    pub fn new(api_key: SecretString, base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Convert a generic [`CompletionRequest`] into the wire request.
    fn to_wire_request(request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(system) = &request.system {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(WireMessage {
                role: msg.role.to_string(),
                content: msg.content.clone(),
            });
        }

        ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

// OpenAiChatGateway intentionally does NOT derive Debug so the API key held
// by the client can never leak through debug formatting.

impl LlmGateway for OpenAiChatGateway {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let body = Self::to_wire_request(request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Provider {
                        message: format!("HTTP request failed: {e}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => GatewayError::AuthenticationFailed,
                429 => GatewayError::RateLimited,
                _ => GatewayError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Deserialization(format!("failed to parse response: {e}")))?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: completion.model.unwrap_or_else(|| request.model.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::llm::{Message, MessageRole};

    fn make_gateway() -> OpenAiChatGateway {
        OpenAiChatGateway::new(
            SecretString::from("test-key-not-real"),
            "https://api.openai.com/v1/".to_string(),
            Duration::from_secs(30),
        )
    }

    #[test]
    fn test_gateway_name() {
        assert_eq!(make_gateway().name(), "openai");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = make_gateway();
        assert_eq!(gateway.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_wire_request_prepends_system_message() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "Hello".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "Hi".to_string(),
                },
            ],
            system: Some("Be brief.".to_string()),
            max_tokens: 256,
            temperature: Some(0.2),
        };

        let wire = OpenAiChatGateway::to_wire_request(&request);
        assert_eq!(wire.messages.len(), 3);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[2].role, "assistant");
        assert_eq!(wire.max_tokens, 256);
    }

    #[test]
    fn test_response_parses_null_content_as_empty() {
        let json = r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();
        assert_eq!(content, "");
    }
}
