//! Chat service orchestrating the conversation round-trip.
//!
//! `ChatService` coordinates between the `TurnStore` and the `LlmGateway` to
//! run one full exchange: resolve session -> persist user turn -> replay
//! history -> call the model -> persist assistant turn -> return the result.
//! It also exposes the read/delete views over the turn log and stateless
//! text summarization.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info};

use confab_types::error::ChatError;
use confab_types::llm::{CompletionRequest, Message, MessageRole};
use confab_types::turn::{Turn, TurnRole};

use crate::chat::session::resolve_session_id;
use crate::chat::store::TurnStore;
use crate::llm::gateway::LlmGateway;

/// Fixed number of turns returned by the global recent view.
pub const RECENT_TURN_LIMIT: i64 = 10;

/// Instruction wrapped around stand-alone summarization input.
const SUMMARY_INSTRUCTION: &str =
    "Please provide a concise summary of the following text in 2-3 sentences:";

/// Result of one completed conversation exchange.
///
/// `turn_id` is `None` when the assistant turn could not be persisted after
/// a successful model call -- the generated text is still returned.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response: String,
    pub session_id: String,
    pub turn_id: Option<i64>,
}

/// Orchestrates conversation assembly, persistence, and history access.
///
/// Generic over `TurnStore` and `LlmGateway` to maintain clean architecture
/// (confab-core never depends on confab-infra).
pub struct ChatService<S: TurnStore, G: LlmGateway> {
    store: S,
    gateway: G,
    model: String,
    max_tokens: u32,
    /// Per-session mutual exclusion, keyed by session id. Entries are never
    /// evicted; growth is bounded by distinct sessions per process lifetime.
    session_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: TurnStore, G: LlmGateway> ChatService<S, G> {
    /// Create a new chat service over the given store and gateway.
    pub fn new(store: S, gateway: G, model: String, max_tokens: u32) -> Self {
        Self {
            store,
            gateway,
            model,
            max_tokens,
            session_locks: DashMap::new(),
        }
    }

    /// Access the turn store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the model gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run one conversation exchange.
    ///
    /// The user turn is committed before the model call and stays committed
    /// if the call fails, leaving a transiently unanswered turn -- an
    /// accepted state, not a bug. No step is retried; a client retry simply
    /// appends another user turn under the same session id.
    pub async fn converse(
        &self,
        session_id_candidate: Option<&str>,
        user_text: &str,
    ) -> Result<ChatOutcome, ChatError> {
        let session_id = resolve_session_id(session_id_candidate);

        // Serialize concurrent exchanges on the same session so neither
        // replays a history missing the other's in-flight user turn. The
        // guard drops on every exit path, including gateway failure. This is
        // a core-level lock only -- no store lock is held across the model call.
        let lock = self
            .session_locks
            .entry(session_id.clone())
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        self.store
            .append(&session_id, TurnRole::User, user_text)
            .await?;

        // WAL read-after-write: the list below includes the turn just appended.
        let history = self.store.list_by_session(&session_id).await?;

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: context_from(&history),
            system: None,
            max_tokens: self.max_tokens,
            temperature: None,
        };

        let response = self.gateway.complete(&request).await?;

        // The user turn is already committed; losing this append must not
        // discard a completed generation. Log the failure and return the
        // text without a turn id.
        let turn_id = match self
            .store
            .append(&session_id, TurnRole::Assistant, &response.content)
            .await
        {
            Ok(turn) => Some(turn.id),
            Err(err) => {
                error!(session_id = %session_id, error = %err, "failed to persist assistant turn");
                None
            }
        };

        info!(session_id = %session_id, "chat exchange completed");

        Ok(ChatOutcome {
            response: response.content,
            session_id,
            turn_id,
        })
    }

    /// Summarize free-standing text with a single model call.
    ///
    /// Session-independent: nothing is persisted and no history is read.
    #[tracing::instrument(name = "summarize_text", skip(self, text), fields(text_len = text.len()))]
    pub async fn summarize(&self, text: &str) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: MessageRole::User,
                content: format!("{SUMMARY_INSTRUCTION}\n\n{text}"),
            }],
            system: None,
            max_tokens: self.max_tokens,
            temperature: None,
        };

        let response = self.gateway.complete(&request).await?;
        Ok(response.content.trim().to_string())
    }

    /// Full ordered history for a session. Unknown sessions yield an empty vec.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Turn>, ChatError> {
        Ok(self.store.list_by_session(session_id).await?)
    }

    /// Most-recent turns across all sessions, newest first.
    pub async fn recent(&self) -> Result<Vec<Turn>, ChatError> {
        Ok(self.store.list_recent(RECENT_TURN_LIMIT).await?)
    }

    /// Remove every turn in a session. Returns the number removed; zero is
    /// still success (absence of history is not an error).
    pub async fn clear_history(&self, session_id: &str) -> Result<u64, ChatError> {
        let removed = self.store.delete_by_session(session_id).await?;
        info!(session_id = %session_id, removed, "chat history cleared");
        Ok(removed)
    }
}

/// Translate the persisted turn log into the model-call context window.
fn context_from(history: &[Turn]) -> Vec<Message> {
    history
        .iter()
        .map(|turn| Message {
            role: match turn.role {
                TurnRole::User => MessageRole::User,
                TurnRole::Assistant => MessageRole::Assistant,
            },
            content: turn.content.clone(),
        })
        .collect()
}
