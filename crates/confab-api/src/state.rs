//! Application state wiring the chat service together.
//!
//! `ChatService` is generic over store/gateway traits; `AppState` pins it to
//! the concrete infra implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;

use confab_core::chat::service::ChatService;
use confab_infra::llm::openai::OpenAiChatGateway;
use confab_infra::sqlite::pool::DatabasePool;
use confab_infra::sqlite::turn::SqliteTurnStore;

use crate::config::Cli;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteTurnStore, OpenAiChatGateway>;

/// Shared application state used by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire the service.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = cli.resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("confab.db").display());
        let pool = DatabasePool::new(&db_url).await?;
        let store = SqliteTurnStore::new(pool);

        let api_key = std::env::var("CONFAB_API_KEY")
            .map(SecretString::from)
            .context("CONFAB_API_KEY is not set")?;
        let gateway = OpenAiChatGateway::new(
            api_key,
            cli.base_url.clone(),
            Duration::from_secs(cli.timeout_secs),
        );

        let chat_service = ChatService::new(store, gateway, cli.model.clone(), cli.max_tokens);

        Ok(Self {
            chat_service: Arc::new(chat_service),
        })
    }
}
