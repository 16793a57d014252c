//! Confab REST API entry point.
//!
//! Binary name: `confab`
//!
//! Parses CLI arguments, initializes the database and chat service, then
//! starts the axum server.

mod config;
mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set.
    let filter = match cli.verbose {
        0 => "info",
        1 => "info,confab=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let state = AppState::init(&cli).await?;
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Confab API listening");

    axum::serve(listener, router).await?;

    Ok(())
}
