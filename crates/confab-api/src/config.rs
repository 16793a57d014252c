//! Server configuration from CLI flags and environment variables.
//!
//! Every flag has a `CONFAB_*` env fallback. The gateway API key is read
//! only from `CONFAB_API_KEY` (never a flag, so it can't land in shell
//! history or process listings).

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "confab", about = "Session-scoped conversational assistant over HTTP")]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "CONFAB_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "CONFAB_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Data directory holding the SQLite database (default: ~/.confab).
    #[arg(long, env = "CONFAB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Model identifier sent to the gateway.
    #[arg(long, env = "CONFAB_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Base URL of the OpenAI-compatible backend.
    #[arg(long, env = "CONFAB_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Gateway request timeout in seconds.
    #[arg(long, env = "CONFAB_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Maximum tokens requested per completion.
    #[arg(long, env = "CONFAB_MAX_TOKENS", default_value_t = 1024)]
    pub max_tokens: u32,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the data directory, defaulting to `~/.confab`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".confab")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["confab"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 8080);
        assert_eq!(cli.model, "gpt-4o-mini");
        assert_eq!(cli.timeout_secs, 120);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let cli = Cli::parse_from(["confab", "--data-dir", "/tmp/confab-test"]);
        assert_eq!(cli.resolve_data_dir(), PathBuf::from("/tmp/confab-test"));
    }
}
