use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use paperbot::config::{BotConfig, DEFAULT_DATABASE_ADDRESS, REFRESH_INTERVAL};
use paperbot::search::SearchLimits;
use paperbot::{bot, CatalogFetcher, CatalogStore, RefreshScheduler};
use teloxide::Bot;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

/// Telegram bot for searching WG21 standardization-committee papers
#[derive(Parser, Debug)]
#[command(name = "paperbot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Telegram bot for searching WG21 papers", long_about = None)]
struct Cli {
    /// Telegram Bot API token
    #[arg(long)]
    token: String,

    /// Maximum results count per request
    #[arg(long, default_value_t = 20)]
    max_results_count: usize,

    /// Maximum result message length
    #[arg(long, default_value_t = 2500)]
    max_message_length: usize,

    /// Online database address with papers
    #[arg(long, default_value = DEFAULT_DATABASE_ADDRESS)]
    database_address: String,

    /// Path to the log file; a dated file rotates daily next to it
    #[arg(long, default_value = "logs/log.txt")]
    log_path: PathBuf,

    /// Path to a trust certificate (PEM) for the HTTP client
    #[arg(long)]
    ca_info: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<BotConfig> {
        let database_address = Url::parse(&self.database_address)
            .with_context(|| format!("invalid database address: {}", self.database_address))?;
        Ok(BotConfig {
            token: self.token,
            limits: SearchLimits {
                max_results: self.max_results_count,
                max_message_length: self.max_message_length,
            },
            database_address,
            log_path: self.log_path,
            ca_info: self.ca_info,
        })
    }
}

/// Dated, daily-rotating log file at the configured path plus a stderr
/// mirror. The file writer is synchronous, so info entries land on disk as
/// soon as they are emitted.
fn init_logging(log_path: &Path) -> Result<()> {
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", log_path.display()))?;
    let file_appender = tracing_appender::rolling::daily(directory, file_name);

    let env_filter =
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

/// One client serves both the catalog fetch and the Telegram transport, so
/// `--ca-info` applies to every outbound request.
fn build_http_client(ca_info: Option<&Path>) -> Result<reqwest::Client> {
    let mut builder = teloxide::net::default_reqwest_settings();
    if let Some(path) = ca_info {
        let pem = std::fs::read(path)
            .with_context(|| format!("failed to read certificate {}", path.display()))?;
        let certificate =
            reqwest::Certificate::from_pem(&pem).context("invalid trust certificate")?;
        builder = builder.add_root_certificate(certificate);
    }
    builder.build().context("failed to build HTTP client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_path)?;
    let config = cli.into_config()?;

    let client = build_http_client(config.ca_info.as_deref())?;

    let store = Arc::new(CatalogStore::new());
    let fetcher = CatalogFetcher::new(client.clone(), config.database_address.clone());

    // The bot does not start serving before the first catalog is in place;
    // a failure here is a startup failure and exits non-zero.
    let snapshot = fetcher
        .fetch()
        .await
        .context("initial catalog fetch failed")?;
    tracing::info!(
        papers = snapshot.papers.len(),
        entries = snapshot.total_entries,
        "initial catalog loaded"
    );
    store.replace(snapshot);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = RefreshScheduler::new(fetcher, Arc::clone(&store), REFRESH_INTERVAL);
    let refresh_task = tokio::spawn(scheduler.run(shutdown_rx));

    let bot = Bot::with_client(config.token.clone(), client);
    let result = bot::run(bot, store, config.limits).await;

    let _ = shutdown_tx.send(true);
    let _ = refresh_task.await;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["paperbot", "--token", "123:abc"]);
        assert_eq!(cli.token, "123:abc");
        assert_eq!(cli.max_results_count, 20);
        assert_eq!(cli.max_message_length, 2500);
        assert_eq!(cli.database_address, DEFAULT_DATABASE_ADDRESS);
        assert_eq!(cli.log_path, PathBuf::from("logs/log.txt"));
        assert!(cli.ca_info.is_none());
    }

    #[test]
    fn test_cli_requires_token() {
        assert!(Cli::try_parse_from(["paperbot"]).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "paperbot",
            "--token",
            "123:abc",
            "--max-results-count",
            "5",
            "--max-message-length",
            "1000",
            "--database-address",
            "https://example.com/db.json",
            "--ca-info",
            "/etc/ssl/extra.pem",
        ]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.limits.max_results, 5);
        assert_eq!(config.limits.max_message_length, 1000);
        assert_eq!(config.database_address.as_str(), "https://example.com/db.json");
        assert_eq!(config.ca_info, Some(PathBuf::from("/etc/ssl/extra.pem")));
    }

    #[test]
    fn test_shared_client_feeds_fetcher_and_bot() {
        // The same client instance must be usable by both the catalog
        // fetcher and the Telegram transport, so --ca-info covers all
        // outbound requests.
        let client = build_http_client(None).unwrap();
        let url = Url::parse(DEFAULT_DATABASE_ADDRESS).unwrap();
        let _fetcher = CatalogFetcher::new(client.clone(), url);
        let _bot = Bot::with_client("123:abc", client);
    }

    #[test]
    fn test_build_http_client_rejects_missing_certificate() {
        let err = build_http_client(Some(Path::new("/nonexistent/ca.pem"))).unwrap_err();
        assert!(err.to_string().contains("failed to read certificate"));
    }

    #[test]
    fn test_invalid_database_address_is_rejected() {
        let cli = Cli::parse_from([
            "paperbot",
            "--token",
            "123:abc",
            "--database-address",
            "not a url",
        ]);
        assert!(cli.into_config().is_err());
    }
}
