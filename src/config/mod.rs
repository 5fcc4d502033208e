//! Runtime configuration and fixed defaults.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::search::SearchLimits;

/// Online database address with WG21 papers, used unless overridden.
pub const DEFAULT_DATABASE_ADDRESS: &str =
    "https://raw.githubusercontent.com/wg21link/db/master/index.json";

/// How often the catalog is re-fetched after the startup load.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Everything the process needs, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram Bot API token
    pub token: String,
    /// Per-query reply budget
    pub limits: SearchLimits,
    /// Where the catalog document lives
    pub database_address: Url,
    /// Log file location; the file rotates daily
    pub log_path: PathBuf,
    /// Optional PEM trust certificate for the HTTP client
    pub ca_info: Option<PathBuf>,
}
