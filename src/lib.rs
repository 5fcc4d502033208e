//! # paperbot
//!
//! A Telegram bot that searches a remotely hosted JSON catalog of WG21
//! standardization-committee papers.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: catalog data structures and JSON document parsing
//! - [`catalog`]: HTTP fetch, the shared snapshot store, periodic refresh
//! - [`search`]: substring search and chunked reply formatting
//! - [`bot`]: Telegram commands and the long-poll runtime
//! - [`config`]: runtime configuration and fixed defaults

pub mod bot;
pub mod catalog;
pub mod config;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use catalog::{CatalogError, CatalogFetcher, CatalogStore, RefreshScheduler};
pub use models::{CatalogSnapshot, PaperRecord};
pub use search::{SearchLimits, SearchOutcome, SearchReply};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
