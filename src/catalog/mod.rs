//! Catalog acquisition and storage: HTTP fetch, the shared snapshot store
//! and the hourly refresh task.

mod fetch;
mod refresh;
mod store;

pub use fetch::CatalogFetcher;
pub use refresh::RefreshScheduler;
pub use store::CatalogStore;

/// Errors produced while acquiring the paper catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Network/HTTP failure, including non-success status codes
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The response body is not a catalog-shaped JSON document
    #[error("parse error: {0}")]
    Parse(String),
}
