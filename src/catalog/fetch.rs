//! HTTP download of the catalog document.

use reqwest::Client;
use url::Url;

use crate::catalog::CatalogError;
use crate::models::{parse_catalog, CatalogSnapshot};

/// Downloads and parses one whole catalog document.
///
/// Runs once synchronously before the bot starts serving, then from the
/// [`RefreshScheduler`](crate::catalog::RefreshScheduler). Failure leaves
/// whatever snapshot the store currently holds untouched; this type never
/// writes anywhere.
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    client: Client,
    url: Url,
}

impl CatalogFetcher {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// One GET against the catalog address.
    ///
    /// Transport failures and non-success statuses map to
    /// [`CatalogError::Fetch`]; a body that is not a catalog-shaped JSON
    /// object maps to [`CatalogError::Parse`].
    pub async fn fetch(&self) -> Result<CatalogSnapshot, CatalogError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Fetch(format!(
                "catalog server returned status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Fetch(format!("failed to read catalog body: {}", e)))?;

        parse_catalog(&body)
            .map_err(|e| CatalogError::Parse(format!("malformed catalog document: {}", e)))
    }
}
