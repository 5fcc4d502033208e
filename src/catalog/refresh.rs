//! Periodic catalog refresh task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::catalog::{CatalogFetcher, CatalogStore};

/// Re-fetches the catalog on a fixed interval and swaps it into the store.
///
/// Refresh failures are logged and swallowed; the stale snapshot stays in
/// service until the next tick succeeds. The task stops when the watch
/// sender signals shutdown, so tests and process teardown can end it
/// deterministically instead of leaking a detached task.
pub struct RefreshScheduler {
    fetcher: CatalogFetcher,
    store: Arc<CatalogStore>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(fetcher: CatalogFetcher, store: Arc<CatalogStore>, interval: Duration) -> Self {
        Self {
            fetcher,
            store,
            interval,
        }
    }

    /// Runs until the shutdown signal fires.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; the startup fetch already ran.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.refresh_once().await,
                _ = shutdown.changed() => {
                    info!("refresh scheduler stopping");
                    return;
                }
            }
        }
    }

    /// One fetch-and-replace cycle.
    pub async fn refresh_once(&self) {
        info!("catalog refresh started");
        match self.fetcher.fetch().await {
            Ok(snapshot) => {
                info!(
                    papers = snapshot.papers.len(),
                    entries = snapshot.total_entries,
                    "catalog refresh finished"
                );
                self.store.replace(snapshot);
            }
            Err(e) => warn!("catalog refresh failed, keeping previous snapshot: {e}"),
        }
    }
}
