//! Thread-safe holder of the current catalog snapshot.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::CatalogSnapshot;

/// Owns the snapshot shared between the refresh task and command handlers.
///
/// One exclusive lock covers both the hourly writer and per-command
/// readers; it is held only for the `Arc` clone or swap, never across I/O.
/// Readers always see a whole snapshot, never partial state.
#[derive(Debug)]
pub struct CatalogStore {
    current: Mutex<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    /// Creates a store holding an empty snapshot.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Arc::new(CatalogSnapshot::default())),
        }
    }

    /// Returns the current snapshot.
    pub fn read(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.lock())
    }

    /// Atomically swaps in a new snapshot.
    pub fn replace(&self, snapshot: CatalogSnapshot) {
        *self.lock() = Arc::new(snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, Arc<CatalogSnapshot>> {
        // A poisoned lock only means some holder panicked mid-clone; the
        // stored snapshot itself is always whole, so keep serving it.
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
