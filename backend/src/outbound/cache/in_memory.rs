//! Process-local cache invalidation registry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::CachePath;
use crate::domain::ports::CacheInvalidator;

#[derive(Debug, Default)]
struct PathState {
    stale: bool,
    invalidations: u64,
}

/// Tracks which read paths must be re-rendered.
///
/// Paths never seen are considered fresh. Marking a stale path stale again
/// changes nothing except the invalidation counter.
#[derive(Debug, Default)]
pub struct InMemoryCacheInvalidator {
    paths: Mutex<HashMap<CachePath, PathState>>,
}

impl InMemoryCacheInvalidator {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CachePath, PathState>> {
        // State is a set of flags; a panic mid-update cannot corrupt it.
        self.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether cached renderings of `path` must be discarded.
    pub fn is_stale(&self, path: &CachePath) -> bool {
        self.lock().get(path).is_some_and(|state| state.stale)
    }

    /// Record that `path` has been re-rendered.
    pub fn mark_fresh(&self, path: &CachePath) {
        if let Some(state) = self.lock().get_mut(path) {
            state.stale = false;
        }
    }

    /// Number of invalidation requests received for `path`.
    pub fn invalidation_count(&self, path: &CachePath) -> u64 {
        self.lock()
            .get(path)
            .map_or(0, |state| state.invalidations)
    }
}

#[async_trait]
impl CacheInvalidator for InMemoryCacheInvalidator {
    async fn invalidate(&self, path: &CachePath) {
        let mut paths = self.lock();
        let state = paths.entry(path.clone()).or_default();
        state.stale = true;
        state.invalidations += 1;
        debug!(path = %path, count = state.invalidations, "cache path marked stale");
    }
}
