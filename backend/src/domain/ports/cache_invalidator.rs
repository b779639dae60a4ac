//! Port for marking cached read paths stale.

use async_trait::async_trait;

use crate::domain::CachePath;

/// Mark every cached rendering of a path stale.
///
/// Calls are idempotent. Backend faults are logged by the adapter and never
/// reach the caller, since the mutation they follow has already been applied.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, path: &CachePath);
}
