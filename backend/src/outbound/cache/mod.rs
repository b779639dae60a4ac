//! Cache invalidation adapters.
//!
//! - [`InMemoryCacheInvalidator`]: per-path staleness flags for a single
//!   process; readers consult `is_stale` before serving a cached rendering.
//! - [`RedisCacheInvalidator`]: deletes the shared rendering key so every
//!   instance re-renders on the next read.

mod in_memory;
mod redis;

pub use in_memory::InMemoryCacheInvalidator;
pub use redis::{RedisCacheInvalidator, RedisCacheSetupError, rendering_key};
