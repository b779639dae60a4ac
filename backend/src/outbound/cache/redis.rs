//! Redis-backed cache invalidation.
//!
//! Rendered listings are cached under `render:<path>`. Invalidation deletes
//! that key; deleting a missing key is a no-op, which keeps the call
//! idempotent.

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use tracing::{debug, error};

use crate::domain::CachePath;
use crate::domain::ports::CacheInvalidator;

const RENDER_KEY_PREFIX: &str = "render:";

/// Key holding the cached rendering of `path`.
pub fn rendering_key(path: &CachePath) -> String {
    format!("{RENDER_KEY_PREFIX}{path}")
}

/// Failures while connecting to Redis at startup.
#[derive(Debug, thiserror::Error)]
pub enum RedisCacheSetupError {
    #[error("invalid redis url: {0}")]
    Url(#[source] bb8_redis::redis::RedisError),
    #[error("failed to build redis pool: {0}")]
    Pool(#[source] bb8_redis::redis::RedisError),
}

/// Deletes cached renderings through a pooled Redis connection.
#[derive(Clone)]
pub struct RedisCacheInvalidator {
    pool: Pool<RedisConnectionManager>,
}

impl RedisCacheInvalidator {
    /// Connect to the Redis server at `url`.
    pub async fn connect(url: &str) -> Result<Self, RedisCacheSetupError> {
        let manager = RedisConnectionManager::new(url).map_err(RedisCacheSetupError::Url)?;
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .await
            .map_err(RedisCacheSetupError::Pool)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl CacheInvalidator for RedisCacheInvalidator {
    async fn invalidate(&self, path: &CachePath) {
        let key = rendering_key(path);
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(err) => {
                error!(path = %path, error = %err, "redis checkout failed; cache left unchanged");
                return;
            }
        };
        let deleted: Result<i64, _> = conn.del(&key).await;
        match deleted {
            Ok(removed) => debug!(path = %path, removed, "cache path invalidated"),
            Err(err) => error!(path = %path, error = %err, "redis invalidation failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CachePath::INVOICES, "render:/dashboard/invoices")]
    #[case(CachePath::CUSTOMERS, "render:/dashboard/customers")]
    fn keys_are_namespaced(#[case] path: CachePath, #[case] expected: &str) {
        assert_eq!(rendering_key(&path), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_malformed_url() {
        let result = RedisCacheInvalidator::connect("not-a-redis-url").await;
        assert!(matches!(result, Err(RedisCacheSetupError::Url(_))));
    }
}
