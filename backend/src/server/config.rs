//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use dashboard_backend::outbound::assets::HttpAssetStore;
use dashboard_backend::outbound::cache::RedisCacheInvalidator;
use dashboard_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
///
/// Adapters left unset fall back to their in-process counterparts.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) asset_store: Option<Arc<HttpAssetStore>>,
    pub(crate) redis_cache: Option<Arc<RedisCacheInvalidator>>,
}

impl ServerConfig {
    /// Construct a configuration with session and binding settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            asset_store: None,
            redis_cache: None,
        }
    }

    /// Store records in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Upload customer images to a remote object store.
    #[must_use]
    pub fn with_asset_store(mut self, store: HttpAssetStore) -> Self {
        self.asset_store = Some(Arc::new(store));
        self
    }

    /// Invalidate renderings held in Redis.
    #[must_use]
    pub fn with_redis_cache(mut self, cache: RedisCacheInvalidator) -> Self {
        self.redis_cache = Some(Arc::new(cache));
        self
    }
}
