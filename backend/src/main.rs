//! Dashboard backend entry-point: load settings, connect adapters, serve forms.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashboard_backend::inbound::http::health::HealthState;
use dashboard_backend::inbound::http::session_config::{BuildMode, session_settings};
use dashboard_backend::outbound::assets::HttpAssetStore;
use dashboard_backend::outbound::cache::RedisCacheInvalidator;
use dashboard_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use dashboard_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

async fn migrate(database_url: String) -> Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to run migrations")?;
    info!(applied, "database migrations complete");
    Ok(())
}

async fn server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let session = session_settings(settings, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
    );

    if let Some(url) = settings.database_url.clone() {
        migrate(url.clone()).await?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    if let Some(endpoint) = settings.asset_endpoint()? {
        let store = HttpAssetStore::new(
            endpoint,
            settings.asset_token.clone(),
            settings.asset_timeout(),
        )
        .wrap_err("failed to build asset store client")?;
        config = config.with_asset_store(store);
    }

    if let Some(url) = settings.redis_url.as_deref() {
        let cache = RedisCacheInvalidator::connect(url)
            .await
            .wrap_err("failed to connect to redis")?;
        config = config.with_redis_cache(cache);
    }

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let config = server_config(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!("dashboard backend listening");
    server.await?;
    Ok(())
}
