//! Assemble [`HttpState`] from whichever adapters are configured.

use std::sync::Arc;

use dashboard_backend::domain::ports::{
    AssetStore, CacheInvalidator, FixtureAssetStore, FixtureLoginService,
};
use dashboard_backend::domain::{CustomerMutationService, InvoiceMutationService};
use dashboard_backend::inbound::http::state::{CustomerPipeline, HttpState, InvoicePipeline};
use dashboard_backend::outbound::cache::InMemoryCacheInvalidator;
use dashboard_backend::outbound::memory::InMemoryRecords;
use dashboard_backend::outbound::persistence::{DieselCustomerRepository, DieselInvoiceRepository};
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use super::ServerConfig;

fn build_cache(config: &ServerConfig) -> Arc<dyn CacheInvalidator> {
    match &config.redis_cache {
        Some(redis) => redis.clone(),
        None => {
            info!("no redis configured; invalidating the in-process cache");
            Arc::new(InMemoryCacheInvalidator::new())
        }
    }
}

fn build_asset_store(config: &ServerConfig) -> Arc<dyn AssetStore> {
    match &config.asset_store {
        Some(store) => store.clone(),
        None => {
            warn!("no asset endpoint configured; customer images get fixture URLs");
            Arc::new(FixtureAssetStore::default())
        }
    }
}

fn build_pipelines(
    config: &ServerConfig,
    cache: Arc<dyn CacheInvalidator>,
    assets: Arc<dyn AssetStore>,
) -> (Arc<InvoicePipeline>, Arc<CustomerPipeline>) {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => (
            Arc::new(InvoiceMutationService::new(
                Arc::new(DieselInvoiceRepository::new(pool.clone())),
                Arc::clone(&cache),
                clock,
            )),
            Arc::new(CustomerMutationService::new(
                Arc::new(DieselCustomerRepository::new(pool.clone())),
                assets,
                cache,
            )),
        ),
        None => {
            warn!("no database configured; records are kept in memory");
            let records = Arc::new(InMemoryRecords::new());
            (
                Arc::new(InvoiceMutationService::new(
                    Arc::clone(&records),
                    Arc::clone(&cache),
                    clock,
                )),
                Arc::new(CustomerMutationService::new(records, assets, cache)),
            )
        }
    }
}

/// Build handler state from the configured adapters.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let cache = build_cache(config);
    let assets = build_asset_store(config);
    let (invoices, customers) = build_pipelines(config, cache, assets);
    HttpState::new(Arc::new(FixtureLoginService), invoices, customers)
}
