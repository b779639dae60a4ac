//! Object storage adapters.
//!
//! Provides the reqwest implementation of the `AssetStore` port.

mod dto;
mod http_asset_store;

pub use http_asset_store::HttpAssetStore;
