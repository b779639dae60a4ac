//! Port for pushing attachments to external object storage.

use async_trait::async_trait;

use crate::domain::{AssetPayload, AssetUrl, UploadedAsset};

use super::define_port_error;

define_port_error! {
    /// Errors raised by object storage adapters.
    pub enum AssetStoreError {
        /// The request never produced a response.
        Transport { message: String } => "asset store transport failed: {message}",
        /// The store answered with a failure status.
        Rejected { status: u16, message: String } => "asset store rejected upload ({status}): {message}",
        /// The store answered successfully but named no URL.
        MissingUrl { message: String } => "asset store response had no url: {message}",
    }
}

/// Upload one attachment in a single request and return its durable URL.
///
/// Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, payload: &AssetPayload) -> Result<UploadedAsset, AssetStoreError>;
}

/// Development store that accepts every upload without network access.
///
/// URLs are content addressed under `base`, so identical bytes map to the
/// same URL.
#[derive(Debug, Clone)]
pub struct FixtureAssetStore {
    base: String,
}

impl FixtureAssetStore {
    /// Serve fixture URLs under `base`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_owned(),
        }
    }
}

impl Default for FixtureAssetStore {
    fn default() -> Self {
        Self::new("http://localhost:8080/assets")
    }
}

#[async_trait]
impl AssetStore for FixtureAssetStore {
    async fn upload(&self, payload: &AssetPayload) -> Result<UploadedAsset, AssetStoreError> {
        let raw = format!("{}/{}", self.base, payload.object_key());
        let url = AssetUrl::parse(&raw)
            .map_err(|err| AssetStoreError::missing_url(format!("{raw}: {err}")))?;
        Ok(UploadedAsset { url })
    }
}
