//! Reqwest-backed object store adapter.
//!
//! One `PUT {endpoint}/{object_key}` per upload carrying the raw bytes and the
//! validated MIME type. The store answers with `{"url": "..."}`. There are no
//! retries; every failure maps onto an [`AssetStoreError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::UploadResponseDto;
use crate::domain::ports::{AssetStore, AssetStoreError};
use crate::domain::{AssetPayload, UploadedAsset};

const DEFAULT_USER_AGENT: &str = "dashboard-backend-asset-uploader/0.1";

/// Asset store adapter that uploads to a single HTTP endpoint.
pub struct HttpAssetStore {
    client: Client,
    endpoint: Url,
    token: Option<Zeroizing<String>>,
}

impl HttpAssetStore {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            token: token.filter(|value| !value.is_empty()).map(Zeroizing::new),
        })
    }

    fn object_url(&self, object_key: &str) -> Result<Url, AssetStoreError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{object_key}"))
            .map_err(|error| AssetStoreError::transport(format!("invalid object url: {error}")))
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn upload(&self, payload: &AssetPayload) -> Result<UploadedAsset, AssetStoreError> {
        let target = self.object_url(&payload.object_key())?;
        debug!(url = %target, size = payload.size(), "uploading asset");

        let mut request = self
            .client
            .put(target)
            .header(reqwest::header::CONTENT_TYPE, payload.mime_type().as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .body(payload.bytes().to_vec());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_upload_response(body.as_ref())
    }
}

fn parse_upload_response(body: &[u8]) -> Result<UploadedAsset, AssetStoreError> {
    let decoded: UploadResponseDto = serde_json::from_slice(body).map_err(|error| {
        AssetStoreError::missing_url(format!("invalid upload response JSON: {error}"))
    })?;
    decoded
        .into_asset_url()
        .map(|url| UploadedAsset { url })
        .map_err(AssetStoreError::missing_url)
}

fn map_transport_error(error: reqwest::Error) -> AssetStoreError {
    if error.is_timeout() {
        AssetStoreError::transport(format!("timed out: {error}"))
    } else {
        AssetStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AssetStoreError {
    AssetStoreError::rejected(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
