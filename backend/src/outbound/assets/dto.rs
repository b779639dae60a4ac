//! Wire format of object store responses.

use serde::Deserialize;

use crate::domain::AssetUrl;

/// Body returned by a successful `PUT`.
#[derive(Debug, Deserialize)]
pub(super) struct UploadResponseDto {
    #[serde(default)]
    url: Option<String>,
}

impl UploadResponseDto {
    /// Extract the durable URL, rejecting blank or non-http values.
    pub(super) fn into_asset_url(self) -> Result<AssetUrl, String> {
        let raw = self
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| "response did not include a url".to_owned())?;
        AssetUrl::parse(&raw).map_err(|error| format!("response url {raw:?} is unusable: {error}"))
    }
}
