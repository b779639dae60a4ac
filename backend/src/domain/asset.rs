//! Uploaded image attachments.
//!
//! An [`AssetPayload`] can only be built from bytes that already satisfy the
//! size and MIME limits, so the uploader never sees an oversize or unsupported
//! file.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

/// Exclusive upper bound on attachment size in bytes.
pub const MAX_ASSET_BYTES: usize = 10_000;

/// Image formats accepted for customer avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetMimeType {
    Webp,
    Jpeg,
    Png,
}

impl AssetMimeType {
    /// Parse a declared MIME type, ignoring parameters and case.
    pub fn from_declared(raw: &str) -> Option<Self> {
        let essence = raw.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/webp" => Some(Self::Webp),
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Canonical MIME string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Webp => "image/webp",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File extension used for object keys.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for AssetMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an attachment is refused before upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetValidationError {
    /// No file, or a zero-byte file, was supplied.
    #[error("Please fill in all fields and select an image!")]
    Missing,
    /// The file is at or above the size limit.
    #[error("The size of the file is too large!")]
    TooLarge { size: usize, max: usize },
    /// The declared type is not an accepted image format.
    #[error("This is not an image file")]
    UnsupportedType { declared: String },
}

/// Attachment that passed the size and type checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPayload {
    bytes: Vec<u8>,
    mime_type: AssetMimeType,
}

impl AssetPayload {
    /// Check `declared_size` and `declared_type` and keep the bytes.
    ///
    /// The size check uses the larger of the declared size and the byte
    /// count so a client cannot understate it.
    pub fn try_new(
        bytes: Vec<u8>,
        declared_size: usize,
        declared_type: &str,
    ) -> Result<Self, AssetValidationError> {
        let size = declared_size.max(bytes.len());
        if size == 0 {
            return Err(AssetValidationError::Missing);
        }
        let mime_type = AssetMimeType::from_declared(declared_type).ok_or_else(|| {
            AssetValidationError::UnsupportedType {
                declared: declared_type.to_owned(),
            }
        })?;
        if size >= MAX_ASSET_BYTES {
            return Err(AssetValidationError::TooLarge {
                size,
                max: MAX_ASSET_BYTES,
            });
        }
        Ok(Self { bytes, mime_type })
    }

    /// Raw content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content length in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Validated MIME type.
    pub fn mime_type(&self) -> AssetMimeType {
        self.mime_type
    }

    /// Content-addressed object name, `<sha256-hex>.<ext>`.
    pub fn object_key(&self) -> String {
        let digest = Sha256::digest(&self.bytes);
        format!("{}.{}", hex::encode(digest), self.mime_type.extension())
    }
}

/// Durable reference to content held in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetUrl(Url);

impl AssetUrl {
    /// Parse an absolute http(s) URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(raw.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            _ => Err(url::ParseError::RelativeUrlWithoutBase),
        }
    }

    /// Borrow the URL text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AssetUrl> for String {
    fn from(value: AssetUrl) -> Self {
        value.0.into()
    }
}

impl TryFrom<String> for AssetUrl {
    type Error = url::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub url: AssetUrl,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/png", AssetMimeType::Png)]
    #[case("image/jpeg", AssetMimeType::Jpeg)]
    #[case("IMAGE/WEBP", AssetMimeType::Webp)]
    #[case("image/png; charset=binary", AssetMimeType::Png)]
    fn accepts_supported_types(#[case] declared: &str, #[case] expected: AssetMimeType) {
        let payload = AssetPayload::try_new(vec![1; 16], 16, declared).expect("accepted");
        assert_eq!(payload.mime_type(), expected);
    }

    #[rstest]
    fn rejects_file_at_size_limit() {
        let err = AssetPayload::try_new(vec![0; 10_001], 10_001, "image/png")
            .expect_err("oversize rejected");
        assert_eq!(
            err,
            AssetValidationError::TooLarge {
                size: 10_001,
                max: MAX_ASSET_BYTES
            }
        );
        assert!(AssetPayload::try_new(vec![0; 10_000], 10_000, "image/png").is_err());
        assert!(AssetPayload::try_new(vec![0; 9_999], 9_999, "image/png").is_ok());
    }

    #[rstest]
    fn rejects_unsupported_type_regardless_of_size() {
        let err = AssetPayload::try_new(vec![0; 5_000], 5_000, "image/gif")
            .expect_err("gif rejected");
        assert!(matches!(err, AssetValidationError::UnsupportedType { .. }));
    }

    #[rstest]
    fn rejects_empty_file() {
        let err = AssetPayload::try_new(Vec::new(), 0, "image/png").expect_err("empty rejected");
        assert_eq!(err, AssetValidationError::Missing);
    }

    #[rstest]
    fn understated_size_is_ignored() {
        let err = AssetPayload::try_new(vec![0; 12_000], 10, "image/png")
            .expect_err("actual size wins");
        assert!(matches!(err, AssetValidationError::TooLarge { size: 12_000, .. }));
    }

    #[rstest]
    fn object_key_is_content_addressed() {
        let payload = AssetPayload::try_new(b"abc".to_vec(), 3, "image/jpeg").expect("valid");
        assert_eq!(
            payload.object_key(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad.jpg"
        );
    }

    #[rstest]
    #[case("ftp://cdn.example.com/a.png")]
    #[case("/relative/a.png")]
    fn asset_url_requires_http(#[case] raw: &str) {
        assert!(AssetUrl::parse(raw).is_err());
    }
}
