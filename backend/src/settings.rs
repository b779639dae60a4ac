//! Application configuration loaded via OrthoConfig.
//!
//! Every knob can come from the command line, a configuration file or a
//! `DASHBOARD_*` environment variable. Anything left unset falls back to the
//! in-process adapters so a bare `cargo run` serves a working dashboard.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ASSET_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Problems turning raw settings into typed values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid asset endpoint '{value}': {source}")]
    AssetEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Settings for the dashboard server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct AppSettings {
    /// PostgreSQL URL. Without it records live in memory.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Object store base URL for customer images.
    pub asset_endpoint: Option<String>,
    /// Bearer token sent to the object store.
    pub asset_token: Option<String>,
    /// Upload timeout in seconds.
    pub asset_timeout_secs: Option<u64>,
    /// Redis URL for the rendering cache.
    pub redis_url: Option<String>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: Option<bool>,
    /// `Strict`, `Lax` or `None`.
    pub same_site: Option<String>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session: bool,
}

impl AppSettings {
    /// Address to bind, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parsed object store endpoint, if configured.
    pub fn asset_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        self.asset_endpoint
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|source| SettingsError::AssetEndpoint {
                    value: value.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(
            self.asset_timeout_secs
                .unwrap_or(DEFAULT_ASSET_TIMEOUT_SECS),
        )
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Defaults to `true`.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }
}
