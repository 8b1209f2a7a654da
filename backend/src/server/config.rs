//! Application settings loaded via OrthoConfig, and the server configuration
//! derived from them.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use listshare::domain::{DEFAULT_ENRICHMENT_TIMEOUT, DEFAULT_SEED_CATEGORIES, Uid};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings failures detected before the server starts.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("LISTSHARE_ADMIN_UID must be set")]
    MissingAdminUid,
    #[error("invalid admin uid: {0}")]
    InvalidAdminUid(String),
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("invalid identity provider URL {value}: {message}")]
    InvalidIdentityUrl { value: String, message: String },
}

/// Process settings layered from CLI flags, `LISTSHARE_*` variables, and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LISTSHARE")]
pub struct AppSettings {
    /// Uid granted the administrator role.
    pub admin_uid: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Identity provider base URL; a permissive fixture is used when absent.
    pub identity_url: Option<String>,
    /// Identity provider request timeout.
    pub identity_timeout_ms: Option<u64>,
    /// Upper bound on profile enrichment for list reads.
    pub enrichment_timeout_ms: Option<u64>,
    /// Origin allowed by CORS; any origin when absent.
    pub cors_origin: Option<String>,
    /// Comma-separated category names seeded at startup.
    pub default_categories: Option<String>,
}

impl AppSettings {
    /// The admin uid; required.
    pub fn admin_uid(&self) -> Result<Uid, SettingsError> {
        let raw = self
            .admin_uid
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(SettingsError::MissingAdminUid)?;
        Uid::new(raw).map_err(|err| SettingsError::InvalidAdminUid(err.to_string()))
    }

    /// Listen address, `0.0.0.0:8080` when unset.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Identity provider base URL; blank counts as unset.
    pub fn identity_url(&self) -> Result<Option<Url>, SettingsError> {
        self.identity_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                Url::parse(value).map_err(|err| SettingsError::InvalidIdentityUrl {
                    value: value.to_owned(),
                    message: err.to_string(),
                })
            })
            .transpose()
    }

    /// Per-request timeout for identity provider calls.
    pub fn identity_timeout(&self) -> Duration {
        self.identity_timeout_ms
            .map_or(DEFAULT_IDENTITY_TIMEOUT, Duration::from_millis)
    }

    /// Bound on profile enrichment for list reads.
    pub fn enrichment_timeout(&self) -> Duration {
        self.enrichment_timeout_ms
            .map_or(DEFAULT_ENRICHMENT_TIMEOUT, Duration::from_millis)
    }

    /// Seed names; blank entries are dropped and an empty list falls back
    /// to the built-in defaults.
    pub fn default_categories(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .default_categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if configured.is_empty() {
            DEFAULT_SEED_CATEGORIES
                .iter()
                .map(|name| (*name).to_owned())
                .collect()
        } else {
            configured
        }
    }
}

/// Values the server needs once settings are validated.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origin: Option<String>,
}

impl ServerConfig {
    /// Listen on `bind_addr` with the default CORS policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            cors_origin: None,
        }
    }

    /// Restrict CORS to `origin` when set.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: Option<String>) -> Self {
        self.cors_origin = origin;
        self
    }
}
