//! Startup configuration.
//!
//! Loaded once at startup and read-only thereafter; values such as the
//! default page size are threaded explicitly into the services that need
//! them rather than read from process-wide state.

use serde::Deserialize;

use crate::error::CoreError;

/// Default number of items per listing page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Default cache entry time-to-live, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Top-level portal configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub backend: BackendSettings,
    pub cache: CacheSettings,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

/// Settings for the backend REST API collaborator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the backend API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Settings for the list/record cache layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Whether caching is enabled at all. When disabled the service layer
    /// degrades to a pure pass-through to the backend.
    pub enabled: bool,

    /// Page size used when a list query does not specify one.
    pub default_page_size: i64,

    /// Time-to-live for cache entries, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_page_size: DEFAULT_PAGE_SIZE,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl PortalConfig {
    /// Load configuration from an optional file plus `PORTAL_`-prefixed
    /// environment variables (e.g. `PORTAL_CACHE__TTL_SECS=60`).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if a source cannot be read or the
    /// merged values do not deserialize.
    pub fn load(path: Option<&str>) -> Result<Self, CoreError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("PORTAL")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .map_err(|e| CoreError::configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CoreError::configuration(e.to_string()))
    }
}
