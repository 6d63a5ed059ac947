//! Configuration
//!
//! Compile-time defaults grouped by concern, plus the runtime
//! [`CatalogConfig`] that callers build (or read from the environment)
//! and hand to [`crate::DeviceCatalog`].

use std::fmt;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Remote endpoints
pub mod urls {
    /// Contents API root of the device-info repository
    pub const CONTENTS_BASE: &str = "https://api.github.com/repos/yaap/device-info";
    /// Mirror hosting the per-device builds
    pub const DOWNLOAD_MIRROR: &str = "https://mirror.codebucket.de/yaap";
}

/// Application identity
pub mod app {
    /// GitHub rejects API requests without a User-Agent
    pub const USER_AGENT: &str = concat!("device-catalog/", env!("CARGO_PKG_VERSION"));
    /// Environment variable holding the tracing filter directive
    pub const LOG_ENV: &str = "DEVICE_CATALOG_LOG";
}

/// Rate-limit backoff defaults
pub mod retry {
    pub const MAX_ATTEMPTS: u32 = 5;
    pub const INITIAL_DELAY_MS: u64 = 1000;
}

/// Fan-out and request bounds
pub mod fetch {
    /// Descriptor fetches allowed in flight at once
    pub const MAX_CONCURRENT: usize = 8;
    /// Timeout for a single HTTP request
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Wall clock for one descriptor fetch, backoff included
    pub const DESCRIPTOR_TIMEOUT_SECS: u64 = 120;
}

/// Device descriptor defaults
pub mod devices {
    pub const UNKNOWN_MAINTAINER: &str = "Unknown";
    pub const OTHER_MANUFACTURER: &str = "Other";
    pub const NOTES_PLACEHOLDER: &str = "No additional information available.";
}

/// Environment variable names read by [`CatalogConfig::from_env`]
pub mod env {
    pub const BASE_URL: &str = "DEVICE_CATALOG_BASE_URL";
    pub const MIRROR_URL: &str = "DEVICE_CATALOG_MIRROR_URL";
    pub const TOKEN: &str = "DEVICE_CATALOG_TOKEN";
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const MAX_CONCURRENT: &str = "DEVICE_CATALOG_MAX_CONCURRENT";
    pub const MAX_ATTEMPTS: &str = "DEVICE_CATALOG_MAX_ATTEMPTS";
    pub const INITIAL_DELAY_MS: &str = "DEVICE_CATALOG_INITIAL_DELAY_MS";
}

/// Runtime configuration for catalog construction
#[derive(Clone)]
pub struct CatalogConfig {
    /// Contents API root; listing lives at `{contents_base_url}/contents/`
    pub contents_base_url: String,
    /// Mirror root used to build download links
    pub mirror_base_url: String,
    /// Optional bearer token. Absent means unauthenticated requests.
    pub access_token: Option<String>,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub max_concurrent_fetches: usize,
    pub descriptor_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            contents_base_url: urls::CONTENTS_BASE.to_string(),
            mirror_base_url: urls::DOWNLOAD_MIRROR.to_string(),
            access_token: None,
            user_agent: app::USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(fetch::REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            max_concurrent_fetches: fetch::MAX_CONCURRENT,
            descriptor_timeout: Duration::from_secs(fetch::DESCRIPTOR_TIMEOUT_SECS),
        }
    }
}

impl CatalogConfig {
    /// Defaults overlaid with any `DEVICE_CATALOG_*` environment variables.
    ///
    /// Blank or unparsable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(url) = value(env::BASE_URL) {
            config.contents_base_url = url;
        }
        if let Some(url) = value(env::MIRROR_URL) {
            config.mirror_base_url = url;
        }
        config.access_token = value(env::TOKEN).or_else(|| value(env::GITHUB_TOKEN));

        if let Some(n) = value(env::MAX_CONCURRENT).and_then(|v| v.parse::<usize>().ok()) {
            config.max_concurrent_fetches = n.max(1);
        }
        if let Some(n) = value(env::MAX_ATTEMPTS).and_then(|v| v.parse::<u32>().ok()) {
            config.retry.max_attempts = n.max(1);
        }
        if let Some(ms) = value(env::INITIAL_DELAY_MS).and_then(|v| v.parse::<u64>().ok()) {
            config.retry.initial_delay = Duration::from_millis(ms);
        }

        config
    }

    /// Same configuration with a different access token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("contents_base_url", &self.contents_base_url)
            .field("mirror_base_url", &self.mirror_base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("user_agent", &self.user_agent)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .field("descriptor_timeout", &self.descriptor_timeout)
            .finish()
    }
}
