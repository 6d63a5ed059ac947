//! Device catalog
//!
//! Lists device directories in the remote store, fetches each descriptor
//! concurrently and groups the results by manufacturer.
//!
//! ```text
//! list_candidates ──► fetch_all (bounded, per-item isolation) ──► build ──► Catalog
//!                           │
//! resolve(id) ──────────────┴── MetadataFetcher + RetryPolicy
//! ```

mod builder;
mod detail;
mod fanout;
mod fetcher;
mod lister;
mod models;

pub use builder::build;
pub use detail::resolve;
pub use fanout::{fetch_all, fetch_outcomes, FanOutLimits, FanOutResult, FetchOutcome};
pub use fetcher::MetadataFetcher;
pub use lister::list_candidates;
pub use models::{
    manufacturer_key, Catalog, Device, DeviceDescriptor, DeviceDetail, DeviceGroup, Status,
};

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::log_info;
use crate::remote::{ContentStore, GithubContents};
use crate::utils::download_url;

const MODULE: &str = "catalog";

/// Read interface consumed by the display layer
#[derive(Clone)]
pub struct DeviceCatalog {
    fetcher: MetadataFetcher,
    config: CatalogConfig,
}

impl DeviceCatalog {
    /// Catalog over the GitHub contents API described by `config`
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let store = GithubContents::new(&config)?;
        Ok(Self::with_store(Arc::new(store), config))
    }

    /// Catalog over any [`ContentStore`]
    pub fn with_store(store: Arc<dyn ContentStore>, config: CatalogConfig) -> Self {
        Self {
            fetcher: MetadataFetcher::new(store, config.retry),
            config,
        }
    }

    fn limits(&self) -> FanOutLimits {
        FanOutLimits {
            max_concurrent: self.config.max_concurrent_fetches,
            per_fetch_timeout: self.config.descriptor_timeout,
        }
    }

    /// List, fetch and build a fresh catalog
    ///
    /// Fails only when the listing itself cannot be obtained. Devices whose
    /// descriptors fail are left out.
    pub async fn get_catalog(&self) -> Result<Catalog, CatalogError> {
        let candidates = list_candidates(self.fetcher.store(), &self.config.retry).await?;
        let fetched = fetch_all(&self.fetcher, &candidates, self.limits()).await;
        let catalog = build(fetched.devices);

        log_info!(
            MODULE,
            "Built catalog: {} groups, {} devices, {} omitted",
            catalog.groups().len(),
            catalog.device_count(),
            fetched.omitted.len()
        );
        Ok(catalog)
    }

    /// Single-device lookup for the detail view
    pub async fn get_device(&self, identifier: &str) -> Result<DeviceDetail, CatalogError> {
        resolve(&self.fetcher, &self.config.mirror_base_url, identifier).await
    }

    /// Mirror link for a device; no network access
    pub fn download_url(&self, identifier: &str) -> String {
        download_url(&self.config.mirror_base_url, identifier)
    }
}
