//! Metadata fetcher
//!
//! Retrieves one device's descriptor and notes through the retry policy.

use std::sync::Arc;

use crate::config;
use crate::error::CatalogError;
use crate::remote::ContentStore;
use crate::retry::RetryPolicy;
use crate::utils::{descriptor_path, notes_path};
use crate::{log_debug, log_warn};

use super::models::DeviceDescriptor;

const MODULE: &str = "catalog::fetcher";

/// Fetches per-device documents from a [`ContentStore`]
#[derive(Clone)]
pub struct MetadataFetcher {
    store: Arc<dyn ContentStore>,
    retry: RetryPolicy,
}

impl MetadataFetcher {
    pub fn new(store: Arc<dyn ContentStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    /// Fetch, decode and parse `{id}/{id}.json`
    ///
    /// Only the network read is retried. Bad base64 or JSON fails at once.
    pub async fn get_descriptor(&self, identifier: &str) -> Result<DeviceDescriptor, CatalogError> {
        let path = descriptor_path(identifier);
        let file = self
            .retry
            .execute(|| self.store.read_file(&path))
            .await?;

        let text = file.decode_text(&path)?;
        DeviceDescriptor::parse(identifier, &text)
    }

    /// Fetch `{id}/{id}.md`, falling back to a placeholder on any failure
    /// or when the file is blank
    pub async fn get_notes(&self, identifier: &str) -> String {
        let path = notes_path(identifier);
        let fetched = self
            .retry
            .execute(|| self.store.read_file(&path))
            .await
            .and_then(|file| file.decode_text(&path));

        match fetched {
            Ok(notes) if !notes.trim().is_empty() => notes,
            Ok(_) => {
                log_debug!(MODULE, "Empty notes for {}", identifier);
                config::devices::NOTES_PLACEHOLDER.to_string()
            }
            Err(CatalogError::UnexpectedStatus { status: 404, .. }) => {
                log_debug!(MODULE, "No notes for {}", identifier);
                config::devices::NOTES_PLACEHOLDER.to_string()
            }
            Err(e) => {
                log_warn!(MODULE, "Notes unavailable for {}: {}", identifier, e);
                config::devices::NOTES_PLACEHOLDER.to_string()
            }
        }
    }
}
