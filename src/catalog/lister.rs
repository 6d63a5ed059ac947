//! Directory lister
//!
//! Enumerates candidate device identifiers from the store's root listing.

use crate::error::CatalogError;
use crate::remote::{ContentStore, RemoteEntry};
use crate::retry::RetryPolicy;
use crate::{log_debug, log_info};

const MODULE: &str = "catalog::lister";

/// Directory entries at the root of the store
///
/// Any error here, including an exhausted rate-limit retry, aborts the
/// catalog build.
pub async fn list_candidates(
    store: &dyn ContentStore,
    retry: &RetryPolicy,
) -> Result<Vec<RemoteEntry>, CatalogError> {
    log_info!(MODULE, "Listing device directories");

    let entries = retry.execute(|| store.list_root()).await?;
    let total = entries.len();

    let candidates: Vec<RemoteEntry> = entries
        .into_iter()
        .filter(|entry| {
            if !entry.is_directory() {
                log_debug!(MODULE, "Skipping non-directory entry: {}", entry.name);
            }
            entry.is_directory()
        })
        .collect();

    log_info!(
        MODULE,
        "Found {} candidate devices ({} entries listed)",
        candidates.len(),
        total
    );
    Ok(candidates)
}
