//! Detail resolver
//!
//! Resolves a single device for the detail view without building the
//! whole catalog.

use crate::error::CatalogError;
use crate::utils::{download_url, is_valid_identifier};
use crate::{log_debug, log_info};

use super::fetcher::MetadataFetcher;
use super::models::{Device, DeviceDetail};

const MODULE: &str = "catalog::detail";

/// Descriptor and notes for `identifier`
///
/// Any descriptor failure, transient or permanent, comes back as
/// [`CatalogError::NotFound`], and notes are not requested. Notes never fail.
pub async fn resolve(
    fetcher: &MetadataFetcher,
    mirror_base: &str,
    identifier: &str,
) -> Result<DeviceDetail, CatalogError> {
    if !is_valid_identifier(identifier) {
        return Err(CatalogError::NotFound {
            identifier: identifier.to_string(),
            reason: "invalid device identifier".to_string(),
        });
    }

    log_info!(MODULE, "Resolving device {}", identifier);

    let descriptor = fetcher.get_descriptor(identifier).await.map_err(|e| {
        log_debug!(MODULE, "Descriptor for {} unavailable: {}", identifier, e);
        e.into_not_found(identifier)
    })?;
    let notes = fetcher.get_notes(identifier).await;

    let description = descriptor.description.clone();
    Ok(DeviceDetail {
        device: Device::from_descriptor(identifier, descriptor),
        description,
        notes,
        download_url: download_url(mirror_base, identifier),
    })
}
