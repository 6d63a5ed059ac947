//! Device queries
//!
//! Catalog listing, single-device detail and download links.

use anyhow::{Context, Result};

use crate::catalog::{Catalog, DeviceCatalog, DeviceDetail};
use crate::utils::{format_device_line, format_status, pluralize};
use crate::{log_error, log_info};

const MODULE: &str = "commands::device_queries";

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Build the catalog and render it
pub async fn list_devices(catalog: &DeviceCatalog, format: OutputFormat) -> Result<String> {
    log_info!(MODULE, "Building device catalog");

    let built = match catalog.get_catalog().await {
        Ok(built) => built,
        Err(e) => {
            log_error!(MODULE, "Catalog build failed: {}", e);
            return Err(e).context(
                "Failed to fetch device information after multiple retries. Please try again later.",
            );
        }
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&built).context("Failed to serialize catalog")
        }
        OutputFormat::Text => Ok(render_catalog(&built)),
    }
}

/// Resolve one device and render it
pub async fn show_device(
    catalog: &DeviceCatalog,
    identifier: &str,
    format: OutputFormat,
) -> Result<String> {
    log_info!(MODULE, "Looking up device: {}", identifier);

    let detail = match catalog.get_device(identifier).await {
        Ok(detail) => detail,
        Err(e) => {
            log_error!(MODULE, "Device lookup failed: {}", e);
            return Err(e).context(format!("Device '{}' could not be found", identifier));
        }
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&detail).context("Failed to serialize device")
        }
        OutputFormat::Text => Ok(render_detail(&detail)),
    }
}

/// Mirror link for a device, without touching the network
pub fn device_link(catalog: &DeviceCatalog, identifier: &str) -> String {
    catalog.download_url(identifier)
}

/// Text listing: one heading per manufacturer, one line per device
pub fn render_catalog(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "No devices found.\n".to_string();
    }

    let mut out = String::new();
    for group in catalog.groups() {
        out.push_str(&format!(
            "{} ({})\n",
            group.manufacturer,
            pluralize(group.devices.len(), "device")
        ));
        for device in &group.devices {
            out.push_str(&format!("  {}\n", format_device_line(device)));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{} in {}, fetched {}\n",
        pluralize(catalog.device_count(), "device"),
        pluralize(catalog.groups().len(), "manufacturer"),
        catalog.built_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out
}

/// Text detail view
pub fn render_detail(detail: &DeviceDetail) -> String {
    let device = &detail.device;
    let mut out = format!(
        "{}\nMaintained by {}\nStatus: {}\n",
        device.display_name,
        device.maintainer,
        format_status(device.status)
    );
    if let Some(ref image) = device.image_url {
        out.push_str(&format!("Image: {}\n", image));
    }
    if let Some(ref description) = detail.description {
        out.push_str(&format!("\n{}\n", description));
    }
    out.push_str(&format!("\nDownload: {}\n", detail.download_url));
    out.push_str(&format!("\nDevice Information\n\n{}\n", detail.notes.trim_end()));
    out
}
