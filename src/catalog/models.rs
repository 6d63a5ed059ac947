//! Device data models
//!
//! Types representing device descriptors, normalized devices and the
//! grouped catalog handed to consumers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config;
use crate::error::CatalogError;

/// Support status of a device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Official,
    #[default]
    Unofficial,
    Discontinued,
}

impl Status {
    /// Map a descriptor value onto the closed set. Missing, blank and
    /// unrecognized values are `Unofficial`.
    pub fn from_descriptor(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("official") => Status::Official,
            Some("discontinued") => Status::Discontinued,
            Some("unofficial") => Status::Unofficial,
            _ => Status::Unofficial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Official => "official",
            Status::Unofficial => "unofficial",
            Status::Discontinued => "discontinued",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded `{id}/{id}.json` payload, defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub maintainer: String,
    pub status: Status,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Non-blank string field of a JSON object
fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl DeviceDescriptor {
    /// Parse descriptor JSON for `identifier`
    ///
    /// The document must be a JSON object. A missing `name` falls back to the
    /// identifier, a missing `maintainer` to `"Unknown"`. Non-string values
    /// for any field are treated as missing.
    pub fn parse(identifier: &str, text: &str) -> Result<Self, CatalogError> {
        let context = format!("descriptor for '{}'", identifier);
        let value: Value =
            serde_json::from_str(text).map_err(|e| CatalogError::parse(context.as_str(), e))?;
        let map = value
            .as_object()
            .ok_or_else(|| CatalogError::parse(context.as_str(), "expected a JSON object"))?;

        Ok(Self {
            name: string_field(map, "name").unwrap_or(identifier).to_string(),
            maintainer: string_field(map, "maintainer")
                .unwrap_or(config::devices::UNKNOWN_MAINTAINER)
                .to_string(),
            status: Status::from_descriptor(string_field(map, "status")),
            image_url: string_field(map, "image").map(str::to_string),
            description: string_field(map, "description").map(str::to_string),
        })
    }
}

/// Normalized device record shown in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Remote directory name; stable key
    pub identifier: String,
    pub display_name: String,
    pub maintainer: String,
    pub status: Status,
    pub image_url: Option<String>,
}

impl Device {
    pub fn from_descriptor(identifier: &str, descriptor: DeviceDescriptor) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: descriptor.name,
            maintainer: descriptor.maintainer,
            status: descriptor.status,
            image_url: descriptor.image_url,
        }
    }

    pub fn manufacturer(&self) -> &str {
        manufacturer_key(&self.display_name)
    }
}

/// First whitespace-delimited token of a display name, or `"Other"`
pub fn manufacturer_key(display_name: &str) -> &str {
    display_name
        .split_whitespace()
        .next()
        .unwrap_or(config::devices::OTHER_MANUFACTURER)
}

/// Devices sharing a manufacturer key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub manufacturer: String,
    pub devices: Vec<Device>,
}

/// Grouped, sorted view of every device that could be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    groups: Vec<DeviceGroup>,
    built_at: DateTime<Utc>,
}

impl Catalog {
    pub(crate) fn new(groups: Vec<DeviceGroup>) -> Self {
        Self {
            groups,
            built_at: Utc::now(),
        }
    }

    pub fn groups(&self) -> &[DeviceGroup] {
        &self.groups
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn device_count(&self) -> usize {
        self.groups.iter().map(|g| g.devices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.groups.iter().flat_map(|g| g.devices.iter())
    }

    pub fn find(&self, identifier: &str) -> Option<&Device> {
        self.devices().find(|d| d.identifier == identifier)
    }
}

/// Everything the single-device view needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDetail {
    pub device: Device,
    pub description: Option<String>,
    pub notes: String,
    pub download_url: String,
}
