//! Catalog builder
//!
//! Groups devices by manufacturer key and sorts the result.

use std::cmp::Ordering;

use indexmap::IndexMap;

use super::models::{Catalog, Device, DeviceGroup};

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Group `devices` into a [`Catalog`]
///
/// Groups are ordered by manufacturer key, case-insensitively. Devices within
/// a group are ordered by display name, then identifier, so the output does
/// not depend on the order fetches completed in.
pub fn build(devices: Vec<Device>) -> Catalog {
    let mut groups: IndexMap<String, Vec<Device>> = IndexMap::new();

    for device in devices {
        groups
            .entry(device.manufacturer().to_string())
            .or_default()
            .push(device);
    }

    let mut groups: Vec<DeviceGroup> = groups
        .into_iter()
        .map(|(manufacturer, mut devices)| {
            devices.sort_by(|a, b| {
                compare_case_insensitive(&a.display_name, &b.display_name)
                    .then_with(|| a.identifier.cmp(&b.identifier))
            });
            DeviceGroup {
                manufacturer,
                devices,
            }
        })
        .collect();

    groups.sort_by(|a, b| compare_case_insensitive(&a.manufacturer, &b.manufacturer));
    Catalog::new(groups)
}
