//! Formatting utilities for human-readable output
//!
//! Provides consistent formatting functions for the command-line front end.

use crate::catalog::{Device, Status};

/// Short marker shown next to a device's status
pub fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Official => "[+]",
        Status::Unofficial => "[~]",
        Status::Discontinued => "[x]",
    }
}

/// `[+] official`
pub fn format_status(status: Status) -> String {
    format!("{} {}", status_marker(status), status)
}

/// `"1 device"`, `"3 devices"`
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// One catalog row: name, identifier, maintainer and status
pub fn format_device_line(device: &Device) -> String {
    format!(
        "{} ({}) - maintained by {} {}",
        device.display_name,
        device.identifier,
        device.maintainer,
        format_status(device.status)
    )
}
