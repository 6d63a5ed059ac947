//! Command handlers for the command-line front end
//!
//! Each handler drives one [`crate::DeviceCatalog`] query and renders the
//! result as text or JSON.

pub mod device_queries;

pub use device_queries::{device_link, list_devices, show_device, OutputFormat};
