//! Device Catalog - discover and group device descriptors
//!
//! Lists device directories in a remote content store, fetches each
//! device's JSON descriptor concurrently with rate-limit backoff, and
//! assembles a catalog grouped by manufacturer.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod remote;
pub mod retry;
pub mod utils;

pub use catalog::{Catalog, Device, DeviceCatalog, DeviceDetail, DeviceGroup, Status};
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use retry::RetryPolicy;
