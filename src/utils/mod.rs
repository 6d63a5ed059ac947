//! Utility functions shared across the application
//!
//! This module contains common helpers for remote path construction
//! and human-readable formatting.

mod format;
mod path;

pub use format::*;
pub use path::*;
