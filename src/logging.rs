//! Logging
//!
//! Module-tagged logging macros backed by `tracing`, and the subscriber
//! setup used by the binary.

use once_cell::sync::OnceCell;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::config;

const DEFAULT_DIRECTIVE: &str = "info";
const DEBUG_DIRECTIVE: &str = "debug";

static FILTER_HANDLE: OnceCell<reload::Handle<EnvFilter, Registry>> = OnceCell::new();

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(config::app::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .is_ok();

    if installed {
        let _ = FILTER_HANDLE.set(handle);
    }
}

/// Switch between debug and info output at runtime
pub fn set_log_level(debug: bool) {
    let Some(handle) = FILTER_HANDLE.get() else {
        return;
    };
    let directive = if debug { DEBUG_DIRECTIVE } else { DEFAULT_DIRECTIVE };
    if let Err(e) = handle.reload(EnvFilter::new(directive)) {
        eprintln!("Failed to change log level: {}", e);
    }
}

#[macro_export]
macro_rules! log_info {
    ($module:expr, $($arg:tt)*) => {
        ::tracing::info!(module = %$module, "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($module:expr, $($arg:tt)*) => {
        ::tracing::warn!(module = %$module, "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($module:expr, $($arg:tt)*) => {
        ::tracing::error!(module = %$module, "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($module:expr, $($arg:tt)*) => {
        ::tracing::debug!(module = %$module, "{}", format_args!($($arg)*))
    };
}
