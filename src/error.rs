//! Error taxonomy for catalog operations.

use thiserror::Error;

/// Errors raised while talking to the content store or resolving devices.
///
/// Only [`CatalogError::RateLimited`] is retried. Everything else fails the
/// current operation immediately.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("rate limited by remote (HTTP {status}) at {url}")]
    RateLimited { status: u16, url: String },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("remote returned HTTP {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    #[error("device '{identifier}' not found: {reason}")]
    NotFound { identifier: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CatalogError {
    /// HTTP statuses the remote uses to signal throttling
    pub const RATE_LIMIT_STATUSES: [u16; 2] = [403, 429];

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CatalogError::RateLimited { .. })
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, url: impl Into<String>) -> Self {
        let url = url.into();
        if Self::RATE_LIMIT_STATUSES.contains(&status) {
            CatalogError::RateLimited { status, url }
        } else {
            CatalogError::UnexpectedStatus { status, url }
        }
    }

    pub fn parse(context: impl Into<String>, message: impl ToString) -> Self {
        CatalogError::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Collapse any failure into "cannot show this device"
    pub fn into_not_found(self, identifier: &str) -> Self {
        match self {
            CatalogError::NotFound { .. } => self,
            other => CatalogError::NotFound {
                identifier: identifier.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
