//! Remote content store
//!
//! The [`ContentStore`] trait is the seam between catalog logic and the
//! network. [`GithubContents`] talks to a GitHub-style contents API; tests
//! substitute a scripted in-memory store.

mod github;
mod models;

#[cfg(test)]
pub(crate) mod scripted;

pub use github::GithubContents;
pub use models::{EntryKind, FileContent, RemoteEntry};

use async_trait::async_trait;

use crate::error::CatalogError;

/// Read-only access to a hosted content tree
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Entries at the root of the tree
    async fn list_root(&self) -> Result<Vec<RemoteEntry>, CatalogError>;

    /// One file, still encoded as served
    async fn read_file(&self, path: &str) -> Result<FileContent, CatalogError>;
}
