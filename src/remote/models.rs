//! Remote content store wire models
//!
//! Shapes returned by the contents API for directory listings and files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Kind of a listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    #[serde(rename = "dir")]
    Directory,
    /// Symlinks, submodules and anything newer
    #[serde(other)]
    Other,
}

/// One item from the top-level listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl RemoteEntry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A single file as returned by the contents API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileContent {
    /// Wrap raw text the way the remote would serve it
    pub fn encode(text: &str) -> Self {
        Self {
            content: STANDARD.encode(text.as_bytes()),
            encoding: Some("base64".to_string()),
        }
    }

    /// Decode the base64 payload into UTF-8 text
    ///
    /// The contents API wraps base64 at 60 columns, so line breaks and other
    /// whitespace are dropped before decoding.
    pub fn decode_text(&self, context: &str) -> Result<String, CatalogError> {
        match self.encoding.as_deref() {
            None | Some("base64") => {}
            Some(other) => {
                return Err(CatalogError::parse(
                    context,
                    format!("unsupported encoding '{}'", other),
                ))
            }
        }

        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| CatalogError::parse(context, format!("invalid base64: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| CatalogError::parse(context, format!("invalid UTF-8: {}", e)))
    }
}
