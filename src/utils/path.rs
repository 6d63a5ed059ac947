//! Path utility functions
//!
//! Builds contents-API paths and download links from device identifiers.

use url::Url;

use crate::error::CatalogError;

/// Join a contents-API base with a path below `contents/`
///
/// Each `/`-separated segment of `path` is percent-encoded, so identifiers
/// holding `#`, `?` or spaces stay inside the path.
///
/// # Arguments
/// * `base` - API root, with or without a trailing slash
/// * `path` - Path relative to the contents root (empty for the listing)
pub fn contents_url(base: &str, path: &str) -> Result<Url, CatalogError> {
    let mut url = Url::parse(base)
        .map_err(|e| CatalogError::Config(format!("invalid contents base URL '{}': {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| CatalogError::Config(format!("contents base URL '{}' cannot hold a path", base)))?
        .pop_if_empty()
        .push("contents")
        .extend(path.trim_start_matches('/').split('/'));

    Ok(url)
}

/// `{id}/{id}.json`
pub fn descriptor_path(identifier: &str) -> String {
    format!("{0}/{0}.json", identifier)
}

/// `{id}/{id}.md`
pub fn notes_path(identifier: &str) -> String {
    format!("{0}/{0}.md", identifier)
}

/// Mirror download link for a device: `{mirror}/{id}/`
pub fn download_url(mirror_base: &str, identifier: &str) -> String {
    format!("{}/{}/", mirror_base.trim_end_matches('/'), identifier)
}

/// Identifiers are single path segments of the remote tree
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.trim().is_empty()
        && !identifier.contains('/')
        && !identifier.contains('\\')
        && !identifier.contains("..")
}
