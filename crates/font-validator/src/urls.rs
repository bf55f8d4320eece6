//! URL list loading
//!
//! The URL list is a JSON array of strings. A missing or malformed file never
//! aborts a run: the reader logs the problem and returns [`FALLBACK_URLS`].

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::UrlSourceError;

/// URLs validated when the URL file cannot be used
pub const FALLBACK_URLS: [&str; 2] = [
    "https://qawww.capella.edu/",
    "https://qawww.capella.edu/capella-experience/compare-learning-formats/",
];

/// Read the URL list, falling back to [`FALLBACK_URLS`] on any failure.
///
/// An empty but valid array is returned unchanged; deciding whether an empty
/// list is acceptable is left to the caller.
pub fn read_urls<P: AsRef<Path>>(path: P) -> Vec<String> {
    let path = path.as_ref();
    info!("Reading URLs from JSON file: {}", path.display());

    match load_urls(path) {
        Ok(urls) => {
            info!("Found {} URLs", urls.len());
            urls
        }
        Err(e) => {
            warn!("Error reading URLs: {}", e);
            warn!("Using default URLs as fallback");
            fallback_urls()
        }
    }
}

/// Strictly load the URL list, surfacing every failure
pub fn load_urls(path: &Path) -> Result<Vec<String>, UrlSourceError> {
    if !path.exists() {
        return Err(UrlSourceError::NotFound(path.to_path_buf()));
    }
    let data = fs::read_to_string(path).map_err(|source| UrlSourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

pub fn fallback_urls() -> Vec<String> {
    FALLBACK_URLS.iter().map(|u| u.to_string()).collect()
}
