use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a single page operation.
///
/// These are never fatal to a run: the extractor skips the element or selector
/// that produced them and the runner turns navigation failures into sentinel rows.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Navigation timeout of {0}ms exceeded")]
    Timeout(u64),

    #[error("Query for '{selector}' failed: {reason}")]
    Query { selector: String, reason: String },

    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Unexpected value from page: {0}")]
    UnexpectedValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that abort a whole validation run
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("No URLs found in the URL list")]
    NoUrls,

    #[error("Failed to launch browser: {0}")]
    BrowserLaunch(String),

    #[error("Invalid component table: {0}")]
    Components(String),

    #[error("Failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Reasons the URL list could not be loaded; always recovered with fallback URLs
#[derive(Error, Debug)]
pub enum UrlSourceError {
    #[error("JSON file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL list: {0}")]
    Parse(#[from] serde_json::Error),
}
