//! Error types for the harvester
//!
//! `Error` covers setup problems (configuration, HTTP client construction).
//! `FetchError` is the per-artifact taxonomy: every variant is local to one
//! download attempt and never aborts a run.

use std::path::PathBuf;
use thiserror::Error;

/// Setup and configuration errors
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors (reading a config file, creating directories)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result alias for setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a single artifact download was abandoned
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL has no path segment that survives normalization
    #[error("no usable filename in {0}")]
    EmptyFilename(String),

    /// Connection, transport or body read failure
    #[error("failed to download {url}: {source}")]
    Network {
        /// Artifact URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Any status other than 200
    #[error("download failed for {url}: {status}")]
    Status {
        /// Artifact URL
        url: String,
        /// Status the server answered with
        status: reqwest::StatusCode,
    },

    /// Declared content type is not on the kind's whitelist
    #[error("invalid content type for {url}: {content_type:?} (expected {expected})")]
    ContentTypeMismatch {
        /// Artifact URL
        url: String,
        /// Content-Type header as received (empty when absent)
        content_type: String,
        /// Human-readable whitelist
        expected: String,
    },

    /// 200 response with nothing in it
    #[error("downloaded 0 bytes for {0}; not creating file")]
    EmptyBody(String),

    /// Creating or writing the destination file failed
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
