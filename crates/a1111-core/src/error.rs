//! Error types for the A1111 tooling.
//!
//! Recoverable data problems (a missing, empty or corrupt settings file) never
//! surface here; the merge procedure handles them by falling back to the
//! default table. What remains are filesystem failures, remote API failures
//! and argument validation.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for the A1111 tooling.
#[derive(Debug, Error)]
pub enum A1111Error {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{method} {url} returned HTTP {status}")]
    HttpStatus {
        method: &'static str,
        url: String,
        status: u16,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for A1111 operations.
pub type Result<T> = std::result::Result<T, A1111Error>;

impl From<std::io::Error> for A1111Error {
    fn from(err: std::io::Error) -> Self {
        A1111Error::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for A1111Error {
    fn from(err: serde_json::Error) -> Self {
        A1111Error::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl A1111Error {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        A1111Error::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Whether the failure came from talking to the remote web UI.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            A1111Error::Network { .. } | A1111Error::Timeout { .. } | A1111Error::HttpStatus { .. }
        )
    }
}
