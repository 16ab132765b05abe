//! Error types for the word counting pipeline

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for pipeline operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The path that could not be found
        path: PathBuf,
    },

    /// Input path exists but cannot be read
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be read
        path: PathBuf,
    },

    /// Read failure while streaming input
    #[error("I/O error while reading {origin}: {source}")]
    Io {
        /// Description of what was being read
        origin: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Malformed delimited content
    #[error("parse error at row {row}: {reason}")]
    Parse {
        /// 1-based row number in the input, header included
        row: usize,
        /// Why the row was rejected
        reason: String,
    },

    /// Stop-word list could not be loaded
    #[error("stop-word resource unavailable: {}", path.display())]
    ResourceUnavailable {
        /// Location of the stop-word list
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Wrong input shape handed to a pipeline stage
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Map an error raised while opening `path` to the matching variant
    pub(crate) fn from_open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Error::Io {
                origin: path.display().to_string(),
                source: err,
            },
        }
    }

    /// Whether this error came from malformed input content
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
