//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Required command-line argument was not given
    MissingArgument(String),
    /// Input file does not exist
    FileNotFound(String),
    /// Input file exists but cannot be read
    PermissionDenied(String),
    /// Input path is not something we can process
    InvalidInput(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingArgument(msg) => write!(f, "{msg}"),
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::PermissionDenied(path) => write!(f, "Permission denied: {path}"),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

/// Exit status for an error returned by a command
///
/// Malformed input content exits with 2; every other failure exits with 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let is_parse_error = err.chain().any(|cause| {
        cause
            .downcast_ref::<wordtally_core::Error>()
            .is_some_and(wordtally_core::Error::is_parse_error)
    });

    if is_parse_error {
        2
    } else {
        1
    }
}
