//! Configuration module
//!
//! Every value is optional; anything missing falls back to the command line
//! flag or to the library default.

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wordtally_core::{Normalization, TrailingRowPolicy};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Input parsing configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Word processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Name of the column holding the response text
    pub field: Option<String>,

    /// Column delimiter pattern (regex)
    pub column_delimiter: Option<String>,

    /// Row delimiter
    pub row_delimiter: Option<String>,

    /// Read size (KB)
    pub chunk_kb: Option<usize>,

    /// Handling of a truncated final row
    pub trailing_row: Option<TrailingRowPolicy>,
}

/// Processing-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Token normalization policy
    pub normalization: Option<Normalization>,

    /// Stop-word file
    pub stop_words: Option<PathBuf>,

    /// Use the bundled stop-word list instead of a file
    pub builtin_stop_words: Option<bool>,

    /// Keep only this many ranked words
    pub top: Option<usize>,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub format: Option<OutputFormat>,

    /// Pretty print JSON output
    pub pretty_json: Option<bool>,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())).into())
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
