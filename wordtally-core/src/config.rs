//! Pipeline configuration

use crate::error::{Error, Result};
use crate::stopwords::StopWordSource;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default configuration constants
pub mod defaults {
    /// Default read size in bytes (64KB)
    pub const CHUNK_SIZE: usize = 64 * 1024;

    /// Field holding the free-text answers in survey exports
    pub const TARGET_FIELD: &str = "Text Response";

    /// Column delimiter pattern (a literal tab)
    pub const COLUMN_DELIMITER: &str = r"\t";

    /// Row delimiter, the platform line terminator
    #[cfg(windows)]
    pub const ROW_DELIMITER: &str = "\r\n";

    /// Row delimiter, the platform line terminator
    #[cfg(not(windows))]
    pub const ROW_DELIMITER: &str = "\n";

    /// Stop-word list location, relative to the working directory
    pub const STOP_WORDS_PATH: &str = "stopwords.txt";
}

/// How raw whitespace-separated pieces become tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Lowercase and keep only ASCII letters and digits
    #[default]
    Alphanumeric,
    /// Like `Alphanumeric`, but inner hyphens and apostrophes survive
    AlphanumericHyphenApostrophe,
}

impl Normalization {
    /// Name used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Normalization::Alphanumeric => "alphanumeric",
            Normalization::AlphanumericHyphenApostrophe => "alphanumeric-hyphen-apostrophe",
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Normalization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alphanumeric" => Ok(Normalization::Alphanumeric),
            "alphanumeric-hyphen-apostrophe" => Ok(Normalization::AlphanumericHyphenApostrophe),
            other => Err(Error::InvalidArgument(format!(
                "unknown normalization policy '{other}'"
            ))),
        }
    }
}

/// What happens to a truncated row left over at the end of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingRowPolicy {
    /// Discard it and log a warning
    #[default]
    Drop,
    /// Emit it with only the columns that are present
    Emit,
    /// Fail the parse
    Error,
}

impl TrailingRowPolicy {
    /// Name used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailingRowPolicy::Drop => "drop",
            TrailingRowPolicy::Emit => "emit",
            TrailingRowPolicy::Error => "error",
        }
    }
}

impl fmt::Display for TrailingRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrailingRowPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(TrailingRowPolicy::Drop),
            "emit" => Ok(TrailingRowPolicy::Emit),
            "error" => Ok(TrailingRowPolicy::Error),
            other => Err(Error::InvalidArgument(format!(
                "unknown trailing row policy '{other}'"
            ))),
        }
    }
}

/// Settings the record parser needs
#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub(crate) column_delimiter: Regex,
    pub(crate) row_delimiter: String,
    pub(crate) trailing_row: TrailingRowPolicy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Config::default().parser_options()
    }
}

impl ParserOptions {
    /// Column delimiter pattern
    pub fn column_delimiter(&self) -> &Regex {
        &self.column_delimiter
    }

    /// Row delimiter
    pub fn row_delimiter(&self) -> &str {
        &self.row_delimiter
    }

    /// Trailing row policy
    pub fn trailing_row(&self) -> TrailingRowPolicy {
        self.trailing_row
    }
}

/// Processing configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) column_delimiter: Regex,
    pub(crate) row_delimiter: String,
    pub(crate) chunk_size: usize, // in bytes
    pub(crate) target_field: String,
    pub(crate) normalization: Normalization,
    pub(crate) trailing_row: TrailingRowPolicy,
    pub(crate) stop_words: StopWordSource,
    pub(crate) top: Option<usize>, // None = keep every ranked word
}

impl Default for Config {
    fn default() -> Self {
        Self {
            column_delimiter: default_column_delimiter(),
            row_delimiter: defaults::ROW_DELIMITER.to_string(),
            chunk_size: defaults::CHUNK_SIZE,
            target_field: defaults::TARGET_FIELD.to_string(),
            normalization: Normalization::default(),
            trailing_row: TrailingRowPolicy::default(),
            stop_words: StopWordSource::default(),
            top: None,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Column delimiter pattern
    pub fn column_delimiter(&self) -> &Regex {
        &self.column_delimiter
    }

    /// Row delimiter
    pub fn row_delimiter(&self) -> &str {
        &self.row_delimiter
    }

    /// Read size in bytes
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Field whose text is tokenized
    pub fn target_field(&self) -> &str {
        &self.target_field
    }

    /// Token normalization policy
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Trailing row policy
    pub fn trailing_row(&self) -> TrailingRowPolicy {
        self.trailing_row
    }

    /// Where stop words are loaded from
    pub fn stop_words(&self) -> &StopWordSource {
        &self.stop_words
    }

    /// Maximum number of ranked words to keep
    pub fn top(&self) -> Option<usize> {
        self.top
    }

    /// Options for the record parser
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            column_delimiter: self.column_delimiter.clone(),
            row_delimiter: self.row_delimiter.clone(),
            trailing_row: self.trailing_row,
        }
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    column_delimiter: Option<String>,
    row_delimiter: Option<String>,
    chunk_size: Option<usize>,
    target_field: Option<String>,
    normalization: Option<Normalization>,
    trailing_row: Option<TrailingRowPolicy>,
    stop_words: Option<StopWordSource>,
    top: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column delimiter as a regular expression
    pub fn column_delimiter(mut self, pattern: impl Into<String>) -> Self {
        self.column_delimiter = Some(pattern.into());
        self
    }

    /// Set the literal row delimiter
    pub fn row_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.row_delimiter = Some(delimiter.into());
        self
    }

    /// Set the read size in bytes
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the field whose text is tokenized
    pub fn target_field(mut self, field: impl Into<String>) -> Self {
        self.target_field = Some(field.into());
        self
    }

    /// Set the token normalization policy
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = Some(normalization);
        self
    }

    /// Set the trailing row policy
    pub fn trailing_row(mut self, policy: TrailingRowPolicy) -> Self {
        self.trailing_row = Some(policy);
        self
    }

    /// Set the stop-word source
    pub fn stop_words(mut self, source: StopWordSource) -> Self {
        self.stop_words = Some(source);
        self
    }

    /// Keep only the `count` highest ranked words (None = keep all)
    pub fn top(mut self, count: Option<usize>) -> Self {
        self.top = count;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(pattern) = self.column_delimiter {
            config.column_delimiter = compile_column_delimiter(&pattern)?;
        }

        if let Some(delimiter) = self.row_delimiter {
            if delimiter.is_empty() {
                return Err(Error::InvalidArgument(
                    "row delimiter must not be empty".into(),
                ));
            }
            config.row_delimiter = delimiter;
        }

        if let Some(size) = self.chunk_size {
            if size == 0 {
                return Err(Error::InvalidArgument(
                    "chunk_size must be greater than 0".into(),
                ));
            }
            config.chunk_size = size;
        }

        if let Some(field) = self.target_field {
            if field.is_empty() {
                return Err(Error::InvalidArgument(
                    "target field name must not be empty".into(),
                ));
            }
            config.target_field = field;
        }

        if let Some(normalization) = self.normalization {
            config.normalization = normalization;
        }

        if let Some(policy) = self.trailing_row {
            config.trailing_row = policy;
        }

        if let Some(source) = self.stop_words {
            config.stop_words = source;
        }

        if let Some(top) = self.top {
            if top == 0 {
                return Err(Error::InvalidArgument("top must be greater than 0".into()));
            }
            config.top = Some(top);
        }

        Ok(config)
    }
}

fn compile_column_delimiter(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern).map_err(|e| {
        Error::InvalidArgument(format!("invalid column delimiter '{pattern}': {e}"))
    })?;

    // A pattern matching the empty string would split between every character
    if regex.is_match("") {
        return Err(Error::InvalidArgument(format!(
            "column delimiter '{pattern}' matches the empty string"
        )));
    }

    Ok(regex)
}

fn default_column_delimiter() -> Regex {
    Regex::new(defaults::COLUMN_DELIMITER).expect("default column delimiter should compile")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chunk_size(), defaults::CHUNK_SIZE);
        assert_eq!(config.target_field(), "Text Response");
        assert_eq!(config.row_delimiter(), defaults::ROW_DELIMITER);
        assert_eq!(config.normalization(), Normalization::Alphanumeric);
        assert_eq!(config.trailing_row(), TrailingRowPolicy::Drop);
        assert_eq!(
            config.stop_words(),
            &StopWordSource::File(PathBuf::from("stopwords.txt"))
        );
        assert!(config.top().is_none());
        assert!(config.column_delimiter().is_match("a\tb"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .column_delimiter(",")
            .row_delimiter("\r\n")
            .chunk_size(16)
            .target_field("Comment")
            .normalization(Normalization::AlphanumericHyphenApostrophe)
            .trailing_row(TrailingRowPolicy::Emit)
            .stop_words(StopWordSource::Builtin)
            .top(Some(10))
            .build()
            .unwrap();

        assert!(config.column_delimiter().is_match("a,b"));
        assert_eq!(config.row_delimiter(), "\r\n");
        assert_eq!(config.chunk_size(), 16);
        assert_eq!(config.target_field(), "Comment");
        assert_eq!(
            config.normalization(),
            Normalization::AlphanumericHyphenApostrophe
        );
        assert_eq!(config.trailing_row(), TrailingRowPolicy::Emit);
        assert_eq!(config.stop_words(), &StopWordSource::Builtin);
        assert_eq!(config.top(), Some(10));
    }

    #[test]
    fn test_builder_rejects_zero_chunk_size() {
        let result = Config::builder().chunk_size(0).build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_builder_rejects_empty_row_delimiter() {
        let result = Config::builder().row_delimiter("").build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_builder_rejects_empty_target_field() {
        let result = Config::builder().target_field("").build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_builder_rejects_bad_column_pattern() {
        let result = Config::builder().column_delimiter("[").build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result = Config::builder().column_delimiter(r"\s*").build();
        match result {
            Err(Error::InvalidArgument(msg)) => assert!(msg.contains("empty string")),
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_rejects_zero_top() {
        let result = Config::builder().top(Some(0)).build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_parser_options_follow_config() {
        let config = Config::builder()
            .column_delimiter(";")
            .row_delimiter("|")
            .trailing_row(TrailingRowPolicy::Error)
            .build()
            .unwrap();
        let options = config.parser_options();
        assert!(options.column_delimiter().is_match(";"));
        assert_eq!(options.row_delimiter(), "|");
        assert_eq!(options.trailing_row(), TrailingRowPolicy::Error);
    }

    #[test]
    fn test_policy_names_round_trip() {
        for policy in [
            TrailingRowPolicy::Drop,
            TrailingRowPolicy::Emit,
            TrailingRowPolicy::Error,
        ] {
            assert_eq!(policy.as_str().parse::<TrailingRowPolicy>().unwrap(), policy);
        }
        for normalization in [
            Normalization::Alphanumeric,
            Normalization::AlphanumericHyphenApostrophe,
        ] {
            assert_eq!(
                normalization.to_string().parse::<Normalization>().unwrap(),
                normalization
            );
        }
        assert!("sometimes".parse::<TrailingRowPolicy>().is_err());
        assert!("stemmed".parse::<Normalization>().is_err());
    }
}
