//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use wordtally_core::WordEntry;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single ranked word
    fn format_entry(&mut self, rank: usize, entry: &WordEntry) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `word<TAB>count` line per word
    #[default]
    Text,
    /// JSON array of ranked words
    Json,
    /// Markdown table
    Markdown,
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter<W>(format: OutputFormat, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

/// Write ranked entries through `formatter`, numbering them from 1
pub fn write_ranked(formatter: &mut dyn OutputFormatter, entries: &[WordEntry]) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        formatter.format_entry(i + 1, entry)?;
    }
    formatter.finish()
}
