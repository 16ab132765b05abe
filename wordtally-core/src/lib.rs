//! Word frequency counting for delimited survey responses
//!
//! The library reads a delimited text file in chunks, reassembles rows that
//! straddle chunk boundaries, counts the normalized words of one field,
//! removes stop words and ranks what is left by frequency.
//!
//! # Example
//!
//! ```no_run
//! use wordtally_core::{Config, Pipeline, StopWordSource};
//!
//! let config = Config::builder()
//!     .target_field("Text Response")
//!     .stop_words(StopWordSource::Builtin)
//!     .top(Some(10))
//!     .build()?;
//!
//! let report = Pipeline::new(config).run_file("responses.tsv")?;
//! for entry in &report.words {
//!     println!("{}\t{}", entry.word, entry.count);
//! }
//! # Ok::<(), wordtally_core::Error>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod ranker;
pub mod reader;
pub mod record;
pub mod stopwords;
pub mod tokenizer;

use std::path::Path;

// Re-export key types
pub use config::{Config, ConfigBuilder, Normalization, ParserOptions, TrailingRowPolicy};
pub use error::{Error, Result};
pub use parser::{parse_chunks, parse_str, RecordParser};
pub use pipeline::{Pipeline, PipelineStats, Report};
pub use ranker::{rank_table, rank_words};
pub use reader::ChunkReader;
pub use record::Record;
pub use stopwords::{filter_stop_words, StopWordSet, StopWordSource};
pub use tokenizer::{extract_words, normalize_token, FrequencyTable, Tokenizer, WordEntry};

/// Count, filter and rank the words of a file in one call
pub fn count_words_in_file(path: impl AsRef<Path>, config: &Config) -> Result<Vec<WordEntry>> {
    Pipeline::new(config.clone())
        .run_file(path)
        .map(|report| report.words)
}
