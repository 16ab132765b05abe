//! Stage-by-stage driver for the word counting pipeline
//!
//! Each stage runs to completion and hands its owned output to the next:
//! records -> frequency table -> filtered entries -> ranked entries.

use crate::config::Config;
use crate::error::Result;
use crate::parser::parse_chunks;
use crate::ranker::rank_words;
use crate::reader::ChunkReader;
use crate::record::Record;
use crate::stopwords::filter_stop_words;
use crate::tokenizer::{FrequencyTable, Tokenizer, WordEntry};
use std::io::Read;
use std::path::Path;

/// Counts gathered while running the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Records parsed from the input
    pub records: usize,
    /// Tokens counted before filtering
    pub tokens: usize,
    /// Distinct words before filtering
    pub distinct_words: usize,
    /// Distinct words removed as stop words
    pub stop_words_removed: usize,
}

/// Ranked words with the statistics of the run that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Words sorted by count, highest first
    pub words: Vec<WordEntry>,
    /// Run statistics
    pub stats: PipelineStats,
}

/// Runs parsing, counting, filtering and ranking with one configuration
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a pipeline
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse records from a chunk sequence
    pub fn parse_chunks<I>(&self, chunks: I) -> Result<Vec<Record>>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        parse_chunks(chunks, self.config.parser_options())
    }

    /// Parse records from a file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Record>> {
        let reader = ChunkReader::open(path, self.config.chunk_size)?;
        self.parse_chunks(reader)
    }

    /// Parse records from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<Record>> {
        self.parse_chunks(ChunkReader::new(reader, self.config.chunk_size))
    }

    /// Count the words of the target field
    pub fn tally(&self, records: &[Record]) -> Result<FrequencyTable> {
        let tokenizer = Tokenizer::new(&self.config.target_field, self.config.normalization)?;
        Ok(tokenizer.tally(records))
    }

    /// Remove stop words, reloading the configured list
    pub fn filter(&self, table: FrequencyTable) -> Result<Vec<WordEntry>> {
        filter_stop_words(table, &self.config.stop_words, self.config.normalization)
    }

    /// Rank entries and apply the configured limit
    pub fn rank(&self, entries: Vec<WordEntry>) -> Vec<WordEntry> {
        let mut ranked = rank_words(entries);
        if let Some(top) = self.config.top {
            ranked.truncate(top);
        }
        ranked
    }

    /// Count, filter and rank already parsed records
    pub fn process_records(&self, records: &[Record]) -> Result<Report> {
        let table = self.tally(records)?;
        let tokens = table.total_count();
        let distinct_words = table.len();

        let filtered = self.filter(table)?;
        let stop_words_removed = distinct_words - filtered.len();
        let words = self.rank(filtered);

        let stats = PipelineStats {
            records: records.len(),
            tokens,
            distinct_words,
            stop_words_removed,
        };
        log::info!(
            "{} records, {} tokens, {} distinct words, {} stop words removed",
            stats.records,
            stats.tokens,
            stats.distinct_words,
            stats.stop_words_removed
        );

        Ok(Report { words, stats })
    }

    /// Run every stage over a chunk sequence
    pub fn run_chunks<I>(&self, chunks: I) -> Result<Report>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let records = self.parse_chunks(chunks)?;
        self.process_records(&records)
    }

    /// Run every stage over a file
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<Report> {
        let records = self.parse_file(path)?;
        self.process_records(&records)
    }

    /// Run every stage over a reader
    pub fn run_reader<R: Read>(&self, reader: R) -> Result<Report> {
        let records = self.parse_reader(reader)?;
        self.process_records(&records)
    }
}
