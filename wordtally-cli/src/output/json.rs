//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use wordtally_core::WordEntry;

/// JSON formatter - outputs ranked words as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    words: Vec<RankedWordData>,
}

/// Data structure for JSON output
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWordData {
    /// 1-based position in the ranking
    pub rank: usize,
    /// The normalized word
    pub word: String,
    /// Occurrences across all responses
    pub count: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            words: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_entry(&mut self, rank: usize, entry: &WordEntry) -> Result<()> {
        self.words.push(RankedWordData {
            rank,
            word: entry.word.clone(),
            count: entry.count,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.words)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.words)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
