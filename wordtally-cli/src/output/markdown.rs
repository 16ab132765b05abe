//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use wordtally_core::WordEntry;

/// Markdown formatter - outputs ranked words as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    word_count: usize,
    occurrences: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            word_count: 0,
            occurrences: 0,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "| Rank | Word | Count |")?;
        writeln!(self.writer, "|-----:|------|------:|")?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_entry(&mut self, rank: usize, entry: &WordEntry) -> Result<()> {
        if self.word_count == 0 {
            self.write_header()?;
        }
        self.word_count += 1;
        self.occurrences += entry.count;
        writeln!(self.writer, "| {} | {} | {} |", rank, entry.word, entry.count)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.word_count == 0 {
            self.write_header()?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total words: {} ({} occurrences)*",
            self.word_count, self.occurrences
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
