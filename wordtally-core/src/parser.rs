//! Delimited-record parsing over a stream of text chunks
//!
//! The first row of the stream is the header. Every later row is split on the
//! column delimiter and zipped with the header into a [`Record`]. Rows may be
//! cut anywhere by chunk boundaries; the unterminated tail of each chunk is
//! carried over and completed by the next one.
//!
//! A terminated row with fewer columns than the header is treated as a
//! fragment: it is held back and the following row is appended to it before
//! the column count is checked again. A mid-file row that lacks trailing
//! columns, or a response containing a line break, therefore ends up glued
//! onto the start of the next row's first column.

use crate::config::{ParserOptions, TrailingRowPolicy};
use crate::error::{Error, Result};
use crate::record::Record;
use regex::Regex;
use std::sync::Arc;

/// Characters removed from every row before splitting
fn is_invalid_char(c: char) -> bool {
    matches!(c, '\u{FFFD}' | '\0' | '\r' | '\n')
}

fn split_columns(delimiter: &Regex, row: &str) -> Vec<String> {
    if row.is_empty() {
        return vec![String::new()];
    }
    delimiter.split(row).map(String::from).collect()
}

/// Incremental parser turning text chunks into records
#[derive(Debug)]
pub struct RecordParser {
    options: ParserOptions,
    /// Field names from the first row
    header: Option<Arc<[String]>>,
    /// Unterminated text after the last row delimiter
    carry: String,
    /// Prefix of `carry` already searched without finding a row delimiter
    scanned: usize,
    /// Cleaned fragment of a row that had too few columns
    pending: String,
    /// Terminated rows consumed so far, header included
    rows_seen: usize,
    /// Rows that were held back as fragments
    deferred: usize,
}

impl RecordParser {
    /// Create a parser
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            header: None,
            carry: String::new(),
            scanned: 0,
            pending: String::new(),
            rows_seen: 0,
            deferred: 0,
        }
    }

    /// Field names, once the header row has been read
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Number of terminated rows consumed, header included
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Number of rows held back for having too few columns
    pub fn deferred_rows(&self) -> usize {
        self.deferred
    }

    /// Feed the next chunk and return the records it completed
    pub fn push_chunk(&mut self, chunk: &str) -> Vec<Record> {
        self.carry.push_str(chunk);

        let Some(end) = self.last_row_end() else {
            self.scanned = self.carry.len();
            return Vec::new();
        };

        let buffered = std::mem::take(&mut self.carry);
        let (terminated, rest) = buffered.split_at(end);
        // Moved out while rows are accepted, which needs `&mut self`
        let delimiter = std::mem::take(&mut self.options.row_delimiter);

        let mut records = Vec::new();
        for row in terminated.split(delimiter.as_str()) {
            self.rows_seen += 1;
            if let Some(record) = self.accept_row(row) {
                records.push(record);
            }
        }

        self.carry = rest[delimiter.len()..].to_string();
        self.scanned = self.carry.len();
        self.options.row_delimiter = delimiter;
        records
    }

    /// Start of the last row delimiter in `carry`, searching only new text
    fn last_row_end(&self) -> Option<usize> {
        let delimiter = self.options.row_delimiter.as_str();
        // A delimiter may straddle the previously searched prefix
        let mut start = self.scanned.saturating_sub(delimiter.len().saturating_sub(1));
        while !self.carry.is_char_boundary(start) {
            start -= 1;
        }
        self.carry[start..].rfind(delimiter).map(|i| start + i)
    }

    /// Resolve whatever is left at the end of the stream
    ///
    /// A final row without a terminator is returned when it has all columns.
    /// A truncated one is handled by the configured [`TrailingRowPolicy`].
    pub fn finish(mut self) -> Result<Option<Record>> {
        let mut remainder = std::mem::take(&mut self.pending);
        remainder.extend(self.carry.chars().filter(|c| !is_invalid_char(*c)));

        if remainder.is_empty() {
            return Ok(None);
        }

        let columns = split_columns(&self.options.column_delimiter, &remainder);
        let Some(header) = self.header.take() else {
            log::debug!("input holds a header row only");
            return Ok(None);
        };

        if columns.len() >= header.len() {
            return Ok(Some(Record::new(header, columns)));
        }

        let row = self.rows_seen + usize::from(!self.carry.is_empty());
        match self.options.trailing_row {
            TrailingRowPolicy::Drop => {
                log::warn!(
                    "dropping truncated final row {row}: expected {} columns, found {}",
                    header.len(),
                    columns.len()
                );
                Ok(None)
            }
            TrailingRowPolicy::Emit => {
                log::debug!(
                    "emitting truncated final row {row} with {} of {} columns",
                    columns.len(),
                    header.len()
                );
                Ok(Some(Record::new(header, columns)))
            }
            TrailingRowPolicy::Error => Err(Error::Parse {
                row,
                reason: format!(
                    "truncated final row: expected {} columns, found {}",
                    header.len(),
                    columns.len()
                ),
            }),
        }
    }

    fn accept_row(&mut self, row: &str) -> Option<Record> {
        let mut cleaned = std::mem::take(&mut self.pending);
        cleaned.extend(row.chars().filter(|c| !is_invalid_char(*c)));

        let columns = split_columns(&self.options.column_delimiter, &cleaned);
        let Some(header) = &self.header else {
            let fields: Arc<[String]> = columns.into();
            log::debug!("header has {} fields", fields.len());
            self.header = Some(fields);
            return None;
        };

        if columns.len() < header.len() {
            log::trace!(
                "row {} has {} of {} columns, deferring",
                self.rows_seen,
                columns.len(),
                header.len()
            );
            self.deferred += 1;
            self.pending = cleaned;
            return None;
        }

        Some(Record::new(Arc::clone(header), columns))
    }
}

/// Parse a whole chunk sequence into records
///
/// The first chunk error aborts the parse; no partial record list is
/// returned.
pub fn parse_chunks<I>(chunks: I, options: ParserOptions) -> Result<Vec<Record>>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut parser = RecordParser::new(options);
    let mut records = Vec::new();

    for chunk in chunks {
        records.extend(parser.push_chunk(&chunk?));
    }

    let rows_seen = parser.rows_seen();
    let deferred = parser.deferred_rows();
    records.extend(parser.finish()?);

    log::debug!(
        "parsed {} records from {} terminated rows ({} deferred)",
        records.len(),
        rows_seen,
        deferred
    );
    Ok(records)
}

/// Parse text that is already in memory
pub fn parse_str(text: &str, options: ParserOptions) -> Result<Vec<Record>> {
    parse_chunks(std::iter::once(Ok(text.to_string())), options)
}
