//! Tokenization and word frequency aggregation

use crate::config::Normalization;
use crate::error::{Error, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A word and the number of times it occurred
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    /// Normalized word
    pub word: String,
    /// Occurrences, at least 1
    pub count: usize,
}

impl WordEntry {
    /// Create an entry
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Normalize one whitespace-separated piece of text
///
/// Returns an empty string when nothing of the piece survives. Applying the
/// function to its own output returns the output unchanged.
pub fn normalize_token(piece: &str, normalization: Normalization) -> String {
    let lowered = piece.to_lowercase();
    match normalization {
        Normalization::Alphanumeric => lowered
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect(),
        Normalization::AlphanumericHyphenApostrophe => {
            let kept: String = lowered
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '\''))
                .collect();
            let trimmed = kept.trim_matches(|c| matches!(c, '-' | '\''));
            if trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
                trimmed.to_string()
            } else {
                String::new()
            }
        }
    }
}

/// Word counts in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<WordEntry>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of an already normalized token
    pub fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push(WordEntry::new(token, 1));
            }
        }
    }

    /// Entry for `word`
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    /// Occurrences of `word`, zero when absent
    pub fn count(&self, word: &str) -> usize {
        self.get(word).map_or(0, |entry| entry.count)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no word has been counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Iterate entries in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, WordEntry> {
        self.entries.iter()
    }

    /// Take the entries out in first-seen order
    pub fn into_entries(self) -> Vec<WordEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a WordEntry;
    type IntoIter = std::slice::Iter<'a, WordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for FrequencyTable {
    type Item = WordEntry;
    type IntoIter = std::vec::IntoIter<WordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Extracts and counts words from one field of each record
#[derive(Debug, Clone)]
pub struct Tokenizer {
    field: String,
    normalization: Normalization,
}

impl Tokenizer {
    /// Create a tokenizer for `field`
    pub fn new(field: impl Into<String>, normalization: Normalization) -> Result<Self> {
        let field = field.into();
        if field.is_empty() {
            return Err(Error::InvalidArgument(
                "target field name must not be empty".into(),
            ));
        }
        Ok(Self {
            field,
            normalization,
        })
    }

    /// Field being tokenized
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Normalization policy in use
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Count the words of every record into a new table
    ///
    /// Records without the field contribute nothing.
    pub fn tally(&self, records: &[Record]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        let mut skipped = 0;

        for record in records {
            match record.get(&self.field) {
                Some(text) => self.tally_text(text, &mut table),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::debug!(
                "{skipped} of {} records have no '{}' field",
                records.len(),
                self.field
            );
        }
        table
    }

    /// Count the words of one piece of text into `table`
    pub fn tally_text(&self, text: &str, table: &mut FrequencyTable) {
        for piece in text.split_whitespace() {
            let token = normalize_token(piece, self.normalization);
            if !token.is_empty() {
                table.add(&token);
            }
        }
    }
}

/// Count the words found in `field` across `records`
pub fn extract_words(
    records: &[Record],
    field: &str,
    normalization: Normalization,
) -> Result<FrequencyTable> {
    Ok(Tokenizer::new(field, normalization)?.tally(records))
}
