//! Stop-word loading and filtering
//!
//! The stop-word list is read again on every filtering call; nothing is
//! cached between calls.

use crate::config::{defaults, Normalization};
use crate::error::{Error, Result};
use crate::reader::ChunkReader;
use crate::tokenizer::{normalize_token, FrequencyTable, WordEntry};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// English stop words compiled into the library
const BUILTIN_STOP_WORDS: &str = include_str!("../resources/stopwords.txt");

/// Read size used when loading a stop-word file
const STOP_WORD_CHUNK_SIZE: usize = 8 * 1024;

/// Where the stop-word list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopWordSource {
    /// Newline-delimited file
    File(PathBuf),
    /// The list bundled with the library
    Builtin,
}

impl Default for StopWordSource {
    fn default() -> Self {
        StopWordSource::File(PathBuf::from(defaults::STOP_WORDS_PATH))
    }
}

impl StopWordSource {
    /// Create a file source
    pub fn file(path: impl AsRef<Path>) -> Self {
        StopWordSource::File(path.as_ref().to_path_buf())
    }

    /// Human-readable description
    pub fn display_name(&self) -> String {
        match self {
            StopWordSource::File(path) => path.display().to_string(),
            StopWordSource::Builtin => "built-in list".to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            StopWordSource::Builtin => Ok(BUILTIN_STOP_WORDS.to_string()),
            StopWordSource::File(path) => ChunkReader::open(path, STOP_WORD_CHUNK_SIZE)
                .and_then(ChunkReader::read_to_string)
                .map_err(|e| Error::ResourceUnavailable {
                    path: path.clone(),
                    source: Box::new(e),
                }),
        }
    }
}

/// Set of normalized stop words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Load and normalize the list from `source`
    pub fn load(source: &StopWordSource, normalization: Normalization) -> Result<Self> {
        let set = Self::from_text(&source.read()?, normalization);
        log::debug!(
            "loaded {} stop words from {}",
            set.len(),
            source.display_name()
        );
        Ok(set)
    }

    /// Build a set from newline-delimited text
    ///
    /// Lines are trimmed and lowercased, then matched exactly. A line that
    /// `normalization` would rewrite (such as "we'll" under the alphanumeric
    /// policy) can never equal a token and is skipped, so it cannot remove an
    /// unrelated word like "well".
    pub fn from_text(text: &str, normalization: Normalization) -> Self {
        let words = text
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|word| !word.is_empty() && normalize_token(word, normalization) == *word)
            .collect();
        Self { words }
    }

    /// Whether `word` is a stop word
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Keep the entries that are not stop words, preserving their order
    pub fn filter<I>(&self, entries: I) -> Vec<WordEntry>
    where
        I: IntoIterator<Item = WordEntry>,
    {
        entries
            .into_iter()
            .filter(|entry| !self.contains(&entry.word))
            .collect()
    }
}

/// Remove stop words from a frequency table
///
/// The list is loaded from `source` for this call only. A source that cannot
/// be read fails with [`Error::ResourceUnavailable`].
pub fn filter_stop_words(
    table: FrequencyTable,
    source: &StopWordSource,
    normalization: Normalization,
) -> Result<Vec<WordEntry>> {
    let stop_words = StopWordSet::load(source, normalization)?;
    let before = table.len();
    let kept = stop_words.filter(table);
    log::debug!("removed {} stop words", before - kept.len());
    Ok(kept)
}
