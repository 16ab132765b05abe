//! Frequency ranking

use crate::tokenizer::{FrequencyTable, WordEntry};

/// Sort entries by count, highest first
///
/// The sort is stable: words with equal counts keep their incoming order,
/// which is first-seen order for entries coming out of a [`FrequencyTable`].
pub fn rank_words(mut entries: Vec<WordEntry>) -> Vec<WordEntry> {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Rank every entry of a table
pub fn rank_table(table: FrequencyTable) -> Vec<WordEntry> {
    rank_words(table.into_entries())
}
