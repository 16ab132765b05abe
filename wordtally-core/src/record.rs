//! Parsed rows keyed by header field names

use std::sync::Arc;

/// One data row of a delimited file
///
/// Field names are shared with every other record of the same parse. A
/// record produced from a truncated trailing row may hold fewer values than
/// there are fields; the missing fields are simply absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Create a record from shared field names and positional values
    ///
    /// Values beyond the number of fields are dropped.
    pub fn new(fields: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.truncate(fields.len());
        Self { fields, values }
    }

    /// Create a standalone record from `(field, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (fields, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self {
            fields: fields.into(),
            values,
        }
    }

    /// Value of `field`, if this record has it
    ///
    /// When the header repeats a name, the last column with that name wins.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields[..self.values.len()]
            .iter()
            .rposition(|name| name == field)
            .map(|i| self.values[i].as_str())
    }

    /// Whether `field` is present
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Number of values present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names in header order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Iterate `(field, value)` pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .zip(self.values.iter())
            .map(|(f, v)| (f.as_str(), v.as_str()))
    }
}
