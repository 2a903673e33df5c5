//! Record equivalence key
//!
//! Two records may correspond when their methods match case-insensitively and
//! their paths match. For GET requests only the part of the path before the
//! first `?` takes part; the query string is still compared later as a field.

use crate::model::record::{strip_query, Record};

/// Key under which records are grouped and matched by both aligners
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EquivalenceKey {
    method: String,
    path: String,
}

impl EquivalenceKey {
    pub fn of(record: &Record) -> Self {
        let method = record.method.to_ascii_uppercase();
        let path = if method == "GET" {
            strip_query(&record.path)
        } else {
            record.path.as_str()
        };
        Self {
            path: path.to_string(),
            method,
        }
    }

    /// Upper-cased method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Normalised path
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for EquivalenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Compute the key of every record, in order
pub(crate) fn keys_of(records: &[Record]) -> Vec<EquivalenceKey> {
    records.iter().map(EquivalenceKey::of).collect()
}
