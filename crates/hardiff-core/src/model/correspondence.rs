use serde::{Deserialize, Serialize};

use super::comparison::ComparisonResult;

/// One entry of an alignment: a record from log A, from log B, or both
///
/// Indices are the records' `sequence_index` values. The constructors keep
/// the invariant that at least one side is present and that placeholders
/// (one side only) never carry a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondence {
    left_index: Option<usize>,
    right_index: Option<usize>,
    result: Option<ComparisonResult>,
}

impl Correspondence {
    /// A matched pair
    pub fn paired(left_index: usize, right_index: usize, result: ComparisonResult) -> Self {
        Self {
            left_index: Some(left_index),
            right_index: Some(right_index),
            result: Some(result),
        }
    }

    /// A record present only in log A
    pub fn left_only(left_index: usize) -> Self {
        Self {
            left_index: Some(left_index),
            right_index: None,
            result: None,
        }
    }

    /// A record present only in log B
    pub fn right_only(right_index: usize) -> Self {
        Self {
            left_index: None,
            right_index: Some(right_index),
            result: None,
        }
    }

    pub fn left_index(&self) -> Option<usize> {
        self.left_index
    }

    pub fn right_index(&self) -> Option<usize> {
        self.right_index
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        self.result.as_ref()
    }

    pub fn is_paired(&self) -> bool {
        self.left_index.is_some() && self.right_index.is_some()
    }

    pub fn is_placeholder(&self) -> bool {
        !self.is_paired()
    }
}
