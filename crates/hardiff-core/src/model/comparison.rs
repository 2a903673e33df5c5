use serde::{Deserialize, Serialize};

/// Classification of a compared pair or section, ordered by severity
///
/// `Match < Exempted < Partial < Different`, so the overall status of a pair
/// is the maximum of its section statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    /// No differences
    Match,
    /// Every difference is covered by an exemption
    Exempted,
    /// Same method and path, but unexempted field differences
    Partial,
    /// Method or normalised path differ, or the pair could not be compared
    Different,
}

impl ComparisonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonStatus::Match => "match",
            ComparisonStatus::Exempted => "exempted",
            ComparisonStatus::Partial => "partial",
            ComparisonStatus::Different => "different",
        }
    }
}

impl std::fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus a human-readable summary of which sections differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub status: ComparisonStatus,
    pub detail: String,
}

impl ComparisonResult {
    pub fn new(status: ComparisonStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}
