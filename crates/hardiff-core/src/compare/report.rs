//! Comparison report types and status aggregation

use serde::{Deserialize, Serialize};

use crate::model::{ComparisonResult, ComparisonStatus, SectionKind};

/// How a key differs between the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Present only on the right
    Added,
    /// Present only on the left
    Removed,
    /// Present on both sides with different values or shapes
    Changed,
}

/// One key-level difference within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDifference {
    /// Location within the section, e.g. `user.roles[1].name`
    pub path: String,
    /// Name used for exemption lookup
    pub key: String,
    pub kind: DifferenceKind,
    pub left: Option<String>,
    pub right: Option<String>,
    pub exempted: bool,
}

/// Result for one section of a compared pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: SectionKind,
    pub status: ComparisonStatus,
    pub differences: Vec<KeyDifference>,
    /// Canonical rendering of the left side
    pub left_content: String,
    /// Canonical rendering of the right side
    pub right_content: String,
    /// Recovered issues, such as a body that should have been JSON
    pub notes: Vec<String>,
}

impl SectionReport {
    /// Section status from its differences: none is Match, all exempted is
    /// Exempted, anything else is Partial
    pub(crate) fn status_for(differences: &[KeyDifference]) -> ComparisonStatus {
        if differences.is_empty() {
            ComparisonStatus::Match
        } else if differences.iter().all(|d| d.exempted) {
            ComparisonStatus::Exempted
        } else {
            ComparisonStatus::Partial
        }
    }

    /// Differences that count against the pair
    pub fn unexempted(&self) -> impl Iterator<Item = &KeyDifference> {
        self.differences.iter().filter(|d| !d.exempted)
    }
}

/// Full result of comparing two records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedComparisonReport {
    pub left_index: usize,
    pub right_index: usize,
    pub keys_only: bool,
    pub overall: ComparisonResult,
    /// One entry per section, in report order
    pub sections: Vec<SectionReport>,
    pub raw_request_left: String,
    pub raw_request_right: String,
}

impl DetailedComparisonReport {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.section == kind)
    }

    /// Status of one section; a section missing from the report is Match
    pub fn status_of(&self, kind: SectionKind) -> ComparisonStatus {
        self.section(kind)
            .map(|s| s.status)
            .unwrap_or(ComparisonStatus::Match)
    }

    pub fn status(&self) -> ComparisonStatus {
        self.overall.status
    }
}

/// Fold section results into the pair's overall result
///
/// `different_detail` is the reason the general section is Different, if it
/// is. The status is the worst section status.
pub(crate) fn aggregate(
    sections: &[SectionReport],
    different_detail: Option<String>,
    keys_only: bool,
) -> ComparisonResult {
    let status = sections
        .iter()
        .map(|s| s.status)
        .max()
        .unwrap_or(ComparisonStatus::Match);

    let names_with = |wanted: ComparisonStatus| -> Vec<&'static str> {
        sections
            .iter()
            .filter(|s| s.status == wanted)
            .map(|s| s.section.name())
            .collect()
    };

    let detail = match status {
        ComparisonStatus::Match if keys_only => "Keys match".to_string(),
        ComparisonStatus::Match => "Full match".to_string(),
        ComparisonStatus::Exempted => format!(
            "Exempted differences in: {}",
            names_with(ComparisonStatus::Exempted).join(", ")
        ),
        ComparisonStatus::Partial => {
            let mut detail = format!(
                "Differences in: {}",
                names_with(ComparisonStatus::Partial).join(", ")
            );
            let exempted = names_with(ComparisonStatus::Exempted);
            if !exempted.is_empty() {
                detail.push_str(&format!(" (exempted: {})", exempted.join(", ")));
            }
            detail
        }
        ComparisonStatus::Different => {
            different_detail.unwrap_or_else(|| "Records differ".to_string())
        }
    };

    ComparisonResult::new(status, detail)
}
