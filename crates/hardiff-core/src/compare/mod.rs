//! Field comparator
//!
//! Compares two records section by section (general, headers, params,
//! payload, response headers, response body) and folds the section results
//! into one [`ComparisonResult`](crate::model::ComparisonResult).
//!
//! Exemptions are resolved once per pair from the left record's URL.

pub mod canonical;
mod json;
pub mod report;
mod sections;

pub use report::{DetailedComparisonReport, DifferenceKind, KeyDifference, SectionReport};

use crate::exemption::{resolve, ExemptionPolicy};
use crate::model::{Record, SectionKind};
use sections::BodySide;

/// Compare two records against an explicit policy snapshot
///
/// # Example
/// ```
/// use hardiff_core::compare::compare_records;
/// use hardiff_core::{ComparisonStatus, Record};
///
/// let a = Record::builder(1, "GET", "/foo").build();
/// let b = Record::builder(1, "GET", "/foo?q=1").build();
/// let report = compare_records(&a, &b, false, None);
///
/// assert_eq!(report.status(), ComparisonStatus::Partial);
/// assert_eq!(report.overall.detail, "Differences in: params");
/// ```
pub fn compare_records(
    left: &Record,
    right: &Record,
    keys_only: bool,
    policy: Option<&ExemptionPolicy>,
) -> DetailedComparisonReport {
    let exemptions = resolve(policy, &left.url);

    let (general, different) = sections::compare_general(left, right, keys_only);

    let sections = vec![
        general,
        sections::compare_headers(
            SectionKind::Headers,
            &left.request_headers,
            &right.request_headers,
            keys_only,
            &exemptions,
        ),
        sections::compare_params(&left.query_params, &right.query_params, keys_only),
        sections::compare_body(
            SectionKind::Payload,
            BodySide {
                record: left,
                body: left.request_body.as_deref(),
                content_type: left.request_header("content-type"),
            },
            BodySide {
                record: right,
                body: right.request_body.as_deref(),
                content_type: right.request_header("content-type"),
            },
            keys_only,
            &exemptions,
        ),
        sections::compare_headers(
            SectionKind::ResponseHeaders,
            &left.response_headers,
            &right.response_headers,
            keys_only,
            &exemptions,
        ),
        sections::compare_body(
            SectionKind::ResponseBody,
            BodySide {
                record: left,
                body: left.response_body.as_deref(),
                content_type: left.response_header("content-type"),
            },
            BodySide {
                record: right,
                body: right.response_body.as_deref(),
                content_type: right.response_header("content-type"),
            },
            keys_only,
            &exemptions,
        ),
    ];

    let overall = report::aggregate(&sections, different, keys_only);

    DetailedComparisonReport {
        left_index: left.sequence_index,
        right_index: right.sequence_index,
        keys_only,
        overall,
        sections,
        raw_request_left: canonical::format_raw_request(left),
        raw_request_right: canonical::format_raw_request(right),
    }
}
