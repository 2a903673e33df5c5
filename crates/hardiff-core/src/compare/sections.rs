//! Per-section comparison
//!
//! Each function compares one section of a record pair and returns its
//! [`SectionReport`]. Exemption decisions come from the resolved set of the
//! left record.

use std::collections::{BTreeMap, BTreeSet};

use hardiff_core_types::schema;
use serde_json::Value;

use super::canonical;
use super::json::{self, JsonWalk};
use super::report::{DifferenceKind, KeyDifference, SectionReport};
use crate::errors::HarDiffError;
use crate::exemption::ResolvedExemptions;
use crate::key::EquivalenceKey;
use crate::log_recovered;
use crate::model::{ComparisonStatus, Record, SectionKind};

/// General section plus the reason it is Different, if it is
pub(crate) fn compare_general(
    left: &Record,
    right: &Record,
    keys_only: bool,
) -> (SectionReport, Option<String>) {
    let mut notes = Vec::new();
    let mut differences = Vec::new();
    let mut different: Option<String> = None;

    for (side, record) in [("left", left), ("right", right)] {
        if record.method.trim().is_empty() {
            let err = HarDiffError::MalformedRecord {
                sequence_index: record.sequence_index,
                reason: "empty method".to_string(),
            };
            notes.push(err.to_string());
            log_recovered!(warn, schema::OP_COMPARE_RECORDS, err, side = side);
            if different.is_none() {
                different = Some(format!(
                    "Record #{} in {} log has no method",
                    record.sequence_index, side
                ));
            }
        }
    }

    let left_key = EquivalenceKey::of(left);
    let right_key = EquivalenceKey::of(right);

    if left_key.method() != right_key.method() {
        differences.push(changed("method", &left.method, &right.method));
        if different.is_none() {
            different = Some(format!(
                "Different method: {} vs {}",
                left.method, right.method
            ));
        }
    }
    if left_key.path() != right_key.path() {
        differences.push(changed("path", left_key.path(), right_key.path()));
        if different.is_none() {
            different = Some(format!(
                "Different path: {} vs {}",
                left_key.path(),
                right_key.path()
            ));
        }
    }
    if !keys_only && left.response_status != right.response_status {
        differences.push(changed(
            "status",
            &left.response_status.to_string(),
            &right.response_status.to_string(),
        ));
    }

    let status = if different.is_some() {
        ComparisonStatus::Different
    } else {
        SectionReport::status_for(&differences)
    };

    let report = SectionReport {
        section: SectionKind::General,
        status,
        differences,
        left_content: canonical::format_general(left),
        right_content: canonical::format_general(right),
        notes,
    };
    (report, different)
}

fn changed(key: &str, left: &str, right: &str) -> KeyDifference {
    KeyDifference {
        path: key.to_string(),
        key: key.to_string(),
        kind: DifferenceKind::Changed,
        left: Some(left.to_string()),
        right: Some(right.to_string()),
        exempted: false,
    }
}

/// Request or response headers, matched by lowercased name
pub(crate) fn compare_headers(
    section: SectionKind,
    left: &BTreeMap<String, String>,
    right: &BTreeMap<String, String>,
    keys_only: bool,
    exemptions: &ResolvedExemptions<'_>,
) -> SectionReport {
    let mut notes = Vec::new();
    let left_lower = lowercase_names(section, "left", left, &mut notes);
    let right_lower = lowercase_names(section, "right", right, &mut notes);

    let differences = diff_maps(&left_lower, &right_lower, keys_only, |name| {
        exemptions.is_exempt(section, name)
    });

    SectionReport {
        section,
        status: SectionReport::status_for(&differences),
        differences,
        left_content: canonical::format_headers(left),
        right_content: canonical::format_headers(right),
        notes,
    }
}

/// Query parameters; never exemptible
pub(crate) fn compare_params(
    left: &BTreeMap<String, Vec<String>>,
    right: &BTreeMap<String, Vec<String>>,
    keys_only: bool,
) -> SectionReport {
    let left_joined = join_values(left);
    let right_joined = join_values(right);
    let differences = diff_maps(&left_joined, &right_joined, keys_only, |_| false);

    SectionReport {
        section: SectionKind::Params,
        status: SectionReport::status_for(&differences),
        differences,
        left_content: canonical::format_params(left),
        right_content: canonical::format_params(right),
        notes: Vec::new(),
    }
}

/// Headers keyed by lowercased name
///
/// Names that collide once lowercased have their values joined with `", "`
/// in stored-name order, and the collision is noted on the section.
fn lowercase_names(
    section: SectionKind,
    side: &str,
    headers: &BTreeMap<String, String>,
    notes: &mut Vec<String>,
) -> BTreeMap<String, String> {
    let mut grouped: BTreeMap<String, Vec<(&str, &str)>> = BTreeMap::new();
    for (name, value) in headers {
        grouped
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push((name.as_str(), value.as_str()));
    }

    grouped
        .into_iter()
        .map(|(lower, entries)| {
            if entries.len() > 1 {
                let names: Vec<&str> = entries.iter().map(|(n, _)| *n).collect();
                tracing::debug!(
                    op = schema::OP_COMPARE_RECORDS,
                    section = section.name(),
                    side = side,
                    header = %lower,
                    "Header names differ only by case, values joined"
                );
                notes.push(format!(
                    "{} {} differ only by case: {}",
                    side,
                    section.name(),
                    names.join(", ")
                ));
            }
            let values: Vec<&str> = entries.iter().map(|(_, v)| *v).collect();
            (lower, values.join(", "))
        })
        .collect()
}

fn join_values(params: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, String> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), v.join(", ")))
        .collect()
}

fn diff_maps<F>(
    left: &BTreeMap<String, String>,
    right: &BTreeMap<String, String>,
    keys_only: bool,
    is_exempt: F,
) -> Vec<KeyDifference>
where
    F: Fn(&str) -> bool,
{
    let names: BTreeSet<&String> = left.keys().chain(right.keys()).collect();
    names
        .into_iter()
        .filter_map(|name| {
            let (l, r) = (left.get(name), right.get(name));
            let kind = match (l, r) {
                (Some(_), None) => DifferenceKind::Removed,
                (None, Some(_)) => DifferenceKind::Added,
                (Some(lv), Some(rv)) if !keys_only && lv != rv => DifferenceKind::Changed,
                _ => return None,
            };
            Some(KeyDifference {
                path: name.clone(),
                key: name.clone(),
                kind,
                left: l.cloned(),
                right: r.cloned(),
                exempted: is_exempt(name.as_str()),
            })
        })
        .collect()
}

/// One side of a body section
pub(crate) struct BodySide<'r> {
    pub record: &'r Record,
    pub body: Option<&'r str>,
    pub content_type: Option<&'r str>,
}

/// Shape label of a non-JSON body in keys-only differences
const TEXT_SHAPE: &str = "text";

enum ParsedBody {
    Json(Value),
    Text,
}

/// Request payload or response body
///
/// JSON bodies are compared structurally; anything else, including JSON that
/// fails to parse, is compared as opaque text. In keys-only mode a JSON body
/// against a text body is a change of shape.
pub(crate) fn compare_body(
    section: SectionKind,
    left: BodySide<'_>,
    right: BodySide<'_>,
    keys_only: bool,
    exemptions: &ResolvedExemptions<'_>,
) -> SectionReport {
    let (absent, empty) = match section {
        SectionKind::ResponseBody => {
            (canonical::NO_RESPONSE_BODY, canonical::EMPTY_RESPONSE_BODY)
        }
        _ => (canonical::NO_PAYLOAD, canonical::EMPTY_PAYLOAD),
    };
    let name = section.name();
    let is_exempt = |key: &str| exemptions.is_exempt(section, key);
    let mut notes = Vec::new();

    let differences = match (left.body, right.body) {
        (None, None) => Vec::new(),
        (Some(l), None) => vec![presence(
            name,
            DifferenceKind::Removed,
            Some(l),
            None,
            is_exempt(name),
        )],
        (None, Some(r)) => vec![presence(
            name,
            DifferenceKind::Added,
            None,
            Some(r),
            is_exempt(name),
        )],
        (Some(l), Some(r)) => {
            let parsed_left = parse_body(section, &left, l, &mut notes);
            let parsed_right = parse_body(section, &right, r, &mut notes);
            match (parsed_left, parsed_right) {
                (ParsedBody::Json(lv), ParsedBody::Json(rv)) => {
                    JsonWalk::new(name, keys_only, is_exempt).run(&lv, &rv)
                }
                (ParsedBody::Json(lv), ParsedBody::Text) if keys_only => vec![presence(
                    name,
                    DifferenceKind::Changed,
                    Some(json::shape(&lv)),
                    Some(TEXT_SHAPE),
                    is_exempt(name),
                )],
                (ParsedBody::Text, ParsedBody::Json(rv)) if keys_only => vec![presence(
                    name,
                    DifferenceKind::Changed,
                    Some(TEXT_SHAPE),
                    Some(json::shape(&rv)),
                    is_exempt(name),
                )],
                _ if keys_only || l == r => Vec::new(),
                _ => vec![presence(
                    name,
                    DifferenceKind::Changed,
                    Some(l),
                    Some(r),
                    is_exempt(name),
                )],
            }
        }
    };

    SectionReport {
        section,
        status: SectionReport::status_for(&differences),
        differences,
        left_content: canonical::format_body(left.body, absent, empty),
        right_content: canonical::format_body(right.body, absent, empty),
        notes,
    }
}

fn presence(
    name: &str,
    kind: DifferenceKind,
    left: Option<&str>,
    right: Option<&str>,
    exempted: bool,
) -> KeyDifference {
    KeyDifference {
        path: name.to_string(),
        key: name.to_string(),
        kind,
        left: left.map(str::to_string),
        right: right.map(str::to_string),
        exempted,
    }
}

fn expects_json(body: &str, content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("json"))
        || body.trim_start().starts_with(['{', '['])
}

fn parse_body(
    section: SectionKind,
    side: &BodySide<'_>,
    body: &str,
    notes: &mut Vec<String>,
) -> ParsedBody {
    if !expects_json(body, side.content_type) {
        return ParsedBody::Text;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => ParsedBody::Json(value),
        Err(e) => {
            let err = HarDiffError::MalformedPayload {
                section: section.name().to_string(),
                sequence_index: side.record.sequence_index,
                reason: e.to_string(),
            };
            notes.push(err.to_string());
            log_recovered!(debug, schema::OP_COMPARE_RECORDS, err);
            ParsedBody::Text
        }
    }
}
