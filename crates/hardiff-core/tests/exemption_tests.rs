#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{json_post, scoped_policy};
use hardiff_core::compare::compare_records;
use hardiff_core::exemption::{resolve, ExemptionSource};
use hardiff_core::{
    ComparisonStatus, ExemptionPolicy, ExemptionSet, HarDiffError, Record, ScopedRule,
    SectionKind,
};

fn with_header(url: &str, name: &str, value: &str) -> Record {
    Record::builder(1, "GET", "/r")
        .url(url)
        .response_header(name, value)
        .build()
}

#[test]
fn test_scoped_rule_governs_exclusively_when_it_matches() {
    // GIVEN a record under the scoped host
    let policy = scoped_policy();
    let a = with_header("https://api.test/r", "X-Request-Id", "1");
    let b = with_header("https://api.test/r", "X-Request-Id", "2");

    // THEN the scoped header is exempt
    let report = compare_records(&a, &b, false, Some(&policy));
    assert_eq!(report.status(), ComparisonStatus::Exempted);

    // AND the global header is not, because the scoped rule replaces it
    let a = with_header("https://api.test/r", "Date", "Mon");
    let b = with_header("https://api.test/r", "Date", "Tue");
    let report = compare_records(&a, &b, false, Some(&policy));
    assert_eq!(report.status(), ComparisonStatus::Partial);
}

#[test]
fn test_global_applies_when_no_rule_matches() {
    let policy = scoped_policy();
    let a = with_header("https://web.test/r", "Date", "Mon");
    let b = with_header("https://web.test/r", "Date", "Tue");

    let report = compare_records(&a, &b, false, Some(&policy));

    assert_eq!(report.status(), ComparisonStatus::Exempted);
    assert_eq!(
        resolve(Some(&policy), &a.url).source(),
        ExemptionSource::Global
    );
}

#[test]
fn test_no_policy_exempts_nothing() {
    let a = with_header("https://web.test/r", "Date", "Mon");
    let b = with_header("https://web.test/r", "Date", "Tue");

    let report = compare_records(&a, &b, false, None);

    assert_eq!(report.status(), ComparisonStatus::Partial);
}

#[test]
fn test_left_record_url_selects_rule() {
    // Only the left URL is under the scoped host
    let policy = scoped_policy();
    let a = with_header("https://api.test/r", "X-Request-Id", "1");
    let b = with_header("https://web.test/r", "X-Request-Id", "2");

    let report = compare_records(&a, &b, false, Some(&policy));

    assert_eq!(report.status(), ComparisonStatus::Exempted);
}

#[test]
fn test_payload_key_exempt_at_any_depth() {
    let policy = scoped_policy();
    let a = json_post(1, "/o", r#"{"meta": {"request_id": "a"}, "items": [{"request_id": 1}]}"#, "{}");
    let b = json_post(1, "/o", r#"{"meta": {"request_id": "b"}, "items": [{"request_id": 2}]}"#, "{}");

    let report = compare_records(&a, &b, false, Some(&policy));

    let payload = report.section(SectionKind::Payload).unwrap();
    assert_eq!(payload.status, ComparisonStatus::Exempted);
    assert_eq!(payload.differences.len(), 2);
    assert!(payload.differences.iter().all(|d| d.exempted));
}

#[test]
fn test_exempt_key_covers_its_subtree() {
    let policy = ExemptionPolicy::global_only(ExemptionSet::new(Vec::<String>::new(), ["meta"]));
    let a = json_post(1, "/o", r#"{"meta": {"ts": 1, "trace": [1, 2]}, "id": 1}"#, "{}");
    let b = json_post(1, "/o", r#"{"meta": {"ts": 2, "trace": [3]}, "id": 1}"#, "{}");

    let report = compare_records(&a, &b, false, Some(&policy));

    assert_eq!(report.status_of(SectionKind::Payload), ComparisonStatus::Exempted);
}

#[test]
fn test_payload_keys_are_case_sensitive() {
    let policy = ExemptionPolicy::global_only(ExemptionSet::new(Vec::<String>::new(), ["Token"]));
    let a = json_post(1, "/o", r#"{"token": "a"}"#, "{}");
    let b = json_post(1, "/o", r#"{"token": "b"}"#, "{}");

    let report = compare_records(&a, &b, false, Some(&policy));

    assert_eq!(report.status_of(SectionKind::Payload), ComparisonStatus::Partial);
}

#[test]
fn test_params_are_never_exempt() {
    let policy = ExemptionPolicy::global_only(ExemptionSet::new(["q"], ["q"]));
    let a = Record::builder(1, "GET", "/s?q=1").build();
    let b = Record::builder(1, "GET", "/s?q=2").build();

    let report = compare_records(&a, &b, false, Some(&policy));

    assert_eq!(report.status_of(SectionKind::Params), ComparisonStatus::Partial);
}

#[test]
fn test_first_matching_rule_wins() {
    let policy = ExemptionPolicy::new(
        ExemptionSet::default(),
        vec![
            ScopedRule::for_url("/v1/", ExemptionSet::new(["a"], Vec::<String>::new())),
            ScopedRule::for_host("api.test", ExemptionSet::new(["b"], Vec::<String>::new())),
        ],
    );

    let resolved = resolve(Some(&policy), "https://api.test/v1/x");

    assert_eq!(resolved.source(), ExemptionSource::Scoped(0));
    assert!(resolved.is_header_exempt("A"));
    assert!(!resolved.is_header_exempt("b"));
}

#[test]
fn test_rule_without_matcher_reported_and_skipped() {
    let policy = ExemptionPolicy::new(
        ExemptionSet::new(["date"], Vec::<String>::new()),
        vec![ScopedRule::with_matchers(
            Some(String::new()),
            None,
            ExemptionSet::new(["x"], Vec::<String>::new()),
        )],
    );

    assert_eq!(
        policy.validate(),
        vec![HarDiffError::PolicyMismatch { position: 0 }]
    );
    assert_eq!(
        resolve(Some(&policy), "https://any.test/").source(),
        ExemptionSource::Global
    );
}
