#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::json_post;
use hardiff_core::compare::canonical::{EMPTY_PAYLOAD, NO_HEADERS, NO_PARAMETERS, NO_PAYLOAD};
use hardiff_core::compare::compare_records;
use hardiff_core::{
    ComparisonStatus, DifferenceKind, ExemptionPolicy, ExemptionSet, Record, SectionKind,
};

#[test]
fn test_identical_records_match_in_every_section() {
    let record = json_post(1, "/orders", r#"{"id": 1, "items": [1, 2]}"#, r#"{"ok": true}"#);

    let report = compare_records(&record, &record, false, None);

    for kind in SectionKind::ALL {
        assert_eq!(report.status_of(kind), ComparisonStatus::Match, "{}", kind);
    }
    assert_eq!(report.overall.detail, "Full match");
}

#[test]
fn test_get_query_difference_is_params_only() {
    // GIVEN GET /foo vs GET /foo?q=1
    let a = Record::builder(1, "GET", "/foo").build();
    let b = Record::builder(1, "GET", "/foo?q=1").build();

    let report = compare_records(&a, &b, false, None);

    // THEN general matches and params is partial
    assert_eq!(report.status_of(SectionKind::General), ComparisonStatus::Match);
    assert_eq!(report.status_of(SectionKind::Params), ComparisonStatus::Partial);
    let params = report.section(SectionKind::Params).unwrap();
    assert_eq!(params.left_content, NO_PARAMETERS);
    assert_eq!(params.right_content, "q: 1");
    assert_eq!(params.differences[0].kind, DifferenceKind::Added);
}

#[test]
fn test_method_difference_is_different() {
    let a = Record::builder(1, "GET", "/a").build();
    let b = Record::builder(1, "POST", "/a").build();

    let report = compare_records(&a, &b, false, None);

    assert_eq!(report.status(), ComparisonStatus::Different);
    assert_eq!(report.overall.detail, "Different method: GET vs POST");
}

#[test]
fn test_path_difference_is_different() {
    let a = Record::builder(1, "GET", "/a").build();
    let b = Record::builder(1, "GET", "/b").build();

    let report = compare_records(&a, &b, false, None);

    assert_eq!(report.status(), ComparisonStatus::Different);
    assert_eq!(report.overall.detail, "Different path: /a vs /b");
}

#[test]
fn test_status_code_difference_is_partial() {
    let a = Record::builder(1, "GET", "/a").response_status(200).build();
    let b = Record::builder(1, "GET", "/a").response_status(404).build();

    let report = compare_records(&a, &b, false, None);

    assert_eq!(report.status_of(SectionKind::General), ComparisonStatus::Partial);
    assert_eq!(report.overall.detail, "Differences in: general");
}

#[test]
fn test_json_whitespace_and_key_order_do_not_matter() {
    let a = json_post(1, "/o", r#"{"b": 1, "a": [1, 2]}"#, "{}");
    let b = json_post(1, "/o", r#"{ "a":[1,2],"b":1 }"#, "{ }");

    let report = compare_records(&a, &b, false, None);

    assert_eq!(report.status(), ComparisonStatus::Match);
    let payload = report.section(SectionKind::Payload).unwrap();
    assert_eq!(payload.left_content, payload.right_content);
}

#[test]
fn test_nested_json_difference_path() {
    let a = json_post(1, "/o", r#"{"user": {"roles": [{"name": "a"}]}}"#, "{}");
    let b = json_post(1, "/o", r#"{"user": {"roles": [{"name": "b"}]}}"#, "{}");

    let report = compare_records(&a, &b, false, None);

    let payload = report.section(SectionKind::Payload).unwrap();
    assert_eq!(payload.status, ComparisonStatus::Partial);
    assert_eq!(payload.differences.len(), 1);
    assert_eq!(payload.differences[0].path, "user.roles[0].name");
    assert_eq!(payload.differences[0].key, "name");
    assert_eq!(payload.differences[0].left.as_deref(), Some("\"a\""));
}

#[test]
fn test_absent_body_differs_from_empty_body() {
    // GIVEN one record with no body and one with an empty body
    let a = Record::builder(1, "POST", "/a").build();
    let b = Record::builder(1, "POST", "/a").request_body("").build();

    let report = compare_records(&a, &b, false, None);

    // THEN the payload section reports the presence difference
    let payload = report.section(SectionKind::Payload).unwrap();
    assert_eq!(payload.status, ComparisonStatus::Partial);
    assert_eq!(payload.differences[0].key, "payload");
    assert_eq!(payload.left_content, NO_PAYLOAD);
    assert_eq!(payload.right_content, EMPTY_PAYLOAD);
}

#[test]
fn test_two_empty_bodies_match() {
    let a = Record::builder(1, "POST", "/a").request_body("").build();

    let report = compare_records(&a, &a, false, None);

    assert_eq!(report.status_of(SectionKind::Payload), ComparisonStatus::Match);
}

#[test]
fn test_body_presence_exempt_by_section_name() {
    let a = Record::builder(1, "POST", "/a").build();
    let b = Record::builder(1, "POST", "/a").request_body("x").build();
    let policy = ExemptionPolicy::global_only(ExemptionSet::new(Vec::<String>::new(), ["payload"]));

    let report = compare_records(&a, &b, false, Some(&policy));

    assert_eq!(report.status_of(SectionKind::Payload), ComparisonStatus::Exempted);
}

#[test]
fn test_malformed_json_falls_back_to_text() {
    // GIVEN a JSON content type with bodies that do not parse
    let a = json_post(1, "/o", "{not json", "{}");
    let b = json_post(1, "/o", "{not json either", "{}");

    let report = compare_records(&a, &b, false, None);

    // THEN the section is compared as text and carries notes
    let payload = report.section(SectionKind::Payload).unwrap();
    assert_eq!(payload.status, ComparisonStatus::Partial);
    assert_eq!(payload.differences[0].kind, DifferenceKind::Changed);
    assert_eq!(payload.notes.len(), 2);
    assert!(payload.notes[0].contains("Malformed JSON"));
    assert_eq!(payload.left_content, "{not json");
}

#[test]
fn test_plain_text_bodies_compare_verbatim() {
    let a = Record::builder(1, "POST", "/a").request_body("hello").build();
    let b = Record::builder(1, "POST", "/a").request_body("hello ").build();

    let report = compare_records(&a, &b, false, None);

    let payload = report.section(SectionKind::Payload).unwrap();
    assert_eq!(payload.status, ComparisonStatus::Partial);
    assert!(payload.notes.is_empty());
}

#[test]
fn test_keys_only_ignores_values() {
    let a = json_post(1, "/o", r#"{"id": 1, "tags": ["a"]}"#, r#"{"n": 1}"#);
    let mut b = json_post(1, "/o", r#"{"id": 2, "tags": ["b"]}"#, r#"{"n": 9}"#);
    b.request_headers
        .insert("Content-Type".to_string(), "application/json; charset=utf-8".to_string());
    b.response_status = 500;

    let full = compare_records(&a, &b, false, None);
    let keys = compare_records(&a, &b, true, None);

    assert_eq!(full.status(), ComparisonStatus::Partial);
    assert_eq!(keys.status(), ComparisonStatus::Match);
    assert_eq!(keys.overall.detail, "Keys match");
}

#[test]
fn test_keys_only_still_sees_missing_keys() {
    let a = json_post(1, "/o", r#"{"id": 1}"#, "{}");
    let b = json_post(1, "/o", r#"{"id": 1, "extra": true}"#, "{}");

    let report = compare_records(&a, &b, true, None);

    assert_eq!(report.status_of(SectionKind::Payload), ComparisonStatus::Partial);
}

#[test]
fn test_header_names_compare_case_insensitively() {
    let a = Record::builder(1, "GET", "/a").request_header("Accept", "*/*").build();
    let b = Record::builder(1, "GET", "/a").request_header("accept", "*/*").build();

    let report = compare_records(&a, &b, false, None);

    assert_eq!(report.status_of(SectionKind::Headers), ComparisonStatus::Match);
}

#[test]
fn test_header_canonical_content() {
    let a = Record::builder(1, "GET", "/a")
        .request_header("X-B", "2")
        .request_header("x-a", "1")
        .build();
    let b = Record::builder(1, "GET", "/a").build();

    let report = compare_records(&a, &b, false, None);

    let headers = report.section(SectionKind::Headers).unwrap();
    assert_eq!(headers.left_content, "x-a: 1\nX-B: 2");
    assert_eq!(headers.right_content, NO_HEADERS);
    assert_eq!(headers.differences.len(), 2);
}

#[test]
fn test_mixed_exempted_and_partial_detail() {
    let a = Record::builder(1, "GET", "/a?x=1")
        .response_header("Date", "Mon")
        .build();
    let b = Record::builder(1, "GET", "/a?x=2")
        .response_header("Date", "Tue")
        .build();
    let policy = ExemptionPolicy::global_only(ExemptionSet::new(["date"], Vec::<String>::new()));

    let report = compare_records(&a, &b, false, Some(&policy));

    assert_eq!(report.status(), ComparisonStatus::Partial);
    assert_eq!(
        report.overall.detail,
        "Differences in: params (exempted: response_headers)"
    );
}

#[test]
fn test_empty_method_degrades_to_different() {
    let a = Record::builder(3, "", "/a").build();
    let b = Record::builder(1, "GET", "/a").build();

    let report = compare_records(&a, &b, false, None);

    assert_eq!(report.status(), ComparisonStatus::Different);
    assert_eq!(report.overall.detail, "Record #3 in left log has no method");
}

#[test]
fn test_raw_request_rendering() {
    let a = json_post(1, "/o?x=1", r#"{"b":1,"a":2}"#, "{}");

    let report = compare_records(&a, &a, false, None);

    assert!(report
        .raw_request_left
        .starts_with("POST /o?x=1 HTTP/1.1\nContent-Type: application/json\n\n{"));
    let a_pos = report.raw_request_left.find("\"a\"").unwrap();
    let b_pos = report.raw_request_left.find("\"b\"").unwrap();
    assert!(a_pos < b_pos);
}

#[test]
fn test_keys_only_json_response_against_text_response() {
    // GIVEN one endpoint answering JSON on the left and plain text on the right
    let left = Record::builder(1, "GET", "/status")
        .response_header("Content-Type", "application/json")
        .response_body(r#"{"state": "up"}"#)
        .build();
    let right = Record::builder(1, "GET", "/status")
        .response_header("Content-Type", "text/plain")
        .response_body("up")
        .build();

    // WHEN comparing keys only
    let report = compare_records(&left, &right, true, None);

    // THEN the response body reports the lost key structure
    assert_eq!(
        report.status_of(SectionKind::ResponseBody),
        ComparisonStatus::Partial
    );
    let body = report.section(SectionKind::ResponseBody).unwrap();
    assert_eq!(body.differences[0].key, "response_body");
    assert_eq!(body.differences[0].left.as_deref(), Some("object"));
    assert_eq!(report.status_of(SectionKind::ResponseHeaders), ComparisonStatus::Match);
    assert_eq!(report.overall.detail, "Differences in: response_body");
}
