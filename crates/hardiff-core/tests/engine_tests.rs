#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use common::{get_log, index_pairs, scoped_policy};
use hardiff_core::{
    ComparisonStatus, Engine, EngineConfig, ExemptionPolicy, ExemptionSet, Record, SectionKind,
};

fn date_records() -> (Vec<Record>, Vec<Record>) {
    let a = vec![Record::builder(1, "GET", "/a")
        .response_header("Date", "Mon")
        .build()];
    let b = vec![Record::builder(1, "GET", "/a")
        .response_header("Date", "Tue")
        .build()];
    (a, b)
}

#[test]
fn test_engine_aligners_match_free_functions() {
    let engine = Engine::default();
    let a = get_log(&["/a", "/b", "/c"]);
    let b = get_log(&["/b", "/c", "/d"]);

    assert_eq!(
        engine.align_grouped(&a, &b),
        hardiff_core::align::align_grouped(&a, &b, None)
    );
    assert_eq!(
        engine.align_sequential(&a, &b),
        hardiff_core::align::align_sequential(&a, &b, &EngineConfig::default().sequence, None)
    );
}

#[test]
fn test_policy_applies_to_later_calls() {
    let engine = Engine::default();
    let (a, b) = date_records();

    let before = engine.align_grouped(&a, &b);
    engine.set_exemption_policy(Some(ExemptionPolicy::global_only(ExemptionSet::new(
        ["date"],
        Vec::<String>::new(),
    ))));
    let after = engine.align_grouped(&a, &b);
    engine.clear_exemption_policy();
    let cleared = engine.align_grouped(&a, &b);

    assert_eq!(before[0].result().unwrap().status, ComparisonStatus::Partial);
    assert_eq!(after[0].result().unwrap().status, ComparisonStatus::Exempted);
    assert_eq!(cleared[0].result().unwrap().status, ComparisonStatus::Partial);
}

#[test]
fn test_compare_records_uses_loaded_policy() {
    let engine = Engine::default();
    engine.set_exemption_policy(Some(scoped_policy()));
    let (a, b) = date_records();

    let report = engine.compare_records(&a[0], &b[0], false);

    assert_eq!(
        report.status_of(SectionKind::ResponseHeaders),
        ComparisonStatus::Exempted
    );
}

#[test]
fn test_sequential_scenario_through_engine() {
    let engine = Engine::new(EngineConfig::default());
    let a = get_log(&["/a", "/b"]);
    let b = get_log(&["/b"]);

    let out = engine.align_sequential(&a, &b);

    assert_eq!(index_pairs(&out), vec![(Some(1), None), (Some(2), Some(1))]);
}

#[test]
fn test_concurrent_swaps_never_tear_a_comparison() {
    // GIVEN an engine shared between a policy writer and comparing readers
    let engine = Arc::new(Engine::default());
    let (a, b) = date_records();
    let exempt = ExemptionPolicy::global_only(ExemptionSet::new(["date"], Vec::<String>::new()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            let (a, b) = (a.clone(), b.clone());
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let status = engine.align_grouped(&a, &b)[0].result().unwrap().status;
                    // THEN every call sees either the whole policy or none
                    assert!(matches!(
                        status,
                        ComparisonStatus::Exempted | ComparisonStatus::Partial
                    ));
                }
            })
        })
        .collect();

    for i in 0..100 {
        if i % 2 == 0 {
            engine.set_exemption_policy(Some(exempt.clone()));
        } else {
            engine.clear_exemption_policy();
        }
    }
    for reader in readers {
        reader.join().unwrap();
    }
}
