use hardiff_core::{ExemptionPolicy, ExemptionSet, Record, ScopedRule};

/// Build a log from `(method, path)` pairs with 1-based sequence indices
#[allow(dead_code)]
pub fn log(specs: &[(&str, &str)]) -> Vec<Record> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (method, path))| Record::builder(i + 1, *method, *path).build())
        .collect()
}

/// A GET-only log over the given paths
#[allow(dead_code)]
pub fn get_log(paths: &[&str]) -> Vec<Record> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| Record::builder(i + 1, "GET", *path).build())
        .collect()
}

/// A JSON POST record against `https://api.test{path}`
#[allow(dead_code)]
pub fn json_post(sequence_index: usize, path: &str, body: &str, response: &str) -> Record {
    Record::builder(sequence_index, "POST", path)
        .url(format!("https://api.test{}", path))
        .request_header("Content-Type", "application/json")
        .request_body(body)
        .response_header("Content-Type", "application/json")
        .response_body(response)
        .build()
}

/// Left/right index pairs of an alignment
#[allow(dead_code)]
pub fn index_pairs(
    correspondences: &[hardiff_core::Correspondence],
) -> Vec<(Option<usize>, Option<usize>)> {
    correspondences
        .iter()
        .map(|c| (c.left_index(), c.right_index()))
        .collect()
}

/// Global exemptions plus one rule scoped to `api.test`
#[allow(dead_code)]
pub fn scoped_policy() -> ExemptionPolicy {
    ExemptionPolicy::new(
        ExemptionSet::new(["date"], ["timestamp"]),
        vec![ScopedRule::for_host(
            "api.test",
            ExemptionSet::new(["x-request-id"], ["request_id"]),
        )],
    )
}
