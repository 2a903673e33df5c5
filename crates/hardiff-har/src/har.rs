//! HAR capture parsing
//!
//! Reads `log.entries[*]` of a HAR 1.2 document into [`Record`]s. Entries
//! that cannot be decoded (missing fields, unparseable URL) are skipped with a
//! warning; sequence indices are 1-based and contiguous over the kept
//! entries.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use hardiff_core::model::parse_query_string;
use hardiff_core::{log_op_end, log_op_error, log_op_start, Record};
use hardiff_core_types::schema::OP_PARSE_HAR;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::errors::{invalid_har, io_error, record_not_found, Result};

#[derive(Debug, Deserialize)]
struct RawHar {
    log: RawLog,
}

#[derive(Debug, Deserialize)]
struct RawLog {
    // Decoded one by one so a bad entry does not sink the file
    entries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    request: RawRequest,
    response: RawResponse,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    method: String,
    url: String,
    #[serde(default)]
    headers: Vec<RawPair>,
    #[serde(rename = "queryString", default)]
    query_string: Vec<RawPair>,
    #[serde(rename = "postData")]
    post_data: Option<RawText>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    status: i64,
    #[serde(default)]
    headers: Vec<RawPair>,
    content: Option<RawText>,
}

#[derive(Debug, Deserialize)]
struct RawPair {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawText {
    text: Option<String>,
}

impl RawEntry {
    fn into_record(self, sequence_index: usize) -> std::result::Result<Record, String> {
        let RawEntry { request, response } = self;

        let parsed = Url::parse(&request.url).map_err(|e| format!("invalid url: {}", e))?;
        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }

        let query_params = if request.query_string.is_empty() {
            parsed.query().map(parse_query_string).unwrap_or_default()
        } else {
            let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for pair in request.query_string {
                params.entry(pair.name).or_default().push(pair.value);
            }
            params
        };

        Ok(Record {
            method: request.method,
            url: request.url,
            path,
            request_headers: into_map(request.headers),
            query_params,
            request_body: request.post_data.and_then(|p| p.text),
            // HAR uses 0 (and sometimes -1) for aborted requests
            response_status: u16::try_from(response.status).unwrap_or(0),
            response_headers: into_map(response.headers),
            response_body: response.content.and_then(|c| c.text),
            sequence_index,
        })
    }
}

fn into_map(pairs: Vec<RawPair>) -> BTreeMap<String, String> {
    pairs.into_iter().map(|p| (p.name, p.value)).collect()
}

/// Parse a HAR document held in memory
///
/// # Errors
/// `InvalidHar` when the text is not JSON or has no `log.entries` array.
pub fn parse_har_str(content: &str) -> Result<Vec<Record>> {
    log_op_start!(OP_PARSE_HAR, bytes = content.len());
    let start = Instant::now();

    let result = parse_entries(content).map_err(|e| {
        log_op_error!(
            OP_PARSE_HAR,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        OP_PARSE_HAR,
        duration_ms = start.elapsed().as_millis() as u64,
        records = result.len()
    );
    Ok(result)
}

fn parse_entries(content: &str) -> Result<Vec<Record>> {
    let raw: RawHar = serde_json::from_str(content)
        .map_err(|e| invalid_har(format!("HAR parse error: {}", e)))?;

    let mut records = Vec::with_capacity(raw.log.entries.len());
    for (position, entry) in raw.log.entries.into_iter().enumerate() {
        let decoded = serde_json::from_value::<RawEntry>(entry)
            .map_err(|e| e.to_string())
            .and_then(|entry| entry.into_record(records.len() + 1));
        match decoded {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::warn!(
                    op = OP_PARSE_HAR,
                    entry = position,
                    reason = %reason,
                    "Skipping malformed HAR entry"
                );
            }
        }
    }
    Ok(records)
}

/// Read and parse a HAR file
///
/// # Errors
/// `Io` when the file cannot be read, otherwise as [`parse_har_str`].
pub fn parse_har_file(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error(OP_PARSE_HAR, path, e))?;
    parse_har_str(&content)
}

/// Look up a record by its sequence index
///
/// # Errors
/// `NotFound` when no record carries that index.
pub fn find_record<'a>(records: &'a [Record], side: &str, sequence_index: usize) -> Result<&'a Record> {
    records
        .iter()
        .find(|r| r.sequence_index == sequence_index)
        .ok_or_else(|| record_not_found(side, sequence_index))
}
