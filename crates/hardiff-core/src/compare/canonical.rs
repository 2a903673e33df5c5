//! Canonical text renderings of record sections
//!
//! These strings are what a host shows side by side. They are deterministic:
//! headers and parameters are sorted by name and JSON bodies are printed with
//! recursively sorted keys.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::model::Record;

pub const NO_HEADERS: &str = "No headers";
pub const NO_PARAMETERS: &str = "No parameters";
pub const NO_PAYLOAD: &str = "No payload";
pub const EMPTY_PAYLOAD: &str = "Empty payload";
pub const NO_RESPONSE_BODY: &str = "No response body";
pub const EMPTY_RESPONSE_BODY: &str = "Empty response body";

/// Headers as `Name: value` lines, ordered by lowercased name
pub fn format_headers(headers: &BTreeMap<String, String>) -> String {
    if headers.is_empty() {
        return NO_HEADERS.to_string();
    }
    let mut lines: Vec<(String, String)> = headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), format!("{}: {}", k, v)))
        .collect();
    lines.sort();
    lines
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parameters as `name: v1, v2` lines, ordered by name
pub fn format_params(params: &BTreeMap<String, Vec<String>>) -> String {
    if params.is_empty() {
        return NO_PARAMETERS.to_string();
    }
    params
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// General section: method, URL, path and status
pub fn format_general(record: &Record) -> String {
    format!(
        "Index: {}\nMethod: {}\nURL: {}\nPath: {}\nResponse Status: {}",
        record.sequence_index, record.method, record.url, record.path, record.response_status
    )
}

/// A body rendered for display, with placeholders for absent/empty bodies
pub fn format_body(body: Option<&str>, absent: &str, empty: &str) -> String {
    match body {
        None => absent.to_string(),
        Some(text) if text.trim().is_empty() => empty.to_string(),
        Some(text) => format_json_string(text),
    }
}

/// Pretty-print JSON with sorted keys, or return the text unchanged
pub fn format_json_string(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => serde_json::to_string_pretty(&sort_json_keys(&parsed))
            .unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}

/// Copy of `value` with object keys sorted at every depth
pub fn sort_json_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_json_keys(v));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_json_keys).collect()),
        other => other.clone(),
    }
}

/// The request as an HTTP/1.1 message: request line, sorted headers, body
pub fn format_raw_request(record: &Record) -> String {
    let mut raw = format!("{} {} HTTP/1.1\n", record.method, record.path);

    let mut headers: Vec<(&String, &String)> = record.request_headers.iter().collect();
    headers.sort_by_key(|(k, _)| k.to_ascii_lowercase());
    for (name, value) in headers {
        raw.push_str(&format!("{}: {}\n", name, value));
    }
    raw.push('\n');

    if let Some(body) = record.request_body.as_deref().filter(|b| !b.is_empty()) {
        raw.push_str(&format_json_string(body));
    }
    raw
}
