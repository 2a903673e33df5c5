//! Exemption policy documents
//!
//! A policy document is a JSON object:
//!
//! ```json
//! {
//!   "global": { "headers": ["Date"], "payload_keys": ["timestamp"] },
//!   "rules": [
//!     { "host": "api.example.com", "headers": ["x-request-id"] },
//!     { "url": "/v1/orders", "payload_keys": ["order_id"] }
//!   ]
//! }
//! ```
//!
//! Every field is optional. camelCase spellings (`headerNames`,
//! `payloadKeys`, `hostSubstring`, `urlSubstring`, `scopedRules`) are
//! accepted too.

use std::path::Path;
use std::time::Instant;

use hardiff_core::{
    log_op_end, log_op_error, log_op_start, log_recovered, ExemptionPolicy, ExemptionSet,
    ScopedRule,
};
use hardiff_core_types::schema::OP_PARSE_POLICY;
use serde::Deserialize;

use crate::errors::{invalid_policy, io_error, Result};

#[derive(Debug, Default, Deserialize)]
struct SetDocument {
    #[serde(default, alias = "headerNames", alias = "header_names")]
    headers: Vec<String>,
    #[serde(default, alias = "payloadKeys")]
    payload_keys: Vec<String>,
}

impl SetDocument {
    fn into_set(self) -> ExemptionSet {
        ExemptionSet::new(self.headers, self.payload_keys)
    }
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default, alias = "hostSubstring", alias = "host_substring")]
    host: Option<String>,
    #[serde(default, alias = "urlSubstring", alias = "url_substring")]
    url: Option<String>,
    #[serde(flatten)]
    exemptions: SetDocument,
}

#[derive(Debug, Deserialize)]
struct PolicyDocument {
    #[serde(default)]
    global: SetDocument,
    #[serde(default, alias = "scopedRules", alias = "scoped_rules")]
    rules: Vec<RuleDocument>,
}

impl PolicyDocument {
    fn into_policy(self) -> ExemptionPolicy {
        let rules = self
            .rules
            .into_iter()
            .map(|r| ScopedRule::with_matchers(r.host, r.url, r.exemptions.into_set()))
            .collect();
        ExemptionPolicy::new(self.global.into_set(), rules)
    }
}

/// Parse a policy document held in memory
///
/// Rules without a usable matcher are kept and reported at `warn`; the
/// engine skips them during resolution.
///
/// # Errors
/// `InvalidPolicy` when the text is not a JSON object of the expected shape.
pub fn parse_policy_str(content: &str) -> Result<ExemptionPolicy> {
    log_op_start!(OP_PARSE_POLICY, bytes = content.len());
    let start = Instant::now();

    let result = serde_json::from_str::<PolicyDocument>(content)
        .map(PolicyDocument::into_policy)
        .map_err(|e| invalid_policy(format!("policy parse error: {}", e)))
        .map_err(|e| {
            log_op_error!(
                OP_PARSE_POLICY,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    for problem in result.validate() {
        log_recovered!(warn, OP_PARSE_POLICY, problem);
    }

    log_op_end!(
        OP_PARSE_POLICY,
        duration_ms = start.elapsed().as_millis() as u64,
        scoped_rules = result.scoped_rules().len()
    );
    Ok(result)
}

/// Read and parse a policy file
///
/// # Errors
/// `Io` when the file cannot be read, otherwise as [`parse_policy_str`].
pub fn parse_policy_file(path: &Path) -> Result<ExemptionPolicy> {
    let content =
        std::fs::read_to_string(path).map_err(|e| io_error(OP_PARSE_POLICY, path, e))?;
    parse_policy_str(&content)
}
