//! Engine facade
//!
//! Owns the configuration and the exemption policy store. Every operation:
//! - takes one policy snapshot at entry and uses it for the whole call
//! - logs `start`/`end` with a fresh `RunId` and its duration
//!
//! The engine never fails an alignment or comparison; recovered data-quality
//! issues are logged and reflected in the output.

use std::time::Instant;

use hardiff_core_types::{schema, RunId};

use crate::align;
use crate::compare::{self, DetailedComparisonReport};
use crate::config::EngineConfig;
use crate::exemption::{ExemptionPolicy, ExemptionStore};
use crate::model::{Correspondence, Record};
use crate::{log_op_end, log_op_start, log_recovered};

/// Alignment and comparison engine
///
/// `Engine` is `Send + Sync`; share it behind an `Arc` to swap policies from
/// one thread while others compare.
///
/// # Example
/// ```
/// use hardiff_core::{Engine, ExemptionPolicy, ExemptionSet, Record};
///
/// let engine = Engine::default();
/// engine.set_exemption_policy(Some(ExemptionPolicy::global_only(
///     ExemptionSet::new(["date"], Vec::<String>::new()),
/// )));
///
/// let a = vec![Record::builder(1, "GET", "/a").response_header("Date", "Mon").build()];
/// let b = vec![Record::builder(1, "GET", "/a").response_header("Date", "Tue").build()];
/// let pairs = engine.align_sequential(&a, &b);
///
/// assert_eq!(pairs[0].result().unwrap().detail, "Exempted differences in: response_headers");
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    store: ExemptionStore,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            store: ExemptionStore::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn exemption_store(&self) -> &ExemptionStore {
        &self.store
    }

    /// Grouped alignment of two logs
    pub fn align_grouped(&self, left: &[Record], right: &[Record]) -> Vec<Correspondence> {
        let run_id = RunId::new();
        log_op_start!(
            schema::OP_ALIGN_GROUPED,
            run_id = %run_id,
            left_len = left.len(),
            right_len = right.len()
        );
        let start = Instant::now();

        let policy = self.store.snapshot();
        let out = align::align_grouped(left, right, policy.as_deref());

        log_op_end!(
            schema::OP_ALIGN_GROUPED,
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %run_id,
            pairs = paired_count(&out)
        );
        out
    }

    /// One-to-one, order-preserving alignment of two logs
    pub fn align_sequential(&self, left: &[Record], right: &[Record]) -> Vec<Correspondence> {
        let run_id = RunId::new();
        log_op_start!(
            schema::OP_ALIGN_SEQUENTIAL,
            run_id = %run_id,
            left_len = left.len(),
            right_len = right.len()
        );
        let start = Instant::now();

        let policy = self.store.snapshot();
        let out = align::align_sequential(left, right, &self.config.sequence, policy.as_deref());

        log_op_end!(
            schema::OP_ALIGN_SEQUENTIAL,
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %run_id,
            pairs = paired_count(&out)
        );
        out
    }

    /// Section-by-section comparison of two records
    pub fn compare_records(
        &self,
        left: &Record,
        right: &Record,
        keys_only: bool,
    ) -> DetailedComparisonReport {
        let run_id = RunId::new();
        log_op_start!(
            schema::OP_COMPARE_RECORDS,
            run_id = %run_id,
            left_index = left.sequence_index,
            right_index = right.sequence_index,
            keys_only = keys_only
        );
        let start = Instant::now();

        let policy = self.store.snapshot();
        let report = compare::compare_records(left, right, keys_only, policy.as_deref());

        log_op_end!(
            schema::OP_COMPARE_RECORDS,
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %run_id,
            status = report.status().as_str()
        );
        report
    }

    /// Replace (`Some`) or clear (`None`) the exemption policy
    ///
    /// Calls already running keep the policy they started with. Scoped rules
    /// that can never match are logged at `warn`.
    pub fn set_exemption_policy(&self, policy: Option<ExemptionPolicy>) {
        log_op_start!(
            schema::OP_SET_EXEMPTION_POLICY,
            loaded = policy.is_some()
        );
        let start = Instant::now();

        if let Some(policy) = &policy {
            for problem in policy.validate() {
                log_recovered!(warn, schema::OP_SET_EXEMPTION_POLICY, problem);
            }
        }
        let rules = policy.as_ref().map_or(0, |p| p.scoped_rules().len());
        self.store.set(policy);

        log_op_end!(
            schema::OP_SET_EXEMPTION_POLICY,
            duration_ms = start.elapsed().as_millis() as u64,
            scoped_rules = rules
        );
    }

    pub fn clear_exemption_policy(&self) {
        self.set_exemption_policy(None);
    }

    pub fn has_exemption_policy(&self) -> bool {
        self.store.is_loaded()
    }
}

fn paired_count(out: &[Correspondence]) -> usize {
    out.iter().filter(|c| c.is_paired()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exemption::ExemptionSet;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_send_sync() {
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_set_and_clear_policy() {
        let engine = Engine::default();
        assert!(!engine.has_exemption_policy());
        engine.set_exemption_policy(Some(ExemptionPolicy::global_only(ExemptionSet::default())));
        assert!(engine.has_exemption_policy());
        engine.clear_exemption_policy();
        assert!(!engine.has_exemption_policy());
    }

    #[test]
    fn test_engine_uses_configured_band() {
        let mut config = EngineConfig::default();
        config.sequence.max_exact_cells = 0;
        let engine = Engine::new(config);
        let a: Vec<Record> = (1..=3)
            .map(|i| Record::builder(i, "GET", format!("/{}", i)).build())
            .collect();
        let pairs = engine.align_sequential(&a, &a);
        assert_eq!(paired_count(&pairs), 3);
    }
}
