//! Record aligners
//!
//! Both aligners pair records by [`EquivalenceKey`](crate::key::EquivalenceKey)
//! and attach the result of a full (not keys-only) comparison to every pair.
//! When either log is empty they return no correspondences.

mod grouped;
mod sequential;

use hardiff_core_types::schema;

use crate::compare::compare_records;
use crate::config::SequenceAlignerConfig;
use crate::errors::HarDiffError;
use crate::exemption::ExemptionPolicy;
use crate::log_recovered;
use crate::model::{Correspondence, Record};

/// Groups-and-queues alignment; a record may pair with a record anywhere in
/// the other log
///
/// # Example
/// ```
/// use hardiff_core::align::align_grouped;
/// use hardiff_core::Record;
///
/// let a = vec![Record::builder(1, "GET", "/a").build(), Record::builder(2, "GET", "/b").build()];
/// let b = vec![Record::builder(1, "GET", "/b").build()];
/// let pairs = align_grouped(&a, &b, None);
///
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[1].right_index(), Some(1));
/// ```
pub fn align_grouped(
    left: &[Record],
    right: &[Record],
    policy: Option<&ExemptionPolicy>,
) -> Vec<Correspondence> {
    if !check_inputs(schema::OP_ALIGN_GROUPED, left, right) {
        return Vec::new();
    }
    grouped::align(left, right, |a, b| {
        compare_records(a, b, false, policy).overall
    })
}

/// Order-preserving one-to-one alignment along the longest common
/// subsequence of keys
pub fn align_sequential(
    left: &[Record],
    right: &[Record],
    config: &SequenceAlignerConfig,
    policy: Option<&ExemptionPolicy>,
) -> Vec<Correspondence> {
    if !check_inputs(schema::OP_ALIGN_SEQUENTIAL, left, right) {
        return Vec::new();
    }
    if sequential::uses_band(left.len(), right.len(), config) {
        tracing::debug!(
            op = schema::OP_ALIGN_SEQUENTIAL,
            left_len = left.len(),
            right_len = right.len(),
            band_width = config.band_width,
            cells = sequential::table_cells(left.len(), right.len(), config),
            "Input exceeds exact table budget, using banded alignment"
        );
    }
    sequential::align(left, right, config, |a, b| {
        compare_records(a, b, false, policy).overall
    })
}

/// LCS cells [`align_sequential`] allocates for logs of these lengths
///
/// Bounded by the exact table, `(|A| + 1)·(|B| + 1)`, on both paths.
pub fn sequential_table_cells(
    left_len: usize,
    right_len: usize,
    config: &SequenceAlignerConfig,
) -> usize {
    sequential::table_cells(left_len, right_len, config)
}

fn check_inputs(op: &str, left: &[Record], right: &[Record]) -> bool {
    if left.is_empty() || right.is_empty() {
        log_recovered!(
            warn,
            op,
            HarDiffError::EmptyInput {
                left_len: left.len(),
                right_len: right.len(),
            }
        );
        return false;
    }
    true
}
