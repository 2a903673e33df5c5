//! Grouping aligner
//!
//! Records are queued per equivalence key; the k-th record of log A under a
//! key pairs with the k-th record of log B under the same key. Output follows
//! log A's order, then the unconsumed records of log B in their order.

use std::collections::{BTreeMap, VecDeque};

use crate::key::{keys_of, EquivalenceKey};
use crate::model::{ComparisonResult, Correspondence, Record};

pub(crate) fn align<F>(left: &[Record], right: &[Record], compare: F) -> Vec<Correspondence>
where
    F: Fn(&Record, &Record) -> ComparisonResult,
{
    let mut queues: BTreeMap<EquivalenceKey, VecDeque<usize>> = BTreeMap::new();
    for (position, key) in keys_of(right).into_iter().enumerate() {
        queues.entry(key).or_default().push_back(position);
    }

    let mut consumed = vec![false; right.len()];
    let mut out = Vec::with_capacity(left.len().max(right.len()));

    for record in left {
        let matched = queues
            .get_mut(&EquivalenceKey::of(record))
            .and_then(VecDeque::pop_front);
        match matched {
            Some(position) => {
                consumed[position] = true;
                let other = &right[position];
                out.push(Correspondence::paired(
                    record.sequence_index,
                    other.sequence_index,
                    compare(record, other),
                ));
            }
            None => out.push(Correspondence::left_only(record.sequence_index)),
        }
    }

    out.extend(
        right
            .iter()
            .zip(consumed)
            .filter(|(_, used)| !used)
            .map(|(record, _)| Correspondence::right_only(record.sequence_index)),
    );
    out
}
