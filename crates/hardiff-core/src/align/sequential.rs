//! Sequence aligner
//!
//! One-to-one alignment along the longest common subsequence of equivalence
//! keys. Small inputs use the exact suffix table; once `|A|·|B|` exceeds the
//! configured cell budget only a band around the diagonal is evaluated.
//!
//! The walk is shared: from `(0, 0)`, equal keys pair immediately; otherwise
//! the side whose skip keeps the longer remaining subsequence is skipped,
//! log A first on a tie.

use crate::config::SequenceAlignerConfig;
use crate::key::{keys_of, EquivalenceKey};
use crate::model::{ComparisonResult, Correspondence, Record};

/// One step of the alignment walk, as positions into the inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Pair(usize, usize),
    LeftOnly(usize),
    RightOnly(usize),
}

/// Suffix LCS lengths: `get(i, j)` is the LCS length of `a[i..]`, `b[j..]`
trait LcsTable {
    fn get(&self, i: usize, j: usize) -> u32;
}

struct ExactTable {
    columns: usize,
    cells: Vec<u32>,
}

impl ExactTable {
    fn build(a: &[EquivalenceKey], b: &[EquivalenceKey]) -> Self {
        let columns = b.len() + 1;
        let mut table = Self {
            columns,
            cells: vec![0; (a.len() + 1) * columns],
        };
        for i in (0..a.len()).rev() {
            for j in (0..b.len()).rev() {
                let value = if a[i] == b[j] {
                    table.get(i + 1, j + 1) + 1
                } else {
                    table.get(i + 1, j).max(table.get(i, j + 1))
                };
                table.cells[i * columns + j] = value;
            }
        }
        table
    }
}

impl LcsTable for ExactTable {
    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.columns + j]
    }
}

/// Cells with `|i - j| <= width` only; anything outside the band reads as 0
///
/// Row `i` stores columns `[i - width, i + width]` clipped to `[0, |B|]`, so
/// a row never holds more than `|B| + 1` cells.
struct BandedTable {
    width: usize,
    columns: usize,
    row_len: usize,
    cells: Vec<u32>,
}

impl BandedTable {
    fn build(a: &[EquivalenceKey], b: &[EquivalenceKey], band_width: usize) -> Self {
        let width = band_width.max(a.len().abs_diff(b.len()));
        let row_len = banded_row_len(width, b.len());
        let mut table = Self {
            width,
            columns: b.len(),
            row_len,
            cells: vec![0; (a.len() + 1) * row_len],
        };
        if b.is_empty() {
            return table;
        }
        for i in (0..a.len()).rev() {
            let first = i.saturating_sub(width);
            let last = i.saturating_add(width).min(b.len() - 1);
            if first > last {
                continue;
            }
            for j in (first..=last).rev() {
                let value = if a[i] == b[j] {
                    table.get(i + 1, j + 1) + 1
                } else {
                    table.get(i + 1, j).max(table.get(i, j + 1))
                };
                let slot = table.slot(i, j);
                table.cells[slot] = value;
            }
        }
        table
    }

    fn in_band(&self, i: usize, j: usize) -> bool {
        i.abs_diff(j) <= self.width && j <= self.columns
    }

    fn slot(&self, i: usize, j: usize) -> usize {
        i * self.row_len + (j - i.saturating_sub(self.width))
    }
}

impl LcsTable for BandedTable {
    fn get(&self, i: usize, j: usize) -> u32 {
        if self.in_band(i, j) {
            self.cells.get(self.slot(i, j)).copied().unwrap_or(0)
        } else {
            0
        }
    }
}

fn banded_row_len(width: usize, right_len: usize) -> usize {
    width
        .saturating_mul(2)
        .saturating_add(1)
        .min(right_len + 1)
}

fn walk<T: LcsTable>(table: &T, a: &[EquivalenceKey], b: &[EquivalenceKey]) -> Vec<Step> {
    let (mut i, mut j) = (0, 0);
    let mut steps = Vec::with_capacity(a.len() + b.len());
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            steps.push(Step::Pair(i, j));
            i += 1;
            j += 1;
        } else if table.get(i + 1, j) >= table.get(i, j + 1) {
            steps.push(Step::LeftOnly(i));
            i += 1;
        } else {
            steps.push(Step::RightOnly(j));
            j += 1;
        }
    }
    steps.extend((i..a.len()).map(Step::LeftOnly));
    steps.extend((j..b.len()).map(Step::RightOnly));
    steps
}

/// Whether the inputs exceed the exact-table cell budget
pub(crate) fn uses_band(
    left_len: usize,
    right_len: usize,
    config: &SequenceAlignerConfig,
) -> bool {
    left_len.saturating_mul(right_len) > config.max_exact_cells
}

/// Number of LCS cells the aligner allocates for inputs of these lengths
///
/// Never more than the exact `(|A| + 1)·(|B| + 1)` table.
pub(crate) fn table_cells(
    left_len: usize,
    right_len: usize,
    config: &SequenceAlignerConfig,
) -> usize {
    let exact = (left_len + 1).saturating_mul(right_len + 1);
    if !uses_band(left_len, right_len, config) {
        return exact;
    }
    let width = config.band_width.max(left_len.abs_diff(right_len));
    (left_len + 1).saturating_mul(banded_row_len(width, right_len))
}

/// Alignment steps for two key sequences
pub(crate) fn steps(
    a: &[EquivalenceKey],
    b: &[EquivalenceKey],
    config: &SequenceAlignerConfig,
) -> Vec<Step> {
    if uses_band(a.len(), b.len(), config) {
        walk(&BandedTable::build(a, b, config.band_width), a, b)
    } else {
        walk(&ExactTable::build(a, b), a, b)
    }
}

pub(crate) fn align<F>(
    left: &[Record],
    right: &[Record],
    config: &SequenceAlignerConfig,
    compare: F,
) -> Vec<Correspondence>
where
    F: Fn(&Record, &Record) -> ComparisonResult,
{
    let a = keys_of(left);
    let b = keys_of(right);
    steps(&a, &b, config)
        .into_iter()
        .map(|step| match step {
            Step::Pair(i, j) => Correspondence::paired(
                left[i].sequence_index,
                right[j].sequence_index,
                compare(&left[i], &right[j]),
            ),
            Step::LeftOnly(i) => Correspondence::left_only(left[i].sequence_index),
            Step::RightOnly(j) => Correspondence::right_only(right[j].sequence_index),
        })
        .collect()
}
