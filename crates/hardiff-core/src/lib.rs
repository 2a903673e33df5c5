//! hardiff Core - HTTP traffic log alignment and comparison engine
//!
//! This crate aligns two captured logs of request/response records and
//! classifies the differences of every aligned pair, including:
//! - Record model and the equivalence key shared by both aligners
//! - Grouped (many-position) and sequential (LCS, one-to-one) alignment
//! - Section-by-section field comparison with structural JSON diffs
//! - Global and URL-scoped exemption policies held in a swappable store
//!
//! The engine is synchronous and performs no I/O; parsing capture files and
//! policy documents is left to the host (see `hardiff-har`).

pub mod align;
pub mod compare;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exemption;
pub mod key;
pub mod logging_facility;
pub mod model;

// Used by the exported logging macros
pub use hardiff_core_types;

// Re-export commonly used types
pub use compare::{DetailedComparisonReport, DifferenceKind, KeyDifference, SectionReport};
pub use config::{EngineConfig, SequenceAlignerConfig};
pub use engine::Engine;
pub use errors::{ExError, ExErrorKind, HarDiffError, Result};
pub use exemption::{ExemptionPolicy, ExemptionSet, ExemptionStore, ScopedRule};
pub use key::EquivalenceKey;
pub use model::{
    ComparisonResult, ComparisonStatus, Correspondence, Record, RecordBuilder, SectionKind,
};
