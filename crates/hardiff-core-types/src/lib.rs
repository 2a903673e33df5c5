//! Core types shared across hardiff crates
//!
//! This crate provides foundational types used by the engine, the HAR
//! adapter and the CLI:
//!
//! - **Correlation types**: RunId, RunContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RunContext, RunId};
