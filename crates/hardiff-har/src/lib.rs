//! hardiff HAR - host-side loaders for the hardiff engine
//!
//! Turns HAR capture files into [`Record`](hardiff_core::Record) sequences and
//! exemption policy documents into [`ExemptionPolicy`](hardiff_core::ExemptionPolicy)
//! values. All file I/O of the workspace lives here.

pub mod errors;
pub mod har;
pub mod policy;

pub use errors::Result;
pub use har::{find_record, parse_har_file, parse_har_str};
pub use policy::{parse_policy_file, parse_policy_str};
