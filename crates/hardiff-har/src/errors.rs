//! Error handling for hardiff-har
//!
//! Wraps hardiff-core ExError with loader-specific helpers

use hardiff_core::errors::{ExError, ExErrorKind, HarDiffError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an invalid HAR document error
pub fn invalid_har(reason: impl Into<String>) -> ExError {
    ExError::from(HarDiffError::InvalidHar {
        reason: reason.into(),
    })
    .with_op(hardiff_core_types::schema::OP_PARSE_HAR)
}

/// Create an invalid policy document error
pub fn invalid_policy(reason: impl Into<String>) -> ExError {
    ExError::from(HarDiffError::InvalidPolicy {
        reason: reason.into(),
    })
    .with_op(hardiff_core_types::schema::OP_PARSE_POLICY)
}

/// Create an IO error for a file operation
pub fn io_error(operation: &str, path: &std::path::Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a missing record error
pub fn record_not_found(side: &str, sequence_index: usize) -> ExError {
    HarDiffError::RecordNotFound {
        side: side.to_string(),
        sequence_index,
    }
    .into()
}
