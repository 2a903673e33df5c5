use hardiff_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// The first three kinds are data-quality conditions the engine recovers from
/// locally; they are never returned from an alignment or comparison call and
/// only appear in logs and section notes. The remaining kinds belong to host
/// operations (reading files, decoding documents, loading configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Recovered by the engine
    /// A body expected to be JSON failed to parse; compared as text instead
    MalformedPayload,
    /// One or both record sequences were empty
    EmptyInput,
    /// A scoped exemption rule has no usable matcher and is skipped
    PolicyMismatch,
    /// A record lacks data needed for comparison (e.g. an empty method)
    MalformedRecord,

    // Host-side
    InvalidInput,
    InvalidHar,
    InvalidPolicy,
    InvalidConfig,
    NotFound,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedPayload => "ERR_MALFORMED_PAYLOAD",
            ExErrorKind::EmptyInput => "ERR_EMPTY_INPUT",
            ExErrorKind::PolicyMismatch => "ERR_POLICY_MISMATCH",
            ExErrorKind::MalformedRecord => "ERR_MALFORMED_RECORD",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidHar => "ERR_INVALID_HAR",
            ExErrorKind::InvalidPolicy => "ERR_INVALID_POLICY",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the engine recovers from this kind without failing the call
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MalformedPayload
                | ExErrorKind::EmptyInput
                | ExErrorKind::PolicyMismatch
                | ExErrorKind::MalformedRecord
        )
    }
}

/// Canonical structured error type
///
/// Carries a stable kind for programmatic handling plus optional context
/// (operation, record, section, run) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record: Option<usize>,
    section: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record: None,
            section: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the sequence index of the record involved
    pub fn with_record(mut self, sequence_index: usize) -> Self {
        self.record = Some(sequence_index);
        self
    }

    /// Add the comparison section involved
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Add run correlation
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the record context, if any
    pub fn record(&self) -> Option<usize> {
        self.record
    }

    /// Get the section context, if any
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Get the run correlation, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(record) = self.record {
            write!(f, " (record: #{})", record)?;
        }
        if let Some(section) = &self.section {
            write!(f, " (section: {})", section)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Typed error taxonomy for hardiff operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarDiffError {
    /// A body that looked like JSON could not be parsed
    #[error("Malformed JSON in {section} of record #{sequence_index}: {reason}")]
    MalformedPayload {
        section: String,
        sequence_index: usize,
        reason: String,
    },

    /// An alignment was requested with an empty log on one or both sides
    #[error("Empty input: left has {left_len} records, right has {right_len}")]
    EmptyInput { left_len: usize, right_len: usize },

    /// A scoped exemption rule names neither a host nor a URL substring
    #[error("Scoped exemption rule at position {position} has no matcher")]
    PolicyMismatch { position: usize },

    /// A record cannot be compared meaningfully
    #[error("Record #{sequence_index} is malformed: {reason}")]
    MalformedRecord {
        sequence_index: usize,
        reason: String,
    },

    /// A HAR document could not be decoded
    #[error("Invalid HAR document: {reason}")]
    InvalidHar { reason: String },

    /// An exemption policy document could not be decoded
    #[error("Invalid exemption policy: {reason}")]
    InvalidPolicy { reason: String },

    /// Engine configuration is invalid
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A record selected by the host does not exist
    #[error("Record #{sequence_index} not found in {side} log")]
    RecordNotFound { side: String, sequence_index: usize },

    /// Serialization error (JSON/TOML encoding or decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from HarDiffError to ExError
impl From<HarDiffError> for ExError {
    fn from(err: HarDiffError) -> Self {
        match err {
            HarDiffError::MalformedPayload {
                section,
                sequence_index,
                reason,
            } => ExError::new(ExErrorKind::MalformedPayload)
                .with_record(sequence_index)
                .with_section(section)
                .with_message(reason),

            HarDiffError::EmptyInput {
                left_len,
                right_len,
            } => ExError::new(ExErrorKind::EmptyInput).with_message(format!(
                "left has {} records, right has {}",
                left_len, right_len
            )),

            HarDiffError::PolicyMismatch { position } => {
                ExError::new(ExErrorKind::PolicyMismatch).with_message(format!(
                    "scoped rule at position {} has no host or url matcher",
                    position
                ))
            }

            HarDiffError::MalformedRecord {
                sequence_index,
                reason,
            } => ExError::new(ExErrorKind::MalformedRecord)
                .with_record(sequence_index)
                .with_message(reason),

            HarDiffError::InvalidHar { reason } => {
                ExError::new(ExErrorKind::InvalidHar).with_message(reason)
            }

            HarDiffError::InvalidPolicy { reason } => {
                ExError::new(ExErrorKind::InvalidPolicy).with_message(reason)
            }

            HarDiffError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            HarDiffError::RecordNotFound {
                side,
                sequence_index,
            } => ExError::new(ExErrorKind::NotFound)
                .with_record(sequence_index)
                .with_message(format!("record not found in {} log", side)),

            HarDiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            HarDiffError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

impl From<std::io::Error> for ExError {
    fn from(err: std::io::Error) -> Self {
        ExError::new(ExErrorKind::Io).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExErrorKind::MalformedPayload.code(), "ERR_MALFORMED_PAYLOAD");
        assert_eq!(ExErrorKind::EmptyInput.code(), "ERR_EMPTY_INPUT");
        assert_eq!(ExErrorKind::PolicyMismatch.code(), "ERR_POLICY_MISMATCH");
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(ExErrorKind::MalformedPayload.is_recoverable());
        assert!(ExErrorKind::EmptyInput.is_recoverable());
        assert!(ExErrorKind::PolicyMismatch.is_recoverable());
        assert!(!ExErrorKind::InvalidHar.is_recoverable());
        assert!(!ExErrorKind::Io.is_recoverable());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::MalformedPayload)
            .with_op("compare_records")
            .with_record(3)
            .with_section("payload")
            .with_message("expected value at line 1");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_MALFORMED_PAYLOAD]"));
        assert!(text.contains("compare_records"));
        assert!(text.contains("#3"));
        assert!(text.contains("payload"));
    }

    #[test]
    fn test_source_chain() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::InvalidHar).with_source(inner);
        assert_eq!(outer.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
        assert!(std::error::Error::source(&outer).is_some());
    }
}
