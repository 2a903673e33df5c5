//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Record identifiers
pub const FIELD_LEFT_INDEX: &str = "left_index";
pub const FIELD_RIGHT_INDEX: &str = "right_index";
pub const FIELD_SECTION: &str = "section";

// Collection sizes
pub const FIELD_LEFT_LEN: &str = "left_len";
pub const FIELD_RIGHT_LEN: &str = "right_len";
pub const FIELD_PAIRS: &str = "pairs";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_ALIGN_GROUPED: &str = "align_grouped";
pub const OP_ALIGN_SEQUENTIAL: &str = "align_sequential";
pub const OP_COMPARE_RECORDS: &str = "compare_records";
pub const OP_SET_EXEMPTION_POLICY: &str = "set_exemption_policy";

// Host operations
pub const OP_PARSE_HAR: &str = "parse_har";
pub const OP_PARSE_POLICY: &str = "parse_policy";
