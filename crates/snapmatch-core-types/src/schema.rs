//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the emitting stages
//! and the test capture layer that asserts on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Snapshot identifiers
pub const FIELD_SNAPSHOT_NAME: &str = "snapshot_name";
pub const FIELD_GROUP_KEY: &str = "group_key";
pub const FIELD_FILE_PATH: &str = "file_path";

// Outcomes
pub const FIELD_MATCHED: &str = "matched";
pub const FIELD_DECISION: &str = "decision";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Storage decisions recorded under FIELD_DECISION
pub const DECISION_WRITE_PRIMARY: &str = "write_primary";
pub const DECISION_WRITE_MISMATCH: &str = "write_mismatch";
pub const DECISION_NO_WRITE: &str = "no_write";
