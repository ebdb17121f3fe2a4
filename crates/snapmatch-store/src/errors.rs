//! Store error helpers
//!
//! Filesystem failures become `SnapError::Io` tagged with the operation
//! and path that failed.

use snapmatch_core::errors::SnapError;
use std::path::Path;

pub use snapmatch_core::errors::Result;

/// Wrap an I/O error with the failing operation and file
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> SnapError {
    SnapError::Io {
        op: op.to_string(),
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Snapshot file content that is not valid JSON
pub fn parse_error(path: &Path, err: serde_json::Error) -> SnapError {
    SnapError::Parse {
        file: path.display().to_string(),
        reason: err.to_string(),
    }
}
