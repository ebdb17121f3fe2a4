use thiserror::Error;

/// Result type alias using SnapError
pub type Result<T> = std::result::Result<T, SnapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tests and callers can match on
/// without depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Settings could not be built (blank group key, missing name)
    Configuration,
    /// A query path is malformed
    InvalidPath,
    /// Snapshot content is not valid structured text, or has the wrong shape
    Parse,
    /// An exclusion would remove the whole value
    Selection,
    /// A non-serialized payload reached a stage that only handles text
    UnsupportedPayload,
    /// The expected value was read before any stage set it
    ExpectedUnknown,
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::Parse => "ERR_PARSE",
            ExErrorKind::Selection => "ERR_SELECTION",
            ExErrorKind::UnsupportedPayload => "ERR_UNSUPPORTED_PAYLOAD",
            ExErrorKind::ExpectedUnknown => "ERR_EXPECTED_UNKNOWN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind plus optional operation and path context. Logging macros
/// convert every error into this shape before emitting `err.code`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file or query path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for snapshot matching
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapError {
    // ===== Configuration Errors =====
    /// Group key was supplied but contains only whitespace
    #[error("Snapshot group key must either be absent or contain at least one non-whitespace character")]
    InvalidGroupKey,

    /// No snapshot name was set and none could be derived
    #[error("Snapshot name must be specified in order to determine the snapshot file name")]
    MissingSnapshotName,

    /// A test context provider could not produce an identity
    #[error("Test context unavailable: {reason}")]
    ContextUnavailable { reason: String },

    // ===== Path Errors =====
    /// A query path could not be parsed
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// An excluded path resolved to the root of the value
    #[error("Excluded path '{path}' matched the root of the result; the entire result cannot be excluded from a snapshot match")]
    RootExclusion { path: String },

    // ===== Parse Errors =====
    /// Snapshot file content is not valid JSON
    #[error("Unable to read and parse contents of file as JSON: {file}: {reason}")]
    Parse { file: String, reason: String },

    /// A grouped snapshot file does not hold a JSON object
    #[error("File does not contain a JSON object representing a snapshot group: {file}")]
    GroupNotObject { file: String },

    // ===== Pipeline Errors =====
    /// Expected value accessed before a stage set it
    #[error("Expected value cannot be accessed until it has been explicitly set")]
    ExpectedUnknown,

    /// Writer received a value that was never serialized
    #[error("The snapshot pipeline produced {description} for writing to file storage, but only serialized text can be written; a serializer stage is probably missing")]
    UnsupportedPayload { description: String },

    // ===== Generic Errors =====
    /// Filesystem failure
    #[error("I/O error during {op} on {path}: {message}")]
    Io {
        op: String,
        path: String,
        message: String,
    },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl SnapError {
    /// Kind of this error in the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            SnapError::InvalidGroupKey
            | SnapError::MissingSnapshotName
            | SnapError::ContextUnavailable { .. } => ExErrorKind::Configuration,
            SnapError::InvalidPath { .. } => ExErrorKind::InvalidPath,
            SnapError::RootExclusion { .. } => ExErrorKind::Selection,
            SnapError::Parse { .. } | SnapError::GroupNotObject { .. } => ExErrorKind::Parse,
            SnapError::ExpectedUnknown => ExErrorKind::ExpectedUnknown,
            SnapError::UnsupportedPayload { .. } => ExErrorKind::UnsupportedPayload,
            SnapError::Io { .. } => ExErrorKind::Io,
            SnapError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }
}

/// Conversion from SnapError to ExError
impl From<SnapError> for ExError {
    fn from(err: SnapError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let ex = ExError::new(kind).with_message(message);
        match err {
            SnapError::InvalidPath { path, .. } | SnapError::RootExclusion { path } => {
                ex.with_op("filter_value").with_path(path)
            }
            SnapError::Parse { file, .. } | SnapError::GroupNotObject { file } => {
                ex.with_op("read_snapshot").with_path(file)
            }
            SnapError::Io { op, path, .. } => ex.with_op(op).with_path(path),
            SnapError::InvalidGroupKey
            | SnapError::MissingSnapshotName
            | SnapError::ContextUnavailable { .. } => ex.with_op("build_settings"),
            SnapError::UnsupportedPayload { .. } => ex.with_op("write_snapshot"),
            SnapError::ExpectedUnknown | SnapError::Serialization { .. } => ex,
        }
    }
}

impl From<&SnapError> for ExError {
    fn from(err: &SnapError) -> Self {
        err.clone().into()
    }
}

impl From<serde_json::Error> for SnapError {
    fn from(err: serde_json::Error) -> Self {
        SnapError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(ExErrorKind::Parse.code(), "ERR_PARSE");
        assert_eq!(ExErrorKind::Selection.code(), "ERR_SELECTION");
        assert_eq!(ExErrorKind::Configuration.code(), "ERR_CONFIGURATION");
    }

    #[test]
    fn test_root_exclusion_maps_to_selection() {
        let err = SnapError::RootExclusion {
            path: "$".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::Selection);
        assert_eq!(ex.path(), Some("$"));
        assert_eq!(ex.op(), Some("filter_value"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = SnapError::Parse {
            file: "snaps/a.txt".to_string(),
            reason: "expected value".to_string(),
        };
        assert!(err.to_string().contains("snaps/a.txt"));
        let ex: ExError = (&err).into();
        assert_eq!(ex.code(), "ERR_PARSE");
        assert!(ex.to_string().contains("(path: snaps/a.txt)"));
    }

    #[test]
    fn test_blank_group_key_is_configuration() {
        assert_eq!(SnapError::InvalidGroupKey.kind(), ExErrorKind::Configuration);
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let ex: ExError = SnapError::from(json_err).into();
        assert_eq!(ex.code(), "ERR_SERIALIZATION");
        assert_eq!(ex.op(), None);
    }
}
