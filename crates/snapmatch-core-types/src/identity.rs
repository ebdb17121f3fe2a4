//! Snapshot identity supplied by a test context provider

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a snapshot lives and which entry of a group file it refers to
///
/// Produced by whatever knows about the running test (a test framework
/// integration, a CLI, a hand-written fixture). The engine never derives
/// these values itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotIdentity {
    pub name: String,
    pub directory: PathBuf,
    pub group_key: Option<String>,
}

impl SnapshotIdentity {
    /// Create an ungrouped identity
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            group_key: None,
        }
    }

    /// Address an entry of a group file
    pub fn with_group_key(mut self, key: impl Into<String>) -> Self {
        self.group_key = Some(key.into());
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl std::fmt::Display for SnapshotIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(key) = &self.group_key {
            write!(f, "[{}]", key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display_without_group() {
        let id = SnapshotIdentity::new("tests::renders_city", "/tmp/snaps");
        assert_eq!(id.to_string(), "tests::renders_city");
    }

    #[test]
    fn test_identity_display_with_group() {
        let id = SnapshotIdentity::new("cities", "/tmp/snaps").with_group_key("sydney");
        assert_eq!(id.to_string(), "cities[sydney]");
    }

    #[test]
    fn test_serialization() {
        let id = SnapshotIdentity::new("cities", "snaps").with_group_key("perth");
        let json = serde_json::to_string(&id).unwrap();
        let back: SnapshotIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
