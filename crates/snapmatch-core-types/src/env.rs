//! Environment toggle names and default locations

/// Any non-empty value turns on `create_missing` for settings seeded from the environment.
pub const ENV_CREATE_MISSING_SNAPSHOTS: &str = "SNAPTEST_CREATE_MISSING_SNAPSHOTS";

/// Any non-empty value turns on `force_refresh` for settings seeded from the environment.
pub const ENV_REFRESH_SNAPSHOTS: &str = "SNAPTEST_REFRESH";

/// Subdirectory appended to a derived base directory to hold snapshot files.
pub const DEFAULT_SNAPSHOT_SUBDIRECTORY: &str = "_snapshots";

pub const DEFAULT_SNAPSHOT_EXTENSION: &str = ".txt";
pub const DEFAULT_MISMATCH_EXTENSION: &str = ".txt.actual";
