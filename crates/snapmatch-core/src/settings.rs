//! Snapshot settings and their builder
//!
//! Settings are immutable once built. Environment toggles are read when the
//! builder is created with `SettingsBuilder::from_env()`, never afterwards.

use crate::comparator::{DefaultComparator, SnapshotComparator};
use crate::errors::{Result, SnapError};
use crate::messages::{MessageSink, TracingSink};
use snapmatch_core_types::env::{
    DEFAULT_MISMATCH_EXTENSION, DEFAULT_SNAPSHOT_EXTENSION, ENV_CREATE_MISSING_SNAPSHOTS,
    ENV_REFRESH_SNAPSHOTS,
};
use snapmatch_core_types::SnapshotIdentity;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const INVALID_FILE_NAME_CHARS: &[char] = &['/', '\\', '|', ':', '*', '?', '"', '<', '>'];

/// Replace characters that are unsafe in file names with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if INVALID_FILE_NAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Behavior flags taken from the process environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvToggles {
    pub force_refresh: bool,
    pub create_missing: bool,
}

impl EnvToggles {
    /// A variable counts as set when it has any non-empty value
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        Self {
            force_refresh: is_set(ENV_REFRESH_SNAPSHOTS),
            create_missing: is_set(ENV_CREATE_MISSING_SNAPSHOTS),
        }
    }
}

/// Immutable configuration for one match
#[derive(Clone)]
pub struct Settings {
    snapshot_name: String,
    group_key: Option<String>,
    included_paths: Vec<String>,
    excluded_paths: Vec<String>,
    snapshot_directory: PathBuf,
    snapshot_extension: String,
    mismatch_extension: String,
    force_refresh: bool,
    create_missing: bool,
    indent_output: bool,
    comparator: Arc<dyn SnapshotComparator>,
    message_sink: Arc<dyn MessageSink>,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    pub fn snapshot_name(&self) -> &str {
        &self.snapshot_name
    }

    pub fn group_key(&self) -> Option<&str> {
        self.group_key.as_deref()
    }

    pub fn is_grouped(&self) -> bool {
        self.group_key.is_some()
    }

    pub fn included_paths(&self) -> &[String] {
        &self.included_paths
    }

    pub fn excluded_paths(&self) -> &[String] {
        &self.excluded_paths
    }

    pub fn snapshot_directory(&self) -> &Path {
        &self.snapshot_directory
    }

    pub fn snapshot_extension(&self) -> &str {
        &self.snapshot_extension
    }

    pub fn mismatch_extension(&self) -> &str {
        &self.mismatch_extension
    }

    pub fn force_refresh(&self) -> bool {
        self.force_refresh
    }

    pub fn create_missing(&self) -> bool {
        self.create_missing
    }

    pub fn indent_output(&self) -> bool {
        self.indent_output
    }

    pub fn comparator(&self) -> &Arc<dyn SnapshotComparator> {
        &self.comparator
    }

    pub fn message_sink(&self) -> &Arc<dyn MessageSink> {
        &self.message_sink
    }

    /// `directory/name + snapshot_extension`, shared by every member of a group
    pub fn snapshot_file_path(&self) -> PathBuf {
        let file_name = format!("{}{}", self.snapshot_name, self.snapshot_extension);
        self.snapshot_directory
            .join(sanitize_file_name(&file_name))
    }

    /// `directory/name[.group_key] + mismatch_extension`
    pub fn mismatch_file_path(&self) -> PathBuf {
        let stem = match &self.group_key {
            Some(key) => format!("{}.{}", self.snapshot_name, key),
            None => self.snapshot_name.clone(),
        };
        let file_name = format!("{}{}", stem, self.mismatch_extension);
        self.snapshot_directory
            .join(sanitize_file_name(&file_name))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("snapshot_name", &self.snapshot_name)
            .field("group_key", &self.group_key)
            .field("included_paths", &self.included_paths)
            .field("excluded_paths", &self.excluded_paths)
            .field("snapshot_directory", &self.snapshot_directory)
            .field("snapshot_extension", &self.snapshot_extension)
            .field("mismatch_extension", &self.mismatch_extension)
            .field("force_refresh", &self.force_refresh)
            .field("create_missing", &self.create_missing)
            .field("indent_output", &self.indent_output)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Settings`]
#[derive(Clone, Default)]
pub struct SettingsBuilder {
    snapshot_name: Option<String>,
    group_key: Option<String>,
    included_paths: Vec<String>,
    excluded_paths: Vec<String>,
    snapshot_directory: Option<PathBuf>,
    snapshot_extension: Option<String>,
    mismatch_extension: Option<String>,
    force_refresh: bool,
    create_missing: bool,
    indent_output: Option<bool>,
    comparator: Option<Arc<dyn SnapshotComparator>>,
    message_sink: Option<Arc<dyn MessageSink>>,
}

impl SettingsBuilder {
    /// A builder with both behavior flags off
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose behavior flags come from the environment
    pub fn from_env() -> Self {
        Self::new().env_toggles(EnvToggles::from_env())
    }

    pub fn env_toggles(mut self, toggles: EnvToggles) -> Self {
        self.force_refresh = toggles.force_refresh;
        self.create_missing = toggles.create_missing;
        self
    }

    pub fn snapshot_name(mut self, name: impl Into<String>) -> Self {
        self.snapshot_name = Some(name.into());
        self
    }

    /// Store this result as one member of a group file. Validated in `build`.
    pub fn group_key(mut self, key: impl Into<String>) -> Self {
        self.group_key = Some(key.into());
        self
    }

    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.included_paths.push(path.into());
        self
    }

    pub fn exclude(mut self, path: impl Into<String>) -> Self {
        self.excluded_paths.push(path.into());
        self
    }

    /// Fluent field selection: `builder.field("$.id").exclude()`
    pub fn field(self, path: impl Into<String>) -> FieldSelector {
        FieldSelector {
            builder: self,
            path: path.into(),
        }
    }

    pub fn snapshot_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.snapshot_directory = Some(directory.into());
        self
    }

    pub fn snapshot_extension(mut self, extension: impl Into<String>) -> Self {
        self.snapshot_extension = Some(extension.into());
        self
    }

    pub fn mismatch_extension(mut self, extension: impl Into<String>) -> Self {
        self.mismatch_extension = Some(extension.into());
        self
    }

    pub fn force_refresh(mut self, enabled: bool) -> Self {
        self.force_refresh = enabled;
        self
    }

    pub fn create_missing(mut self, enabled: bool) -> Self {
        self.create_missing = enabled;
        self
    }

    pub fn indent_output(mut self, enabled: bool) -> Self {
        self.indent_output = Some(enabled);
        self
    }

    pub fn comparator(mut self, comparator: Arc<dyn SnapshotComparator>) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// The comparator set so far, if any
    pub fn configured_comparator(&self) -> Option<Arc<dyn SnapshotComparator>> {
        self.comparator.clone()
    }

    pub fn message_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.message_sink = Some(sink);
        self
    }

    /// Apply a reusable initializer
    pub fn with_settings<F>(self, initializer: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        initializer(self)
    }

    /// Fill name, directory and group key from `identity` where not already set
    pub fn apply_identity(mut self, identity: &SnapshotIdentity) -> Self {
        if self.snapshot_name.is_none() {
            self.snapshot_name = Some(identity.name.clone());
        }
        if self.snapshot_directory.is_none() {
            self.snapshot_directory = Some(identity.directory.clone());
        }
        if self.group_key.is_none() {
            self.group_key = identity.group_key.clone();
        }
        self
    }

    /// # Errors
    ///
    /// - `InvalidGroupKey` if a group key was given but is blank
    /// - `MissingSnapshotName` if no name was given or it is blank
    pub fn build(self) -> Result<Settings> {
        let group_key = match self.group_key {
            Some(key) => {
                let trimmed = key.trim();
                if trimmed.is_empty() {
                    return Err(SnapError::InvalidGroupKey);
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let snapshot_name = self
            .snapshot_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(SnapError::MissingSnapshotName)?;

        Ok(Settings {
            snapshot_name,
            group_key,
            included_paths: self.included_paths,
            excluded_paths: self.excluded_paths,
            snapshot_directory: self.snapshot_directory.unwrap_or_default(),
            snapshot_extension: self
                .snapshot_extension
                .unwrap_or_else(|| DEFAULT_SNAPSHOT_EXTENSION.to_string()),
            mismatch_extension: self
                .mismatch_extension
                .unwrap_or_else(|| DEFAULT_MISMATCH_EXTENSION.to_string()),
            force_refresh: self.force_refresh,
            create_missing: self.create_missing,
            indent_output: self.indent_output.unwrap_or(true),
            comparator: self
                .comparator
                .unwrap_or_else(|| Arc::new(DefaultComparator)),
            message_sink: self.message_sink.unwrap_or_else(|| Arc::new(TracingSink)),
        })
    }
}

/// Pending include/exclude of one path
pub struct FieldSelector {
    builder: SettingsBuilder,
    path: String,
}

impl FieldSelector {
    pub fn include(self) -> SettingsBuilder {
        self.builder.include(self.path)
    }

    pub fn exclude(self) -> SettingsBuilder {
        self.builder.exclude(self.path)
    }
}
