//! Test context providers
//!
//! A provider supplies the snapshot name, directory, and optional group key
//! for the test that is running. The engine never inspects call stacks; the
//! caller picks a provider.

use snapmatch_core::errors::{Result, SnapError};
use snapmatch_core::settings::SettingsBuilder;
use snapmatch_core_types::env::DEFAULT_SNAPSHOT_SUBDIRECTORY;
use snapmatch_core_types::SnapshotIdentity;
use std::path::PathBuf;

pub trait TestContextProvider {
    /// # Errors
    ///
    /// `ContextUnavailable` if the identity cannot be determined.
    fn identity(&self) -> Result<SnapshotIdentity>;
}

impl TestContextProvider for SnapshotIdentity {
    fn identity(&self) -> Result<SnapshotIdentity> {
        Ok(self.clone())
    }
}

/// Names snapshots after the current thread
///
/// The standard test harness names each test thread after the test's path,
/// so `tests::orders::totals` becomes the snapshot name `tests.orders.totals`
/// stored under `<base>/_snapshots`.
#[derive(Debug, Clone)]
pub struct ThreadNameContext {
    base_directory: PathBuf,
    group_key: Option<String>,
}

impl ThreadNameContext {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            group_key: None,
        }
    }

    pub fn with_group_key(mut self, key: impl Into<String>) -> Self {
        self.group_key = Some(key.into());
        self
    }

    fn name_from_thread(thread_name: Option<&str>) -> Result<String> {
        match thread_name {
            Some(name) if name != "main" && !name.trim().is_empty() => {
                Ok(name.replace("::", "."))
            }
            Some(name) => Err(SnapError::ContextUnavailable {
                reason: format!(
                    "thread '{}' does not identify a test; run under the test harness or supply a snapshot name",
                    name
                ),
            }),
            None => Err(SnapError::ContextUnavailable {
                reason: "current thread is unnamed; supply a snapshot name".to_string(),
            }),
        }
    }
}

impl TestContextProvider for ThreadNameContext {
    fn identity(&self) -> Result<SnapshotIdentity> {
        let name = Self::name_from_thread(std::thread::current().name())?;
        let identity = SnapshotIdentity::new(
            name,
            self.base_directory.join(DEFAULT_SNAPSHOT_SUBDIRECTORY),
        );
        Ok(match &self.group_key {
            Some(key) => identity.with_group_key(key.clone()),
            None => identity,
        })
    }
}

/// Settings builder seeded from the environment and the provider's identity
///
/// # Errors
///
/// Propagates the provider's `ContextUnavailable` error.
pub fn settings_for(provider: &dyn TestContextProvider) -> Result<SettingsBuilder> {
    Ok(SettingsBuilder::from_env().apply_identity(&provider.identity()?))
}
