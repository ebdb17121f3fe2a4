//! Assertion helpers for use inside tests

use crate::consumer::{ConsumerComparator, RecordingConsumer};
use crate::matcher::match_to;
use serde::Serialize;
use snapmatch_core::settings::SettingsBuilder;
use std::sync::Arc;

/// Match `actual` and panic with both sides on mismatch
///
/// The pipeline always completes before the panic, so a mismatch file is
/// written for review. A comparator set on `settings` still decides the
/// outcome; it is wrapped so the panic message can show both sides.
///
/// # Panics
///
/// Panics if the settings are invalid, the match raises an error, or the
/// result does not match the snapshot.
pub fn assert_matches<T>(actual: &T, settings: SettingsBuilder)
where
    T: Serialize + ?Sized,
{
    let recorder = Arc::new(RecordingConsumer::new());
    let comparator = match settings.configured_comparator() {
        Some(inner) => ConsumerComparator::wrapping(recorder.clone(), inner),
        None => ConsumerComparator::new(recorder.clone()),
    };
    let settings = match settings.comparator(Arc::new(comparator)).build() {
        Ok(settings) => settings,
        Err(e) => panic!("invalid snapshot settings: {}", e),
    };

    match match_to(actual, &settings) {
        Ok(true) => {}
        Ok(false) => {
            let details = recorder
                .last()
                .map(|report| report.to_string())
                .unwrap_or_default();
            panic!(
                "snapshot '{}' does not match (review {})\n{}",
                settings.snapshot_name(),
                settings.mismatch_file_path().display(),
                details
            );
        }
        Err(e) => panic!("snapshot '{}' failed: {}", settings.snapshot_name(), e),
    }
}

/// Assert that a value matches the named snapshot stored under
/// `$CARGO_MANIFEST_DIR/_snapshots`
///
/// An optional third argument is an initializer applied to the settings
/// builder:
///
/// ```ignore
/// assert_snapshot!("order_totals", order);
/// assert_snapshot!("order_totals", order, |b| b.field("$.id").exclude());
/// ```
#[macro_export]
macro_rules! assert_snapshot {
    ($name:expr, $actual:expr) => {
        $crate::assert_snapshot!($name, $actual, |builder| builder)
    };
    ($name:expr, $actual:expr, $configure:expr) => {
        $crate::assert::assert_matches(
            &$actual,
            $crate::SettingsBuilder::from_env()
                .snapshot_name($name)
                .snapshot_directory(
                    ::std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                        .join($crate::DEFAULT_SNAPSHOT_SUBDIRECTORY),
                )
                .with_settings($configure),
        )
    };
}
