//! Match orchestration
//!
//! 1. Convert the actual result into a `SnapshotValue`
//! 2. Remove excluded paths, then select included paths
//! 3. Run the pipeline (reader, serializer, comparator, writer)
//! 4. Return the comparison outcome
//!
//! Errors from any step propagate unchanged.

use serde::Serialize;
use snapmatch_core::context::SnapshotContext;
use snapmatch_core::errors::Result;
use snapmatch_core::pipeline::{ComparatorStage, Pipeline, SerializerStage};
use snapmatch_core::settings::Settings;
use snapmatch_core::value::SnapshotValue;
use snapmatch_core::{log_op_end, log_op_error, log_op_start};
use snapmatch_store::{ReaderStage, WriterStage};
use std::sync::OnceLock;
use std::time::Instant;

/// Apply exclusions then inclusions to an actual result
///
/// Excluded paths are removed from the whole tree first; included paths
/// then select from what remains. With no included paths the value passes
/// through. A selection that matches nothing yields `Null`.
///
/// # Errors
///
/// `InvalidPath` for malformed paths, `RootExclusion` if an excluded path
/// resolves to the root.
pub fn filter_value(mut value: SnapshotValue, settings: &Settings) -> Result<SnapshotValue> {
    if !settings.excluded_paths().is_empty() {
        value.remove(settings.excluded_paths())?;
    }
    if settings.included_paths().is_empty() {
        return Ok(value);
    }
    Ok(value
        .select(settings.included_paths())?
        .unwrap_or(SnapshotValue::Null))
}

/// The pipeline every match runs through unless replaced
pub fn default_pipeline() -> Pipeline {
    Pipeline::new()
        .use_stage(ReaderStage)
        .use_stage(SerializerStage)
        .use_stage(ComparatorStage)
        .use_stage(WriterStage)
}

/// A matcher bound to one pipeline
pub struct Snapshot {
    pipeline: Pipeline,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot {
    pub fn new() -> Self {
        Self::with_pipeline(default_pipeline())
    }

    /// Use a custom pipeline, e.g. one with extra function stages
    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Match any serializable result against its snapshot
    ///
    /// # Errors
    ///
    /// Returns the first error raised by filtering or any pipeline stage.
    pub fn match_to<T>(&self, actual: &T, settings: &Settings) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        let value = SnapshotValue::from_serializable(actual)?;
        self.match_value(value, settings)
    }

    /// Match an already-converted value against its snapshot
    ///
    /// # Errors
    ///
    /// Returns the first error raised by filtering or any pipeline stage.
    pub fn match_value(&self, actual: SnapshotValue, settings: &Settings) -> Result<bool> {
        log_op_start!(
            "match_to",
            snapshot_name = settings.snapshot_name(),
            group_key = settings.group_key()
        );
        let start = Instant::now();

        let result = self.run(actual, settings).map_err(|e| {
            log_op_error!(
                "match_to",
                &e,
                duration_ms = start.elapsed().as_millis() as u64,
                snapshot_name = settings.snapshot_name()
            );
            e
        })?;

        log_op_end!(
            "match_to",
            duration_ms = start.elapsed().as_millis() as u64,
            snapshot_name = settings.snapshot_name(),
            matched = result
        );
        Ok(result)
    }

    fn run(&self, actual: SnapshotValue, settings: &Settings) -> Result<bool> {
        let filtered = filter_value(actual, settings)?;
        let mut context = SnapshotContext::new(settings, filtered);
        self.pipeline.process(&mut context)
    }
}

fn shared() -> &'static Snapshot {
    static SHARED: OnceLock<Snapshot> = OnceLock::new();
    SHARED.get_or_init(Snapshot::new)
}

/// Match `actual` against its snapshot with the default pipeline
///
/// # Errors
///
/// Returns the first error raised by filtering or any pipeline stage.
pub fn match_to<T>(actual: &T, settings: &Settings) -> Result<bool>
where
    T: Serialize + ?Sized,
{
    shared().match_to(actual, settings)
}

/// [`match_to`] for a value that is already a `SnapshotValue`
///
/// # Errors
///
/// Returns the first error raised by filtering or any pipeline stage.
pub fn match_value(actual: SnapshotValue, settings: &Settings) -> Result<bool> {
    shared().match_value(actual, settings)
}
