//! Snapshot writing stage
//!
//! Outermost stage: it sees the comparison outcome and the reader's
//! findings, then decides what, if anything, to persist.

use crate::errors::Result;
use crate::files::{remove_if_exists, write_snapshot_text};
use snapmatch_core::advisory::Tip;
use snapmatch_core::context::SnapshotContext;
use snapmatch_core::pipeline::{Next, SnapshotStage};
use snapmatch_core::value::GroupDocument;
use snapmatch_core_types::schema::{
    DECISION_NO_WRITE, DECISION_WRITE_MISMATCH, DECISION_WRITE_PRIMARY,
};
use std::path::Path;

/// What the writer does after a match attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Create or refresh the primary snapshot
    Primary,
    /// Record the actual result next to the snapshot for review
    Mismatch,
    None,
}

impl WriteDecision {
    pub fn decide(force_refresh: bool, create_missing: bool, found: bool, matched: bool) -> Self {
        if force_refresh || (create_missing && !found) {
            WriteDecision::Primary
        } else if !matched {
            WriteDecision::Mismatch
        } else {
            WriteDecision::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WriteDecision::Primary => DECISION_WRITE_PRIMARY,
            WriteDecision::Mismatch => DECISION_WRITE_MISMATCH,
            WriteDecision::None => DECISION_NO_WRITE,
        }
    }
}

/// Persists the actual result as a snapshot or mismatch file
#[derive(Debug, Default, Clone, Copy)]
pub struct WriterStage;

impl WriterStage {
    fn write_primary(&self, context: &mut SnapshotContext<'_>, path: &Path) -> Result<()> {
        let settings = context.settings();
        match settings.group_key() {
            None => write_snapshot_text(path, context.actual().text()?)?,
            Some(key) => {
                // Fail before touching the file if no serializer ran
                context.actual().text()?;
                let mut document = context.take_group().unwrap_or_default();
                document.upsert(key, context.actual().value().clone());
                write_snapshot_text(path, &document.serialize(settings.indent_output())?)?;
                context.set_group(document);
            }
        }
        context.message(&format!(
            "Created or refreshed snapshot file at {}",
            path.display()
        ));
        context.show_tip_once(Tip::ReviewNewSnapshot);
        Ok(())
    }

    fn write_mismatch(&self, context: &SnapshotContext<'_>, path: &Path) -> Result<()> {
        let settings = context.settings();
        match settings.group_key() {
            None => write_snapshot_text(path, context.actual().text()?)?,
            Some(key) => {
                context.actual().text()?;
                let document = GroupDocument::single(key, context.actual().value().clone());
                write_snapshot_text(path, &document.serialize(settings.indent_output())?)?;
            }
        }
        context.message(&format!(
            "Created snapshot actual mismatched output file at {}",
            path.display()
        ));
        context.show_tip_once(Tip::ReviewMismatch);
        Ok(())
    }
}

impl SnapshotStage for WriterStage {
    fn name(&self) -> &'static str {
        "writer"
    }

    fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool> {
        let matched = next.run(context)?;
        let settings = context.settings();

        remove_if_exists(&settings.mismatch_file_path())?;

        let decision = WriteDecision::decide(
            settings.force_refresh(),
            settings.create_missing(),
            context.snapshot_found(),
            matched,
        );
        let path = match decision {
            WriteDecision::Primary => {
                let path = settings.snapshot_file_path();
                self.write_primary(context, &path)?;
                Some(path)
            }
            WriteDecision::Mismatch => {
                let path = settings.mismatch_file_path();
                self.write_mismatch(context, &path)?;
                Some(path)
            }
            WriteDecision::None => None,
        };

        tracing::debug!(
            snapshot_name = context.test_name(),
            group_key = settings.group_key(),
            decision = decision.as_str(),
            file_path = ?path,
            matched,
            "snapshot storage decision"
        );
        Ok(matched)
    }
}
