//! Snapshot reading stage
//!
//! Runs after the inner stages return and before the comparator looks at
//! the result, so the expected value is in place by the time it is needed.

use crate::errors::{parse_error, Result};
use crate::files::{read_text, strip_trailing_newline};
use snapmatch_core::advisory::Tip;
use snapmatch_core::context::{Payload, SnapshotContext};
use snapmatch_core::pipeline::{Next, SnapshotStage};
use snapmatch_core::value::{GroupDocument, SnapshotValue};

/// Loads the expected result from the primary snapshot file
#[derive(Debug, Default, Clone, Copy)]
pub struct ReaderStage;

impl ReaderStage {
    fn read(&self, context: &mut SnapshotContext<'_>) -> Result<()> {
        let settings = context.settings();
        let path = settings.snapshot_file_path();

        // An ungrouped refresh overwrites the whole file, so nothing to load
        if settings.force_refresh() && !settings.is_grouped() {
            context.set_expected_placeholder();
            return Ok(());
        }

        if let Some(text) = read_text(&path)? {
            match settings.group_key() {
                None => {
                    let expected = if context.actual().value().is_string() {
                        let raw = strip_trailing_newline(&text).to_string();
                        Payload::Serialized {
                            value: SnapshotValue::String(raw.clone()),
                            text: raw,
                        }
                    } else {
                        Payload::Value(
                            SnapshotValue::parse(&text).map_err(|e| parse_error(&path, e))?,
                        )
                    };
                    context.set_expected(expected);
                    context.set_snapshot_found(true);
                }
                Some(key) => {
                    let document = GroupDocument::from_json(&text, &path.display().to_string())?;
                    if let Some(member) = document.get(key) {
                        context.set_expected(Payload::Value(member.clone()));
                        context.set_snapshot_found(true);
                    }
                    context.set_group(document);
                }
            }
        }

        if settings.force_refresh() || (settings.create_missing() && !context.snapshot_found()) {
            context.set_expected_placeholder();
        } else if !context.snapshot_found() {
            match settings.group_key() {
                Some(key) if context.group().is_some() => context.message(&format!(
                    "WARNING: Test result snapshot group '{}' does not exist in file: {}",
                    key,
                    path.display()
                )),
                _ => context.message(&format!(
                    "WARNING: Test result snapshot file does not exist: {}",
                    path.display()
                )),
            }
            context.show_tip_once(Tip::CreateMissing);
        }

        tracing::debug!(
            snapshot_name = context.test_name(),
            file_path = %path.display(),
            found = context.snapshot_found(),
            "read snapshot"
        );
        Ok(())
    }
}

impl SnapshotStage for ReaderStage {
    fn name(&self) -> &'static str {
        "reader"
    }

    fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool> {
        if !next.run(context)? {
            return Ok(false);
        }
        self.read(context)?;
        Ok(true)
    }
}
