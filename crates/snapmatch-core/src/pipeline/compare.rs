use super::{Next, SnapshotStage};
use crate::context::{Expected, SnapshotContext};
use crate::errors::Result;

/// Compares actual to expected with the configured comparator
#[derive(Debug, Default, Clone, Copy)]
pub struct ComparatorStage;

impl SnapshotStage for ComparatorStage {
    fn name(&self) -> &'static str {
        "comparator"
    }

    fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool> {
        if !next.run(context)? {
            return Ok(false);
        }
        let matched = context
            .settings()
            .comparator()
            .compare(context.actual().value(), context.expected_state())?;
        tracing::debug!(
            snapshot_name = context.test_name(),
            matched,
            "compared snapshot"
        );
        Ok(matched)
    }
}

/// Case-insensitive comparison of the serialized texts
///
/// Needs a serializer stage registered outside it. An unknown expected value
/// never matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextComparatorStage;

impl SnapshotStage for TextComparatorStage {
    fn name(&self) -> &'static str {
        "text_comparator"
    }

    fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool> {
        if !next.run(context)? {
            return Ok(false);
        }
        let expected = match context.expected_state() {
            Expected::Known(payload) => payload,
            Expected::Unknown => return Ok(false),
        };
        // Expected text is produced after this stage returns, so derive it here.
        let settings = context.settings();
        let expected_text = match expected.text() {
            Ok(text) => text.to_string(),
            Err(_) => expected
                .value()
                .to_snapshot_text(settings.indent_output(), settings.is_grouped())?,
        };
        let actual_text = context.actual().text()?;
        Ok(actual_text.to_lowercase() == expected_text.to_lowercase())
    }
}
