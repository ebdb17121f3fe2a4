//! Per-match mutable state shared by pipeline stages

use crate::advisory::{Advisories, Tip};
use crate::errors::{Result, SnapError};
use crate::settings::Settings;
use crate::value::{GroupDocument, SnapshotValue};

/// A result in structured form, optionally with its serialized text
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Value(SnapshotValue),
    Serialized { value: SnapshotValue, text: String },
}

impl Payload {
    pub fn value(&self) -> &SnapshotValue {
        match self {
            Payload::Value(value) | Payload::Serialized { value, .. } => value,
        }
    }

    pub fn is_serialized(&self) -> bool {
        matches!(self, Payload::Serialized { .. })
    }

    /// Serialized text, required by anything that writes to storage
    ///
    /// # Errors
    ///
    /// `UnsupportedPayload` if no serializer stage has run.
    pub fn text(&self) -> Result<&str> {
        match self {
            Payload::Serialized { text, .. } => Ok(text),
            Payload::Value(value) => Err(SnapError::UnsupportedPayload {
                description: format!("an unserialized {} value", value.kind_name()),
            }),
        }
    }
}

/// Expected result state. `Known(Payload::Value(Null))` is a known null,
/// distinct from `Unknown`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Expected {
    #[default]
    Unknown,
    Known(Payload),
}

impl Expected {
    pub fn is_known(&self) -> bool {
        matches!(self, Expected::Known(_))
    }
}

/// State for one match call
pub struct SnapshotContext<'a> {
    settings: &'a Settings,
    advisories: &'a Advisories,
    actual: Payload,
    expected: Expected,
    snapshot_found: bool,
    group: Option<GroupDocument>,
}

impl<'a> SnapshotContext<'a> {
    pub fn new(settings: &'a Settings, actual: SnapshotValue) -> Self {
        Self {
            settings,
            advisories: Advisories::global(),
            actual: Payload::Value(actual),
            expected: Expected::Unknown,
            snapshot_found: false,
            group: None,
        }
    }

    /// Use a private set of tip flags instead of the process-wide one
    pub fn with_advisories(mut self, advisories: &'a Advisories) -> Self {
        self.advisories = advisories;
        self
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn test_name(&self) -> &'a str {
        self.settings.snapshot_name()
    }

    pub fn actual(&self) -> &Payload {
        &self.actual
    }

    pub fn set_actual(&mut self, actual: Payload) {
        self.actual = actual;
    }

    /// # Errors
    ///
    /// `ExpectedUnknown` if no stage has set the expected value.
    pub fn expected(&self) -> Result<&Payload> {
        match &self.expected {
            Expected::Known(payload) => Ok(payload),
            Expected::Unknown => Err(SnapError::ExpectedUnknown),
        }
    }

    pub fn expected_state(&self) -> &Expected {
        &self.expected
    }

    pub fn set_expected(&mut self, expected: Payload) {
        self.expected = Expected::Known(expected);
    }

    /// Make the expected result equal to the actual one so the comparison
    /// succeeds unconditionally
    pub fn set_expected_placeholder(&mut self) {
        self.expected = Expected::Known(Payload::Value(self.actual.value().clone()));
    }

    pub fn snapshot_found(&self) -> bool {
        self.snapshot_found
    }

    pub fn set_snapshot_found(&mut self, found: bool) {
        self.snapshot_found = found;
    }

    pub fn group(&self) -> Option<&GroupDocument> {
        self.group.as_ref()
    }

    pub fn set_group(&mut self, group: GroupDocument) {
        self.group = Some(group);
    }

    pub fn take_group(&mut self) -> Option<GroupDocument> {
        self.group.take()
    }

    /// Send a message to the configured sink
    pub fn message(&self, message: &str) {
        self.settings.message_sink().write(message);
    }

    pub fn show_tip_once(&self, tip: Tip) -> bool {
        self.advisories
            .show_once(tip, self.settings.message_sink().as_ref())
    }
}
