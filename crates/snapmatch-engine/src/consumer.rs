//! Result consumers for framework integration
//!
//! A consumer receives both sides of every comparison as compact JSON so a
//! test framework can render its own diff. The boolean outcome comes from
//! the wrapped comparator, structural equality unless one is given.

use snapmatch_core::comparator::{DefaultComparator, SnapshotComparator};
use snapmatch_core::context::Expected;
use snapmatch_core::errors::Result;
use snapmatch_core::value::SnapshotValue;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Outcome of one comparison with both sides serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub matched: bool,
    pub actual: String,
    /// `None` when no snapshot was available
    pub expected: Option<String>,
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "expected: {}", self.expected.as_deref().unwrap_or("<no snapshot>"))?;
        write!(f, "  actual: {}", self.actual)
    }
}

pub trait ResultConsumer: Send + Sync {
    /// # Errors
    ///
    /// Any error aborts the match and propagates to its caller.
    fn consume(&self, report: &MatchReport) -> Result<()>;
}

/// A comparison plus a report to a consumer
pub struct ConsumerComparator {
    consumer: Arc<dyn ResultConsumer>,
    inner: Arc<dyn SnapshotComparator>,
}

impl ConsumerComparator {
    /// Report around the default structural comparison
    pub fn new(consumer: Arc<dyn ResultConsumer>) -> Self {
        Self::wrapping(consumer, Arc::new(DefaultComparator))
    }

    /// Report around `inner`, whose outcome is passed through
    pub fn wrapping(consumer: Arc<dyn ResultConsumer>, inner: Arc<dyn SnapshotComparator>) -> Self {
        Self { consumer, inner }
    }
}

impl SnapshotComparator for ConsumerComparator {
    fn compare(&self, actual: &SnapshotValue, expected: &Expected) -> Result<bool> {
        let matched = self.inner.compare(actual, expected)?;
        let expected = match expected {
            Expected::Known(payload) => Some(payload.value().serialize(false)?),
            Expected::Unknown => None,
        };
        let report = MatchReport {
            matched,
            actual: actual.serialize(false)?,
            expected,
        };
        self.consumer.consume(&report)?;
        Ok(matched)
    }
}

/// Keeps every report
#[derive(Debug, Default)]
pub struct RecordingConsumer {
    reports: Mutex<Vec<MatchReport>>,
}

impl RecordingConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<MatchReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<MatchReport> {
        self.reports().pop()
    }
}

impl ResultConsumer for RecordingConsumer {
    fn consume(&self, report: &MatchReport) -> Result<()> {
        self.reports
            .lock()
            .map(|mut r| r.push(report.clone()))
            .ok();
        Ok(())
    }
}
