//! Equality policy between actual and expected results

use crate::context::Expected;
use crate::errors::Result;
use crate::value::SnapshotValue;

/// Decides whether an actual result matches the expected one
pub trait SnapshotComparator: Send + Sync {
    fn compare(&self, actual: &SnapshotValue, expected: &Expected) -> Result<bool>;
}

/// Structural deep equality; an unknown expected value never matches
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultComparator;

impl SnapshotComparator for DefaultComparator {
    fn compare(&self, actual: &SnapshotValue, expected: &Expected) -> Result<bool> {
        Ok(match expected {
            Expected::Known(payload) => actual.deep_equals(payload.value()),
            Expected::Unknown => false,
        })
    }
}

impl<F> SnapshotComparator for F
where
    F: Fn(&SnapshotValue, &Expected) -> Result<bool> + Send + Sync,
{
    fn compare(&self, actual: &SnapshotValue, expected: &Expected) -> Result<bool> {
        self(actual, expected)
    }
}
