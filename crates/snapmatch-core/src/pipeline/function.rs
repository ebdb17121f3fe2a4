use super::{Next, SnapshotStage};
use crate::context::SnapshotContext;
use crate::errors::Result;

type StageFn = dyn Fn(&mut SnapshotContext<'_>) -> Result<bool> + Send + Sync;

/// Adapts a function into a stage that yields `next && f(context)`
///
/// The function only runs when the inner stages succeeded.
pub struct FnStage {
    name: &'static str,
    f: Box<StageFn>,
}

impl FnStage {
    pub fn new<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&mut SnapshotContext<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        Self {
            name,
            f: Box::new(f),
        }
    }
}

impl SnapshotStage for FnStage {
    fn name(&self) -> &'static str {
        self.name
    }

    fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool> {
        if !next.run(context)? {
            return Ok(false);
        }
        (self.f)(context)
    }
}
