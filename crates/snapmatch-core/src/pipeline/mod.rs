//! Middleware pipeline that drives a snapshot match
//!
//! Stages are registered in order and composed so that the stage registered
//! last is the outermost: it runs first, calls `next`, and sees the combined
//! result of everything registered before it. The innermost continuation
//! returns `true`. The default order is reader, serializer, comparator,
//! writer, which lets the writer act on the comparison outcome and the
//! reader fill in the expected value before anything else inspects it.

mod compare;
mod function;
mod serializer;

pub use compare::{ComparatorStage, TextComparatorStage};
pub use function::FnStage;
pub use serializer::SerializerStage;

use crate::context::SnapshotContext;
use crate::errors::Result;

/// One middleware step
pub trait SnapshotStage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run this stage. Implementations call `next.run(context)` at most once
    /// and may act before and after it.
    fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool>;
}

/// Continuation over the stages registered before the current one
#[derive(Clone, Copy)]
pub struct Next<'p> {
    stages: &'p [Box<dyn SnapshotStage>],
}

impl<'p> Next<'p> {
    pub fn run(self, context: &mut SnapshotContext<'_>) -> Result<bool> {
        match self.stages.split_last() {
            Some((stage, inner)) => stage.process(context, Next { stages: inner }),
            None => Ok(true),
        }
    }
}

/// Ordered collection of stages
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn SnapshotStage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_stage<S>(mut self, stage: S) -> Self
    where
        S: SnapshotStage + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    /// Register a plain function; the stage yields `next && f(context)`
    pub fn use_fn<F>(self, name: &'static str, f: F) -> Self
    where
        F: Fn(&mut SnapshotContext<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        self.use_stage(FnStage::new(name, f))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the composed stages; an empty pipeline yields `true`
    pub fn process(&self, context: &mut SnapshotContext<'_>) -> Result<bool> {
        Next {
            stages: &self.stages,
        }
        .run(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, SettingsBuilder};
    use crate::value::SnapshotValue;
    use std::sync::{Arc, Mutex};

    struct Trace {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl SnapshotStage for Trace {
        fn name(&self) -> &'static str {
            self.label
        }

        fn process(&self, context: &mut SnapshotContext<'_>, next: Next<'_>) -> Result<bool> {
            self.log.lock().unwrap().push(format!("enter {}", self.label));
            let result = next.run(context)?;
            self.log.lock().unwrap().push(format!("leave {}", self.label));
            Ok(result)
        }
    }

    fn settings() -> Settings {
        SettingsBuilder::new().snapshot_name("Pipe").build().unwrap()
    }

    #[test]
    fn test_empty_pipeline_yields_true() {
        let settings = settings();
        let mut ctx = SnapshotContext::new(&settings, SnapshotValue::Null);
        assert!(Pipeline::new().process(&mut ctx).unwrap());
    }

    #[test]
    fn test_last_registered_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .use_stage(Trace { label: "first", log: log.clone() })
            .use_stage(Trace { label: "second", log: log.clone() });

        let settings = settings();
        let mut ctx = SnapshotContext::new(&settings, SnapshotValue::Null);
        pipeline.process(&mut ctx).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter second", "enter first", "leave first", "leave second"]
        );
        assert_eq!(pipeline.stage_names(), vec!["first", "second"]);
    }

    #[test]
    fn test_use_fn_combines_with_next() {
        let settings = settings();
        let mut ctx = SnapshotContext::new(&settings, SnapshotValue::Null);

        let pipeline = Pipeline::new()
            .use_fn("inner_false", |_| Ok(false))
            .use_fn("outer_true", |_| Ok(true));
        assert!(!pipeline.process(&mut ctx).unwrap());

        let pipeline = Pipeline::new().use_fn("only", |_| Ok(true));
        assert!(pipeline.process(&mut ctx).unwrap());
    }

    #[test]
    fn test_errors_propagate() {
        let settings = settings();
        let mut ctx = SnapshotContext::new(&settings, SnapshotValue::Null);
        let pipeline = Pipeline::new()
            .use_fn("fails", |_| Err(crate::errors::SnapError::ExpectedUnknown))
            .use_fn("outer", |_| Ok(true));

        assert!(pipeline.process(&mut ctx).is_err());
    }
}
