//! Closure-backed steps.
//!
//! Each step takes either an infallible closure (`new`) or one returning
//! `anyhow::Result` (`try_new`). Errors are passed through the traversal as
//! [`TraversalError::Step`].

use std::fmt;
use std::sync::Arc;
use strand_core::prelude::*;

type MapFn = dyn Fn(&Traverser) -> anyhow::Result<Value> + Send + Sync;
type FlatMapFn = dyn Fn(&Traverser) -> anyhow::Result<Vec<Value>> + Send + Sync;
type SideEffectFn = dyn Fn(&Traverser) -> anyhow::Result<()> + Send + Sync;

macro_rules! impl_step_common {
    ($name:literal, $kind:expr) => {
        fn name(&self) -> &'static str {
            $name
        }

        fn kind(&self) -> StepKind {
            $kind
        }

        fn base(&self) -> &StepBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut StepBase {
            &mut self.base
        }

        fn box_clone(&self) -> Box<dyn Step> {
            Box::new(self.clone())
        }
    };
}

/// Replaces each value with the closure's result.
#[derive(Clone)]
pub struct MapStep {
    base: StepBase,
    function: Arc<MapFn>,
}

impl MapStep {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&Traverser) -> Value + Send + Sync + 'static,
    {
        Self::try_new(move |t| Ok(function(t)))
    }

    pub fn try_new<F>(function: F) -> Self
    where
        F: Fn(&Traverser) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            base: StepBase::new(),
            function: Arc::new(function),
        }
    }
}

impl Step for MapStep {
    impl_step_common!("MapStep", StepKind::Map);

    fn process(&mut self, mut traverser: Traverser) -> TraversalResult<Outcome> {
        let value = (self.function)(&traverser)?;
        traverser.set_value(value);
        Ok(Outcome::next(traverser))
    }
}

/// Replaces each value with zero or more values, in closure order.
#[derive(Clone)]
pub struct FlatMapStep {
    base: StepBase,
    function: Arc<FlatMapFn>,
}

impl FlatMapStep {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&Traverser) -> Vec<Value> + Send + Sync + 'static,
    {
        Self::try_new(move |t| Ok(function(t)))
    }

    pub fn try_new<F>(function: F) -> Self
    where
        F: Fn(&Traverser) -> anyhow::Result<Vec<Value>> + Send + Sync + 'static,
    {
        Self {
            base: StepBase::new(),
            function: Arc::new(function),
        }
    }
}

impl Step for FlatMapStep {
    impl_step_common!("FlatMapStep", StepKind::FlatMap);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let values = (self.function)(&traverser)?;
        Ok(Outcome::expand(
            values.into_iter().map(|v| traverser.split(v)).collect(),
        ))
    }
}

/// Runs the closure for each traverser and passes it on unchanged.
#[derive(Clone)]
pub struct SideEffectStep {
    base: StepBase,
    function: Arc<SideEffectFn>,
}

impl SideEffectStep {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&Traverser) + Send + Sync + 'static,
    {
        Self::try_new(move |t| {
            function(t);
            Ok(())
        })
    }

    pub fn try_new<F>(function: F) -> Self
    where
        F: Fn(&Traverser) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            base: StepBase::new(),
            function: Arc::new(function),
        }
    }
}

impl Step for SideEffectStep {
    impl_step_common!("SideEffectStep", StepKind::SideEffect);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        (self.function)(&traverser)?;
        Ok(Outcome::next(traverser))
    }
}

macro_rules! impl_debug {
    ($($ty:ident),*) => {
        $(
            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($ty)).field("base", &self.base).finish()
                }
            }
        )*
    };
}

impl_debug!(MapStep, FlatMapStep, SideEffectStep);
