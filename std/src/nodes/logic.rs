use std::fmt;
use std::sync::Arc;
use strand_core::prelude::*;

type Predicate = dyn Fn(&Traverser) -> anyhow::Result<bool> + Send + Sync;

/// Keeps the traversers for which the predicate holds.
#[derive(Clone)]
pub struct FilterStep {
    base: StepBase,
    predicate: Arc<Predicate>,
}

impl FilterStep {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Traverser) -> bool + Send + Sync + 'static,
    {
        Self::try_new(move |t| Ok(predicate(t)))
    }

    /// A predicate that can fail; its error ends the traversal's current pull.
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: Fn(&Traverser) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        Self {
            base: StepBase::new(),
            predicate: Arc::new(predicate),
        }
    }

    /// Filter on the current value alone.
    pub fn on_value<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(move |t| predicate(t.value()))
    }

    pub fn filter(&self, traverser: &Traverser) -> TraversalResult<bool> {
        Ok((self.predicate)(traverser)?)
    }
}

impl fmt::Debug for FilterStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStep").field("base", &self.base).finish()
    }
}

impl Step for FilterStep {
    fn name(&self) -> &'static str {
        "FilterStep"
    }

    fn kind(&self) -> StepKind {
        StepKind::Filter
    }

    fn base(&self) -> &StepBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StepBase {
        &mut self.base
    }

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let pass = self.filter(&traverser)?;
        Ok(Outcome::when(pass, traverser))
    }

    fn box_clone(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }
}
