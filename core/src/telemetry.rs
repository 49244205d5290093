//! # Telemetry: Observability Decorators
//!
//! Wrap any step in [`Traced`] to get a span per processed traverser and an
//! event per outcome, with timing.

use crate::error::TraversalResult;
use crate::metadata::StepMetadata;
use crate::outcome::Outcome;
use crate::requirement::Requirements;
use crate::step::{Step, StepBase, StepKind};
use crate::traversal::{Traversal, TraversalId};
use crate::traverser::Traverser;
use std::time::Instant;
use tracing::{debug, info_span};

/// A step that delegates to `inner` and records what it did.
#[derive(Debug, Clone)]
pub struct Traced<S> {
    inner: S,
    name: String,
}

impl<S: Step> Traced<S> {
    pub fn new(inner: S, name: &str) -> Self {
        Self {
            inner,
            name: name.to_string(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Step for Traced<S>
where
    S: Step + Clone + 'static,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn kind(&self) -> StepKind {
        self.inner.kind()
    }

    fn base(&self) -> &StepBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut StepBase {
        self.inner.base_mut()
    }

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let span = info_span!(
            "Step",
            strand.step = %self.name,
            strand.kind = ?self.inner.kind()
        );
        let _enter = span.enter();

        debug!(value = %traverser.value(), bulk = traverser.bulk(), "Entering step");
        let start = Instant::now();
        let result = self.inner.process(traverser);
        let duration = start.elapsed();

        match &result {
            Ok(Outcome::Next(t)) => debug!(value = %t.value(), ?duration, "Step completed: Next"),
            Ok(Outcome::Filtered) => debug!(?duration, "Step completed: Filtered"),
            Ok(Outcome::Expand(ts)) => debug!(count = ts.len(), ?duration, "Step completed: Expand"),
            Err(e) => tracing::error!(error = %e, ?duration, "Step failed"),
        }
        result
    }

    fn box_clone(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }

    fn requirements(&self) -> Requirements {
        self.inner.requirements()
    }

    fn referenced_labels(&self) -> Vec<&str> {
        self.inner.referenced_labels()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn children(&self) -> Vec<&Traversal> {
        self.inner.children()
    }

    fn children_mut(&mut self) -> Vec<&mut Traversal> {
        self.inner.children_mut()
    }

    fn add_child(&mut self, child: Traversal) -> TraversalResult<()> {
        self.inner.add_child(child)
    }

    fn replace_child(&mut self, old: TraversalId, new: Traversal) -> TraversalResult<bool> {
        self.inner.replace_child(old, new)
    }

    fn modulate_from(&mut self, label: &str) -> TraversalResult<()> {
        self.inner.modulate_from(label)
    }

    fn modulate_to(&mut self, label: &str) -> TraversalResult<()> {
        self.inner.modulate_to(label)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn metadata(&self) -> StepMetadata {
        self.inner.metadata()
    }
}
