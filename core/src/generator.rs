use crate::label::LabelSet;
use crate::requirement::Requirements;
use crate::step::{Step, StepKind};
use crate::traverser::Traverser;
use crate::value::Value;
use std::sync::Arc;

/// Creates seed traversers that honour a locked requirement set.
///
/// Storage layers obtain one from [`Traversal::traverser_generator`] and feed
/// its output to [`Traversal::add_starts`].
///
/// [`Traversal::traverser_generator`]: crate::traversal::Traversal::traverser_generator
/// [`Traversal::add_starts`]: crate::traversal::Traversal::add_starts
#[derive(Debug, Clone)]
pub struct TraverserGenerator {
    requirements: Arc<Requirements>,
}

impl TraverserGenerator {
    pub fn new(requirements: Arc<Requirements>) -> Self {
        Self { requirements }
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn generate_one(&self, value: Value, labels: &LabelSet, bulk: u64) -> Traverser {
        let mut traverser = Traverser::new(value, self.requirements.clone(), bulk);
        traverser.add_labels(labels);
        traverser
    }

    /// Lazily turn `source` into traversers for the step chain headed by
    /// `first_step`. A start step's labels mark the seeded path entries.
    pub fn generate<I>(&self, source: I, first_step: Option<&dyn Step>, bulk: u64) -> Seeds<I::IntoIter>
    where
        I: IntoIterator<Item = Value>,
    {
        let labels = match first_step {
            Some(step) if step.kind() == StepKind::Start => step.labels().clone(),
            _ => LabelSet::new(),
        };
        Seeds {
            source: source.into_iter(),
            generator: self.clone(),
            labels,
            bulk,
        }
    }
}

/// Iterator returned by [`TraverserGenerator::generate`].
#[derive(Debug)]
pub struct Seeds<I> {
    source: I,
    generator: TraverserGenerator,
    labels: LabelSet,
    bulk: u64,
}

impl<I: Iterator<Item = Value>> Iterator for Seeds<I> {
    type Item = Traverser;

    fn next(&mut self) -> Option<Traverser> {
        let value = self.source.next()?;
        Some(self.generator.generate_one(value, &self.labels, self.bulk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}
