//! Small steps used by the unit tests of this crate.

use crate::error::{TraversalError, TraversalResult};
use crate::outcome::Outcome;
use crate::requirement::{Requirement, Requirements};
use crate::ring::{TraversalRing, apply_nullable};
use crate::step::{Step, StepBase, StepKind};
use crate::traversal::{Traversal, TraversalId};
use crate::traverser::Traverser;
use crate::value::Value;
use anyhow::anyhow;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

macro_rules! step_basics {
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

#[derive(Debug, Clone, Default)]
pub struct Start {
    base: StepBase,
}

impl Step for Start {
    step_basics!("Start", StepKind::Start);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        Ok(Outcome::next(traverser))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddOne {
    base: StepBase,
}

impl Step for AddOne {
    step_basics!("AddOne", StepKind::Map);

    fn process(&mut self, mut traverser: Traverser) -> TraversalResult<Outcome> {
        let n = traverser
            .value()
            .as_int()
            .ok_or_else(|| anyhow!("not an integer: {}", traverser.value()))?;
        traverser.set_value(Value::from(n + 1));
        Ok(Outcome::next(traverser))
    }
}

#[derive(Debug, Clone)]
pub struct KeepIf {
    base: StepBase,
    predicate: fn(&Value) -> bool,
}

impl KeepIf {
    pub fn new(predicate: fn(&Value) -> bool) -> Self {
        Self {
            base: StepBase::new(),
            predicate,
        }
    }
}

impl Step for KeepIf {
    step_basics!("KeepIf", StepKind::Filter);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let pass = (self.predicate)(traverser.value());
        Ok(Outcome::when(pass, traverser))
    }
}

#[derive(Debug, Clone)]
pub struct Repeat {
    base: StepBase,
    times: usize,
}

impl Repeat {
    pub fn new(times: usize) -> Self {
        Self {
            base: StepBase::new(),
            times,
        }
    }
}

impl Step for Repeat {
    step_basics!("Repeat", StepKind::FlatMap);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let copies = (0..self.times)
            .map(|_| traverser.split(traverser.value().clone()))
            .collect();
        Ok(Outcome::expand(copies))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Fail {
    base: StepBase,
}

impl Step for Fail {
    step_basics!("Fail", StepKind::Map);

    fn process(&mut self, _traverser: Traverser) -> TraversalResult<Outcome> {
        Err(anyhow!("boom").into())
    }
}

/// Replaces the value with the one stored under `label`.
#[derive(Debug, Clone)]
pub struct Select {
    base: StepBase,
    label: String,
}

impl Select {
    pub fn new(label: &str) -> Self {
        Self {
            base: StepBase::new(),
            label: label.to_string(),
        }
    }
}

impl Step for Select {
    step_basics!("Select", StepKind::Map);

    fn requirements(&self) -> Requirements {
        Requirements::of(Requirement::LabeledPath)
    }

    fn referenced_labels(&self) -> Vec<&str> {
        vec![self.label.as_str()]
    }

    fn process(&mut self, mut traverser: Traverser) -> TraversalResult<Outcome> {
        let value = traverser
            .path()?
            .get(&self.label)
            .cloned()
            .ok_or_else(|| TraversalError::PathLabelMissing(self.label.clone()))?;
        traverser.set_value(value);
        Ok(Outcome::next(traverser))
    }
}

#[derive(Debug, Clone)]
pub struct Count {
    base: StepBase,
    pub seen: Arc<AtomicUsize>,
}

impl Count {
    pub fn new() -> Self {
        Self {
            base: StepBase::new(),
            seen: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Step for Count {
    step_basics!("Count", StepKind::SideEffect);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        self.seen.fetch_add(1, Ordering::SeqCst);
        Ok(Outcome::next(traverser))
    }
}

/// Maps each value through the next projection of its ring.
#[derive(Debug, Clone, Default)]
pub struct Project {
    base: StepBase,
    ring: TraversalRing,
}

impl Step for Project {
    step_basics!("Project", StepKind::Map);

    fn process(&mut self, mut traverser: Traverser) -> TraversalResult<Outcome> {
        let value = apply_nullable(traverser.value(), self.ring.next())?;
        traverser.set_value(value);
        Ok(Outcome::next(traverser))
    }

    fn reset(&mut self) {
        self.ring.reset();
        for child in self.ring.traversals_mut() {
            child.reset();
        }
    }

    fn children(&self) -> Vec<&Traversal> {
        self.ring.traversals().iter().collect()
    }

    fn children_mut(&mut self) -> Vec<&mut Traversal> {
        self.ring.traversals_mut().iter_mut().collect()
    }

    fn add_child(&mut self, child: Traversal) -> TraversalResult<()> {
        self.ring.add(child);
        Ok(())
    }

    fn replace_child(&mut self, old: TraversalId, new: Traversal) -> TraversalResult<bool> {
        match self.ring.traversals().iter().position(|t| t.id() == old) {
            Some(index) => self.ring.set(index, new).map(|_| true),
            None => Ok(false),
        }
    }
}
