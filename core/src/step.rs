//! # Step: one stage of a traversal
//!
//! Steps are trait objects owned by exactly one [`Traversal`]. The traversal
//! drives them: it hands a step one traverser at a time through
//! [`Step::process`] and routes whatever comes back in the [`Outcome`].
//!
//! Structural hooks (`add_child`, `replace_child`, `modulate_*`) exist for
//! builders and strategies. They are only reachable through the owning
//! traversal's mutation API, which refuses them once the traversal is locked.

use crate::error::{TraversalError, TraversalResult};
use crate::label::LabelSet;
use crate::metadata::StepMetadata;
use crate::outcome::Outcome;
use crate::requirement::Requirements;
use crate::traversal::{Traversal, TraversalId};
use crate::traverser::Traverser;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(Uuid);

impl StepId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// Head of a traversal; passes seeds through.
    Start,
    /// Emits its input or nothing.
    Filter,
    /// Emits exactly one traverser holding a new value.
    Map,
    /// Emits zero or more traversers.
    FlatMap,
    /// Emits its input after observing it.
    SideEffect,
}

/// Identity and labels shared by every step implementation.
#[derive(Debug, Clone, Default)]
pub struct StepBase {
    pub id: StepId,
    pub labels: LabelSet,
}

impl StepBase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub trait Step: Send + fmt::Debug {
    /// Short type name used in descriptions and errors.
    fn name(&self) -> &'static str;

    fn kind(&self) -> StepKind;

    fn base(&self) -> &StepBase;

    fn base_mut(&mut self) -> &mut StepBase;

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome>;

    /// Deep copy: child traversals are cloned, shared configuration is not.
    fn box_clone(&self) -> Box<dyn Step>;

    fn id(&self) -> StepId {
        self.base().id
    }

    fn labels(&self) -> &LabelSet {
        &self.base().labels
    }

    fn requirements(&self) -> Requirements {
        Requirements::new()
    }

    /// Path labels this step reads from traversers.
    fn referenced_labels(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Drop iteration state. Configuration survives.
    fn reset(&mut self) {
        for child in self.children_mut() {
            child.reset();
        }
    }

    fn children(&self) -> Vec<&Traversal> {
        Vec::new()
    }

    fn children_mut(&mut self) -> Vec<&mut Traversal> {
        Vec::new()
    }

    /// Attach a child traversal (`by()` modulation).
    fn add_child(&mut self, _child: Traversal) -> TraversalResult<()> {
        Err(TraversalError::unsupported(self.name(), "by() modulation"))
    }

    /// Swap the child with id `old` for `new`; `Ok(false)` if no child matched.
    fn replace_child(&mut self, _old: TraversalId, _new: Traversal) -> TraversalResult<bool> {
        Ok(false)
    }

    fn modulate_from(&mut self, _label: &str) -> TraversalResult<()> {
        Err(TraversalError::unsupported(self.name(), "from() modulation"))
    }

    fn modulate_to(&mut self, _label: &str) -> TraversalResult<()> {
        Err(TraversalError::unsupported(self.name(), "to() modulation"))
    }

    /// Display form, e.g. `PathFilterStep(simple,a,b)@[x]`.
    fn describe(&self) -> String {
        with_labels(self.name().to_string(), self.labels())
    }

    fn metadata(&self) -> StepMetadata {
        StepMetadata {
            id: self.id(),
            name: self.name().to_string(),
            description: self.describe(),
            kind: self.kind(),
            labels: self.labels().iter().map(str::to_string).collect(),
            requirements: self.requirements(),
        }
    }
}

impl Clone for Box<dyn Step> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Format a step name with its arguments, e.g. `step_string("X", ["a", "b"])`
/// renders as `X(a,b)`. Empty arguments are skipped.
pub fn step_string<I, S>(name: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args
        .into_iter()
        .filter(|a| !a.as_ref().is_empty())
        .map(|a| a.as_ref().to_string())
        .collect();
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{}({})", name, args.join(","))
    }
}

/// Append `@[labels]` when a step is labeled.
pub fn with_labels(description: String, labels: &LabelSet) -> String {
    if labels.is_empty() {
        description
    } else {
        format!("{}@{}", description, labels)
    }
}
