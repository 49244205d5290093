//! Steps that read the traverser's path history.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strand_core::prelude::*;
use strand_core::ring::{TraversalRing, apply_nullable};
use strand_core::step::{step_string, with_labels};
use strand_core::traversal::TraversalId;

/// Rebuild `path` with each value run through the next ring projection.
/// The cursor restarts for every path.
fn project(path: &Path, ring: &mut TraversalRing) -> TraversalResult<Path> {
    ring.reset();
    path.iter()
        .map(|(value, labels)| -> TraversalResult<(Value, LabelSet)> {
            Ok((apply_nullable(value, ring.next())?, labels.clone()))
        })
        .collect()
}

fn ring_string(ring: &TraversalRing) -> String {
    if ring.is_empty() {
        return String::new();
    }
    let children: Vec<String> = ring.traversals().iter().map(ToString::to_string).collect();
    format!("[{}]", children.join(", "))
}

fn replace_in_ring(ring: &mut TraversalRing, old: TraversalId, new: Traversal) -> TraversalResult<bool> {
    match ring.traversals().iter().position(|t| t.id() == old) {
        Some(index) => ring.set(index, new).map(|_| true),
        None => Ok(false),
    }
}

/// Serializable part of a [`PathFilterStep`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PathFilterConfig {
    /// `true` keeps simple paths, `false` keeps cyclic ones.
    pub simple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Arc<str>>,
}

/// Admits a traverser when the repetition status of its path, optionally
/// restricted to the `from`..`to` span and projected through `by()`
/// traversals, matches the configured mode.
#[derive(Debug, Clone)]
pub struct PathFilterStep {
    base: StepBase,
    config: PathFilterConfig,
    ring: TraversalRing,
}

impl PathFilterStep {
    pub fn from_config(config: PathFilterConfig) -> Self {
        Self {
            base: StepBase::new(),
            config,
            ring: TraversalRing::new(),
        }
    }

    pub fn simple() -> Self {
        Self::from_config(PathFilterConfig {
            simple: true,
            from: None,
            to: None,
        })
    }

    pub fn cyclic() -> Self {
        Self::from_config(PathFilterConfig {
            simple: false,
            from: None,
            to: None,
        })
    }

    pub fn from(mut self, label: &str) -> Self {
        self.config.from = Some(Arc::from(label));
        self
    }

    pub fn to(mut self, label: &str) -> Self {
        self.config.to = Some(Arc::from(label));
        self
    }

    pub fn by(mut self, projection: Traversal) -> Self {
        self.ring.add(projection);
        self
    }

    pub fn config(&self) -> &PathFilterConfig {
        &self.config
    }

    pub fn ring(&self) -> &TraversalRing {
        &self.ring
    }

    pub fn filter(&mut self, traverser: &Traverser) -> TraversalResult<bool> {
        let span = traverser
            .path()?
            .sub_path(self.config.from.as_deref(), self.config.to.as_deref());
        let simple = if self.ring.is_empty() {
            span.is_simple()
        } else {
            project(&span, &mut self.ring)?.is_simple()
        };
        Ok(simple == self.config.simple)
    }
}

impl Step for PathFilterStep {
    fn name(&self) -> &'static str {
        "PathFilterStep"
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

    fn requirements(&self) -> Requirements {
        Requirements::of(Requirement::Path)
    }

    fn referenced_labels(&self) -> Vec<&str> {
        self.config
            .from
            .iter()
            .chain(self.config.to.iter())
            .map(|label| &**label)
            .collect()
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
        replace_in_ring(&mut self.ring, old, new)
    }

    fn modulate_from(&mut self, label: &str) -> TraversalResult<()> {
        self.config.from = Some(Arc::from(label));
        Ok(())
    }

    fn modulate_to(&mut self, label: &str) -> TraversalResult<()> {
        self.config.to = Some(Arc::from(label));
        Ok(())
    }

    fn describe(&self) -> String {
        let mode = if self.config.simple { "simple" } else { "cyclic" };
        let args = [
            mode.to_string(),
            self.config.from.as_deref().unwrap_or_default().to_string(),
            self.config.to.as_deref().unwrap_or_default().to_string(),
            ring_string(&self.ring),
        ];
        with_labels(step_string(self.name(), args), self.labels())
    }
}

/// Replaces each value with the list of values on its path, optionally
/// restricted to `from`..`to` and projected through `by()` traversals.
#[derive(Debug, Clone, Default)]
pub struct PathStep {
    base: StepBase,
    from: Option<Arc<str>>,
    to: Option<Arc<str>>,
    ring: TraversalRing,
}

impl PathStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(mut self, projection: Traversal) -> Self {
        self.ring.add(projection);
        self
    }
}

impl Step for PathStep {
    fn name(&self) -> &'static str {
        "PathStep"
    }

    fn kind(&self) -> StepKind {
        StepKind::Map
    }

    fn base(&self) -> &StepBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StepBase {
        &mut self.base
    }

    fn process(&mut self, mut traverser: Traverser) -> TraversalResult<Outcome> {
        let span = traverser
            .path()?
            .sub_path(self.from.as_deref(), self.to.as_deref());
        let span = if self.ring.is_empty() {
            span
        } else {
            project(&span, &mut self.ring)?
        };
        traverser.set_value(Value::List(span.objects().cloned().collect()));
        Ok(Outcome::next(traverser))
    }

    fn box_clone(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }

    fn requirements(&self) -> Requirements {
        Requirements::of(Requirement::Path)
    }

    fn referenced_labels(&self) -> Vec<&str> {
        self.from.iter().chain(self.to.iter()).map(|label| &**label).collect()
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
        replace_in_ring(&mut self.ring, old, new)
    }

    fn modulate_from(&mut self, label: &str) -> TraversalResult<()> {
        self.from = Some(Arc::from(label));
        Ok(())
    }

    fn modulate_to(&mut self, label: &str) -> TraversalResult<()> {
        self.to = Some(Arc::from(label));
        Ok(())
    }

    fn describe(&self) -> String {
        let args = [
            self.from.as_deref().unwrap_or_default().to_string(),
            self.to.as_deref().unwrap_or_default().to_string(),
            ring_string(&self.ring),
        ];
        with_labels(step_string(self.name(), args), self.labels())
    }
}
