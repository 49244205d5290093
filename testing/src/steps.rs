//! Graph-walking steps over the fixture [`Graph`].

use crate::graph::{Direction, Graph};
use std::sync::Arc;
use strand_core::prelude::*;
use strand_core::step::{step_string, with_labels};

macro_rules! graph_step {
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

/// Moves from a vertex to its neighbours.
#[derive(Debug, Clone)]
pub struct VertexStep {
    base: StepBase,
    graph: Arc<Graph>,
    direction: Direction,
    edge_labels: Vec<String>,
}

impl VertexStep {
    pub fn new(graph: &Arc<Graph>, direction: Direction, edge_labels: &[&str]) -> Self {
        Self {
            base: StepBase::new(),
            graph: graph.clone(),
            direction,
            edge_labels: edge_labels.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Step for VertexStep {
    graph_step!("VertexStep", StepKind::FlatMap);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let Some(vertex) = traverser.value().as_vertex() else {
            return Ok(Outcome::filtered());
        };
        let next = self
            .graph
            .adjacent(vertex.id, self.direction, &self.edge_labels)
            .into_iter()
            .map(|v| traverser.split(v))
            .collect();
        Ok(Outcome::expand(next))
    }

    fn describe(&self) -> String {
        let direction = match self.direction {
            Direction::Out => "OUT",
            Direction::In => "IN",
            Direction::Both => "BOTH",
        };
        let mut args = vec![direction.to_string()];
        args.extend(self.edge_labels.iter().cloned());
        with_labels(step_string(self.name(), args), self.labels())
    }
}

/// Keeps elements whose property `key` equals `value`.
#[derive(Debug, Clone)]
pub struct HasStep {
    base: StepBase,
    graph: Arc<Graph>,
    key: String,
    value: Value,
}

impl HasStep {
    pub fn new(graph: &Arc<Graph>, key: &str, value: impl Into<Value>) -> Self {
        Self {
            base: StepBase::new(),
            graph: graph.clone(),
            key: key.to_string(),
            value: value.into(),
        }
    }
}

impl Step for HasStep {
    graph_step!("HasStep", StepKind::Filter);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let pass = self.graph.property(traverser.value(), &self.key) == Some(&self.value);
        Ok(Outcome::when(pass, traverser))
    }
}

/// Replaces an element with the value of its property `key`; elements
/// without it are dropped.
#[derive(Debug, Clone)]
pub struct ValuesStep {
    base: StepBase,
    graph: Arc<Graph>,
    key: String,
}

impl ValuesStep {
    pub fn new(graph: &Arc<Graph>, key: &str) -> Self {
        Self {
            base: StepBase::new(),
            graph: graph.clone(),
            key: key.to_string(),
        }
    }
}

impl Step for ValuesStep {
    graph_step!("ValuesStep", StepKind::FlatMap);

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        let next = self
            .graph
            .property(traverser.value(), &self.key)
            .cloned()
            .map(|value| traverser.split(value))
            .into_iter()
            .collect();
        Ok(Outcome::expand(next))
    }

    fn describe(&self) -> String {
        with_labels(step_string(self.name(), [self.key.as_str()]), self.labels())
    }
}

pub fn out(graph: &Arc<Graph>, labels: &[&str]) -> VertexStep {
    VertexStep::new(graph, Direction::Out, labels)
}

pub fn in_(graph: &Arc<Graph>, labels: &[&str]) -> VertexStep {
    VertexStep::new(graph, Direction::In, labels)
}

pub fn both(graph: &Arc<Graph>, labels: &[&str]) -> VertexStep {
    VertexStep::new(graph, Direction::Both, labels)
}

pub fn has(graph: &Arc<Graph>, key: &str, value: impl Into<Value>) -> HasStep {
    HasStep::new(graph, key, value)
}

pub fn values(graph: &Arc<Graph>, key: &str) -> ValuesStep {
    ValuesStep::new(graph, key)
}

/// `values(key)` as a child traversal, for `by()` projections.
pub fn by_values(graph: &Arc<Graph>, key: &str) -> Traversal {
    Traversal::builder()
        .then(values(graph, key))
        .build()
        .unwrap_or_default()
}
