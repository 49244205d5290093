use crate::metadata::StepMetadata;
use crate::requirement::Requirements;
use crate::traversal::{Traversal, TraversalState};
use serde::{Deserialize, Serialize};

/// The static view of a traversal.
///
/// `Schematic` is the graph representation of a step chain, child traversals
/// included. It is used for explain output and inspection; it never drives
/// execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schematic {
    pub traversal_id: String,
    pub state: TraversalState,
    pub requirements: Requirements,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub metadata: StepMetadata,
    pub children: Vec<Schematic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}

impl Schematic {
    pub fn of(traversal: &Traversal) -> Self {
        let nodes: Vec<Node> = traversal
            .steps()
            .iter()
            .map(|step| Node {
                id: step.id().to_string(),
                metadata: step.metadata(),
                children: step.children().into_iter().map(Schematic::of).collect(),
            })
            .collect();
        let edges = nodes
            .windows(2)
            .map(|pair| Edge {
                from: pair[0].id.clone(),
                to: pair[1].id.clone(),
                label: Some("Next".to_string()),
            })
            .collect();
        Self {
            traversal_id: traversal.id().to_string(),
            state: traversal.state(),
            requirements: traversal.requirements().clone(),
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
