use crate::requirement::Requirements;
use crate::step::{StepId, StepKind};
use serde::{Deserialize, Serialize};

/// Serializable description of a single step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepMetadata {
    pub id: StepId,
    pub name: String,
    pub description: String,
    pub kind: StepKind,
    pub labels: Vec<String>,
    pub requirements: Requirements,
}

impl StepMetadata {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
