//! # strand-core
//!
//! Execution engine for lazily evaluated, pull-based graph traversals.
//!
//! A [`Traversal`] is an ordered chain of [`Step`]s. Seeds enter at the head as
//! [`Traverser`]s, and each step filters, maps or expands them on demand. The
//! traversal locks on first use, fixing its [`Requirements`] so traversers only
//! carry path history when some step reads it.

pub mod config;
pub mod error;
pub mod generator;
pub mod label;
pub mod metadata;
pub mod outcome;
pub mod path;
pub mod requirement;
pub mod ring;
pub mod schematic;
pub mod step;
pub mod strategy;
pub mod telemetry;
pub mod traversal;
pub mod traverser;
pub mod value;

#[cfg(test)]
mod test_steps;

pub use config::{EngineConfig, PathTracking, load_config};
pub use error::{TraversalError, TraversalResult};
pub use generator::{Seeds, TraverserGenerator};
pub use label::LabelSet;
pub use metadata::StepMetadata;
pub use outcome::Outcome;
pub use path::{Path, PathEntry};
pub use requirement::{Requirement, Requirements};
pub use ring::{TraversalRing, apply_nullable};
pub use schematic::Schematic;
pub use step::{Step, StepBase, StepId, StepKind};
pub use strategy::Strategy;
pub use telemetry::Traced;
pub use traversal::{Traversal, TraversalBuilder, TraversalId, TraversalState};
pub use traverser::Traverser;
pub use value::{Edge, ElementId, Value, Vertex};

pub mod prelude {
    pub use crate::error::{TraversalError, TraversalResult};
    pub use crate::label::LabelSet;
    pub use crate::outcome::Outcome;
    pub use crate::path::Path;
    pub use crate::requirement::{Requirement, Requirements};
    pub use crate::step::{Step, StepBase, StepKind};
    pub use crate::strategy::Strategy;
    pub use crate::traversal::Traversal;
    pub use crate::traverser::Traverser;
    pub use crate::value::Value;
}
