use crate::requirement::Requirement;
use crate::value::Value;
use thiserror::Error;

pub type TraversalResult<T> = Result<T, TraversalError>;

#[derive(Error, Debug)]
pub enum TraversalError {
    /// A structural mutation was attempted after the traversal locked.
    #[error("The traversal strategies are complete and the traversal can no longer be modulated")]
    Locked,

    /// A step queries a path label that no upstream step binds.
    #[error("Label '{label}' is referenced by {step} but never bound by an upstream step")]
    UnboundLabel { label: String, step: String },

    /// `next()` was called on an exhausted traversal.
    #[error("The traversal has no more results")]
    NoSuchElement,

    #[error("The traverser does not carry {0:?}; no step in the traversal requires it")]
    MissingRequirement(Requirement),

    #[error("Could not locate path label '{0}'")]
    PathLabelMissing(String),

    /// A child traversal produced nothing for the value it was given.
    #[error("The provided value does not map to a value: {0}")]
    EmptyProjection(Value),

    #[error("{step} does not support {operation}")]
    Unsupported {
        step: &'static str,
        operation: &'static str,
    },

    #[error("Step index {index} is out of bounds for a traversal of {len} steps")]
    StepIndex { index: usize, len: usize },

    /// Failure raised inside a step body; passed through untouched.
    #[error(transparent)]
    Step(#[from] anyhow::Error),
}

impl TraversalError {
    pub fn unsupported(step: &'static str, operation: &'static str) -> Self {
        TraversalError::Unsupported { step, operation }
    }
}
