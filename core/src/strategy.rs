use crate::error::TraversalResult;
use crate::traversal::Traversal;
use std::any::type_name;
use std::fmt;

/// A rewrite applied to a traversal's step chain right before it locks.
///
/// Strategies run exactly once per traversal, while it is still building, so
/// they can use every mutation method on [`Traversal`].
pub trait Strategy: Send + Sync + fmt::Debug {
    fn name(&self) -> &str {
        let full = type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    fn apply(&self, traversal: &mut Traversal) -> TraversalResult<()>;
}
