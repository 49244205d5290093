use strand_core::prelude::*;

use crate::nodes::flow::IdentityStep;

/// Drops `IdentityStep`s that follow another step, moving their labels onto
/// the step before them. A leading identity step is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRemovalStrategy;

impl Strategy for IdentityRemovalStrategy {
    fn apply(&self, traversal: &mut Traversal) -> TraversalResult<()> {
        let identity = IdentityStep::new();
        let mut index = 1;
        while index < traversal.len() {
            let is_identity = traversal
                .step(index)
                .is_some_and(|step| step.name() == identity.name());
            if !is_identity {
                index += 1;
                continue;
            }
            let removed = traversal.remove_step(index)?;
            traversal
                .step_mut(index - 1)?
                .base_mut()
                .labels
                .extend_from(removed.labels());
            tracing::trace!(index, "removed identity step");
        }
        Ok(())
    }
}
