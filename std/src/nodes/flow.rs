use strand_core::prelude::*;

/// Head of a traversal. Its labels mark the seeded values.
#[derive(Debug, Clone, Default)]
pub struct StartStep {
    base: StepBase,
}

impl StartStep {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Step for StartStep {
    fn name(&self) -> &'static str {
        "StartStep"
    }

    fn kind(&self) -> StepKind {
        StepKind::Start
    }

    fn base(&self) -> &StepBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut StepBase {
        &mut self.base
    }

    fn process(&mut self, traverser: Traverser) -> TraversalResult<Outcome> {
        Ok(Outcome::next(traverser))
    }

    fn box_clone(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentityStep {
    base: StepBase,
}

impl IdentityStep {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Step for IdentityStep {
    fn name(&self) -> &'static str {
        "IdentityStep"
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
        Ok(Outcome::next(traverser))
    }

    fn box_clone(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }
}
