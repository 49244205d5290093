use crate::traverser::Traverser;

/// What a step did with the traverser it was handed.
///
/// `Outcome` keeps control flow as data: a step never pulls or pushes on its
/// own, it reports the result and the traversal decides what runs next.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Pass one traverser downstream.
    Next(Traverser),

    /// The traverser was rejected; the traversal pulls the next one upstream.
    Filtered,

    /// Fan out into zero or more traversers, in order.
    Expand(Vec<Traverser>),
}

impl Outcome {
    pub fn next(traverser: Traverser) -> Self {
        Outcome::Next(traverser)
    }

    pub fn filtered() -> Self {
        Outcome::Filtered
    }

    pub fn expand(traversers: Vec<Traverser>) -> Self {
        Outcome::Expand(traversers)
    }

    /// `Next` if `pass`, otherwise `Filtered`.
    pub fn when(pass: bool, traverser: Traverser) -> Self {
        if pass {
            Outcome::Next(traverser)
        } else {
            Outcome::Filtered
        }
    }
}
