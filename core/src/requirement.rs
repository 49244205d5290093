//! Traverser requirements (capabilities).
//!
//! Every step declares what it needs from the traversers it processes. The
//! owning traversal folds those declarations into one [`Requirements`] set when
//! it locks, and every traverser created afterwards carries exactly that set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Requirement {
    Bulk,
    Object,
    /// Full path history.
    Path,
    /// History of labeled entries only.
    LabeledPath,
    Sack,
    SideEffects,
    SingleLoop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements(BTreeSet<Requirement>);

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(requirement: Requirement) -> Self {
        let mut set = Self::new();
        set.insert(requirement);
        set
    }

    pub fn insert(&mut self, requirement: Requirement) -> bool {
        self.0.insert(requirement)
    }

    pub fn union(&mut self, other: &Requirements) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn contains(&self, requirement: Requirement) -> bool {
        self.0.contains(&requirement)
    }

    /// Whether traversers must carry any path history.
    pub fn tracks_path(&self) -> bool {
        self.contains(Requirement::Path) || self.contains(Requirement::LabeledPath)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Requirement> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Requirement> for Requirements {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Requirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
