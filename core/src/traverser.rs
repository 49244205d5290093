//! # Traverser: the unit that flows through a traversal
//!
//! A traverser carries the current value, a bulk count, the requirement set of
//! the traversal that created it and, only when that set asks for it, the path
//! history. Paths sit behind an `Arc`: copies of a traverser share history
//! until one of them extends or prunes it.

use crate::error::{TraversalError, TraversalResult};
use crate::label::LabelSet;
use crate::path::Path;
use crate::requirement::{Requirement, Requirements};
use crate::value::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathMode {
    Off,
    Labeled,
    Full,
}

#[derive(Debug, Clone)]
pub struct Traverser {
    value: Value,
    path: Option<Arc<Path>>,
    bulk: u64,
    requirements: Arc<Requirements>,
    mode: PathMode,
    // Labeled mode: whether `value` already has an entry in the path.
    recorded: bool,
}

impl Traverser {
    pub fn new(value: Value, requirements: Arc<Requirements>, bulk: u64) -> Self {
        let mode = if requirements.contains(Requirement::Path) {
            PathMode::Full
        } else if requirements.contains(Requirement::LabeledPath) {
            PathMode::Labeled
        } else {
            PathMode::Off
        };
        let path = match mode {
            PathMode::Off => None,
            PathMode::Labeled => Some(Arc::new(Path::new())),
            PathMode::Full => Some(Arc::new(Path::singleton(value.clone(), LabelSet::new()))),
        };
        Self {
            value,
            path,
            bulk: bulk.max(1),
            requirements,
            recorded: mode == PathMode::Full,
            mode,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn bulk(&self) -> u64 {
        self.bulk
    }

    pub fn set_bulk(&mut self, bulk: u64) {
        self.bulk = bulk.max(1);
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// The path history; fails if the creating traversal never asked for one.
    pub fn path(&self) -> TraversalResult<&Path> {
        self.path
            .as_deref()
            .ok_or(TraversalError::MissingRequirement(Requirement::Path))
    }

    /// Successor traverser holding `value`; the path gains an entry in full mode.
    pub fn split(&self, value: Value) -> Traverser {
        let mut next = self.clone();
        next.set_value(value);
        next
    }

    /// In-place form of [`Traverser::split`].
    pub fn set_value(&mut self, value: Value) {
        match self.mode {
            PathMode::Full => {
                if let Some(path) = self.path.as_mut() {
                    Arc::make_mut(path).extend(value.clone(), LabelSet::new());
                }
            }
            PathMode::Labeled => self.recorded = false,
            PathMode::Off => {}
        }
        self.value = value;
    }

    /// Mark the current value with `labels`.
    pub fn add_labels(&mut self, labels: &LabelSet) {
        if labels.is_empty() {
            return;
        }
        let Some(path) = self.path.as_mut() else {
            return;
        };
        let path = Arc::make_mut(path);
        if self.recorded {
            path.add_labels(labels);
        } else {
            path.extend(self.value.clone(), labels.clone());
            self.recorded = true;
        }
    }

    /// Drop path label annotations outside `keep`.
    pub fn retain_labels(&mut self, keep: &LabelSet) {
        if let Some(path) = self.path.as_mut() {
            if path.labels().all(|labels| labels.iter().all(|l| keep.contains(l))) {
                return;
            }
            Arc::make_mut(path).retain_labels(keep);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(items: &[Requirement]) -> Arc<Requirements> {
        Arc::new(items.iter().copied().collect())
    }

    #[test]
    fn test_no_path_without_requirement() {
        let t = Traverser::new(Value::from(1), reqs(&[]), 1);
        assert!(matches!(
            t.path(),
            Err(TraversalError::MissingRequirement(Requirement::Path))
        ));
        let t = t.split(Value::from(2));
        assert_eq!(t.value(), &Value::from(2));
    }

    #[test]
    fn test_full_path_records_every_value() {
        let mut t = Traverser::new(Value::from("a"), reqs(&[Requirement::Path]), 1);
        t.add_labels(&LabelSet::single("x"));
        let t = t.split(Value::from("b"));
        let path = t.path().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.get("x"), Some(&Value::from("a")));
    }

    #[test]
    fn test_labeled_path_records_only_labeled_values() {
        let mut t = Traverser::new(Value::from("a"), reqs(&[Requirement::LabeledPath]), 1);
        t.set_value(Value::from("b"));
        t.add_labels(&LabelSet::single("x"));
        t.add_labels(&LabelSet::single("y"));
        t.set_value(Value::from("c"));
        let path = t.path().unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.get("y"), Some(&Value::from("b")));
    }

    #[test]
    fn test_branches_do_not_share_modifications() {
        let mut root = Traverser::new(Value::from("a"), reqs(&[Requirement::Path]), 1);
        root.add_labels(&LabelSet::single("x"));
        let mut left = root.split(Value::from("b"));
        let right = root.split(Value::from("c"));
        left.retain_labels(&LabelSet::new());

        assert!(!left.path().unwrap().has_label("x"));
        assert!(right.path().unwrap().has_label("x"));
        assert!(root.path().unwrap().has_label("x"));
        assert_eq!(root.path().unwrap().len(), 1);
    }

    #[test]
    fn test_bulk_is_at_least_one() {
        let mut t = Traverser::new(Value::Null, reqs(&[]), 0);
        assert_eq!(t.bulk(), 1);
        t.set_bulk(3);
        assert_eq!(t.bulk(), 3);
    }
}
