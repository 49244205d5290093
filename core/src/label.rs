use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered set of step labels.
///
/// Labels are interned as `Arc<str>` so that copying a set onto every path
/// entry does not allocate new strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelSet(Vec<Arc<str>>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(label: impl Into<Arc<str>>) -> Self {
        Self(vec![label.into()])
    }

    /// Adds a label; returns false if it was already present.
    pub fn insert(&mut self, label: impl Into<Arc<str>>) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        self.0.push(label);
        true
    }

    pub fn extend_from(&mut self, other: &LabelSet) {
        for label in &other.0 {
            if !self.contains(label) {
                self.0.push(label.clone());
            }
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| &**l == label)
    }

    pub fn retain(&mut self, keep: &LabelSet) {
        self.0.retain(|l| keep.contains(l));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|l| &**l)
    }
}

impl<S: Into<Arc<str>>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, label) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", label)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let mut labels = LabelSet::new();
        assert!(labels.insert("b"));
        assert!(labels.insert("a"));
        assert!(!labels.insert("b"));
        assert_eq!(labels.iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_retain() {
        let mut labels: LabelSet = ["a", "b", "c"].into_iter().collect();
        labels.retain(&LabelSet::single("b"));
        assert_eq!(labels.to_string(), "[b]");
    }
}
