//! # Path: labeled traversal history
//!
//! A `Path` records the values a traverser has passed through, in order, each
//! with the labels of the steps that marked it. Entries are only ever appended
//! while the traverser flows forward; sub-path extraction builds a new path.

use crate::error::{TraversalError, TraversalResult};
use crate::label::LabelSet;
use crate::value::Value;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub value: Value,
    pub labels: LabelSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    entries: Vec<PathEntry>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(value: Value, labels: LabelSet) -> Self {
        Self {
            entries: vec![PathEntry { value, labels }],
        }
    }

    /// Append an entry to the end of the path.
    pub fn extend(&mut self, value: Value, labels: LabelSet) {
        self.entries.push(PathEntry { value, labels });
    }

    /// Attach labels to the most recent entry. No-op on an empty path.
    pub fn add_labels(&mut self, labels: &LabelSet) {
        if let Some(last) = self.entries.last_mut() {
            last.labels.extend_from(labels);
        }
    }

    /// Drop every label annotation not in `keep`. Entries themselves stay.
    pub fn retain_labels(&mut self, keep: &LabelSet) {
        for entry in &mut self.entries {
            entry.labels.retain(keep);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn head(&self) -> Option<&Value> {
        self.entries.last().map(|e| &e.value)
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &LabelSet)> {
        self.entries.iter().map(|e| (&e.value, &e.labels))
    }

    pub fn objects(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelSet> {
        self.entries.iter().map(|e| &e.labels)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.labels.contains(label))
    }

    /// The most recent value carrying `label`.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.labels.contains(label))
            .map(|e| &e.value)
    }

    /// Index range of the span between `from` and `to`.
    ///
    /// The span starts at the first entry labeled `from` and ends at the first
    /// entry at or after it labeled `to`. An unset label, or one this path does
    /// not carry, falls back to the path boundary.
    pub fn span(&self, from: Option<&str>, to: Option<&str>) -> Range<usize> {
        let start = from
            .and_then(|label| self.entries.iter().position(|e| e.labels.contains(label)))
            .unwrap_or(0);
        let end = to
            .and_then(|label| {
                self.entries
                    .iter()
                    .skip(start)
                    .position(|e| e.labels.contains(label))
                    .map(|offset| start + offset + 1)
            })
            .unwrap_or(self.entries.len());
        start..end
    }

    /// Copy of the entries between `from` and `to`; see [`Path::span`].
    pub fn sub_path(&self, from: Option<&str>, to: Option<&str>) -> Path {
        if from.is_none() && to.is_none() {
            return self.clone();
        }
        Path {
            entries: self.entries[self.span(from, to)].to_vec(),
        }
    }

    /// Like [`Path::sub_path`] but fails if a named label is not on this path.
    pub fn strict_sub_path(&self, from: Option<&str>, to: Option<&str>) -> TraversalResult<Path> {
        for label in [from, to].into_iter().flatten() {
            if !self.has_label(label) {
                return Err(TraversalError::PathLabelMissing(label.to_string()));
            }
        }
        Ok(self.sub_path(from, to))
    }

    /// True iff no value occurs twice.
    pub fn is_simple(&self) -> bool {
        is_simple(self.objects())
    }
}

/// True iff the sequence holds no repeated value.
pub fn is_simple<'a>(values: impl IntoIterator<Item = &'a Value>) -> bool {
    let mut seen = AHashSet::new();
    values.into_iter().all(|v| seen.insert(v))
}

impl FromIterator<(Value, LabelSet)> for Path {
    fn from_iter<I: IntoIterator<Item = (Value, LabelSet)>>(iter: I) -> Self {
        Path {
            entries: iter
                .into_iter()
                .map(|(value, labels)| PathEntry { value, labels })
                .collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path[")?;
        for (i, value) in self.objects().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(items: &[(&str, Option<&str>)]) -> Path {
        items
            .iter()
            .map(|(v, label)| (Value::from(*v), label.iter().copied().collect::<LabelSet>()))
            .collect()
    }

    fn names(path: &Path) -> Vec<String> {
        path.objects().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_is_simple() {
        assert!(!labeled(&[("a", None), ("b", None), ("a", None)]).is_simple());
        assert!(labeled(&[("a", None), ("b", None), ("c", None)]).is_simple());
        assert!(Path::new().is_simple());
    }

    #[test]
    fn test_sub_path_between_labels() {
        let path = labeled(&[
            ("x", None),
            ("a", Some("from")),
            ("b", None),
            ("c", Some("to")),
            ("d", None),
        ]);
        let sub = path.sub_path(Some("from"), Some("to"));
        assert_eq!(names(&sub), vec!["a", "b", "c"]);
        // Original path untouched
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_sub_path_uses_first_occurrences() {
        let path = labeled(&[
            ("a", Some("s")),
            ("b", Some("e")),
            ("c", Some("s")),
            ("d", Some("e")),
        ]);
        assert_eq!(names(&path.sub_path(Some("s"), Some("e"))), vec!["a", "b"]);
    }

    #[test]
    fn test_sub_path_falls_back_to_boundaries() {
        let path = labeled(&[("a", None), ("b", Some("m")), ("c", None)]);
        assert_eq!(names(&path.sub_path(Some("m"), None)), vec!["b", "c"]);
        assert_eq!(names(&path.sub_path(None, Some("m"))), vec!["a", "b"]);
        assert_eq!(names(&path.sub_path(Some("missing"), None)), vec!["a", "b", "c"]);
        // `to` only occurring before `from` counts as absent
        let path = labeled(&[("a", Some("to")), ("b", Some("from")), ("c", None)]);
        assert_eq!(names(&path.sub_path(Some("from"), Some("to"))), vec!["b", "c"]);
    }

    #[test]
    fn test_strict_sub_path_rejects_missing_label() {
        let path = labeled(&[("a", Some("x")), ("b", None)]);
        assert!(path.strict_sub_path(Some("x"), None).is_ok());
        let err = path.strict_sub_path(Some("x"), Some("y")).unwrap_err();
        assert!(matches!(err, TraversalError::PathLabelMissing(l) if l == "y"));
    }

    #[test]
    fn test_labels_and_get() {
        let mut path = Path::singleton(Value::from("a"), LabelSet::single("x"));
        path.extend(Value::from("b"), LabelSet::new());
        path.add_labels(&LabelSet::single("y"));
        path.extend(Value::from("c"), LabelSet::single("x"));
        assert_eq!(path.get("x"), Some(&Value::from("c")));
        assert_eq!(path.get("y"), Some(&Value::from("b")));
        assert!(path.get("z").is_none());

        path.retain_labels(&LabelSet::single("y"));
        assert_eq!(path.len(), 3);
        assert!(!path.has_label("x"));
        assert!(path.has_label("y"));
    }
}
