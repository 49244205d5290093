//! # strand-test
//!
//! Fixtures and helpers for testing Strand traversals: the "modern" graph,
//! graph-walking steps, and assertion macros.

pub mod graph;
pub mod steps;

pub use strand_core;

pub use graph::{Direction, Graph, modern};
pub use steps::{HasStep, ValuesStep, VertexStep, both, by_values, has, in_, out, values};

use strand_core::{ElementId, Traversal, TraversalResult, Value};

/// Pull every remaining result.
pub fn collect(traversal: &mut Traversal) -> TraversalResult<Vec<Value>> {
    traversal.to_list()
}

/// Vertex ids of `values`; non-vertex values are skipped.
pub fn vertex_ids(values: &[Value]) -> Vec<ElementId> {
    values
        .iter()
        .filter_map(|v| v.as_vertex().map(|v| v.id))
        .collect()
}

/// Ids of the vertex lists produced by a path step.
pub fn path_ids(values: &[Value]) -> Vec<Vec<ElementId>> {
    values
        .iter()
        .filter_map(Value::as_list)
        .map(vertex_ids)
        .collect()
}

/// Assert that a traversal yields exactly `expected`, in order.
#[macro_export]
macro_rules! assert_traversal {
    ($traversal:expr, [$($expected:expr),* $(,)?]) => {{
        let actual = $traversal.to_list().expect("traversal failed");
        let expected: Vec<$crate::strand_core::Value> = vec![$($crate::strand_core::Value::from($expected)),*];
        assert_eq!(actual, expected);
    }};
}

/// Assert that a traversal yields `expected` in any order.
#[macro_export]
macro_rules! assert_traversal_unordered {
    ($traversal:expr, [$($expected:expr),* $(,)?]) => {{
        let mut actual: Vec<String> = $traversal
            .to_list()
            .expect("traversal failed")
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut expected: Vec<String> = vec![$($crate::strand_core::Value::from($expected).to_string()),*];
        actual.sort();
        expected.sort();
        assert_eq!(actual, expected);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_std::{PathStep, StartStep};

    #[test]
    fn macros_and_helpers() {
        let g = modern();
        let mut t = Traversal::builder()
            .then(StartStep::new())
            .then(out(&g, &[]))
            .then(values(&g, "name"))
            .build()
            .unwrap();
        t.inject(g.v(&[1])).unwrap();
        assert_traversal!(t, ["vadas", "josh", "lop"]);

        t.inject(g.v(&[4])).unwrap();
        assert_traversal_unordered!(t, ["lop", "ripple"]);

        let mut paths = Traversal::builder()
            .then(StartStep::new())
            .then(out(&g, &["created"]))
            .then(PathStep::new())
            .build()
            .unwrap();
        paths.inject(g.v(&[4])).unwrap();
        let results = collect(&mut paths).unwrap();
        assert_eq!(path_ids(&results), vec![vec![4, 5], vec![4, 3]]);
    }
}
