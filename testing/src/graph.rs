//! In-memory property graph used as a traversal data source in tests.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use strand_core::{Edge, ElementId, Value, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Out,
    In,
    Both,
}

#[derive(Debug, Clone, Serialize)]
pub struct Element<T> {
    pub element: T,
    pub properties: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Graph {
    vertices: BTreeMap<ElementId, Element<Vertex>>,
    edges: BTreeMap<ElementId, Element<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, id: ElementId, label: &str, properties: &[(&str, Value)]) -> Value {
        let vertex = Vertex::new(id, label);
        self.vertices.insert(
            id,
            Element {
                element: vertex.clone(),
                properties: to_map(properties),
            },
        );
        Value::Vertex(vertex)
    }

    pub fn add_edge(
        &mut self,
        id: ElementId,
        out_v: ElementId,
        label: &str,
        in_v: ElementId,
        properties: &[(&str, Value)],
    ) -> Value {
        let edge = Edge {
            id,
            label: label.to_string(),
            out_v,
            in_v,
        };
        self.edges.insert(
            id,
            Element {
                element: edge.clone(),
                properties: to_map(properties),
            },
        );
        Value::Edge(edge)
    }

    /// The vertex with `id` as a traversal value.
    pub fn vertex(&self, id: ElementId) -> Option<Value> {
        self.vertices
            .get(&id)
            .map(|v| Value::Vertex(v.element.clone()))
    }

    /// All vertices in id order, or only those in `ids` (in the given order).
    pub fn v(&self, ids: &[ElementId]) -> Vec<Value> {
        if ids.is_empty() {
            return self
                .vertices
                .values()
                .map(|v| Value::Vertex(v.element.clone()))
                .collect();
        }
        ids.iter().filter_map(|id| self.vertex(*id)).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// A property of a vertex or edge value.
    pub fn property(&self, element: &Value, key: &str) -> Option<&Value> {
        let properties = match element {
            Value::Vertex(v) => &self.vertices.get(&v.id)?.properties,
            Value::Edge(e) => &self.edges.get(&e.id)?.properties,
            _ => return None,
        };
        properties.get(key)
    }

    /// Neighbours of `vertex` in edge id order, restricted to `labels` when
    /// that is not empty.
    pub fn adjacent(&self, vertex: ElementId, direction: Direction, labels: &[String]) -> Vec<Value> {
        let wanted = |edge: &Edge| labels.is_empty() || labels.iter().any(|l| *l == edge.label);
        let mut result = Vec::new();
        for Element { element: edge, .. } in self.edges.values() {
            if !wanted(edge) {
                continue;
            }
            if matches!(direction, Direction::Out | Direction::Both) && edge.out_v == vertex {
                result.extend(self.vertex(edge.in_v));
            }
            if matches!(direction, Direction::In | Direction::Both) && edge.in_v == vertex {
                result.extend(self.vertex(edge.out_v));
            }
        }
        result
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn to_map(properties: &[(&str, Value)]) -> BTreeMap<String, Value> {
    properties
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// The six-vertex "modern" social graph: people who know each other and
/// software they created.
pub fn modern() -> Arc<Graph> {
    let mut g = Graph::new();
    g.add_vertex(1, "person", &[("name", "marko".into()), ("age", 29.into())]);
    g.add_vertex(2, "person", &[("name", "vadas".into()), ("age", 27.into())]);
    g.add_vertex(3, "software", &[("name", "lop".into()), ("lang", "java".into())]);
    g.add_vertex(4, "person", &[("name", "josh".into()), ("age", 32.into())]);
    g.add_vertex(5, "software", &[("name", "ripple".into()), ("lang", "java".into())]);
    g.add_vertex(6, "person", &[("name", "peter".into()), ("age", 35.into())]);
    g.add_edge(7, 1, "knows", 2, &[("weight", 0.5.into())]);
    g.add_edge(8, 1, "knows", 4, &[("weight", 1.0.into())]);
    g.add_edge(9, 1, "created", 3, &[("weight", 0.4.into())]);
    g.add_edge(10, 4, "created", 5, &[("weight", 1.0.into())]);
    g.add_edge(11, 4, "created", 3, &[("weight", 0.4.into())]);
    g.add_edge(12, 6, "created", 3, &[("weight", 0.2.into())]);
    Arc::new(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_shape() {
        let g = modern();
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.edge_count(), 6);
        let marko = g.vertex(1).unwrap();
        assert_eq!(g.property(&marko, "name"), Some(&Value::from("marko")));
        assert_eq!(
            g.adjacent(1, Direction::Out, &[]),
            g.v(&[2, 4, 3])
        );
        assert_eq!(
            g.adjacent(3, Direction::In, &["created".to_string()]),
            g.v(&[1, 4, 6])
        );
        assert_eq!(g.to_json()["vertices"]["1"]["element"]["label"], "person");
    }
}
