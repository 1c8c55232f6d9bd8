//! Similarity Graph - Externally Supplied Adjacency
//!
//! The graph is built by an upstream semantic-similarity service and
//! borrowed read-only for the duration of one propagation call. It may
//! contain cycles, self-loops, duplicate edges, and out-of-range weights;
//! the propagator tolerates all of these (skip-and-log, never abort).

use std::collections::HashMap;

/// Adjacency mapping from item id to `(neighbor id, similarity weight)`
/// pairs. The core never mutates a graph it is handed.
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    adjacency: HashMap<String, Vec<(String, f64)>>,
}

impl SimilarityGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directed edge.
    ///
    /// No validation happens here: malformed edges are the propagator's
    /// concern at traversal time.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        debug_assert!(!from.is_empty() && !to.is_empty(), "edge ids cannot be empty");
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), weight));
    }

    /// Add an edge in both directions with the same weight.
    pub fn add_undirected(&mut self, a: &str, b: &str, weight: f64) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    /// Neighbors of a node, in insertion order. Unknown nodes have none.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> &[(String, f64)] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    /// Number of nodes with at least one outgoing edge.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

impl From<HashMap<String, Vec<(String, f64)>>> for SimilarityGraph {
    fn from(adjacency: HashMap<String, Vec<(String, f64)>>) -> Self {
        Self { adjacency }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = SimilarityGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors("anything").is_empty());
    }

    #[test]
    fn test_add_edge_directed() {
        let mut graph = SimilarityGraph::new();
        graph.add_edge("a", "b", 0.8);

        assert_eq!(graph.neighbors("a"), &[("b".to_string(), 0.8)]);
        assert!(graph.neighbors("b").is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_add_undirected() {
        let mut graph = SimilarityGraph::new();
        graph.add_undirected("a", "b", 0.8);

        assert_eq!(graph.neighbors("a"), &[("b".to_string(), 0.8)]);
        assert_eq!(graph.neighbors("b"), &[("a".to_string(), 0.8)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_neighbors_preserve_insertion_order() {
        let mut graph = SimilarityGraph::new();
        graph.add_edge("a", "b", 0.9);
        graph.add_edge("a", "c", 0.7);

        let ids: Vec<&str> = graph.neighbors("a").iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_from_hashmap() {
        let mut adjacency = HashMap::new();
        adjacency.insert("a".to_string(), vec![("b".to_string(), 0.5)]);
        let graph = SimilarityGraph::from(adjacency);
        assert_eq!(graph.node_count(), 1);
    }
}
