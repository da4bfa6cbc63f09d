//! The weighted graph container (spec §4.1).
//!
//! Mirrors the adjacency-list shape of the teacher's `Graph`/`GraphWithRecaller`
//! (`add_edge`/`remove_edge`/`has_edge`/`get_neighbors`, benign `bool`
//! returns on mutation) but specialized to dense `usize` vertex ids
//! with a fixed capacity and a per-vertex `Rgb` color, as required by
//! the pixel-graph domain, and to a multiset-of-weights adjacency
//! value so parallel edges with distinct weights coexist (spec §9).

use std::collections::HashMap;

use crate::color::Rgb;
use crate::error::GraphError;

/// An undirected or directed weighted graph over a dense prefix of
/// `[0, capacity)` vertex ids.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    capacity: usize,
    current_size: usize,
    directed: bool,
    colors: Vec<Rgb>,
    labels: Vec<Option<String>>,
    adjacency: Vec<HashMap<usize, Vec<f64>>>,
}

impl WeightedGraph {
    /// Creates a graph with room for `capacity` vertices; none exist yet.
    pub fn new(capacity: usize, directed: bool) -> Self {
        Self {
            capacity,
            current_size: 0,
            directed,
            colors: vec![Rgb::default(); capacity],
            labels: vec![None; capacity],
            adjacency: vec![HashMap::new(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.current_size
    }

    pub fn is_empty(&self) -> bool {
        self.current_size == 0
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Appends a new vertex if there is room. Returns whether it was added.
    pub fn add_vertex(&mut self) -> bool {
        if self.current_size < self.capacity {
            self.current_size += 1;
            true
        } else {
            false
        }
    }

    /// Fills the graph out to its full capacity, all vertices unlabeled.
    pub fn add_all_vertices(&mut self) {
        while self.add_vertex() {}
    }

    fn in_range(&self, v: usize) -> bool {
        v < self.current_size
    }

    fn require_in_range(&self, v: usize) -> Result<(), GraphError> {
        if self.in_range(v) {
            Ok(())
        } else {
            Err(GraphError::OutOfRange {
                vertex: v,
                capacity: self.current_size,
            })
        }
    }

    pub fn color(&self, v: usize) -> Result<Rgb, GraphError> {
        self.require_in_range(v)?;
        Ok(self.colors[v])
    }

    pub fn set_color(&mut self, v: usize, color: Rgb) -> Result<(), GraphError> {
        self.require_in_range(v)?;
        self.colors[v] = color;
        Ok(())
    }

    pub fn set_label(&mut self, v: usize, label: String) -> Result<(), GraphError> {
        self.require_in_range(v)?;
        self.labels[v] = Some(label);
        Ok(())
    }

    pub fn label(&self, v: usize) -> Result<Option<&str>, GraphError> {
        self.require_in_range(v)?;
        Ok(self.labels[v].as_deref())
    }

    /// Adds an edge `u -> v` of weight `w`; mirrors it on an undirected
    /// graph. Idempotent for an identical `(u, v, w)` triple, but
    /// distinct weights on the same pair both persist (a multiset).
    /// Fails benignly (`false`) if either endpoint is out of range or
    /// `u == v` (self-loops are stored but ignored downstream, per
    /// spec, so they are still permitted here).
    pub fn add_edge(&mut self, u: usize, v: usize, w: f64) -> bool {
        if !self.in_range(u) || !self.in_range(v) {
            return false;
        }
        let added = Self::insert_weight(&mut self.adjacency[u], v, w);
        if !self.directed {
            Self::insert_weight(&mut self.adjacency[v], u, w);
        }
        added
    }

    fn insert_weight(neighbors: &mut HashMap<usize, Vec<f64>>, to: usize, w: f64) -> bool {
        let weights = neighbors.entry(to).or_insert_with(Vec::new);
        if weights.contains(&w) {
            false
        } else {
            weights.push(w);
            true
        }
    }

    /// Removes every parallel weight between `u` and `v`.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        if !self.in_range(u) || !self.in_range(v) {
            return false;
        }
        let removed = self.adjacency[u].remove(&v).is_some();
        if !self.directed {
            self.adjacency[v].remove(&u);
        }
        removed
    }

    /// Removes exactly one occurrence of weight `w` between `u` and `v`.
    pub fn remove_edge_weight(&mut self, u: usize, v: usize, w: f64) -> bool {
        if !self.in_range(u) || !self.in_range(v) {
            return false;
        }
        let removed = Self::remove_one_weight(&mut self.adjacency[u], v, w);
        if removed && !self.directed {
            Self::remove_one_weight(&mut self.adjacency[v], u, w);
        }
        removed
    }

    fn remove_one_weight(neighbors: &mut HashMap<usize, Vec<f64>>, to: usize, w: f64) -> bool {
        let Some(weights) = neighbors.get_mut(&to) else {
            return false;
        };
        if let Some(pos) = weights.iter().position(|&x| x == w) {
            weights.remove(pos);
            if weights.is_empty() {
                neighbors.remove(&to);
            }
            true
        } else {
            false
        }
    }

    /// True iff any edge exists between `u` and `v` (in the `u -> v`
    /// direction on a directed graph).
    pub fn check_edge(&self, u: usize, v: usize) -> bool {
        if !self.in_range(u) || !self.in_range(v) {
            return false;
        }
        self.adjacency[u].contains_key(&v)
    }

    /// The weight-multiset adjacency of `v`.
    pub fn neighbors(&self, v: usize) -> Result<&HashMap<usize, Vec<f64>>, GraphError> {
        self.require_in_range(v)?;
        Ok(&self.adjacency[v])
    }

    /// The minimum weight on the edge `(u, v)`, if any exists.
    pub fn min_weight(&self, u: usize, v: usize) -> Option<f64> {
        self.adjacency.get(u)?.get(&v)?.iter().cloned().fold(None, |acc, w| {
            Some(acc.map_or(w, |m: f64| m.min(w)))
        })
    }

    /// Every undirected edge as a flat, consolidated list: one entry
    /// per parallel weight, `u < v`, each unordered pair visited once.
    pub fn flatten_edges(&self) -> Vec<crate::graph::edge::Edge> {
        let mut edges = Vec::new();
        for u in 0..self.current_size {
            for (&v, weights) in &self.adjacency[u] {
                if self.directed || u <= v {
                    for &w in weights {
                        edges.push(crate::graph::edge::Edge::new(u, v, w));
                    }
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_edge_is_symmetric_on_undirected_graph() {
        let mut g = WeightedGraph::new(3, false);
        g.add_all_vertices();
        assert!(g.add_edge(0, 1, 2.5));
        assert!(g.check_edge(0, 1));
        assert!(g.check_edge(1, 0));
        assert_eq!(g.neighbors(0).unwrap().get(&1), Some(&vec![2.5]));
        assert_eq!(g.neighbors(1).unwrap().get(&0), Some(&vec![2.5]));
    }

    #[test]
    fn add_edge_allows_distinct_parallel_weights() {
        let mut g = WeightedGraph::new(2, false);
        g.add_all_vertices();
        assert!(g.add_edge(0, 1, 1.0));
        assert!(g.add_edge(0, 1, 2.0));
        assert!(!g.add_edge(0, 1, 1.0));
        assert_eq!(g.neighbors(0).unwrap().get(&1).unwrap().len(), 2);
    }

    #[test]
    fn out_of_range_edges_fail_benignly() {
        let mut g = WeightedGraph::new(1, false);
        g.add_all_vertices();
        assert!(!g.add_edge(0, 5, 1.0));
        assert!(!g.remove_edge(0, 5));
        assert!(!g.check_edge(0, 5));
    }

    #[test]
    fn capacity_zero_rejects_every_vertex_and_edge() {
        let mut g = WeightedGraph::new(0, false);
        assert!(!g.add_vertex());
        assert!(!g.add_edge(0, 0, 1.0));
    }

    #[test]
    fn capacity_one_allows_self_loop() {
        let mut g = WeightedGraph::new(1, false);
        g.add_all_vertices();
        assert!(g.add_edge(0, 0, 1.0));
        assert!(g.check_edge(0, 0));
    }

    #[test]
    fn remove_edge_weight_removes_single_occurrence() {
        let mut g = WeightedGraph::new(2, false);
        g.add_all_vertices();
        g.add_edge(0, 1, 1.0);
        g.add_edge(0, 1, 2.0);
        assert!(g.remove_edge_weight(0, 1, 1.0));
        assert_eq!(g.neighbors(0).unwrap().get(&1), Some(&vec![2.0]));
        assert!(g.check_edge(0, 1));
        assert!(g.remove_edge_weight(0, 1, 2.0));
        assert!(!g.check_edge(0, 1));
    }

    #[test]
    fn read_on_out_of_range_vertex_is_an_error() {
        let g = WeightedGraph::new(1, false);
        assert!(g.neighbors(3).is_err());
    }

    #[test]
    fn directed_edge_is_not_mirrored() {
        let mut g = WeightedGraph::new(2, true);
        g.add_all_vertices();
        g.add_edge(0, 1, 1.0);
        assert!(g.check_edge(0, 1));
        assert!(!g.check_edge(1, 0));
    }
}
