//! Directed graph container (spec §4.5).
//!
//! Grounded on `original_source/Trabalho_2/CODIGO/ALGORITMOS/arborescence.h`'s
//! `DirectedGraph`: dual `outgoing`/`incoming` maps kept mutually
//! consistent, `from_weighted_graph` collapsing parallel weights to
//! their minimum, and `get_minimum_undirected_edges` consolidating
//! both directions of an unordered pair.

use std::collections::HashMap;

use crate::graph::edge::DirectedEdge;
use crate::graph::weighted::WeightedGraph;

#[derive(Debug, Clone)]
pub struct DirectedGraph {
    capacity: usize,
    current_size: usize,
    outgoing: Vec<HashMap<usize, f64>>,
    incoming: Vec<HashMap<usize, f64>>,
}

impl DirectedGraph {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            current_size: 0,
            outgoing: vec![HashMap::new(); capacity],
            incoming: vec![HashMap::new(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn vertex_count(&self) -> usize {
        self.current_size
    }

    pub fn add_vertex(&mut self) -> bool {
        if self.current_size < self.capacity {
            self.current_size += 1;
            true
        } else {
            false
        }
    }

    pub fn add_all_vertices(&mut self) {
        while self.add_vertex() {}
    }

    fn in_range(&self, v: usize) -> bool {
        v < self.current_size
    }

    /// Connects `from -> to` with the given cost, keeping both maps
    /// consistent. Benignly fails if either endpoint is out of range.
    pub fn connect(&mut self, from: usize, to: usize, cost: f64) -> bool {
        if !self.in_range(from) || !self.in_range(to) {
            return false;
        }
        self.outgoing[from].insert(to, cost);
        self.incoming[to].insert(from, cost);
        true
    }

    pub fn disconnect(&mut self, from: usize, to: usize) -> bool {
        if !self.in_range(from) || !self.in_range(to) {
            return false;
        }
        let removed = self.outgoing[from].remove(&to).is_some();
        self.incoming[to].remove(&from);
        removed
    }

    pub fn has_connection(&self, from: usize, to: usize) -> bool {
        self.in_range(from) && self.in_range(to) && self.outgoing[from].contains_key(&to)
    }

    pub fn connection_cost(&self, from: usize, to: usize) -> Option<f64> {
        self.outgoing.get(from)?.get(&to).copied()
    }

    pub fn total_connections(&self) -> usize {
        self.outgoing.iter().map(|m| m.len()).sum()
    }

    pub fn destinations_from(&self, v: usize) -> Option<&HashMap<usize, f64>> {
        self.outgoing.get(v)
    }

    pub fn sources_to(&self, v: usize) -> Option<&HashMap<usize, f64>> {
        self.incoming.get(v)
    }

    pub fn all_connections(&self) -> Vec<DirectedEdge> {
        let mut edges = Vec::with_capacity(self.total_connections());
        for (from, dests) in self.outgoing.iter().enumerate() {
            for (&to, &cost) in dests {
                edges.push(DirectedEdge::new(from, to, cost));
            }
        }
        edges
    }

    /// Consolidates `u -> v` and `v -> u` into one undirected entry
    /// per unordered pair, cost = min over both directions. Self-loops
    /// are excluded (spec §4.5).
    pub fn get_minimum_undirected_edges(&self) -> Vec<DirectedEdge> {
        let mut best: HashMap<(usize, usize), f64> = HashMap::new();
        for edge in self.all_connections() {
            if edge.source == edge.target {
                continue;
            }
            let key = if edge.source < edge.target {
                (edge.source, edge.target)
            } else {
                (edge.target, edge.source)
            };
            best.entry(key)
                .and_modify(|c| *c = c.min(edge.cost))
                .or_insert(edge.cost);
        }
        best.into_iter()
            .map(|((u, v), cost)| DirectedEdge::new(u, v, cost))
            .collect()
    }

    /// Builds a directed view of an undirected (or directed) weighted
    /// graph: every undirected adjacency becomes two opposing directed
    /// edges of equal weight, with parallel weights collapsed to their
    /// minimum first.
    pub fn from_weighted_graph(graph: &WeightedGraph) -> DirectedGraph {
        let n = graph.len();
        let mut directed = DirectedGraph::new(n);
        directed.add_all_vertices();

        for u in 0..n {
            let neighbors = graph
                .neighbors(u)
                .expect("u is within the source graph's current size");
            for &v in neighbors.keys() {
                let min_w = graph
                    .min_weight(u, v)
                    .expect("v is a recorded neighbor of u");
                directed.connect(u, v, min_w);
                if graph.is_directed() {
                    // nothing else to add: the adjacency already only
                    // records the u -> v direction.
                } else {
                    directed.connect(v, u, min_w);
                }
            }
        }

        directed
    }
}
