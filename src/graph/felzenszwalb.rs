//! Felzenszwalb segmenter, the MST-style driver over a `WeightedGraph` (spec §4.4).
//!
//! Grounded on `original_source/Trabalho_2/src/lib/edmonds.h`'s
//! `segment_image` (sort consolidated edges ascending, scan with the
//! FH union-find) generalized back onto an undirected `WeightedGraph`
//! rather than the directed consolidated view, as spec §4.4 requires.

use log::debug;

use crate::graph::partition::Partition;
use crate::graph::union_find::UnionFind;
use crate::graph::weighted::WeightedGraph;

/// Runs the FH segmenter over `graph` with scale `k` and optional
/// minimum region size `m` (`0` disables the cleanup pass).
pub fn segment(graph: &WeightedGraph, k: f64, min_size: usize) -> Partition {
    let n = graph.len();
    let mut edges = graph.flatten_edges();
    edges.sort_by_key(|e| e.sort_key());

    let mut uf = UnionFind::new(n);
    let mut merged = 0usize;
    for edge in &edges {
        if edge.u == edge.v {
            continue; // self-loops are ignored downstream, per spec §4.1.
        }
        if uf.union_fh(edge.u, edge.v, edge.w, k) {
            merged += 1;
        }
    }
    debug!("felzenszwalb: merged {merged} of {} candidate edges", edges.len());

    if min_size > 0 {
        for edge in &edges {
            if edge.u == edge.v {
                continue;
            }
            let root_u = uf.find(edge.u);
            let root_v = uf.find(edge.v);
            if root_u != root_v && (uf.size_of(edge.u) < min_size || uf.size_of(edge.v) < min_size) {
                uf.force_merge(edge.u, edge.v);
            }
        }
    }

    uf.compress_all();
    Partition::new((0..n).map(|i| uf.find(i)).collect())
}
