//! Minimum-cost arborescence engine: Chu-Liu/Edmonds contraction, an
//! iterative cycle-breaking fallback, and the Edmonds-mode segmenter
//! (spec §4.6, §4.7).
//!
//! The recursive contraction is a direct restatement of
//! `original_source/Trabalho_2/src/lib/edmonds.h`'s `run_chu_liu`:
//! cheapest-incoming selection, cycle detection by walking the
//! selected-incoming pointers, contraction into a fresh
//! `DirectedGraph`, recursion, and expansion. The half-finished
//! Fibonacci-heap/Gabow and Tarjan-SCC variants visible alongside it
//! in `gabow.h`/`tarjan.h` are not ported (spec §9, §4.6's design
//! notes: their correctness was never established).

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::GraphError;
use crate::graph::directed::DirectedGraph;
use crate::graph::edge::{DirectedEdge, Edge};
use crate::graph::partition::Partition;
use crate::graph::union_find::UnionFind;

/// The result of an arborescence run. When `is_complete` is `false`,
/// `parent_of` entries other than the root are unspecified (spec §3).
#[derive(Debug, Clone, PartialEq)]
pub struct ArborescenceResult {
    pub parent_of: Vec<i64>,
    pub edge_costs: Vec<f64>,
    pub total_tree_cost: f64,
    pub root: Option<usize>,
    pub is_complete: bool,
}

impl ArborescenceResult {
    fn incomplete(n: usize, root: Option<usize>) -> Self {
        Self {
            parent_of: vec![-1; n],
            edge_costs: vec![0.0; n],
            total_tree_cost: 0.0,
            root,
            is_complete: false,
        }
    }
}

struct InternalResult {
    parent: Vec<i64>,
    edge_costs: Vec<f64>,
}

impl InternalResult {
    fn new(n: usize) -> Self {
        Self {
            parent: vec![-1; n],
            edge_costs: vec![0.0; n],
        }
    }
}

struct CycleDetection {
    cycle_id_of_vertex: Vec<Option<usize>>,
    cycles: Vec<Vec<usize>>,
}

/// For every non-root vertex, its cheapest incoming edge, breaking
/// ties by smallest source id for reproducibility (spec §4.6 Numeric
/// semantics).
fn find_cheapest_incoming_edges(graph: &DirectedGraph, root: usize) -> Vec<Option<DirectedEdge>> {
    let n = graph.vertex_count();
    let mut cheapest = vec![None; n];
    for v in 0..n {
        if v == root {
            continue;
        }
        let Some(sources) = graph.sources_to(v) else {
            continue;
        };
        let mut candidates: Vec<(usize, f64)> = sources.iter().map(|(&u, &c)| (u, c)).collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        let mut best: Option<(usize, f64)> = None;
        for (u, cost) in candidates {
            best = match best {
                None => Some((u, cost)),
                Some((_, best_cost)) if cost < best_cost => Some((u, cost)),
                Some(existing) => Some(existing),
            };
        }
        cheapest[v] = best.map(|(u, cost)| DirectedEdge::new(u, v, cost));
    }
    cheapest
}

/// Walks the selected-incoming pointers from every vertex to find
/// cycles, mirroring `edmonds.h`'s per-start coloring scheme.
fn detect_cycles(cheapest: &[Option<DirectedEdge>], n: usize, root: usize) -> CycleDetection {
    let mut cycle_id_of_vertex: Vec<Option<usize>> = vec![None; n];
    let mut visit_tag: Vec<Option<usize>> = vec![None; n];
    let mut cycles: Vec<Vec<usize>> = Vec::new();

    for start in 0..n {
        if start == root || cycle_id_of_vertex[start].is_some() {
            continue;
        }

        let mut current = start;
        loop {
            if current == root || cycle_id_of_vertex[current].is_some() || visit_tag[current] == Some(start) {
                break;
            }
            visit_tag[current] = Some(start);
            current = match &cheapest[current] {
                Some(edge) => edge.source,
                None => break,
            };
        }

        if current != root && cycle_id_of_vertex[current].is_none() && visit_tag[current] == Some(start) {
            let cycle_index = cycles.len();
            let mut cycle = Vec::new();
            let mut node = current;
            loop {
                cycle.push(node);
                cycle_id_of_vertex[node] = Some(cycle_index);
                node = cheapest[node].as_ref().expect("cycle vertices all have a selected incoming edge").source;
                if node == current {
                    break;
                }
            }
            cycles.push(cycle);
        }
    }

    CycleDetection {
        cycle_id_of_vertex,
        cycles,
    }
}

struct ContractedEdgeInfo {
    original_source: usize,
    original_target: usize,
    original_cost: f64,
}

/// The recursive Chu-Liu/Edmonds core. Returns `Ok(None)` when no
/// arborescence exists (`ArborescenceImpossible`), `Err` only on the
/// internal-bug case where contraction expansion cannot be mapped
/// back (`ContractionExpansionMismatch`).
fn run_chu_liu(graph: &DirectedGraph, root: usize) -> Result<Option<InternalResult>, GraphError> {
    let n = graph.vertex_count();
    if n == 0 || root >= n {
        return Ok(None);
    }

    let cheapest = find_cheapest_incoming_edges(graph, root);
    for v in 0..n {
        if v != root && cheapest[v].is_none() {
            return Ok(None);
        }
    }

    let cycles = detect_cycles(&cheapest, n, root);

    if cycles.cycles.is_empty() {
        let mut result = InternalResult::new(n);
        for v in 0..n {
            if v == root {
                continue;
            }
            let edge = cheapest[v].expect("validated above");
            result.parent[v] = edge.source as i64;
            result.edge_costs[v] = edge.cost;
        }
        return Ok(Some(result));
    }

    let cycle_count = cycles.cycles.len();
    let mut component_id = vec![usize::MAX; n];
    for v in 0..n {
        if let Some(cid) = cycles.cycle_id_of_vertex[v] {
            component_id[v] = cid;
        }
    }
    let mut next_id = cycle_count;
    for v in 0..n {
        if component_id[v] == usize::MAX {
            component_id[v] = next_id;
            next_id += 1;
        }
    }
    let contracted_vertices = next_id;
    let contracted_root = component_id[root];

    let mut contracted = DirectedGraph::new(contracted_vertices);
    contracted.add_all_vertices();

    // Collect every candidate edge for each contracted pair, then sort by
    // (from_comp, to_comp, adjusted_cost, original source) before the
    // tie-break so which original edge survives never depends on
    // `all_connections`'s HashMap iteration order, mirroring the sort-then-
    // pick-first approach `find_cheapest_incoming_edges` uses above.
    let mut candidates: Vec<(usize, usize, f64, DirectedEdge)> = graph
        .all_connections()
        .into_iter()
        .filter_map(|edge| {
            let from_comp = component_id[edge.source];
            let to_comp = component_id[edge.target];
            if from_comp == to_comp {
                return None;
            }
            let mut adjusted_cost = edge.cost;
            if cycles.cycle_id_of_vertex[edge.target].is_some() {
                adjusted_cost -= cheapest[edge.target].expect("in-cycle vertex has a selected edge").cost;
            }
            Some((from_comp, to_comp, adjusted_cost, edge))
        })
        .collect();
    candidates.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.partial_cmp(&b.2).expect("edge costs are never NaN"))
            .then(a.3.source.cmp(&b.3.source))
            .then(a.3.target.cmp(&b.3.target))
    });

    let mut edge_mapping: HashMap<(usize, usize), ContractedEdgeInfo> = HashMap::new();
    for (from_comp, to_comp, adjusted_cost, edge) in candidates {
        let key = (from_comp, to_comp);
        if edge_mapping.contains_key(&key) {
            continue;
        }
        contracted.connect(from_comp, to_comp, adjusted_cost);
        edge_mapping.insert(
            key,
            ContractedEdgeInfo {
                original_source: edge.source,
                original_target: edge.target,
                original_cost: edge.cost,
            },
        );
    }

    let contracted_result = match run_chu_liu(&contracted, contracted_root)? {
        Some(r) => r,
        None => return Ok(None),
    };

    let mut result = InternalResult::new(n);
    for v in 0..n {
        if v == root {
            continue;
        }
        let edge = cheapest[v].expect("validated above");
        result.parent[v] = edge.source as i64;
        result.edge_costs[v] = edge.cost;
    }

    for comp in 0..contracted_vertices {
        if comp == contracted_root {
            continue;
        }
        let parent_comp = contracted_result.parent[comp];
        if parent_comp < 0 {
            continue;
        }
        let key = (parent_comp as usize, comp);
        match edge_mapping.get(&key) {
            Some(info) => {
                result.parent[info.original_target] = info.original_source as i64;
                result.edge_costs[info.original_target] = info.original_cost;
            }
            None => {
                warn!("chu-liu expansion could not map contracted edge {key:?} back to an original edge");
                return Err(GraphError::ContractionExpansionMismatch);
            }
        }
    }

    Ok(Some(result))
}

/// Finds the minimum-cost arborescence rooted at `root` via recursive
/// Chu-Liu/Edmonds contraction. This is the canonical core (spec §9).
pub fn find_minimum_cost_arborescence(graph: &DirectedGraph, root: usize) -> ArborescenceResult {
    let n = graph.vertex_count();
    if root >= n {
        return ArborescenceResult::incomplete(n, None);
    }

    let internal = match run_chu_liu(graph, root) {
        Ok(Some(r)) => r,
        Ok(None) => return ArborescenceResult::incomplete(n, Some(root)),
        Err(_) => return ArborescenceResult::incomplete(n, Some(root)),
    };

    let mut result = ArborescenceResult::incomplete(n, Some(root));
    result.parent_of[root] = -1;
    let mut total = 0.0;
    for v in 0..n {
        if v == root {
            continue;
        }
        if internal.parent[v] < 0 {
            return ArborescenceResult::incomplete(n, Some(root));
        }
        result.parent_of[v] = internal.parent[v];
        result.edge_costs[v] = internal.edge_costs[v];
        total += internal.edge_costs[v];
    }
    result.total_tree_cost = total;
    result.is_complete = true;
    debug!("arborescence rooted at {root}: total cost {total}");
    result
}

/// Heuristic alternative to [`find_minimum_cost_arborescence`]: applies
/// cheapest-incoming selection, then for each detected cycle drops the
/// heaviest in-cycle selected edge from a working copy of the graph and
/// re-selects, repeating until no cycle remains or a fixed point is
/// reached. This is **not** guaranteed correct on general inputs (spec
/// §4.6); it converges quickly on the near-tree directed graphs
/// produced by the pixel-graph pipeline. Fails explicitly if
/// re-selection ever leaves a non-root vertex with no incoming edge.
pub fn find_minimum_cost_arborescence_iterative(graph: &DirectedGraph, root: usize) -> ArborescenceResult {
    let n = graph.vertex_count();
    if root >= n {
        return ArborescenceResult::incomplete(n, None);
    }

    let mut working = graph.clone();
    let max_rounds = n + 1;

    for _ in 0..max_rounds {
        let cheapest = find_cheapest_incoming_edges(&working, root);
        for v in 0..n {
            if v != root && cheapest[v].is_none() {
                return ArborescenceResult::incomplete(n, Some(root));
            }
        }

        let cycles = detect_cycles(&cheapest, n, root);
        if cycles.cycles.is_empty() {
            let mut result = ArborescenceResult::incomplete(n, Some(root));
            result.parent_of[root] = -1;
            let mut total = 0.0;
            for v in 0..n {
                if v == root {
                    continue;
                }
                let edge = cheapest[v].expect("validated above");
                result.parent_of[v] = edge.source as i64;
                result.edge_costs[v] = edge.cost;
                total += edge.cost;
            }
            result.total_tree_cost = total;
            result.is_complete = true;
            return result;
        }

        for cycle in &cycles.cycles {
            let mut heaviest = cycle[0];
            let mut heaviest_cost = cheapest[heaviest].expect("cycle vertex has an incoming edge").cost;
            for &v in &cycle[1..] {
                let cost = cheapest[v].expect("cycle vertex has an incoming edge").cost;
                if cost > heaviest_cost {
                    heaviest_cost = cost;
                    heaviest = v;
                }
            }
            let source = cheapest[heaviest].expect("cycle vertex has an incoming edge").source;
            working.disconnect(source, heaviest);
        }
    }

    warn!("iterative arborescence fallback did not reach a fixed point within {max_rounds} rounds");
    ArborescenceResult::incomplete(n, Some(root))
}

/// Edmonds-mode segmentation (spec §4.7): bypasses the Chu-Liu core
/// entirely and runs the same FH union-find driver as
/// [`crate::graph::felzenszwalb::segment`] over `D`'s consolidated
/// minimum-weight undirected edges.
pub fn segment(graph: &DirectedGraph, k: f64, min_size: usize) -> Partition {
    let n = graph.vertex_count();
    let mut edges: Vec<Edge> = graph
        .get_minimum_undirected_edges()
        .into_iter()
        .map(|e| Edge::new(e.source, e.target, e.cost))
        .collect();
    edges.sort_by_key(|e| e.sort_key());

    let mut uf = UnionFind::new(n);
    for edge in &edges {
        uf.union_fh(edge.u, edge.v, edge.w, k);
    }

    if min_size > 0 {
        for edge in &edges {
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

#[cfg(test)]
mod test {
    use super::*;

    fn graph_from_edges(n: usize, edges: &[(usize, usize, f64)]) -> DirectedGraph {
        let mut g = DirectedGraph::new(n);
        g.add_all_vertices();
        for &(u, v, w) in edges {
            g.connect(u, v, w);
        }
        g
    }

    #[test]
    fn scenario_c_chu_liu_on_a_dag() {
        let g = graph_from_edges(4, &[(0, 1, 2.0), (0, 2, 1.0), (1, 3, 3.0), (2, 3, 1.0)]);
        let result = find_minimum_cost_arborescence(&g, 0);
        assert!(result.is_complete);
        assert_eq!(result.parent_of, vec![-1, 0, 0, 2]);
        assert_eq!(result.total_tree_cost, 4.0);
    }

    #[test]
    fn scenario_d_chu_liu_cycle_resolution() {
        let g = graph_from_edges(3, &[(0, 1, 10.0), (1, 2, 1.0), (2, 1, 1.0)]);
        let result = find_minimum_cost_arborescence(&g, 0);
        assert!(result.is_complete);
        assert_eq!(result.total_tree_cost, 11.0);
        let zero_children: Vec<usize> = (0..3).filter(|&v| result.parent_of[v] == 0).collect();
        assert_eq!(zero_children.len(), 1);
        assert!(zero_children == vec![1] || zero_children == vec![2]);
    }

    #[test]
    fn scenario_e_arborescence_impossible() {
        let g = graph_from_edges(3, &[(1, 2, 1.0)]);
        let result = find_minimum_cost_arborescence(&g, 0);
        assert!(!result.is_complete);
    }

    #[test]
    fn iterative_fallback_agrees_on_scenario_c() {
        let g = graph_from_edges(4, &[(0, 1, 2.0), (0, 2, 1.0), (1, 3, 3.0), (2, 3, 1.0)]);
        let result = find_minimum_cost_arborescence_iterative(&g, 0);
        assert!(result.is_complete);
        assert_eq!(result.parent_of, vec![-1, 0, 0, 2]);
        assert_eq!(result.total_tree_cost, 4.0);
    }

    #[test]
    fn iterative_fallback_resolves_a_simple_cycle() {
        let g = graph_from_edges(3, &[(0, 1, 10.0), (1, 2, 1.0), (2, 1, 1.0)]);
        let result = find_minimum_cost_arborescence_iterative(&g, 0);
        assert!(result.is_complete);
        assert_eq!(result.total_tree_cost, 11.0);
    }

    #[test]
    fn iterative_fallback_fails_when_vertex_is_unreachable() {
        let g = graph_from_edges(3, &[(1, 2, 1.0)]);
        let result = find_minimum_cost_arborescence_iterative(&g, 0);
        assert!(!result.is_complete);
    }

    #[test]
    fn capacity_one_self_loop_has_trivial_zero_cost_tree() {
        let mut g = DirectedGraph::new(1);
        g.add_all_vertices();
        g.connect(0, 0, 5.0);
        let result = find_minimum_cost_arborescence(&g, 0);
        assert!(result.is_complete);
        assert_eq!(result.total_tree_cost, 0.0);
        assert_eq!(result.parent_of, vec![-1]);
    }

    #[test]
    fn contraction_tie_break_is_deterministic_across_repeated_runs() {
        // Two entry edges into the {1, 2} cycle, 0->1 and 0->2, both with
        // adjusted cost 4 (5 - the cycle's internal edge cost of 1). Whichever
        // survives the contracted-pair tie must be the same on every run,
        // not dependent on HashMap iteration order.
        let g = graph_from_edges(3, &[(1, 2, 1.0), (2, 1, 1.0), (0, 1, 5.0), (0, 2, 5.0)]);
        let first = find_minimum_cost_arborescence(&g, 0);
        for _ in 0..20 {
            let repeat = find_minimum_cost_arborescence(&g, 0);
            assert_eq!(repeat.parent_of, first.parent_of);
            assert_eq!(repeat.total_tree_cost, first.total_tree_cost);
        }
        // smallest original source ties on 0 for both candidates, so the
        // final tie-break on target picks vertex 1 as the direct child.
        assert_eq!(first.parent_of[1], 0);
        assert_eq!(first.parent_of[2], 1);
        assert_eq!(first.total_tree_cost, 6.0);
    }

    #[test]
    fn root_out_of_range_is_incomplete() {
        let g = graph_from_edges(2, &[(0, 1, 1.0)]);
        let result = find_minimum_cost_arborescence(&g, 7);
        assert!(!result.is_complete);
    }

    #[test]
    fn edmonds_mode_segment_matches_fh_on_same_weights() {
        let mut wg = crate::graph::weighted::WeightedGraph::new(3, false);
        wg.add_all_vertices();
        wg.add_edge(0, 1, 1.0);
        wg.add_edge(1, 2, 10.0);
        let directed = DirectedGraph::from_weighted_graph(&wg);

        let partition = segment(&directed, 1.0, 0);
        assert_eq!(partition.component_of(0), partition.component_of(1));
        assert_ne!(partition.component_of(1), partition.component_of(2));
    }
}
