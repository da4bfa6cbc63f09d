//! End-to-end scenarios (spec §8), driving the public API the way
//! `bin/segment.rs` does rather than through any one module's
//! internals.

use pixelgraph::color::Rgb;
use pixelgraph::graph::directed::DirectedGraph;
use pixelgraph::graph::felzenszwalb;
use pixelgraph::graph::grid::{build_grid_graph, GridBuilderConfig};
use pixelgraph::graph::render::{paint_by_component, to_pixel_matrix};
use pixelgraph::graph::weighted::WeightedGraph;
use pixelgraph::graph::{arborescence, partition::Partition};

#[test]
fn scenario_a_two_vertex_graph_merges_under_fh() {
    let mut g = WeightedGraph::new(2, false);
    g.add_all_vertices();
    g.add_edge(0, 1, 5.0);
    let partition = felzenszwalb::segment(&g, 10.0, 0);
    assert_eq!(partition.num_components(), 1);
}

#[test]
fn scenario_b_fh_threshold_keeps_distant_pixel_separate() {
    let mut g = WeightedGraph::new(3, false);
    g.add_all_vertices();
    g.add_edge(0, 1, 1.0);
    g.add_edge(1, 2, 10.0);
    let partition = felzenszwalb::segment(&g, 1.0, 0);
    assert_eq!(partition.num_components(), 2);
}

#[test]
fn scenario_c_chu_liu_on_a_dag() {
    let mut g = DirectedGraph::new(4);
    g.add_all_vertices();
    g.connect(0, 1, 2.0);
    g.connect(0, 2, 1.0);
    g.connect(1, 3, 3.0);
    g.connect(2, 3, 1.0);

    let result = arborescence::find_minimum_cost_arborescence(&g, 0);
    assert!(result.is_complete);
    assert_eq!(result.parent_of, vec![-1, 0, 0, 2]);
    assert_eq!(result.total_tree_cost, 4.0);
}

#[test]
fn scenario_d_chu_liu_resolves_a_cycle() {
    let mut g = DirectedGraph::new(3);
    g.add_all_vertices();
    g.connect(0, 1, 10.0);
    g.connect(1, 2, 1.0);
    g.connect(2, 1, 1.0);

    let result = arborescence::find_minimum_cost_arborescence(&g, 0);
    assert!(result.is_complete);
    assert_eq!(result.total_tree_cost, 11.0);
}

#[test]
fn scenario_e_arborescence_is_impossible_without_a_path_to_every_vertex() {
    let mut g = DirectedGraph::new(3);
    g.add_all_vertices();
    g.connect(1, 2, 1.0);

    let result = arborescence::find_minimum_cost_arborescence(&g, 0);
    assert!(!result.is_complete);
}

#[test]
fn scenario_f_painting_merges_components_into_their_mean_color() {
    let mut g = WeightedGraph::new(2, false);
    g.add_all_vertices();
    g.set_color(0, Rgb::new(255, 0, 0)).unwrap();
    g.set_color(1, Rgb::new(0, 0, 255)).unwrap();
    let partition = Partition::new(vec![0, 0]);

    let painted = paint_by_component(&g, &partition);
    assert_eq!(painted, vec![Rgb::new(128, 0, 128), Rgb::new(128, 0, 128)]);
}

/// A whole-pipeline check wiring the grid builder, both segmenters, and
/// the renderer together over a tiny checkerboard image, matching the
/// `bin/segment.rs` driver's stage order (spec §2, §6).
#[test]
fn whole_pipeline_segments_and_paints_a_small_image() {
    let width = 3;
    let height = 3;
    let colors = vec![
        vec![Rgb::new(0, 0, 0), Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)],
        vec![Rgb::new(0, 0, 0), Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)],
        vec![Rgb::new(255, 255, 255), Rgb::new(255, 255, 255), Rgb::new(255, 255, 255)],
    ];
    let gradient = vec![vec![0.0; width]; height];

    let graph = build_grid_graph(&colors, &colors, &gradient, GridBuilderConfig::default());
    assert_eq!(graph.len(), width * height);

    let fh_partition = felzenszwalb::segment(&graph, 50.0, 0);
    let fh_painted = paint_by_component(&graph, &fh_partition);
    let fh_matrix = to_pixel_matrix(&fh_painted, width, height);
    assert_eq!(fh_matrix.len(), height);
    assert_eq!(fh_matrix[0].len(), width);

    let directed = DirectedGraph::from_weighted_graph(&graph);
    let edmonds_partition = arborescence::segment(&directed, 50.0, 0);
    assert_eq!(edmonds_partition.len(), width * height);

    // the uniform black block and the uniform white block end up in
    // separate components under both engines: zero-weight internal
    // edges merge each block, the high-weight boundary does not.
    assert_eq!(fh_partition.component_of(0), fh_partition.component_of(1));
    assert_ne!(fh_partition.component_of(0), fh_partition.component_of(2));
}
