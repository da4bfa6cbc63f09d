//! Grid-Graph Builder (spec §4.2).
//!
//! Turns two `W*H` pixel matrices (a smoothed-color matrix and a
//! gradient-magnitude matrix) into an 8-connected weighted grid graph.
//! Grounded on `original_source/Trabalho_2/Graph.h`'s
//! `WeightedGraph::from_ppm_matrix` (the four-neighbor emission
//! pattern: right, down, down-right, down-left) generalized to the
//! composite color+gradient weight of
//! `original_source/Trabalho_2/src/main.cc`'s
//! `WeightedGraph::from_color_and_gradient` call.

use log::debug;

use crate::color::Rgb;
use crate::graph::weighted::WeightedGraph;

/// Mixing weights for the composite edge weight, and an optional
/// absolute floor below which edges are dropped. Defaults match
/// spec.md §6 (`alpha = 1.1`, `beta = 0.45`, `floor = 0.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBuilderConfig {
    pub alpha: f64,
    pub beta: f64,
    pub floor: f64,
}

impl Default for GridBuilderConfig {
    fn default() -> Self {
        Self {
            alpha: 1.1,
            beta: 0.45,
            floor: 0.0,
        }
    }
}

/// `id = y * width + x`, as required by spec.md §3.
pub fn vertex_id(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Builds the 8-connected grid graph. `original_colors` is what gets
/// painted back by the renderer; `smoothed_colors` (typically blurred)
/// feeds the color-distance term; `gradient` is the Sobel magnitude at
/// each pixel, feeding the gradient term. All three matrices must share
/// the same `[height][width]` dimensions.
pub fn build_grid_graph(
    original_colors: &[Vec<Rgb>],
    smoothed_colors: &[Vec<Rgb>],
    gradient: &[Vec<f64>],
    config: GridBuilderConfig,
) -> WeightedGraph {
    let height = original_colors.len();
    let width = if height == 0 { 0 } else { original_colors[0].len() };

    let mut graph = WeightedGraph::new(width * height, false);
    graph.add_all_vertices();

    for y in 0..height {
        for x in 0..width {
            let id = vertex_id(x, y, width);
            graph
                .set_color(id, original_colors[y][x])
                .expect("vertex was just allocated within capacity");

            let right_edge = x + 1 == width;
            let bottom_edge = y + 1 == height;
            let left_edge = x == 0;

            // Right neighbor.
            if !right_edge {
                emit_edge(&mut graph, id, vertex_id(x + 1, y, width), (x, y), (x + 1, y), smoothed_colors, gradient, config);
            }
            // Down neighbor.
            if !bottom_edge {
                emit_edge(&mut graph, id, vertex_id(x, y + 1, width), (x, y), (x, y + 1), smoothed_colors, gradient, config);
            }
            // Down-right neighbor.
            if !bottom_edge && !right_edge {
                emit_edge(&mut graph, id, vertex_id(x + 1, y + 1, width), (x, y), (x + 1, y + 1), smoothed_colors, gradient, config);
            }
            // Down-left neighbor.
            if !bottom_edge && !left_edge {
                emit_edge(&mut graph, id, vertex_id(x - 1, y + 1, width), (x, y), (x - 1, y + 1), smoothed_colors, gradient, config);
            }
        }
    }

    debug!(
        "grid graph built: {} vertices, alpha={}, beta={}, floor={}",
        width * height,
        config.alpha,
        config.beta,
        config.floor
    );

    graph
}

#[allow(clippy::too_many_arguments)]
fn emit_edge(
    graph: &mut WeightedGraph,
    from: usize,
    to: usize,
    p: (usize, usize),
    q: (usize, usize),
    smoothed_colors: &[Vec<Rgb>],
    gradient: &[Vec<f64>],
    config: GridBuilderConfig,
) {
    let d_c = smoothed_colors[p.1][p.0].distance(&smoothed_colors[q.1][q.0]);
    let d_g = gradient[p.1][p.0].max(gradient[q.1][q.0]);
    let w = config.alpha * d_c + config.beta * d_g;
    if w >= config.floor {
        graph.add_edge(from, to, w);
    }
}
