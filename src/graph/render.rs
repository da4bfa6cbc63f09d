//! Renderer: paints a partition back onto a graph's colors, and turns
//! the result into a pixel matrix (spec §2 step 4, §4.4 "Painting").
//!
//! Factored out of the FH segmenter so both it and the Edmonds-mode
//! segmenter (spec §4.7) share one painting routine, mirroring the
//! teacher's `to_str`/`from_str` free functions shared across
//! `Graph`/`GraphWithRecaller` in `graph.rs`.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::graph::grid::vertex_id;
use crate::graph::partition::Partition;
use crate::graph::weighted::WeightedGraph;

/// For each component, computes the mean of `original_colors`'s
/// per-vertex colors (`G0` in spec §4.4) and returns the per-vertex
/// painted color. Re-painting an already-painted graph is idempotent:
/// every vertex in a component already holds the mean, so the mean of
/// the mean is the mean.
pub fn paint_by_component(original_colors: &WeightedGraph, partition: &Partition) -> Vec<Rgb> {
    let n = partition.len();
    let mut members: HashMap<usize, Vec<Rgb>> = HashMap::new();
    for v in 0..n {
        let color = original_colors
            .color(v)
            .expect("partition and color graph share the same vertex set");
        members.entry(partition.component_of(v)).or_default().push(color);
    }

    let means: HashMap<usize, Rgb> = members
        .into_iter()
        .map(|(root, colors)| (root, Rgb::mean(&colors)))
        .collect();

    (0..n)
        .map(|v| means[&partition.component_of(v)])
        .collect()
}

/// Lays painted per-vertex colors back out into a `[height][width]` pixel matrix.
pub fn to_pixel_matrix(painted: &[Rgb], width: usize, height: usize) -> Vec<Vec<Rgb>> {
    let mut matrix = vec![vec![Rgb::default(); width]; height];
    for y in 0..height {
        for x in 0..width {
            matrix[y][x] = painted[vertex_id(x, y, width)];
        }
    }
    matrix
}
