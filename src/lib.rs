//! Graph-based image segmentation: builds a pixel adjacency graph from
//! a color image and partitions it into regions, either with the
//! Felzenszwalb-Huttenlocher union-find merge or by consolidating the
//! graph into a directed view and running a minimum-cost arborescence.

pub mod color;
pub mod error;
pub mod filters;
pub mod graph;
pub mod io;
