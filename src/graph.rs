//! Graph containers and algorithms: the undirected pixel graph, the
//! directed consolidation view, the grid builder, union-find, the two
//! segmenters, and the arborescence engine.

pub mod arborescence;
pub mod directed;
pub mod edge;
pub mod felzenszwalb;
pub mod grid;
pub mod partition;
pub mod render;
pub mod union_find;
pub mod weighted;
