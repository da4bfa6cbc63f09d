//! Error taxonomy for the pixel-graph core.
//!
//! Mutating graph operations keep the spec's success-flag contract and
//! return plain `bool`; only the failures that the spec calls out as
//! hard errors (an out-of-range vertex on a read, or a broken Chu-Liu
//! expansion) are surfaced here.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {vertex} is out of range (capacity {capacity})")]
    OutOfRange { vertex: usize, capacity: usize },

    #[error("no arborescence exists rooted at the requested vertex")]
    ArborescenceImpossible,

    #[error("contraction produced an edge with no remembered original")]
    ContractionExpansionMismatch,
}
