use thiserror::Error;

use crate::graph::VertexId;

/** errors raised on malformed inputs.
Algorithmic non-success (infeasible exact search, unconverged refinement) is
not an error: it travels through return values so that callers can branch on
it as ordinary control flow. */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColoringError {
    /// a queried vertex does not belong to the graph
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    /// a coloring does not cover the graph's vertex set
    #[error("coloring covers {found} vertices but the graph has {expected}")]
    WrongColoringSize {
        /// number of vertices in the graph
        expected: usize,
        /// number of entries in the coloring
        found: usize,
    },
    /// refinement asked to work with an empty palette
    #[error("refinement requires a target of at least one color")]
    NoColors,
}
