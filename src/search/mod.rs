//! Coloring algorithms.
//!
//! Constructive heuristics produce a valid coloring directly; the exact
//! search decides k-colorability by backtracking; the refinement procedures
//! (simulated annealing, tabu search) drive an invalid coloring towards zero
//! conflicts at a fixed color count; the hybrid pipelines chain both to
//! minimize the color count; the adaptive selector picks among them.

use serde::Serialize;

use crate::coloring::Coloring;

/// round-based Welsh-Powell greedy
pub mod welsh_powell;

/// DSATUR greedy (priority-queue based)
pub mod dsatur;

/// greedy clique (lower bound helper for the exact search)
pub mod clique;

/// exact backtracking search for the chromatic number
pub mod exact;

/// incremental conflict bookkeeping shared by the refinement procedures
pub mod conflicts;

/// simulated annealing refinement
pub mod simulated_annealing;

/// tabu search refinement
pub mod tabu;

/// construction + iterative color reduction pipelines
pub mod hybrid;

/// adaptive strategy selection
pub mod adaptive;

/** outcome of one refinement run towards a fixed color count.
`valid` is true iff the coloring reached zero conflicts; otherwise the
coloring is the best effort seen during the run. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refinement {
    /// best coloring found (total over the vertex set)
    pub coloring: Coloring,
    /// true iff `coloring` has zero conflicts
    pub valid: bool,
    /// conflicting edges remaining in `coloring`
    pub conflicts: usize,
    /// iterations performed before stopping
    pub iterations: usize,
}

