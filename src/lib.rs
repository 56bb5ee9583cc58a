//! Portfolio of vertex coloring algorithms for simple undirected graphs.
//!
//! Provides constructive heuristics (Welsh-Powell, DSATUR), an exact
//! backtracking search for the chromatic number, simulated annealing and tabu
//! search refinement towards a fixed color count, hybrid pipelines chaining
//! construction with iterative color reduction, and an adaptive selector that
//! picks a strategy from graph characteristics.

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]

/// input error taxonomy
pub mod error;

/// graph model (immutable adjacency view)
pub mod graph;

/// coloring model, conflict queries and checker
pub mod coloring;

/// coloring algorithms (constructive, exact, refinement, hybrid, adaptive)
pub mod search;
