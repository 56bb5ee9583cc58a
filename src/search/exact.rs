use std::cmp::Reverse;

use serde::Serialize;

use crate::coloring::Coloring;
use crate::graph::{Graph, VertexId};
use crate::search::clique::greedy_clique;

/// practical ceiling on the graph size for the exact search
pub const DEFAULT_VERTEX_GUARD: usize = 20;

/** parameters of the exact chromatic-number search */
#[derive(Debug, Clone, Serialize)]
pub struct ExactParams {
    /// largest color count tried before giving up (defaults to n)
    pub max_colors: Option<usize>,
    /// graphs with more vertices are rejected with [`ExactOutcome::TooLarge`]
    /// instead of starting an exponential search
    pub vertex_guard: usize,
}

impl Default for ExactParams {
    fn default() -> Self {
        Self { max_colors: None, vertex_guard: DEFAULT_VERTEX_GUARD }
    }
}

/** outcome of an exact chromatic-number search */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExactOutcome {
    /// a k-coloring was found for the smallest k in the searched range
    Found {
        /// smallest k of the searched range admitting a valid coloring
        /// (the witness may use fewer colors in the bounded variant)
        nb_colors: usize,
        /// a valid coloring witnessing it
        coloring: Coloring,
    },
    /// the searched color range was exhausted without a valid coloring
    Infeasible {
        /// largest color count tried
        max_colors: usize,
    },
    /// the graph exceeds the vertex guard; no search was attempted
    TooLarge {
        /// number of vertices of the graph
        nb_vertices: usize,
        /// guard the graph was checked against
        guard: usize,
    },
}

/// lower/upper color bounds used by the bounded search variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorBounds {
    /// max(greedy clique size, max degree + 1)
    pub lower: usize,
    /// max degree + 1
    pub upper: usize,
}

/// true if assigning `color` to `vertex` conflicts with no colored neighbor
fn is_safe_color(inst: &Graph, vertex: VertexId, color: usize, colors: &[Option<usize>]) -> bool {
    inst.neighbors(vertex).iter().all(|&u| colors[u] != Some(color))
}

/// depth-first backtracking over the given vertex order
fn backtrack(
    inst: &Graph,
    order: &[VertexId],
    position: usize,
    k: usize,
    colors: &mut Vec<Option<usize>>,
) -> bool {
    if position == order.len() {
        return true;
    }
    let vertex = order[position];
    for color in 0..k {
        if is_safe_color(inst, vertex, color, colors) {
            colors[vertex] = Some(color);
            if backtrack(inst, order, position + 1, k, colors) {
                return true;
            }
            colors[vertex] = None;
        }
    }
    false
}

/// vertices sorted by decreasing degree (most constrained first, for pruning)
fn descending_degree_order(inst: &Graph) -> Vec<VertexId> {
    let mut order: Vec<VertexId> = (0..inst.nb_vertices()).collect();
    order.sort_by_key(|v| (Reverse(inst.degree(*v)), *v));
    order
}

/** decides whether a valid k-coloring exists, returning one if so.
Exponential worst case; callers should keep n small (see
[`DEFAULT_VERTEX_GUARD`]). */
pub fn find_k_coloring(inst: &Graph, k: usize) -> Option<Coloring> {
    let n = inst.nb_vertices();
    if n == 0 { return Some(Vec::new()); }
    if k == 0 { return None; }
    let order = descending_degree_order(inst);
    let mut colors: Vec<Option<usize>> = vec![None; n];
    if backtrack(inst, &order, 0, k, &mut colors) {
        Some(colors.iter().map(|c| c.unwrap_or(0)).collect())
    } else {
        None
    }
}

/** finds the chromatic number by trying k = 1, 2, 3, ... until the first
success. The graph must not exceed `params.vertex_guard` vertices; an empty
graph yields `Found { 0, [] }`. */
pub fn chromatic_number(inst: &Graph, params: &ExactParams) -> ExactOutcome {
    let n = inst.nb_vertices();
    if n == 0 {
        return ExactOutcome::Found { nb_colors: 0, coloring: Vec::new() };
    }
    if n > params.vertex_guard {
        return ExactOutcome::TooLarge { nb_vertices: n, guard: params.vertex_guard };
    }
    let max_colors = params.max_colors.unwrap_or(n).min(n);
    for k in 1..=max_colors {
        if let Some(coloring) = find_k_coloring(inst, k) {
            return ExactOutcome::Found { nb_colors: k, coloring };
        }
    }
    ExactOutcome::Infeasible { max_colors }
}

/** bounded search variant: restricts the color range to
[max(clique, Δ+1), Δ+1] before searching. The restricted range always admits
a coloring but may exclude the true chromatic number; the bounds are returned
so the caller can see the searched range. */
pub fn chromatic_number_with_bounds(
    inst: &Graph,
    params: &ExactParams,
) -> (ExactOutcome, ColorBounds) {
    let n = inst.nb_vertices();
    if n == 0 {
        let outcome = ExactOutcome::Found { nb_colors: 0, coloring: Vec::new() };
        return (outcome, ColorBounds { lower: 0, upper: 0 });
    }
    if n > params.vertex_guard {
        let outcome = ExactOutcome::TooLarge { nb_vertices: n, guard: params.vertex_guard };
        return (outcome, ColorBounds { lower: 0, upper: 0 });
    }
    let upper = inst.max_degree() + 1;
    let lower = std::cmp::max(greedy_clique(inst).len(), upper);
    let bounds = ColorBounds { lower, upper };
    let max_colors = params.max_colors.unwrap_or(n).min(n);
    for k in lower.max(1)..=upper.min(max_colors) {
        if let Some(coloring) = find_k_coloring(inst, k) {
            return (ExactOutcome::Found { nb_colors: k, coloring }, bounds);
        }
    }
    (ExactOutcome::Infeasible { max_colors }, bounds)
}
