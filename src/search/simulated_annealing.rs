use fastrand::Rng;
use serde::Serialize;

use crate::coloring::ColorId;
use crate::error::ColoringError;
use crate::graph::Graph;
use crate::search::Refinement;
use crate::search::conflicts::ConflictState;

/** temperature schedule and budget of a simulated annealing run */
#[derive(Debug, Clone, Serialize)]
pub struct SaParams {
    /// initial temperature
    pub t0: f64,
    /// multiplicative cooling rate, in (0,1)
    pub alpha: f64,
    /// iteration cap
    pub max_iterations: usize,
    /// consecutive non-improving iterations before an early stop
    pub stall_limit: usize,
}

impl Default for SaParams {
    fn default() -> Self {
        Self { t0: 10.0, alpha: 0.95, max_iterations: 50_000, stall_limit: 5_000 }
    }
}

/** refines a coloring towards a valid `nb_colors`-coloring by simulated
annealing.

The initial coloring is reduced modulo `nb_colors`. Three move kinds cycle in
round-robin: a greedy recolor of a conflicting vertex to its
least-collision color, a pure random recolor, and a color swap between two
random vertices. Moves lowering the conflict count are accepted; others with
probability `exp(-delta / T)`, the temperature cooling by `alpha` each
iteration. The best coloring seen is tracked regardless of acceptance.

Stops on zero conflicts (`valid = true`), on the stall limit, or on the
iteration cap (best effort, `valid = false`). All randomness flows from
`seed`: identical inputs reproduce identical outputs. */
pub fn simulated_annealing(
    inst: &Graph,
    initial: &[ColorId],
    nb_colors: usize,
    params: &SaParams,
    seed: u64,
) -> Result<Refinement, ColoringError> {
    if nb_colors == 0 { return Err(ColoringError::NoColors); }
    if initial.len() != inst.nb_vertices() {
        return Err(ColoringError::WrongColoringSize {
            expected: inst.nb_vertices(),
            found: initial.len(),
        });
    }
    let n = inst.nb_vertices();
    let mut rng = Rng::with_seed(seed);
    let mut state = ConflictState::new(inst, initial, nb_colors);
    let mut best = state.snapshot();
    let mut best_conflicts = state.nb_conflicts();
    let mut temperature = params.t0;
    let mut stall = 0;
    let mut iteration = 0;
    while iteration < params.max_iterations {
        if state.nb_conflicts() == 0 {
            return Ok(Refinement {
                coloring: state.snapshot(), valid: true, conflicts: 0, iterations: iteration,
            });
        }
        let accepted = match iteration % 3 {
            0 => greedy_move(&mut state, &mut rng, temperature),
            1 => random_move(&mut state, &mut rng, temperature, n),
            _ => swap_move(&mut state, &mut rng, temperature, n),
        };
        if accepted && state.nb_conflicts() < best_conflicts {
            best_conflicts = state.nb_conflicts();
            best = state.snapshot();
            stall = 0;
        } else {
            stall += 1;
        }
        temperature *= params.alpha;
        iteration += 1;
        if stall >= params.stall_limit {
            break;
        }
    }
    let valid = best_conflicts == 0;
    Ok(Refinement { coloring: best, valid, conflicts: best_conflicts, iterations: iteration })
}

/// accepts the move if delta < 0, otherwise with probability exp(-delta/T)
fn accept(rng: &mut Rng, temperature: f64, delta: i64) -> bool {
    delta < 0 || (temperature > 0.0 && rng.f64() < (-(delta as f64) / temperature).exp())
}

/// recolors a conflicting vertex (a random one when none conflict) with its
/// least-collision color
fn greedy_move(state: &mut ConflictState, rng: &mut Rng, temperature: f64) -> bool {
    let conflicting = state.conflicting_vertices();
    let v = if conflicting.is_empty() {
        rng.usize(0..state.colors().len())
    } else {
        conflicting[rng.usize(0..conflicting.len())]
    };
    let c = state.least_conflicting_color(v);
    let delta = state.recolor_delta(v, c);
    if accept(rng, temperature, delta) {
        state.recolor(v, c);
        true
    } else {
        false
    }
}

/// recolors a random vertex with a random palette color
fn random_move(state: &mut ConflictState, rng: &mut Rng, temperature: f64, n: usize) -> bool {
    let v = rng.usize(0..n);
    let c = rng.usize(0..state.nb_colors());
    let delta = state.recolor_delta(v, c);
    if accept(rng, temperature, delta) {
        state.recolor(v, c);
        true
    } else {
        false
    }
}

/// swaps the colors of two random vertices (degrades to a random move when
/// the graph has a single vertex)
fn swap_move(state: &mut ConflictState, rng: &mut Rng, temperature: f64, n: usize) -> bool {
    if n < 2 {
        return random_move(state, rng, temperature, n);
    }
    let v1 = rng.usize(0..n);
    let mut v2 = rng.usize(0..n - 1);
    if v2 >= v1 { v2 += 1; }
    let c1 = state.color(v1);
    let c2 = state.color(v2);
    if c1 == c2 { return false; }
    let before = state.nb_conflicts() as i64;
    state.recolor(v1, c2);
    state.recolor(v2, c1);
    let delta = state.nb_conflicts() as i64 - before;
    if accept(rng, temperature, delta) {
        true
    } else {
        // roll the swap back
        state.recolor(v1, c1);
        state.recolor(v2, c2);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coloring::{count_conflicts, is_valid};
    use crate::graph::Graph;

    fn triangle() -> Graph {
        Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)])
    }

    fn cycle(n: usize) -> Graph {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Graph::from_edges(n, &edges)
    }

    #[test]
    fn test_rejects_empty_palette() {
        let g = triangle();
        assert_eq!(
            simulated_annealing(&g, &[0, 0, 0], 0, &SaParams::default(), 0),
            Err(ColoringError::NoColors)
        );
    }

    #[test]
    fn test_rejects_wrong_coloring_size() {
        let g = triangle();
        assert_eq!(
            simulated_annealing(&g, &[0, 0], 3, &SaParams::default(), 0),
            Err(ColoringError::WrongColoringSize { expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_valid_input_returns_immediately() {
        let g = triangle();
        let refinement = simulated_annealing(&g, &[0, 1, 2], 3, &SaParams::default(), 0).unwrap();
        assert!(refinement.valid);
        assert_eq!(refinement.iterations, 0);
        assert_eq!(refinement.coloring, vec![0, 1, 2]);
    }

    #[test]
    fn test_repairs_triangle() {
        let g = triangle();
        let refinement = simulated_annealing(&g, &[0, 0, 0], 3, &SaParams::default(), 1).unwrap();
        assert!(refinement.valid);
        assert!(is_valid(&g, &refinement.coloring));
    }

    #[test]
    fn test_two_colors_even_cycle() {
        let g = cycle(8);
        let params = SaParams { max_iterations: 200_000, stall_limit: 50_000, ..SaParams::default() };
        let refinement = simulated_annealing(&g, &[0; 8], 2, &params, 3).unwrap();
        assert!(refinement.valid);
        assert!(is_valid(&g, &refinement.coloring));
    }

    #[test]
    fn test_infeasible_target_reports_best_effort() {
        // K3 cannot be 2-colored: the run must stop with valid = false and a
        // best-effort coloring, never a conflicting coloring labeled valid
        let g = triangle();
        let params = SaParams { max_iterations: 2_000, stall_limit: 500, ..SaParams::default() };
        let refinement = simulated_annealing(&g, &[0, 1, 2], 2, &params, 5).unwrap();
        assert!(!refinement.valid);
        assert!(refinement.conflicts >= 1);
        assert_eq!(refinement.conflicts, count_conflicts(&g, &refinement.coloring));
    }

    #[test]
    fn test_seeded_reproducibility() {
        let g = cycle(11);
        let a = simulated_annealing(&g, &[0; 11], 3, &SaParams::default(), 42).unwrap();
        let b = simulated_annealing(&g, &[0; 11], 3, &SaParams::default(), 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(vec![]);
        let refinement = simulated_annealing(&g, &[], 1, &SaParams::default(), 0).unwrap();
        assert!(refinement.valid);
        assert!(refinement.coloring.is_empty());
    }
}
