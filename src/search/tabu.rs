use std::collections::VecDeque;

use fastrand::Rng;
use serde::Serialize;

use crate::coloring::ColorId;
use crate::error::ColoringError;
use crate::graph::{Graph, VertexId};
use crate::search::Refinement;
use crate::search::conflicts::ConflictState;

/** parameters of a tabu search run */
#[derive(Debug, Clone, Serialize)]
pub struct TabuParams {
    /// number of most recent moves kept forbidden
    pub tenure: usize,
    /// iteration cap
    pub max_iterations: usize,
    /// consecutive non-improving iterations before an early stop
    pub stall_limit: usize,
    /// every this many iterations the neighborhood widens to all vertices
    pub exploration_period: usize,
    /// candidate vertices above this count are sampled down
    pub max_candidates: usize,
}

impl Default for TabuParams {
    fn default() -> Self {
        Self {
            tenure: 10,
            max_iterations: 10_000,
            stall_limit: 1_000,
            exploration_period: 5,
            max_candidates: 50,
        }
    }
}

/** bounded insertion-ordered record of the most recent (vertex, color)
moves; the oldest entry is evicted once the tenure is reached */
#[derive(Debug)]
struct TabuList {
    moves: VecDeque<(VertexId, ColorId)>,
    tenure: usize,
}

impl TabuList {
    fn new(tenure: usize) -> Self {
        Self { moves: VecDeque::with_capacity(tenure), tenure }
    }

    fn insert(&mut self, mv: (VertexId, ColorId)) {
        if self.tenure == 0 { return; }
        if self.moves.len() == self.tenure {
            self.moves.pop_front();
        }
        self.moves.push_back(mv);
    }

    fn contains(&self, mv: (VertexId, ColorId)) -> bool {
        self.moves.iter().any(|m| *m == mv)
    }

    fn clear(&mut self) {
        self.moves.clear();
    }
}

/** refines a coloring towards a valid `nb_colors`-coloring by tabu search.

The initial coloring is reduced modulo `nb_colors`. Each iteration scores the
(vertex, color) moves over the conflicting vertices (all vertices when none
conflict, and on every `exploration_period`-th iteration), skipping tabu
moves unless they would beat the best-ever conflict count (aspiration). The
single best move is applied and recorded in the tabu list. When no move is
eligible the tabu list is cleared once before the run gives up.

Terminates like simulated annealing: zero conflicts (`valid = true`), stall
limit, or iteration cap. Deterministic for a fixed (graph, initial, params,
seed). */
pub fn tabu_search(
    inst: &Graph,
    initial: &[ColorId],
    nb_colors: usize,
    params: &TabuParams,
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
    let mut tabu = TabuList::new(params.tenure);
    let mut stall = 0;
    let mut iteration = 0;
    while iteration < params.max_iterations {
        if state.nb_conflicts() == 0 {
            return Ok(Refinement {
                coloring: state.snapshot(), valid: true, conflicts: 0, iterations: iteration,
            });
        }
        let widen = params.exploration_period > 0 && iteration % params.exploration_period == 0;
        let candidates = candidate_vertices(&state, n, widen, params.max_candidates, &mut rng);
        let mut chosen = best_move(&state, &candidates, &tabu, best_conflicts);
        if chosen.is_none() {
            // relax the memory once before giving up
            tabu.clear();
            let all: Vec<VertexId> = (0..n).collect();
            chosen = best_move(&state, &all, &tabu, best_conflicts);
        }
        let (v, c) = match chosen {
            None => break, // truly stuck (e.g. single-color palette)
            Some(mv) => mv,
        };
        state.recolor(v, c);
        tabu.insert((v, c));
        if state.nb_conflicts() < best_conflicts {
            best_conflicts = state.nb_conflicts();
            best = state.snapshot();
            stall = 0;
        } else {
            stall += 1;
        }
        iteration += 1;
        if stall >= params.stall_limit {
            break;
        }
    }
    let valid = best_conflicts == 0;
    Ok(Refinement { coloring: best, valid, conflicts: best_conflicts, iterations: iteration })
}

/// conflicting vertices (all vertices when widening or none conflict),
/// sampled down to `max_candidates` through the run's rng
fn candidate_vertices(
    state: &ConflictState,
    n: usize,
    widen: bool,
    max_candidates: usize,
    rng: &mut Rng,
) -> Vec<VertexId> {
    let mut candidates = if widen {
        (0..n).collect()
    } else {
        let conflicting = state.conflicting_vertices();
        if conflicting.is_empty() { (0..n).collect() } else { conflicting }
    };
    // partial Fisher-Yates: keep a random prefix of max_candidates vertices
    if max_candidates > 0 && candidates.len() > max_candidates {
        for i in 0..max_candidates {
            let j = i + rng.usize(0..candidates.len() - i);
            candidates.swap(i, j);
        }
        candidates.truncate(max_candidates);
    }
    candidates
}

/// lowest-resulting-conflict eligible move, tabu moves allowed only under
/// the aspiration criterion
fn best_move(
    state: &ConflictState,
    candidates: &[VertexId],
    tabu: &TabuList,
    best_conflicts: usize,
) -> Option<(VertexId, ColorId)> {
    let current_conflicts = state.nb_conflicts() as i64;
    let mut chosen: Option<((VertexId, ColorId), i64)> = None;
    for &v in candidates {
        let current_color = state.color(v);
        for c in 0..state.nb_colors() {
            if c == current_color { continue; }
            let resulting = current_conflicts + state.recolor_delta(v, c);
            let aspirated = resulting < best_conflicts as i64;
            if tabu.contains((v, c)) && !aspirated {
                continue;
            }
            match chosen {
                Some((_, best_resulting)) if best_resulting <= resulting => {}
                _ => chosen = Some(((v, c), resulting)),
            }
        }
    }
    chosen.map(|(mv, _)| mv)
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
    fn test_tabu_list_evicts_oldest() {
        let mut list = TabuList::new(2);
        list.insert((0, 1));
        list.insert((1, 0));
        list.insert((2, 2));
        assert!(!list.contains((0, 1)));
        assert!(list.contains((1, 0)));
        assert!(list.contains((2, 2)));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let g = triangle();
        assert_eq!(
            tabu_search(&g, &[0, 0, 0], 0, &TabuParams::default(), 0),
            Err(ColoringError::NoColors)
        );
    }

    #[test]
    fn test_rejects_wrong_coloring_size() {
        let g = triangle();
        assert_eq!(
            tabu_search(&g, &[0], 3, &TabuParams::default(), 0),
            Err(ColoringError::WrongColoringSize { expected: 3, found: 1 })
        );
    }

    #[test]
    fn test_repairs_triangle() {
        let g = triangle();
        let refinement = tabu_search(&g, &[0, 0, 0], 3, &TabuParams::default(), 1).unwrap();
        assert!(refinement.valid);
        assert!(is_valid(&g, &refinement.coloring));
    }

    #[test]
    fn test_two_colors_even_cycle() {
        let g = cycle(10);
        let refinement = tabu_search(&g, &[0; 10], 2, &TabuParams::default(), 2).unwrap();
        assert!(refinement.valid);
        assert!(is_valid(&g, &refinement.coloring));
    }

    #[test]
    fn test_infeasible_target_reports_best_effort() {
        let g = triangle();
        let params = TabuParams { max_iterations: 500, stall_limit: 100, ..TabuParams::default() };
        let refinement = tabu_search(&g, &[0, 1, 2], 2, &params, 4).unwrap();
        assert!(!refinement.valid);
        assert!(refinement.conflicts >= 1);
        assert_eq!(refinement.conflicts, count_conflicts(&g, &refinement.coloring));
    }

    #[test]
    fn test_single_color_palette_gives_up() {
        // with one color no recoloring move exists: the run must stop
        // cleanly with a best-effort result
        let g = triangle();
        let refinement = tabu_search(&g, &[0, 0, 0], 1, &TabuParams::default(), 0).unwrap();
        assert!(!refinement.valid);
        assert_eq!(refinement.conflicts, 3);
    }

    #[test]
    fn test_seeded_reproducibility() {
        let g = cycle(9);
        let a = tabu_search(&g, &[0; 9], 3, &TabuParams::default(), 7).unwrap();
        let b = tabu_search(&g, &[0; 9], 3, &TabuParams::default(), 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_valid_input_returns_immediately() {
        let g = cycle(4);
        let refinement = tabu_search(&g, &[0, 1, 0, 1], 2, &TabuParams::default(), 0).unwrap();
        assert!(refinement.valid);
        assert_eq!(refinement.iterations, 0);
    }
}
