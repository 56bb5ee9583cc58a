use serde::Serialize;
use serde_json::Value;

use crate::coloring::{ColorId, Coloring, nb_colors};
use crate::error::ColoringError;
use crate::graph::Graph;
use crate::search::Refinement;
use crate::search::dsatur::dsatur;
use crate::search::simulated_annealing::{SaParams, simulated_annealing};
use crate::search::tabu::{TabuParams, tabu_search};
use crate::search::welsh_powell::welsh_powell;

/** one color-reduction attempt of a hybrid pipeline */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReductionAttempt {
    /// color count the refinement aimed for
    pub target_colors: usize,
    /// true iff the refinement reached zero conflicts
    pub success: bool,
    /// iterations spent by the refinement run
    pub iterations: usize,
}

/** statistics of a hybrid pipeline run */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HybridStats {
    /// colors used by the constructive baseline
    pub initial_colors: usize,
    /// colors used by the returned coloring
    pub final_colors: usize,
    /// initial_colors - final_colors
    pub reduction: usize,
    /// number of refinement runs performed
    pub refinement_runs: usize,
    /// iterations summed over all refinement runs
    pub refinement_iterations: usize,
    /// per-target attempt log
    pub attempts: Vec<ReductionAttempt>,
}

impl HybridStats {
    /// open key/value view of the statistics, for external consumers
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/** result of a hybrid pipeline: a valid coloring plus statistics */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridResult {
    /// final valid coloring
    pub coloring: Coloring,
    /// number of colors used by `coloring`
    pub nb_colors: usize,
    /// run statistics
    pub stats: HybridStats,
}

/** DSATUR construction followed by simulated annealing color reduction.
With `aggressive = false` the constructive result is returned unchanged
(fast mode). The returned coloring is always valid and never uses more
colors than the constructive baseline. */
pub fn hybrid_dsatur_annealing(
    inst: &Graph,
    params: &SaParams,
    seed: u64,
    aggressive: bool,
) -> Result<HybridResult, ColoringError> {
    let (initial, initial_colors) = dsatur(inst);
    reduce_colors(initial, initial_colors, aggressive, |coloring, target| {
        simulated_annealing(inst, coloring, target, params, seed)
    })
}

/** Welsh-Powell construction followed by simulated annealing color
reduction; the faster constructive seed for sparse graphs. */
pub fn hybrid_welsh_powell_annealing(
    inst: &Graph,
    params: &SaParams,
    seed: u64,
    aggressive: bool,
) -> Result<HybridResult, ColoringError> {
    let (initial, initial_colors) = welsh_powell(inst);
    reduce_colors(initial, initial_colors, aggressive, |coloring, target| {
        simulated_annealing(inst, coloring, target, params, seed)
    })
}

/** DSATUR construction followed by tabu search color reduction. */
pub fn hybrid_tabu(
    inst: &Graph,
    params: &TabuParams,
    seed: u64,
    aggressive: bool,
) -> Result<HybridResult, ColoringError> {
    let (initial, initial_colors) = dsatur(inst);
    reduce_colors(initial, initial_colors, aggressive, |coloring, target| {
        tabu_search(inst, coloring, target, params, seed)
    })
}

/** descending-target reduction loop shared by the pipelines: starting from
the constructive baseline, repeatedly ask the refinement for a valid coloring
with one fewer color (palette forced by modulo reduction inside the
refinement), adopting each success and stopping at the first failure. */
fn reduce_colors<F>(
    initial: Coloring,
    initial_colors: usize,
    aggressive: bool,
    mut refine: F,
) -> Result<HybridResult, ColoringError>
where
    F: FnMut(&[ColorId], usize) -> Result<Refinement, ColoringError>,
{
    let mut stats = HybridStats {
        initial_colors,
        final_colors: initial_colors,
        reduction: 0,
        refinement_runs: 0,
        refinement_iterations: 0,
        attempts: Vec::new(),
    };
    let mut best = initial;
    let mut best_colors = initial_colors;
    if aggressive {
        for target in (1..initial_colors).rev() {
            let refinement = refine(&best, target)?;
            stats.refinement_runs += 1;
            stats.refinement_iterations += refinement.iterations;
            stats.attempts.push(ReductionAttempt {
                target_colors: target,
                success: refinement.valid,
                iterations: refinement.iterations,
            });
            if !refinement.valid {
                break; // cannot reduce further
            }
            best = refinement.coloring;
            best_colors = nb_colors(&best);
        }
    }
    stats.final_colors = best_colors;
    stats.reduction = stats.initial_colors - best_colors;
    Ok(HybridResult { coloring: best, nb_colors: best_colors, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coloring::is_valid;
    use crate::graph::Graph;

    fn complete(n: usize) -> Graph {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                edges.push((i, j));
            }
        }
        Graph::from_edges(n, &edges)
    }

    fn petersen() -> Graph {
        Graph::from_edges(10, &[
            (0, 1), (1, 2), (2, 3), (3, 4), (4, 0),
            (5, 7), (7, 9), (9, 6), (6, 8), (8, 5),
            (0, 5), (1, 6), (2, 7), (3, 8), (4, 9),
        ])
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(vec![]);
        let res = hybrid_dsatur_annealing(&g, &SaParams::default(), 0, true).unwrap();
        assert!(res.coloring.is_empty());
        assert_eq!(res.nb_colors, 0);
        assert_eq!(res.stats.reduction, 0);
    }

    #[test]
    fn test_k5_cannot_be_reduced() {
        let g = complete(5);
        let params = SaParams { max_iterations: 2_000, stall_limit: 500, ..SaParams::default() };
        let res = hybrid_dsatur_annealing(&g, &params, 1, true).unwrap();
        assert!(is_valid(&g, &res.coloring));
        assert_eq!(res.nb_colors, 5);
        assert_eq!(res.stats.reduction, 0);
        // the first attempt (4 colors) must have failed and stopped the loop
        assert_eq!(res.stats.refinement_runs, 1);
        assert!(!res.stats.attempts[0].success);
    }

    #[test]
    fn test_petersen_does_not_increase_colors() {
        let g = petersen();
        let (_, dsatur_colors) = crate::search::dsatur::dsatur(&g);
        let res = hybrid_dsatur_annealing(&g, &SaParams::default(), 3, true).unwrap();
        assert!(is_valid(&g, &res.coloring));
        assert!(res.nb_colors >= 3);
        assert!(res.nb_colors <= dsatur_colors);
        assert_eq!(res.stats.initial_colors, dsatur_colors);
    }

    #[test]
    fn test_fast_mode_returns_constructive_result() {
        let g = petersen();
        let (expected, expected_colors) = crate::search::dsatur::dsatur(&g);
        let res = hybrid_dsatur_annealing(&g, &SaParams::default(), 0, false).unwrap();
        assert_eq!(res.coloring, expected);
        assert_eq!(res.nb_colors, expected_colors);
        assert_eq!(res.stats.refinement_runs, 0);
        assert_eq!(res.stats.reduction, 0);
    }

    #[test]
    fn test_monotonicity_welsh_powell_annealing() {
        let g = petersen();
        let res = hybrid_welsh_powell_annealing(&g, &SaParams::default(), 5, true).unwrap();
        assert!(is_valid(&g, &res.coloring));
        assert!(res.stats.final_colors <= res.stats.initial_colors);
        assert_eq!(res.stats.reduction, res.stats.initial_colors - res.stats.final_colors);
    }

    #[test]
    fn test_hybrid_tabu_petersen() {
        let g = petersen();
        let res = hybrid_tabu(&g, &TabuParams::default(), 2, true).unwrap();
        assert!(is_valid(&g, &res.coloring));
        assert!(res.nb_colors >= 3);
    }

    #[test]
    fn test_reproducibility() {
        let g = petersen();
        let a = hybrid_tabu(&g, &TabuParams::default(), 11, true).unwrap();
        let b = hybrid_tabu(&g, &TabuParams::default(), 11, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stats_to_value() {
        let g = complete(3);
        let res = hybrid_tabu(&g, &TabuParams::default(), 0, true).unwrap();
        let value = res.stats.to_value();
        assert_eq!(value["initial_colors"], 3);
        assert_eq!(value["final_colors"], 3);
    }
}
