use serde::Serialize;
use serde_json::Value;

use crate::coloring::{Coloring, is_valid, nb_colors};
use crate::graph::Graph;
use crate::search::dsatur::dsatur;
use crate::search::exact::{ExactOutcome, ExactParams, chromatic_number};
use crate::search::hybrid::{
    HybridStats, hybrid_dsatur_annealing, hybrid_tabu, hybrid_welsh_powell_annealing,
};
use crate::search::simulated_annealing::SaParams;
use crate::search::tabu::TabuParams;
use crate::search::welsh_powell::welsh_powell;

/// vertex-count band of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeClass {
    /// at most 20 vertices
    Tiny,
    /// 21 to 50 vertices
    Small,
    /// 51 to 200 vertices
    Medium,
    /// 201 to 1000 vertices
    Large,
    /// more than 1000 vertices
    VeryLarge,
}

/// edge-density band of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DensityClass {
    /// density below 0.1
    Sparse,
    /// density in [0.1, 0.3)
    Medium,
    /// density of 0.3 or more
    Dense,
}

/** structural measurements driving the strategy choice */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphCharacteristics {
    /// number of vertices
    pub nb_vertices: usize,
    /// number of edges
    pub nb_edges: usize,
    /// edges over the maximum possible edge count (0 below 2 vertices)
    pub density: f64,
    /// average vertex degree (0 on the empty graph)
    pub avg_degree: f64,
    /// largest vertex degree
    pub max_degree: usize,
    /// vertex-count band
    pub size_class: SizeClass,
    /// edge-density band
    pub density_class: DensityClass,
}

/// measures the structural characteristics of a graph
pub fn analyze(inst: &Graph) -> GraphCharacteristics {
    let n = inst.nb_vertices();
    let m = inst.nb_edges();
    let density = if n < 2 { 0. } else { 2. * m as f64 / (n as f64 * (n - 1) as f64) };
    let avg_degree = if n == 0 { 0. } else { 2. * m as f64 / n as f64 };
    let size_class = match n {
        0..=20 => SizeClass::Tiny,
        21..=50 => SizeClass::Small,
        51..=200 => SizeClass::Medium,
        201..=1000 => SizeClass::Large,
        _ => SizeClass::VeryLarge,
    };
    let density_class = if density < 0.1 {
        DensityClass::Sparse
    } else if density < 0.3 {
        DensityClass::Medium
    } else {
        DensityClass::Dense
    };
    GraphCharacteristics {
        nb_vertices: n,
        nb_edges: m,
        density,
        avg_degree,
        max_degree: inst.max_degree(),
        size_class,
        density_class,
    }
}

/** solving strategy chosen by the selector, parameters included */
#[derive(Debug, Clone, Serialize)]
pub enum Strategy {
    /// exact backtracking search for the chromatic number
    Exact {
        /// search parameters
        params: ExactParams,
    },
    /// DSATUR construction + simulated annealing reduction
    DsaturAnnealing {
        /// annealing schedule
        params: SaParams,
        /// whether to attempt color reduction
        aggressive: bool,
    },
    /// Welsh-Powell construction + simulated annealing reduction
    WelshPowellAnnealing {
        /// annealing schedule
        params: SaParams,
        /// whether to attempt color reduction
        aggressive: bool,
    },
    /// DSATUR construction + tabu search reduction
    TabuReduction {
        /// tabu parameters
        params: TabuParams,
        /// whether to attempt color reduction
        aggressive: bool,
    },
    /// plain DSATUR, no refinement
    GreedyDsatur,
    /// plain Welsh-Powell, no refinement
    GreedyWelshPowell,
}

/** maps the measured characteristics to a strategy.

Tiny graphs go to the exact search. Small and medium graphs get aggressive
reduction pipelines, tabu for the sparser bands and annealing for the dense
ones. Large graphs get the same pipelines without the reduction loop, and
very large graphs fall back to the plain greedy constructions. */
pub fn select_strategy(characteristics: &GraphCharacteristics) -> Strategy {
    match (characteristics.size_class, characteristics.density_class) {
        (SizeClass::Tiny, _) => Strategy::Exact { params: ExactParams::default() },
        (SizeClass::Small, DensityClass::Dense) => Strategy::DsaturAnnealing {
            params: SaParams {
                t0: 10.0, alpha: 0.95, max_iterations: 30_000, stall_limit: 3_000,
            },
            aggressive: true,
        },
        (SizeClass::Small, _) => Strategy::TabuReduction {
            params: TabuParams {
                tenure: 10, max_iterations: 5_000, stall_limit: 500,
                ..TabuParams::default()
            },
            aggressive: true,
        },
        (SizeClass::Medium, DensityClass::Dense) => Strategy::DsaturAnnealing {
            params: SaParams {
                t0: 50.0, alpha: 0.96, max_iterations: 50_000, stall_limit: 5_000,
            },
            aggressive: true,
        },
        (SizeClass::Medium, DensityClass::Sparse) => Strategy::WelshPowellAnnealing {
            params: SaParams {
                t0: 50.0, alpha: 0.97, max_iterations: 50_000, stall_limit: 5_000,
            },
            aggressive: true,
        },
        (SizeClass::Medium, DensityClass::Medium) => Strategy::TabuReduction {
            params: TabuParams {
                tenure: 15, max_iterations: 10_000, stall_limit: 1_000,
                ..TabuParams::default()
            },
            aggressive: true,
        },
        (SizeClass::Large, DensityClass::Dense) => Strategy::DsaturAnnealing {
            params: SaParams {
                t0: 100.0, alpha: 0.98, max_iterations: 100_000, stall_limit: 10_000,
            },
            aggressive: false,
        },
        (SizeClass::Large, _) => Strategy::WelshPowellAnnealing {
            params: SaParams {
                t0: 100.0, alpha: 0.98, max_iterations: 100_000, stall_limit: 10_000,
            },
            aggressive: false,
        },
        (SizeClass::VeryLarge, DensityClass::Sparse) => Strategy::GreedyWelshPowell,
        (SizeClass::VeryLarge, _) => Strategy::GreedyDsatur,
    }
}

/** statistics of an adaptive run */
#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveStats {
    /// strategy the selector chose
    pub strategy: Strategy,
    /// measurements that drove the choice
    pub characteristics: GraphCharacteristics,
    /// reason for falling back to DSATUR, when the strategy did not deliver
    pub fallback: Option<String>,
    /// colors used by the returned coloring
    pub nb_colors: usize,
    /// pipeline statistics, when the strategy ran a hybrid pipeline
    pub hybrid: Option<HybridStats>,
}

impl AdaptiveStats {
    /// open key/value view of the statistics, for external consumers
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/** result of an adaptive run: a valid coloring plus statistics */
#[derive(Debug, Clone)]
pub struct AdaptiveResult {
    /// final valid coloring
    pub coloring: Coloring,
    /// number of colors used by `coloring`
    pub nb_colors: usize,
    /// run statistics
    pub stats: AdaptiveStats,
}

/** colors a graph with an automatically selected strategy.

Measures the graph, picks a strategy through [select_strategy], runs it and
checks the result. Whenever the chosen strategy cannot deliver a valid
coloring (the exact search hits its guard or declares infeasibility, a
pipeline errors, or the produced coloring fails the validity check), the run
falls back to plain DSATUR and records the reason in the statistics. Always
returns a valid coloring. */
pub fn adaptive_coloring(inst: &Graph, seed: u64) -> AdaptiveResult {
    let characteristics = analyze(inst);
    let strategy = select_strategy(&characteristics);
    let mut fallback = None;
    let mut hybrid = None;
    let coloring = match &strategy {
        Strategy::Exact { params } => match chromatic_number(inst, params) {
            ExactOutcome::Found { coloring, .. } => coloring,
            outcome @ ExactOutcome::Infeasible { .. }
            | outcome @ ExactOutcome::TooLarge { .. } => {
                fallback = Some(format!("exact search gave up: {:?}", outcome));
                dsatur(inst).0
            }
        },
        Strategy::DsaturAnnealing { params, aggressive } => {
            match hybrid_dsatur_annealing(inst, params, seed, *aggressive) {
                Ok(res) => {
                    hybrid = Some(res.stats);
                    res.coloring
                }
                Err(e) => {
                    fallback = Some(e.to_string());
                    dsatur(inst).0
                }
            }
        }
        Strategy::WelshPowellAnnealing { params, aggressive } => {
            match hybrid_welsh_powell_annealing(inst, params, seed, *aggressive) {
                Ok(res) => {
                    hybrid = Some(res.stats);
                    res.coloring
                }
                Err(e) => {
                    fallback = Some(e.to_string());
                    dsatur(inst).0
                }
            }
        }
        Strategy::TabuReduction { params, aggressive } => {
            match hybrid_tabu(inst, params, seed, *aggressive) {
                Ok(res) => {
                    hybrid = Some(res.stats);
                    res.coloring
                }
                Err(e) => {
                    fallback = Some(e.to_string());
                    dsatur(inst).0
                }
            }
        }
        Strategy::GreedyDsatur => dsatur(inst).0,
        Strategy::GreedyWelshPowell => welsh_powell(inst).0,
    };
    // sole recovery point: whatever the strategy produced must be valid
    let coloring = if is_valid(inst, &coloring) {
        coloring
    } else {
        fallback = Some("strategy produced an invalid coloring".to_string());
        dsatur(inst).0
    };
    let used = nb_colors(&coloring);
    AdaptiveResult {
        coloring,
        nb_colors: used,
        stats: AdaptiveStats {
            strategy,
            characteristics,
            fallback,
            nb_colors: used,
            hybrid,
        },
    }
}
