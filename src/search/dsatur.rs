use std::cmp::{Ordering, Reverse, max};

use bit_set::BitSet;
use fastrand::Rng;
use priority_queue::PriorityQueue;

use crate::coloring::Coloring;
use crate::graph::{Graph, VertexId};

/** tie-breaking rule used when several uncolored vertices share the largest
saturation degree */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// prefer the vertex with the largest static degree (then smallest id)
    Degree,
    /// prefer the vertex with the largest random rank drawn from this seed
    Random(u64),
}

#[derive(PartialEq, Eq)]
struct DSatInfo {
    /// saturation degree: number of distinct colors seen by the vertex
    dsat: usize,
    /// tie value: static degree or random rank
    tie: usize,
    /// final tie-break on the smallest vertex id, for determinism
    vertex: Reverse<VertexId>,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.tie.cmp(&other.tie))
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** colors a graph with the DSATUR greedy algorithm (degree tie-break).
    1. choose the uncolored vertex that sees the most colors (break ties by
       the largest degree, then the smallest id)
    2. assign it the first color it does not see
    3. mark its uncolored neighbors as seeing this color
    4. repeat until every vertex is colored (exactly n steps)
The maximum-degree vertex is selected first and receives color 0.
Returns the coloring and the number of colors used.
*/
pub fn dsatur(inst: &Graph) -> (Coloring, usize) {
    dsatur_with_tie_break(inst, TieBreak::Degree)
}

/// DSATUR with an explicit tie-breaking rule
pub fn dsatur_with_tie_break(inst: &Graph, tie_break: TieBreak) -> (Coloring, usize) {
    let n = inst.nb_vertices();
    if n == 0 { return (Vec::new(), 0); }
    let mut remaining: PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    match tie_break {
        TieBreak::Degree => {
            for v in 0..n {
                remaining.push(v, DSatInfo { dsat: 0, tie: inst.degree(v), vertex: Reverse(v) });
            }
        }
        TieBreak::Random(seed) => {
            let mut rng = Rng::with_seed(seed);
            for v in 0..n {
                remaining.push(v, DSatInfo { dsat: 0, tie: rng.usize(..), vertex: Reverse(v) });
            }
        }
    }
    let mut colors: Vec<Option<usize>> = vec![None; n]; // colors[v] -> color assigned to v
    let mut adj_colors: Vec<BitSet> = vec![BitSet::default(); n]; // adj_colors[v] -> colors v sees
    let mut last_color = 0;
    while let Some((current_vertex, _)) = remaining.pop() {
        // assign the first color the vertex does not see
        let mut color = 0;
        while adj_colors[current_vertex].contains(color) { color += 1; }
        colors[current_vertex] = Some(color);
        last_color = max(last_color, color);
        // update saturation degree information
        for &neigh in inst.neighbors(current_vertex) {
            if colors[neigh].is_none() && !adj_colors[neigh].contains(color) {
                adj_colors[neigh].insert(color);
                remaining.change_priority_by(&neigh, |p| { p.dsat += 1; });
            }
        }
    }
    let res: Coloring = colors.iter().map(|c| c.unwrap_or(0)).collect();
    (res, last_color + 1)
}
