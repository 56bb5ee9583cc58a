use crate::coloring::{ColorId, Coloring};
use crate::graph::{Graph, VertexId};

/** incremental conflict bookkeeping for a coloring restricted to a fixed
palette `0..nb_colors`.

Maintains `nb_neigh_colors[v][c]`, the number of neighbors of v currently
holding color c, so that recoloring deltas cost O(Δ) instead of an O(E)
rescan. Exclusively owned by one refinement run. */
#[derive(Debug)]
pub struct ConflictState<'a> {
    /// reference graph
    inst: &'a Graph,
    /// colors[v]: color of the vertex v
    colors: Vec<ColorId>,
    /// number of colors in the palette
    nb_colors: usize,
    /// nb_neigh_colors[v][c]: number of neighbors of v that are assigned color c
    nb_neigh_colors: Vec<Vec<usize>>,
    /// number of conflicting edges
    nb_conflicts: usize,
}

impl<'a> ConflictState<'a> {
    /** builds the state from an initial coloring, reducing every color modulo
    the palette size. `initial` must cover the vertex set and `nb_colors` must
    be ≥ 1 (checked by the public refinement entry points). */
    pub fn new(inst: &'a Graph, initial: &[ColorId], nb_colors: usize) -> Self {
        let n = inst.nb_vertices();
        let colors: Vec<ColorId> = initial.iter().map(|c| c % nb_colors).collect();
        let mut nb_neigh_colors = vec![vec![0; nb_colors]; n];
        for v in 0..n {
            for &u in inst.neighbors(v) {
                nb_neigh_colors[u][colors[v]] += 1;
            }
        }
        let nb_conflicts = inst.edges().iter()
            .filter(|(u, v)| colors[*u] == colors[*v])
            .count();
        Self { inst, colors, nb_colors, nb_neigh_colors, nb_conflicts }
    }

    /// number of conflicting edges
    pub fn nb_conflicts(&self) -> usize { self.nb_conflicts }

    /// palette size
    pub fn nb_colors(&self) -> usize { self.nb_colors }

    /// current color of vertex v
    pub fn color(&self, v: VertexId) -> ColorId { self.colors[v] }

    /// current coloring
    pub fn colors(&self) -> &[ColorId] { &self.colors }

    /// owned copy of the current coloring
    pub fn snapshot(&self) -> Coloring { self.colors.clone() }

    /// number of neighbors of v holding color c
    pub fn nb_neighbors_with(&self, v: VertexId, c: ColorId) -> usize {
        self.nb_neigh_colors[v][c]
    }

    /// conflict delta of recoloring v with c, without applying the move
    pub fn recolor_delta(&self, v: VertexId, c: ColorId) -> i64 {
        self.nb_neigh_colors[v][c] as i64 - self.nb_neigh_colors[v][self.colors[v]] as i64
    }

    /// color of the palette minimizing the collisions of v with its neighbors
    pub fn least_conflicting_color(&self, v: VertexId) -> ColorId {
        (0..self.nb_colors)
            .min_by_key(|c| self.nb_neigh_colors[v][*c])
            .unwrap_or(0)
    }

    /// recolors v with c, updating the conflict count and the neighbor tables
    pub fn recolor(&mut self, v: VertexId, c: ColorId) {
        debug_assert!(c < self.nb_colors);
        let previous = self.colors[v];
        if previous == c { return; }
        for &u in self.inst.neighbors(v) {
            debug_assert!(self.nb_neigh_colors[u][previous] > 0);
            self.nb_neigh_colors[u][previous] -= 1;
            self.nb_neigh_colors[u][c] += 1;
            if self.colors[u] == previous { // conflict removed
                self.nb_conflicts -= 1;
            }
            if self.colors[u] == c { // conflict added
                self.nb_conflicts += 1;
            }
        }
        self.colors[v] = c;
    }

    /// vertices that are an endpoint of at least one conflicting edge
    pub fn conflicting_vertices(&self) -> Vec<VertexId> {
        (0..self.colors.len())
            .filter(|&v| self.nb_neigh_colors[v][self.colors[v]] > 0)
            .collect()
    }
}
