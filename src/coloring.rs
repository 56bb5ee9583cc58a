use bit_set::BitSet;

use crate::graph::{Graph, VertexId};

/** Color Id */
pub type ColorId = usize;

/** Coloring of a graph: colors[v] is the color assigned to vertex v.
A result coloring is always total (one entry per vertex); partial assignments
only exist inside the constructive/exact searches. */
pub type Coloring = Vec<ColorId>;

/// number of colors used by a coloring (1 + largest index, 0 when empty)
pub fn nb_colors(coloring: &[ColorId]) -> usize {
    match coloring.iter().max() {
        None => 0,
        Some(c) => c + 1,
    }
}

/// number of edges whose endpoints share a color
pub fn count_conflicts(inst: &Graph, coloring: &[ColorId]) -> usize {
    debug_assert_eq!(coloring.len(), inst.nb_vertices());
    inst.edges().iter()
        .filter(|(u, v)| coloring[*u] == coloring[*v])
        .count()
}

/// true iff no edge has equal endpoint colors
pub fn is_valid(inst: &Graph, coloring: &[ColorId]) -> bool {
    count_conflicts(inst, coloring) == 0
}

/// vertices that are an endpoint of at least one conflicting edge
pub fn conflicting_vertices(inst: &Graph, coloring: &[ColorId]) -> Vec<VertexId> {
    let mut marked: BitSet = BitSet::default();
    let mut res = Vec::new();
    for (u, v) in inst.edges() {
        if coloring[*u] == coloring[*v] {
            if !marked.contains(*u) { marked.insert(*u); res.push(*u); }
            if !marked.contains(*v) { marked.insert(*v); res.push(*v); }
        }
    }
    res
}

/// color classes: res[c] lists the vertices assigned color c
pub fn color_classes(coloring: &[ColorId]) -> Vec<Vec<VertexId>> {
    let mut res = vec![Vec::new(); nb_colors(coloring)];
    for (v, c) in coloring.iter().enumerate() {
        res[*c].push(v);
    }
    res
}

/** result of auditing a coloring against a graph */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// the coloring is total and conflict-free; stores the number of colors
    Ok(usize),
    /// the coloring does not cover the vertex set
    WrongLength {
        /// number of vertices in the graph
        expected: usize,
        /// number of entries in the coloring
        found: usize,
    },
    /// some edge has equal endpoint colors
    ConflictingEdge(VertexId, VertexId),
}

/**
audits a coloring: checks that it covers every vertex and that no edge is
conflicting. Returns the number of colors used on success.
*/
pub fn checker(inst: &Graph, coloring: &[ColorId]) -> CheckerResult {
    if coloring.len() != inst.nb_vertices() {
        return CheckerResult::WrongLength {
            expected: inst.nb_vertices(),
            found: coloring.len(),
        };
    }
    for (u, v) in inst.edges() {
        if coloring[*u] == coloring[*v] {
            return CheckerResult::ConflictingEdge(*u, *v);
        }
    }
    CheckerResult::Ok(nb_colors(coloring))
}
