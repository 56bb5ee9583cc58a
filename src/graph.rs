use bit_set::BitSet;

use crate::error::ColoringError;

/** Vertex Id */
pub type VertexId = usize;

/** models an undirected simple graph (vertices are dense `0..n`) */
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// edges of the graph
    edges: Vec<(VertexId, VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// if exists: adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Option<Vec<BitSet>>,
}

impl Graph {
    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.m }

    /** list of vertices adjacent to vertex v.
    Panics if v is not a vertex of the graph (use [`Graph::try_neighbors`] for
    a checked access). */
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.adj_list[v]
    }

    /// checked variant of [`Graph::neighbors`]
    pub fn try_neighbors(&self, v: VertexId) -> Result<&[VertexId], ColoringError> {
        self.adj_list.get(v)
            .map(|l| l.as_slice())
            .ok_or(ColoringError::UnknownVertex(v))
    }

    /** degree of vertex v. Panics if v is not a vertex of the graph. */
    pub fn degree(&self, v: VertexId) -> usize { self.adj_list[v].len() }

    /// checked variant of [`Graph::degree`]
    pub fn try_degree(&self, v: VertexId) -> Result<usize, ColoringError> {
        self.try_neighbors(v).map(|l| l.len())
    }

    /// largest degree in the graph (0 for an empty graph)
    pub fn max_degree(&self) -> usize {
        self.adj_list.iter().map(|l| l.len()).max().unwrap_or(0)
    }

    /// edge list
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// builds the edge list
    fn build_edges(adj_list: &[Vec<VertexId>]) -> Vec<(VertexId, VertexId)> {
        let mut res = Vec::new();
        for (i, l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i, *j));
                }
            }
        }
        res
    }

    /** constructor using an adjacency list (assumed symmetric, no self-loops) */
    pub fn new(adj_list: Vec<Vec<VertexId>>) -> Self {
        let n = adj_list.len();
        // compute nb edges
        let mut m = 0;
        for e in &adj_list { // at the end: m = ∑ d(v)
            m += e.len();
        }
        m /= 2; // m = (∑ d(v)) / 2
        let edges = Self::build_edges(&adj_list);
        Self { n, m, edges, adj_list, adj_matrix: None }
    }

    /** constructor using an edge list. Symmetrizes the relation; self-loops
    and duplicate edges are ignored. Panics if an endpoint is ≥ n. */
    pub fn from_edges(n: usize, edges: &[(VertexId, VertexId)]) -> Self {
        let mut seen: Vec<BitSet> = vec![BitSet::default(); n];
        let mut adj_list = vec![Vec::new(); n];
        for &(u, v) in edges {
            if u == v || seen[u].contains(v) { continue; }
            seen[u].insert(v);
            seen[v].insert(u);
            adj_list[u].push(v);
            adj_list[v].push(u);
        }
        Self::new(adj_list)
    }

    /// if called, populate the adj_matrix
    pub fn populate_adj_matrix(&mut self) {
        let mut res = vec![BitSet::default(); self.n];
        for (a, resa) in res.iter_mut().enumerate() {
            for b in &self.adj_list[a] {
                resa.insert(*b);
            }
        }
        self.adj_matrix = Some(res);
    }

    /** returns if a and b are adjacent
    if the adjacency matrix is defined: O(1)
    otherwise: O(Δ(G))
    */
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        match &self.adj_matrix {
            None => self.adj_list[a].iter().any(|c| &b == c),
            Some(matrix) => matrix[a].contains(b),
        }
    }

    /// print statistics of the graph
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        if self.n > 0 {
            let degrees: Vec<usize> = (0..self.n).map(|i| self.degree(i)).collect();
            println!("\t{} \t min degree", degrees.iter().min().unwrap_or(&0));
            println!("\t{} \t max degree", degrees.iter().max().unwrap_or(&0));
        }
        if self.adj_matrix.is_some() { println!("\tadj matrix computed"); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adj_list_constructor() {
        // path 0 - 1 - 2
        let g = Graph::new(vec![vec![1], vec![0, 2], vec![1]]);
        assert_eq!(g.nb_vertices(), 3);
        assert_eq!(g.nb_edges(), 2);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.edges(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn test_from_edges_ignores_loops_and_duplicates() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(g.nb_edges(), 2);
        assert_eq!(g.degree(1), 2);
        assert!(g.are_adjacent(0, 1));
        assert!(!g.are_adjacent(0, 2));
    }

    #[test]
    fn test_adjacency_with_matrix() {
        let mut g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(g.are_adjacent(3, 0));
        g.populate_adj_matrix();
        assert!(g.are_adjacent(3, 0));
        assert!(!g.are_adjacent(0, 2));
    }

    #[test]
    fn test_unknown_vertex() {
        let g = Graph::from_edges(2, &[(0, 1)]);
        assert_eq!(g.try_degree(0), Ok(1));
        assert_eq!(g.try_neighbors(5), Err(ColoringError::UnknownVertex(5)));
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(vec![]);
        assert_eq!(g.nb_vertices(), 0);
        assert_eq!(g.nb_edges(), 0);
        assert_eq!(g.max_degree(), 0);
    }
}
