use bit_set::BitSet;

use crate::graph::{Graph, VertexId};

/** finds a "large" clique greedily.
The algorithm chooses the vertex with the largest degree, then marks every
non-neighbor as forbidden; while candidates remain, it keeps adding the
largest-degree candidate. The clique size is a lower bound on the chromatic
number. */
pub fn greedy_clique(inst: &Graph) -> Vec<VertexId> {
    let n = inst.nb_vertices();
    let mut forbidden: BitSet = BitSet::default();
    let mut res = Vec::new();
    loop {
        match (0..n).filter(|v| !forbidden.contains(*v)).max_by_key(|v| inst.degree(*v)) {
            None => break,
            Some(current_vertex) => {
                // insert the current vertex as part of the clique solution
                res.push(current_vertex);
                // mark the non neighbors as forbidden
                let mut neighbors: BitSet = BitSet::default();
                for &v in inst.neighbors(current_vertex) {
                    neighbors.insert(v);
                }
                for v in 0..n {
                    if !neighbors.contains(v) {
                        forbidden.insert(v);
                    }
                }
            }
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_complete_graph() {
        let g = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(greedy_clique(&g).len(), 4);
    }

    #[test]
    fn test_triangle_free() {
        // C6 contains no triangle: the greedy clique is an edge
        let edges: Vec<_> = (0..6).map(|i| (i, (i + 1) % 6)).collect();
        let g = Graph::from_edges(6, &edges);
        assert_eq!(greedy_clique(&g).len(), 2);
    }

    #[test]
    fn test_empty_graph() {
        assert!(greedy_clique(&Graph::new(vec![])).is_empty());
    }

    #[test]
    fn test_clique_is_a_clique() {
        // K4 plus a pending path
        let g = Graph::from_edges(6, &[
            (0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 4), (4, 5),
        ]);
        let clique = greedy_clique(&g);
        assert_eq!(clique.len(), 4);
        for (i, &u) in clique.iter().enumerate() {
            for &v in &clique[i + 1..] {
                assert!(g.are_adjacent(u, v));
            }
        }
    }
}
