use bit_set::BitSet;

use crate::coloring::{Coloring, nb_colors};
use crate::graph::{Graph, VertexId};

/** colors a graph with the Welsh-Powell greedy algorithm.

Vertices are ranked by decreasing degree (ties broken by ascending id).
Colors are assigned in rounds: the first uncolored vertex in rank order seeds
a fresh color, then the remaining ranked vertices join the same color class
whenever they are not adjacent to it. Each round marks the neighborhood of
the class in a forbidden bitset, so a round costs O(n + ∑ d(v)).

Deterministic: a fixed graph always yields the same coloring.
Returns the coloring and the number of colors used ((empty, 0) on an empty
graph).
*/
pub fn welsh_powell(inst: &Graph) -> (Coloring, usize) {
    let n = inst.nb_vertices();
    if n == 0 { return (Vec::new(), 0); }
    // rank vertices by decreasing degree, ties by id
    let mut ranked: Vec<VertexId> = (0..n).collect();
    ranked.sort_by_key(|v| (std::cmp::Reverse(inst.degree(*v)), *v));
    let mut colors: Vec<Option<usize>> = vec![None; n];
    let mut nb_colored = 0;
    let mut current_color = 0;
    while nb_colored < n {
        // open a new color class and fill it greedily along the ranking
        let mut forbidden: BitSet = BitSet::default();
        for &v in &ranked {
            if colors[v].is_none() && !forbidden.contains(v) {
                colors[v] = Some(current_color);
                nb_colored += 1;
                for &u in inst.neighbors(v) {
                    forbidden.insert(u);
                }
            }
        }
        current_color += 1;
    }
    let res: Coloring = colors.iter()
        .map(|c| c.unwrap_or(0)) // every vertex is colored at this point
        .collect();
    let k = nb_colors(&res);
    (res, k)
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

    fn cycle(n: usize) -> Graph {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Graph::from_edges(n, &edges)
    }

    #[test]
    fn test_empty_graph() {
        let (coloring, k) = welsh_powell(&Graph::new(vec![]));
        assert!(coloring.is_empty());
        assert_eq!(k, 0);
    }

    #[test]
    fn test_single_vertex() {
        let (coloring, k) = welsh_powell(&Graph::new(vec![vec![]]));
        assert_eq!(coloring, vec![0]);
        assert_eq!(k, 1);
    }

    #[test]
    fn test_triangle() {
        let g = complete(3);
        let (coloring, k) = welsh_powell(&g);
        assert!(is_valid(&g, &coloring));
        assert_eq!(k, 3);
    }

    #[test]
    fn test_k5() {
        let g = complete(5);
        let (coloring, k) = welsh_powell(&g);
        assert!(is_valid(&g, &coloring));
        assert_eq!(k, 5);
    }

    #[test]
    fn test_even_cycle_uses_two_colors() {
        let g = cycle(6);
        let (coloring, k) = welsh_powell(&g);
        assert!(is_valid(&g, &coloring));
        assert_eq!(k, 2);
    }

    #[test]
    fn test_odd_cycle_uses_three_colors() {
        let g = cycle(7);
        let (coloring, k) = welsh_powell(&g);
        assert!(is_valid(&g, &coloring));
        assert_eq!(k, 3);
    }

    #[test]
    fn test_deterministic() {
        let g = cycle(9);
        assert_eq!(welsh_powell(&g), welsh_powell(&g));
    }
}
