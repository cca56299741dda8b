/*!
# Shortest Paths

- [`ShortestPaths::floyd_warshall`]: all pairs in `O(n^3)`, negative weights allowed,
- [`ShortestPaths::dijkstra`]: single source in `O(m log n)` with a binary heap, nonnegative weights.

Both are generic over [`Numeric`] weights and use a caller supplied `inf` as distance of
unreachable nodes. Negative cycles are not detected.
*/

use std::{cmp::Ordering, collections::BinaryHeap};

use itertools::Itertools;
use tracing::{debug, trace};

use super::*;

/// Distance matrix entry `(next_hop, distance)` of [`ShortestPaths::floyd_warshall`]
pub type NextHop<W> = (Option<Node>, W);

/// Entry `(predecessor, distance)` of [`ShortestPaths::dijkstra`]
pub type Predecessor<W> = (Option<Node>, W);

pub trait ShortestPaths<W: Numeric>: WeightedAdjacencyList<W> {
    /// Computes all-pairs shortest paths.
    ///
    /// Entry `[u][v]` is `(next, dist)` where `next` is the first node after `u` on a shortest
    /// `u -> v` path. The diagonal is `(Some(u), 0)` and unreachable pairs are `(None, inf)`.
    /// Of several parallel edges the lightest one is used; ties keep the earlier candidate.
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// let adj: Vec<Vec<(Node, i32)>> = vec![vec![(1, 4), (2, 1)], vec![], vec![(1, 2)]];
    /// let dist = adj.floyd_warshall(i32::MAX);
    /// assert_eq!(dist[0][1], (Some(2), 3));
    /// assert_eq!(dist[1][0], (None, i32::MAX));
    /// ```
    fn floyd_warshall(&self, inf: W) -> Vec<Vec<NextHop<W>>> {
        let n = self.len();
        let mut dist = vec![vec![(None, inf); n]; n];

        for u in self.vertices() {
            let row = &mut dist[u as usize];
            row[u as usize] = (Some(u), W::zero());

            for (v, w) in self.weighted_neighbors_of(u) {
                let entry = &mut row[v as usize];
                if w < entry.1 {
                    *entry = (Some(v), w);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let (hop_ik, dist_ik) = dist[i][k];
                if hop_ik.is_none() {
                    continue;
                }

                for j in 0..n {
                    let (hop_kj, dist_kj) = dist[k][j];
                    if hop_kj.is_none() {
                        continue;
                    }

                    let candidate = dist_ik + dist_kj;
                    if dist[i][j].0.is_none() || candidate < dist[i][j].1 {
                        dist[i][j] = (hop_ik, candidate);
                    }
                }
            }
        }

        debug!(nodes = n, "computed all-pairs shortest paths");

        dist
    }

    /// Computes single-source shortest paths from `source` for nonnegative weights.
    ///
    /// Entry `[v]` is `(predecessor, dist)`; the source is `(Some(source), 0)` and unreachable
    /// nodes are `(None, inf)`. Among equally distant candidates the one inserted into the heap
    /// first is settled first, so the result only depends on the edge order.
    /// ** Panics if `source >= n` **
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// let adj: Vec<Vec<(Node, u64)>> = vec![vec![(1, 4), (2, 1)], vec![], vec![(1, 2)]];
    /// let dist = adj.dijkstra(0, u64::MAX);
    /// assert_eq!(dist, vec![(Some(0), 0), (Some(2), 3), (Some(0), 1)]);
    /// ```
    fn dijkstra(&self, source: Node, inf: W) -> Vec<Predecessor<W>> {
        let mut dist = vec![(None, inf); self.len()];
        let mut settled = self.vertex_bitset_unset();
        let mut heap = BinaryHeap::new();
        let mut sequence = 0u64;

        dist[source as usize] = (Some(source), W::zero());
        heap.push(Candidate::new(W::zero(), sequence, source));

        while let Some(Candidate { distance, node: u, .. }) = heap.pop() {
            if settled.set_bit(u) {
                continue;
            }
            trace!(node = u, "settled");

            for (v, w) in self.weighted_neighbors_of(u) {
                if settled.get_bit(v) {
                    continue;
                }

                let candidate = distance + w;
                let entry = &mut dist[v as usize];
                if entry.0.is_none() || candidate < entry.1 {
                    *entry = (Some(u), candidate);
                    sequence += 1;
                    heap.push(Candidate::new(candidate, sequence, v));
                }
            }
        }

        debug!(
            source,
            settled = settled.cardinality(),
            pushes = sequence + 1,
            "computed single-source shortest paths"
        );

        dist
    }
}

impl<W, G> ShortestPaths<W> for G
where
    W: Numeric,
    G: WeightedAdjacencyList<W>,
{
}

/// All-pairs shortest paths of a weighted adjacency list; see [`ShortestPaths::floyd_warshall`].
pub fn floyd_warshall<W: Numeric>(graph: &[Vec<(Node, W)>], inf: W) -> Vec<Vec<NextHop<W>>> {
    EdgeListView::new(graph, |e: &(Node, W)| e.0).floyd_warshall(inf)
}

/// Single-source shortest paths of a weighted adjacency list; see [`ShortestPaths::dijkstra`].
pub fn dijkstra<W: Numeric>(graph: &[Vec<(Node, W)>], source: Node, inf: W) -> Vec<Predecessor<W>> {
    EdgeListView::new(graph, |e: &(Node, W)| e.0).dijkstra(source, inf)
}

/// Rebuilds the path `source, ..., target` from the result of [`ShortestPaths::dijkstra`].
/// Returns `None` if `target` is unreachable.
pub fn shortest_path_to<W>(result: &[Predecessor<W>], target: Node) -> Option<Vec<Node>> {
    let mut path = vec![target];
    let mut u = target;

    loop {
        let pred = result.get(u as usize)?.0?;
        if pred == u {
            break;
        }
        // a well-formed predecessor array is a tree, so any longer walk is a cycle
        if path.len() > result.len() {
            return None;
        }
        path.push(pred);
        u = pred;
    }

    path.reverse();
    Some(path)
}

/// Rebuilds the path `from, ..., to` from the next-hop matrix of
/// [`ShortestPaths::floyd_warshall`]. Returns `None` if `to` is unreachable from `from`.
pub fn next_hop_path<W>(matrix: &[Vec<NextHop<W>>], from: Node, to: Node) -> Option<Vec<Node>> {
    let mut path = vec![from];
    let mut u = from;

    while u != to {
        u = matrix.get(u as usize)?.get(to as usize)?.0?;
        if path.len() > matrix.len() {
            return None;
        }
        path.push(u);
    }

    Some(path)
}

/// Heap entry; the heap pops the smallest distance first and, among equal distances, the
/// smallest sequence number.
struct Candidate<W> {
    distance: W,
    sequence: u64,
    node: Node,
}

impl<W: Numeric> Candidate<W> {
    fn new(distance: W, sequence: u64, node: Node) -> Self {
        Self {
            distance,
            sequence,
            node,
        }
    }
}

impl<W: Numeric> Ord for Candidate<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<W: Numeric> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Numeric> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Numeric> Eq for Candidate<W> {}

/// Convenience: the distances of a result without the predecessors
pub fn distances<W: Copy>(result: &[Predecessor<W>]) -> Vec<W> {
    result.iter().map(|&(_, d)| d).collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use num::rational::Ratio;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    const INF: i64 = i64::MAX;

    fn table(rows: &[&[(i64, i64)]]) -> Vec<Vec<(Option<Node>, i64)>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|&(p, d)| if p < 0 { (None, d) } else { (Some(p as Node), d) })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn floyd_warshall_reference() {
        let graph = cyc_neg1();
        let result = floyd_warshall(&graph, INF);

        assert_eq!(
            result,
            table(&[
                &[(0, 0), (2, -1), (2, -2), (2, 0), (2, -8), (2, -6), (2, -3), (-1, INF)],
                &[(0, 4), (1, 0), (0, 2), (0, 4), (0, -4), (0, -2), (0, 1), (-1, INF)],
                &[(3, 5), (3, 1), (2, 0), (3, 2), (3, -6), (3, -4), (3, -1), (-1, INF)],
                &[(1, 3), (1, -1), (1, 1), (3, 0), (4, -8), (4, -6), (4, -3), (-1, INF)],
                &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (4, 0), (5, 2), (5, 5), (-1, INF)],
                &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (6, 10), (5, 0), (6, 3), (-1, INF)],
                &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (4, 7), (4, 9), (6, 0), (-1, INF)],
                &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (5, 16), (5, 6), (5, 9), (7, 0)],
            ])
        );

        // following next hops sums up to the distance
        for u in graph.vertices() {
            for v in graph.vertices() {
                let (hop, dist) = result[u as usize][v as usize];
                match next_hop_path(&result, u, v) {
                    None => {
                        assert_eq!((hop, dist), (None, INF));
                    }
                    Some(path) => {
                        let length: i64 = path
                            .iter()
                            .tuple_windows()
                            .map(|(&a, &b)| {
                                graph[a as usize]
                                    .iter()
                                    .filter(|&&(t, _)| t == b)
                                    .map(|&(_, w)| w)
                                    .min()
                                    .unwrap()
                            })
                            .sum();
                        assert_eq!(length, dist);
                    }
                }
            }
        }
    }

    #[test]
    fn dijkstra_reference() {
        let graph = cyc_pos1();
        let expected = table(&[
            &[(0, 0), (3, 5), (0, 2), (2, 4), (3, 12), (4, 14), (5, 17), (-1, INF)],
            &[(1, 4), (1, 0), (1, 3), (2, 5), (3, 13), (4, 15), (5, 18), (-1, INF)],
            &[(1, 7), (3, 3), (2, 0), (2, 2), (3, 10), (4, 12), (5, 15), (-1, INF)],
            &[(1, 5), (3, 1), (1, 4), (3, 0), (3, 8), (4, 10), (5, 13), (-1, INF)],
            &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (4, 0), (4, 2), (5, 5), (-1, INF)],
            &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (6, 10), (5, 0), (5, 3), (-1, INF)],
            &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (6, 7), (4, 9), (6, 0), (-1, INF)],
            &[(-1, INF), (-1, INF), (-1, INF), (-1, INF), (6, 16), (7, 6), (5, 9), (7, 0)],
        ]);

        for s in graph.vertices() {
            assert_eq!(dijkstra(&graph, s, INF), expected[s as usize]);
        }

        let result = dijkstra(&graph, 0, INF);
        assert_eq!(shortest_path_to(&result, 6), Some(vec![0, 2, 3, 4, 5, 6]));
        assert_eq!(shortest_path_to(&result, 0), Some(vec![0]));
        assert_eq!(shortest_path_to(&result, 7), None);
        assert_eq!(distances(&result)[1], 5);
    }

    #[test]
    fn dijkstra_tie_breaking() {
        // both 0 -> 1 -> 3 and 0 -> 2 -> 3 have length 2; 1 is pushed first
        let graph: Vec<Vec<(Node, u32)>> =
            vec![vec![(1, 1), (2, 1)], vec![(3, 1)], vec![(3, 1)], vec![]];
        assert_eq!(graph.dijkstra(0, u32::MAX)[3], (Some(1), 2));

        let graph: Vec<Vec<(Node, u32)>> =
            vec![vec![(2, 1), (1, 1)], vec![(3, 1)], vec![(3, 1)], vec![]];
        assert_eq!(graph.dijkstra(0, u32::MAX)[3], (Some(2), 2));
    }

    #[test]
    fn rational_weights() {
        let r = |a, b| Ratio::new(a, b);
        let graph: Vec<Vec<(Node, Ratio<i64>)>> = vec![
            vec![(1, r(1, 2)), (2, r(2, 1))],
            vec![(2, r(1, 3))],
            vec![],
        ];
        let inf = r(1_000_000, 1);

        assert_eq!(graph.dijkstra(0, inf)[2], (Some(1), r(5, 6)));
        assert_eq!(graph.floyd_warshall(inf)[0][2], (Some(1), r(5, 6)));
    }

    #[test]
    fn dijkstra_agrees_with_floyd_warshall() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for i in 0..20 {
            let n = 10 + 3 * i;
            let topology = random_digraph(rng, n, 2.5);
            let graph = with_random_weights(rng, &topology, 0..20);
            let all_pairs = graph.floyd_warshall(INF);

            for s in graph.vertices() {
                let single = graph.dijkstra(s, INF);
                for v in graph.vertices() {
                    assert_eq!(single[v as usize].1, all_pairs[s as usize][v as usize].1);
                    assert_eq!(
                        single[v as usize].0.is_some(),
                        all_pairs[s as usize][v as usize].0.is_some()
                    );
                }

                // the predecessor tree realizes the distances
                for v in graph.vertices() {
                    if let Some(path) = shortest_path_to(&single, v) {
                        assert_eq!(path[0], s);
                        assert_eq!(*path.last().unwrap(), v);
                    }
                }
            }
        }
    }

    #[test]
    fn floats() {
        let graph: Vec<Vec<(Node, f64)>> = vec![vec![(1, 0.5)], vec![(2, 0.25)], vec![(0, 1.0)]];
        let result = graph.dijkstra(0, f64::INFINITY);
        assert_eq!(result[2], (Some(1), 0.75));
        assert_eq!(graph.floyd_warshall(f64::INFINITY)[2][1], (Some(0), 1.5));
    }
}
