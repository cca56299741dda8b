//! Fixture graphs and seeded random instances shared by the unit tests.

use itertools::Itertools;
use rand::Rng;

use crate::prelude::*;

/// Weighted adjacency list as used by the fixtures: `(target, weight)` pairs
pub type Weighted = Vec<Vec<(Node, i64)>>;

fn weighted(rows: &[&[(Node, i64)]]) -> Weighted {
    rows.iter().map(|row| row.to_vec()).collect()
}

/// Acyclic, several components, negative weights
pub fn dag_neg1() -> Weighted {
    weighted(&[
        &[(4, 10)],
        &[(4, 7), (0, 3)],
        &[(0, 5)],
        &[(2, -4), (0, 6), (1, 8), (4, 5)],
        &[],
        &[(1, -2), (6, 6)],
        &[],
        &[(6, 7)],
        &[(10, -5)],
        &[],
        &[],
    ])
}

/// Cyclic with negative weights but no negative cycle; node 7 has parallel edges
pub fn cyc_neg1() -> Weighted {
    weighted(&[
        &[(2, -2)],
        &[(0, 4), (2, 3)],
        &[(3, 2)],
        &[(1, -1), (4, -8)],
        &[(5, 2)],
        &[(6, 3)],
        &[(4, 7)],
        &[(5, 10), (5, 6), (5, 11)],
    ])
}

/// Same shape as [`cyc_neg1`] with nonnegative weights
pub fn cyc_pos1() -> Weighted {
    weighted(&[
        &[(2, 2)],
        &[(0, 4), (2, 3), (4, 20)],
        &[(3, 2)],
        &[(1, 1), (4, 8)],
        &[(5, 2)],
        &[(6, 3)],
        &[(4, 7)],
        &[(5, 10), (5, 6), (5, 11)],
    ])
}

/// Undirected (symmetric) graph with three components, bridges and cut vertices
pub fn cyc_undir() -> Weighted {
    weighted(&[
        &[(5, 21), (7, 28), (8, 23)],
        &[(2, 31), (4, 33)],
        &[(1, 27), (4, 35)],
        &[(6, 28), (9, 26)],
        &[(1, 34), (2, 28), (9, 34)],
        &[(0, 31), (7, 26), (9, 29)],
        &[(3, 25), (9, 28)],
        &[(0, 32), (5, 33), (8, 31), (9, 30)],
        &[(0, 29), (7, 35)],
        &[(4, 26), (5, 28), (6, 30), (7, 32), (3, 24)],
        &[(11, 45)],
        &[(10, 38), (12, 45)],
        &[(11, 42)],
        &[(14, 55), (15, 57)],
        &[(13, 57), (15, 54)],
        &[(13, 53), (14, 52), (16, 54), (17, 50)],
        &[(15, 58), (17, 55)],
        &[(15, 58), (16, 56)],
    ])
}

/// Random directed graph with roughly `avg_deg * n` edges (self-loops and parallel edges possible)
pub fn random_digraph<R: Rng>(rng: &mut R, n: NumNodes, avg_deg: f64) -> Vec<Vec<Node>> {
    let m = (avg_deg * n as f64) as usize;
    adjacency_from_edges(
        n,
        (0..m).map(|_| (rng.random_range(0..n), rng.random_range(0..n))),
    )
}

/// Random DAG: edges only point from smaller to larger nodes of a random permutation
pub fn random_dag<R: Rng>(rng: &mut R, n: NumNodes, avg_deg: f64) -> Vec<Vec<Node>> {
    let m = (avg_deg * n as f64) as usize;
    let mut rank = (0..n).collect_vec();
    for i in (1..n as usize).rev() {
        rank.swap(i, rng.random_range(0..=i));
    }

    let edges = (0..m)
        .filter_map(|_| {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            (u < v).then(|| (rank[u as usize], rank[v as usize]))
        })
        .collect_vec();

    adjacency_from_edges(n, edges)
}

/// Random simple undirected graph stored symmetrically
pub fn random_undirected<R: Rng>(rng: &mut R, n: NumNodes, avg_deg: f64) -> Vec<Vec<Node>> {
    let m = (avg_deg * n as f64 / 2.0) as usize;
    let edges = (0..m)
        .map(|_| Edge(rng.random_range(0..n), rng.random_range(0..n)).normalized())
        .filter(|e| !e.is_loop())
        .sorted()
        .dedup()
        .collect_vec();

    symmetric_adjacency_from_edges(n, edges)
}

/// Random undirected multigraph stored symmetrically; self-loops and parallel edges are kept
pub fn random_undirected_multigraph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    avg_deg: f64,
) -> Vec<Vec<Node>> {
    let m = (avg_deg * n as f64 / 2.0) as usize;
    let edges = (0..m)
        .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
        .collect_vec();

    symmetric_adjacency_from_edges(n, edges)
}

/// Random tree on `n` nodes (every node `u > 0` is attached to a random smaller node),
/// returned with shuffled labels as symmetric adjacency list
pub fn random_tree<R: Rng>(rng: &mut R, n: NumNodes) -> Vec<Vec<Node>> {
    let mut label = (0..n).collect_vec();
    for i in (1..n as usize).rev() {
        label.swap(i, rng.random_range(0..=i));
    }

    symmetric_adjacency_from_edges(
        n,
        (1..n).map(|u| (label[u as usize], label[rng.random_range(0..u) as usize])),
    )
}

/// Attaches random weights in `range` to every edge
pub fn with_random_weights<R: Rng>(
    rng: &mut R,
    graph: &[Vec<Node>],
    range: std::ops::Range<i64>,
) -> Weighted {
    graph
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| (v, rng.random_range(range.clone())))
                .collect()
        })
        .collect()
}

/// Random `n x n` capacity matrix with zero diagonal; every entry is nonzero with probability `p`
pub fn random_capacities<R: Rng>(rng: &mut R, n: usize, p: f64, max: i64) -> Vec<Vec<i64>> {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i != j && rng.random_bool(p) {
                        rng.random_range(1..=max)
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect()
}

/// Nodes reachable from `u` via paths of length at least one
pub fn brute_force_reachable(graph: &[Vec<Node>], u: Node) -> Vec<bool> {
    let mut reached = vec![false; graph.len()];
    let mut stack = graph[u as usize].clone();
    while let Some(v) = stack.pop() {
        if !reached[v as usize] {
            reached[v as usize] = true;
            stack.extend(graph[v as usize].iter().copied());
        }
    }
    reached
}
