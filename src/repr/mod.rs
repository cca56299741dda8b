/*!
# Graph Representations

The algorithms operate on vertex-indexed adjacency lists. Three flavours are supported:

- `Vec<Vec<Node>>`: a plain unweighted adjacency list,
- `Vec<Vec<(Node, W)>>`: a weighted adjacency list where the weight is the second component,
- [`EdgeListView`]: any `&[Vec<E>]` together with an accessor `Fn(&E) -> Node` that extracts the
  target of an edge. This decouples the algorithms from the shape of the edge payload.
*/

use crate::{edge::*, node::*, ops::*};

mod view;

pub use view::*;

impl GraphNodeOrder for Vec<Vec<Node>> {
    fn number_of_nodes(&self) -> NumNodes {
        node_from_index(self.len())
    }
}

impl AdjacencyList for Vec<Vec<Node>> {
    type NeighborIter<'a>
        = std::iter::Copied<std::slice::Iter<'a, Node>>
    where
        Self: 'a;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        node_from_index(self[u as usize].len())
    }
}

impl IndexedAdjacencyList for Vec<Vec<Node>> {
    fn ith_neighbor(&self, u: Node, i: NumNodes) -> Node {
        self[u as usize][i as usize]
    }
}

fn edge_target<W>(edge: &(Node, W)) -> Node {
    edge.0
}

impl<W: Copy> GraphNodeOrder for Vec<Vec<(Node, W)>> {
    fn number_of_nodes(&self) -> NumNodes {
        node_from_index(self.len())
    }
}

impl<W: Copy> AdjacencyList for Vec<Vec<(Node, W)>> {
    type NeighborIter<'a>
        = std::iter::Map<std::slice::Iter<'a, (Node, W)>, fn(&(Node, W)) -> Node>
    where
        Self: 'a;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self[u as usize]
            .iter()
            .map(edge_target::<W> as fn(&(Node, W)) -> Node)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        node_from_index(self[u as usize].len())
    }
}

impl<W: Copy> IndexedAdjacencyList for Vec<Vec<(Node, W)>> {
    fn ith_neighbor(&self, u: Node, i: NumNodes) -> Node {
        self[u as usize][i as usize].0
    }
}

impl<W: Copy> WeightedAdjacencyList<W> for Vec<Vec<(Node, W)>> {
    fn ith_weight(&self, u: Node, i: NumNodes) -> W {
        self[u as usize][i as usize].1
    }
}

/// Builds an adjacency list with `n` nodes from a list of directed edges.
/// Edges are appended in the order they are provided.
pub fn adjacency_from_edges<I>(n: NumNodes, edges: I) -> Vec<Vec<Node>>
where
    I: IntoIterator,
    I::Item: Into<Edge>,
{
    let mut adj = vec![Vec::new(); n as usize];
    for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
        adj[u as usize].push(v);
    }
    adj
}

/// Builds an adjacency list with `n` nodes from a list of undirected edges; every edge `{u, v}`
/// is stored as `(u, v)` and `(v, u)`.
pub fn symmetric_adjacency_from_edges<I>(n: NumNodes, edges: I) -> Vec<Vec<Node>>
where
    I: IntoIterator,
    I::Item: Into<Edge>,
{
    let mut adj = vec![Vec::new(); n as usize];
    for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
        adj[u as usize].push(v);
        if u != v {
            adj[v as usize].push(u);
        }
    }
    adj
}
