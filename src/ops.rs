/*!
# Graph Access Traits

Every algorithm in this crate is written against the small set of traits below instead of a
concrete graph type. Implementations for plain adjacency lists and for arbitrary edge payloads
(via [`EdgeListView`](crate::repr::EdgeListView)) live in [`repr`](crate::repr); flow engines
additionally expose their residual network through [`AdjacencyList`] so that the traversal
machinery can run on it.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::{edge::*, node::*};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Iterator over the (out-)neighbors of a node, returned by [`AdjacencyList::neighbors_of`]
    type NeighborIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over the (open) neighborhood of a given vertex in edge order.
    /// Parallel edges yield the same neighbor multiple times.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns the number of (outgoing) edges of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns the number of (directed) edges of the graph
    fn number_of_edges(&self) -> NumEdges {
        self.degrees().sum()
    }

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns the number of incoming edges of every node.
    fn in_degrees(&self) -> Vec<NumNodes> {
        let mut in_degs = vec![0; self.len()];
        for u in self.vertices() {
            for v in self.neighbors_of(u) {
                in_degs[v as usize] += 1;
            }
        }
        in_degs
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in the graph in sorted order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        self.edges(only_normalized).sorted().collect_vec()
    }
}

/// Random access into the neighborhood of a node, used by the cursor-based depth-first searches.
pub trait IndexedAdjacencyList: AdjacencyList {
    /// Returns the ith neighbor (0-indexed) of a given vertex
    /// ** Panics if `u >= n || i >= deg(u)`
    fn ith_neighbor(&self, u: Node, i: NumNodes) -> Node;
}

/// Adjacency lists whose edges carry a weight of type `W`.
pub trait WeightedAdjacencyList<W: Copy>: IndexedAdjacencyList {
    /// Returns the weight of the ith edge (0-indexed) of a given vertex
    /// ** Panics if `u >= n || i >= deg(u)`
    fn ith_weight(&self, u: Node, i: NumNodes) -> W;

    /// Returns an iterator over `(neighbor, weight)` pairs of `u` in edge order
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, W)> + '_ {
        (0..self.degree_of(u)).map(move |i| (self.ith_neighbor(u, i), self.ith_weight(u, i)))
    }
}

/// Shared access to the graph an iterator or algorithm is working on
pub trait WithGraphRef<G> {
    fn graph_ref(&self) -> &G;
}
