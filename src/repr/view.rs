use super::*;
use crate::error::{GraphError, Result};

/// Read-only view over an adjacency list with arbitrary edge payloads.
///
/// The accessor `index` maps an edge to its target node, which allows running every algorithm
/// on edges that carry weights, labels or other data without copying the graph. If the edge
/// type is a `(Node, W)` pair, the view additionally acts as a [`WeightedAdjacencyList`].
///
/// # Examples
/// ```
/// use graphalgos::{prelude::*, algo::*};
///
/// struct Road { to: u32, km: u32 }
/// let adj = vec![vec![Road { to: 1, km: 5 }], vec![Road { to: 2, km: 3 }], vec![]];
///
/// let view = EdgeListView::new(&adj, |r: &Road| r.to);
/// assert_eq!(view.topological_sort(), vec![0, 1, 2]);
/// ```
pub struct EdgeListView<'a, E, F>
where
    F: Fn(&E) -> Node,
{
    edges: &'a [Vec<E>],
    index: F,
}

impl<'a, E, F> EdgeListView<'a, E, F>
where
    F: Fn(&E) -> Node,
{
    /// Wraps the adjacency list `edges`; targets are extracted with `index`.
    /// Targets are not validated, see [`EdgeListView::try_new`].
    pub fn new(edges: &'a [Vec<E>], index: F) -> Self {
        Self { edges, index }
    }

    /// Same as [`EdgeListView::new`] but checks that every edge target lies in `0..n`.
    pub fn try_new(edges: &'a [Vec<E>], index: F) -> Result<Self> {
        let n = node_from_index(edges.len());
        if let Some(node) = edges
            .iter()
            .flat_map(|row| row.iter().map(&index))
            .find(|&v| v >= n)
        {
            return Err(GraphError::NodeOutOfRange { node, n });
        }

        Ok(Self::new(edges, index))
    }

    /// Returns the edge payloads leaving `u`
    /// ** Panics if `u >= n` **
    pub fn edges_at(&self, u: Node) -> &'a [E] {
        &self.edges[u as usize]
    }

    /// Returns the target of an arbitrary edge payload
    pub fn target_of(&self, edge: &E) -> Node {
        (self.index)(edge)
    }
}

impl<E, F> GraphNodeOrder for EdgeListView<'_, E, F>
where
    F: Fn(&E) -> Node,
{
    fn number_of_nodes(&self) -> NumNodes {
        node_from_index(self.edges.len())
    }
}

impl<'v, E, F> AdjacencyList for EdgeListView<'v, E, F>
where
    F: Fn(&E) -> Node,
{
    type NeighborIter<'a>
        = std::iter::Map<std::slice::Iter<'a, E>, &'a F>
    where
        Self: 'a;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.edges[u as usize].iter().map(&self.index)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        node_from_index(self.edges[u as usize].len())
    }
}

impl<E, F> IndexedAdjacencyList for EdgeListView<'_, E, F>
where
    F: Fn(&E) -> Node,
{
    fn ith_neighbor(&self, u: Node, i: NumNodes) -> Node {
        (self.index)(&self.edges[u as usize][i as usize])
    }
}

impl<W, F> WeightedAdjacencyList<W> for EdgeListView<'_, (Node, W), F>
where
    W: Copy,
    F: Fn(&(Node, W)) -> Node,
{
    fn ith_weight(&self, u: Node, i: NumNodes) -> W {
        self.edges[u as usize][i as usize].1
    }
}
