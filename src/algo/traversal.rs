/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- Generic marked-search iterators (BFS, DFS, with and without predecessor tracking) that mark a
  node as soon as it enters the frontier.
- [`DepthFirstEvents`], an explicit-stack depth-first traversal that reports the same
  enter/revisit/leave events a recursive DFS would produce, without touching the call stack.
- Topological ordering for directed acyclic graphs.
- A high-level [`Traversal`] trait that exposes traversal algorithms directly as methods on
  graph data structures.
*/

use super::*;
use itertools::Itertools;
use std::{collections::VecDeque, marker::PhantomData, ops::Range};

/// Common interface for maintaining and querying visited-states
/// during a traversal.
pub trait TraversalState<S>
where
    S: Set<Node>,
{
    /// Returns a reference to the set of visited nodes.
    fn visited(&self) -> &S;

    /// Checks if a given node `u` has already been visited.
    fn did_visit_node(&self, u: Node) -> bool {
        self.visited().contains(&u)
    }
}

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **node currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;

    /// Returns a pair `(predecessor, item)` where the predecessor
    /// may be `None` if not tracked.
    fn predecessor_with_item(&self) -> (Option<Node>, Node) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// Compact representation of `(predecessor, node)` used for
/// traversals with parent tracking.
///
/// Internally, the absence of a predecessor is encoded by
/// setting both tuple entries to the same node value.
pub type PredecessorOfNode = (Node, Node);
impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }
    fn item(&self) -> Node {
        self.1
    }
    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// The frontier of a marked search.
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// Creates a new sequencer initialized with a single node.
    fn init(u: T) -> Self;

    /// Pushes a node into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    fn init(u: T) -> Self {
        vec![u]
    }
    fn push(&mut self, u: T) {
        self.push(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic marked-search iterator supporting BFS and DFS variants.
///
/// Maintains an explicit frontier (queue or stack) of nodes to visit and a set of visited
/// nodes. A node is marked when it is pushed, so every node is yielded at most once. With a
/// stack frontier this is *not* a classic recursive DFS order; use [`DepthFirstEvents`] when the
/// recursive order matters.
pub struct TraversalSearch<'a, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    graph: &'a G,
    visited: V,
    sequencer: S,
    stop_at: Option<Node>,
    _item: PhantomData<I>,
}

/// Type alias for a **breadth-first search** iterator using a queue (`VecDeque`).
pub type BFSWithSet<'a, G, V> = TraversalSearch<'a, G, VecDeque<Node>, Node, V>;

/// Type alias for a marked **depth-first search** iterator using a stack (`Vec`).
pub type DFSWithSet<'a, G, V> = TraversalSearch<'a, G, Vec<Node>, Node, V>;

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from a given starting node.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node, NodeBitSet>;

/// A marked DFS traversal iterator over the graph, starting from a given node.
pub type DFS<'a, G> = TraversalSearch<'a, G, Vec<Node>, Node, NodeBitSet>;

/// A BFS traversal iterator that records predecessor information,
/// producing a spanning tree of the search.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode, NodeBitSet>;

/// A marked DFS traversal iterator that records predecessor information.
pub type DFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, Vec<PredecessorOfNode>, PredecessorOfNode, NodeBitSet>;

impl<G, S, I, V> WithGraphRef<G> for TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    fn graph_ref(&self) -> &G {
        self.graph
    }
}

impl<G, S, I, V> TraversalState<V> for TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    fn visited(&self) -> &V {
        &self.visited
    }
}

impl<G, S, I, V> Iterator for TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.insert(v) {
                    self.sequencer.push(I::new_with_predecessor(u, v));
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.sequencer.cardinality(),
            Some(self.graph.len() - self.visited.len() + self.sequencer.cardinality()),
        )
    }
}

impl<'a, G, S, I, V> TraversalSearch<'a, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node> + FromCapacity,
{
    /// Creates a new traversal iterator starting from `start`.
    pub fn new(graph: &'a G, start: Node) -> Self {
        let len = graph.len();
        let mut visited = V::from_total_used_capacity(len, len);
        visited.insert(start);
        Self {
            graph,
            visited,
            sequencer: S::init(I::new_without_predecessor(start)),
            stop_at: None,
            _item: PhantomData,
        }
    }
}

impl<G, S, I, V> TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Excludes a node from the search. It will be treated as if it was already visited,
    /// i.e. no edges to or from that node will be taken.
    ///
    /// # Warning
    /// Calling this method has no effect if the node is already on the stack. It is therefore highly
    /// recommended to call this method directly after the constructor.
    pub fn exclude_node(&mut self, u: Node) {
        self.visited.insert(u);
    }

    /// Builder variant of [`TraversalSearch::exclude_node`].
    pub fn with_node_excluded(mut self, u: Node) -> Self {
        self.exclude_node(u);
        self
    }

    /// Consumes the traversal search and returns the visited set after exhausting it.
    pub fn into_visited(mut self) -> V {
        self.by_ref().for_each(drop);
        self.visited
    }

    /// Consumes the traversal search and returns true iff the requested node can be visited, i.e.
    /// if there exists a directed path of length at least one from the start node to `u`
    /// (or `u` is the start node itself and lies on a cycle).
    ///
    /// # Warning
    /// It is undefined behavior to call the method on a partially executed iterator.
    pub fn is_node_reachable(mut self, u: Node) -> bool {
        assert_eq!(self.sequencer.cardinality(), 1);
        self.visited.remove(&u);
        self.next();
        self.any(|v| v.item() == u)
    }
}

/// Extension trait for traversal iterators that return `PredecessorOfNode`,
/// enabling extraction of the implied spanning tree structure (parents, depths).
pub trait TraversalTree<'a, G>:
    WithGraphRef<G> + Iterator<Item = PredecessorOfNode> + Sized
where
    G: 'a + AdjacencyList,
{
    /// Consumes the iterator and records the parent of each node in the implied
    /// traversal tree into the provided slice `tree`.
    ///
    /// - For each visited node `v`, `tree[v]` is set to its predecessor.
    /// - Unvisited entries remain unchanged.
    fn parent_array_into(&mut self, tree: &mut [Node]) {
        for pred_with_item in self.by_ref() {
            if let Some(p) = pred_with_item.predecessor() {
                tree[pred_with_item.item() as usize] = p;
            }
        }
    }

    /// Constructs a fresh parent array of size `graph.len()` where
    /// each node is initially set to be its own parent.
    /// Then fills in the traversal tree structure using `parent_array_into`.
    fn parent_array(&mut self) -> Vec<Node> {
        let mut tree: Vec<_> = self.graph_ref().vertices().collect();
        self.parent_array_into(&mut tree);
        tree
    }

    /// Consumes the iterator and computes the depth of each visited node in
    /// the traversal tree (root depth = 0).
    ///
    /// - For each visited node `v`, `depths[v]` is set accordingly.
    /// - Unvisited entries remain unchanged.
    ///
    /// For a BFS these are exactly the hop distances from the start node.
    fn depths_into(&mut self, depths: &mut [Node]) {
        for pred_with_item in self.by_ref() {
            depths[pred_with_item.item() as usize] = pred_with_item
                .predecessor()
                .map_or(0, |p| depths[p as usize] + 1);
        }
    }

    /// Constructs a fresh depth array of size `graph.len()` initialized with [`INVALID_NODE`].
    /// Then fills in the traversal tree depths using `depths_into`.
    fn depths(&mut self) -> Vec<Node> {
        let mut depths: Vec<_> = vec![INVALID_NODE; self.graph_ref().len()];
        self.depths_into(&mut depths);
        depths
    }
}

impl<'a, G, S, V> TraversalTree<'a, G> for TraversalSearch<'a, G, S, PredecessorOfNode, V>
where
    G: AdjacencyList,
    S: NodeSequencer<PredecessorOfNode>,
    V: Set<Node>,
{
}

/// Events produced by [`DepthFirstEvents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// `node` was discovered via the tree edge `parent -> node`; roots have no parent.
    Enter { node: Node, parent: Option<Node> },
    /// The edge `from -> to` points to a node that was discovered earlier
    /// (back, forward, cross, or the reverse of a tree edge in undirected graphs).
    Revisit { from: Node, to: Node },
    /// All edges of `node` have been explored.
    Leave { node: Node, parent: Option<Node> },
}

/// Explicit-stack depth-first search reporting [`DfsEvent`]s.
///
/// The events are exactly those of the textbook recursive DFS that scans neighbors in edge
/// order and starts new trees at the undiscovered roots in the order given. Instead of the call
/// stack, a vector of `(node, cursor)` frames is used, so arbitrary deep graphs are fine.
///
/// # Examples
/// ```
/// use graphalgos::{prelude::*, algo::*};
///
/// let adj: Vec<Vec<Node>> = vec![vec![1], vec![0]];
/// let events: Vec<_> = adj.depth_first_events().collect();
/// assert_eq!(
///     events,
///     vec![
///         DfsEvent::Enter { node: 0, parent: None },
///         DfsEvent::Enter { node: 1, parent: Some(0) },
///         DfsEvent::Revisit { from: 1, to: 0 },
///         DfsEvent::Leave { node: 1, parent: Some(0) },
///         DfsEvent::Leave { node: 0, parent: None },
///     ]
/// );
/// ```
pub struct DepthFirstEvents<'a, G, R = Range<Node>>
where
    G: IndexedAdjacencyList,
    R: Iterator<Item = Node>,
{
    graph: &'a G,
    roots: R,
    discovered: NodeBitSet,
    stack: Vec<(Node, NumNodes)>,
}

impl<'a, G> DepthFirstEvents<'a, G>
where
    G: IndexedAdjacencyList,
{
    /// Creates a traversal that eventually visits every node, starting trees at `0, 1, ...`
    pub fn new(graph: &'a G) -> Self {
        Self::with_roots(graph, graph.vertices())
    }
}

impl<'a, G, R> DepthFirstEvents<'a, G, R>
where
    G: IndexedAdjacencyList,
    R: Iterator<Item = Node>,
{
    /// Creates a traversal that only starts trees at the provided roots (in that order).
    pub fn with_roots<I>(graph: &'a G, roots: I) -> Self
    where
        I: IntoIterator<IntoIter = R>,
    {
        Self {
            graph,
            roots: roots.into_iter(),
            discovered: graph.vertex_bitset_unset(),
            stack: Vec::with_capacity(32),
        }
    }
}

impl<G, R> Iterator for DepthFirstEvents<'_, G, R>
where
    G: IndexedAdjacencyList,
    R: Iterator<Item = Node>,
{
    type Item = DfsEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((u, cursor)) = self.stack.last_mut() {
                let u = *u;
                if *cursor < self.graph.degree_of(u) {
                    let v = self.graph.ith_neighbor(u, *cursor);
                    *cursor += 1;

                    if self.discovered.set_bit(v) {
                        return Some(DfsEvent::Revisit { from: u, to: v });
                    }

                    self.stack.push((v, 0));
                    return Some(DfsEvent::Enter {
                        node: v,
                        parent: Some(u),
                    });
                }

                self.stack.pop();
                let parent = self.stack.last().map(|&(p, _)| p);
                return Some(DfsEvent::Leave { node: u, parent });
            }

            let root = self.roots.next()?;
            if !self.discovered.set_bit(root) {
                self.stack.push((root, 0));
                return Some(DfsEvent::Enter {
                    node: root,
                    parent: None,
                });
            }
        }
    }
}

/// Provides convenient traversal methods (BFS, DFS, topological order, etc.)
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// let adj: Vec<Vec<Node>> = vec![vec![1, 2], vec![3], vec![], vec![]];
    /// let order: Vec<_> = adj.bfs(0).collect();
    /// assert_eq!(order, vec![0, 1, 2, 3]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns a marked-search iterator with stack frontier starting at `start`.
    fn dfs(&self, start: Node) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Returns a marked DFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    fn dfs_with_predecessor(&self, start: Node) -> DFSWithPredecessor<'_, Self> {
        DFSWithPredecessor::new(self, start)
    }

    /// Returns an explicit-stack depth-first traversal over all nodes.
    fn depth_first_events(&self) -> DepthFirstEvents<'_, Self>
    where
        Self: IndexedAdjacencyList,
    {
        DepthFirstEvents::new(self)
    }

    /// Returns an explicit-stack depth-first traversal starting trees only at `roots`.
    fn depth_first_events_from<I>(&self, roots: I) -> DepthFirstEvents<'_, Self, I::IntoIter>
    where
        Self: IndexedAdjacencyList,
        I: IntoIterator<Item = Node>,
    {
        DepthFirstEvents::with_roots(self, roots)
    }

    /// Returns the nodes in depth-first postorder (every node after all nodes it discovered).
    fn dfs_postorder(&self) -> Vec<Node>
    where
        Self: IndexedAdjacencyList,
    {
        self.depth_first_events()
            .filter_map(|event| match event {
                DfsEvent::Leave { node, .. } => Some(node),
                _ => None,
            })
            .collect()
    }

    /// Returns a **topological order** of a directed acyclic graph: for every edge `(u, v)`,
    /// `u` precedes `v`.
    ///
    /// The order is the reversed postorder of a depth-first search that is started at the
    /// nodes without incoming edges in increasing order. On cyclic graphs the result is
    /// unspecified (nodes on or behind a cycle may be missing); check with
    /// [`Connectivity::is_acyclic`] first.
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// let adj: Vec<Vec<Node>> = vec![vec![2], vec![0], vec![]];
    /// assert_eq!(adj.topological_sort(), vec![1, 0, 2]);
    /// ```
    fn topological_sort(&self) -> Vec<Node>
    where
        Self: IndexedAdjacencyList,
    {
        let sources = self
            .in_degrees()
            .into_iter()
            .enumerate()
            .filter_map(|(u, d)| (d == 0).then_some(node_from_index(u)))
            .collect_vec();

        let mut order = self
            .depth_first_events_from(sources)
            .filter_map(|event| match event {
                DfsEvent::Leave { node, .. } => Some(node),
                _ => None,
            })
            .collect_vec();

        order.reverse();
        order
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

/// Returns the in-degree of every node of `graph`; `index` maps an edge to its target.
pub fn in_degrees<E, F>(graph: &[Vec<E>], index: F) -> Vec<NumNodes>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).in_degrees()
}

/// Returns a topological order of the DAG `graph`; see [`Traversal::topological_sort`].
pub fn topological_sort<E, F>(graph: &[Vec<E>], index: F) -> Vec<Node>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).topological_sort()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn bfs_order() {
        //  / 2 --- \
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = adjacency_from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);

        assert_eq!(graph.bfs(1).collect_vec(), vec![1, 2, 0, 4, 5, 3]);
        assert_eq!(BFS::new(&graph, 5).collect_vec(), vec![5, 4, 3]);
    }

    #[test]
    fn bfs_with_predecessor() {
        let graph = adjacency_from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);

        let mut edges: Vec<_> = graph
            .bfs_with_predecessor(1)
            .map(|x| x.predecessor_with_item())
            .collect();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                (None, 1),
                (Some(0), 5),
                (Some(1), 0),
                (Some(1), 2),
                (Some(2), 4),
                (Some(4), 3)
            ]
        );
    }

    #[test]
    fn test_stopper() {
        let graph = adjacency_from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.bfs(0).collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(graph.bfs(0).stop_at(1).collect_vec(), vec![0, 1]);
    }

    #[test]
    fn bfs_tree_and_depths() {
        let graph = adjacency_from_edges(7, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);
        assert_eq!(graph.bfs_with_predecessor(1).parent_array(), vec![1, 1, 1, 4, 2, 0, 6]);
        assert_eq!(
            graph.bfs_with_predecessor(1).depths(),
            vec![1, 0, 1, 3, 2, 2, INVALID_NODE]
        );
    }

    #[test]
    fn marked_dfs_discovery_order() {
        // nodes are marked when pushed, so 0's neighbors are all discovered before any of
        // their successors
        let graph = adjacency_from_edges(5, [(0, 1), (0, 2), (2, 3), (1, 4), (4, 3)]);
        let visited = DFSWithSet::<_, NodeSet>::new(&graph, 0).into_visited();
        assert_eq!(visited.into_vec(), vec![0, 1, 2, 3, 4]);

        assert_eq!(graph.dfs(0).collect_vec(), vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn reachability_and_exclusion() {
        let graph = adjacency_from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 0), (3, 4), (4, 5)]);
        assert!(graph.bfs(0).is_node_reachable(0));
        assert!(!graph.bfs(4).is_node_reachable(4));
        assert!(graph.bfs(4).is_node_reachable(5));
        assert!(!graph.bfs(0).with_node_excluded(3).is_node_reachable(4));
    }

    #[test]
    fn depth_first_events_match_recursion() {
        let graph = adjacency_from_edges(5, [(0, 1), (1, 2), (2, 0), (0, 3), (4, 3)]);
        let events = graph.depth_first_events().collect_vec();
        assert_eq!(
            events,
            vec![
                DfsEvent::Enter { node: 0, parent: None },
                DfsEvent::Enter { node: 1, parent: Some(0) },
                DfsEvent::Enter { node: 2, parent: Some(1) },
                DfsEvent::Revisit { from: 2, to: 0 },
                DfsEvent::Leave { node: 2, parent: Some(1) },
                DfsEvent::Leave { node: 1, parent: Some(0) },
                DfsEvent::Enter { node: 3, parent: Some(0) },
                DfsEvent::Leave { node: 3, parent: Some(0) },
                DfsEvent::Leave { node: 0, parent: None },
                DfsEvent::Enter { node: 4, parent: None },
                DfsEvent::Revisit { from: 4, to: 3 },
                DfsEvent::Leave { node: 4, parent: None },
            ]
        );

        assert_eq!(graph.dfs_postorder(), vec![2, 1, 3, 0, 4]);
    }

    #[test]
    fn depth_first_events_custom_roots() {
        let graph = adjacency_from_edges(4, [(0, 1), (2, 1), (3, 3)]);
        let entered = graph
            .depth_first_events_from([2, 0, 2])
            .filter_map(|e| match e {
                DfsEvent::Enter { node, .. } => Some(node),
                _ => None,
            })
            .collect_vec();
        assert_eq!(entered, vec![2, 1, 0]);
    }

    #[test]
    fn in_degrees_reference() {
        let graph = dag_neg1();
        assert_eq!(
            in_degrees(&graph, |e| e.0),
            vec![3, 2, 1, 0, 3, 0, 2, 0, 0, 0, 1]
        );
    }

    #[test]
    fn topological_sort_reference() {
        let graph = dag_neg1();
        assert_eq!(
            topological_sort(&graph, |e| e.0),
            vec![9, 8, 10, 7, 5, 6, 3, 1, 2, 0, 4]
        );
    }

    #[test]
    fn topological_sort_random_dags() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for n in [1, 5, 20, 100] {
            for _ in 0..20 {
                let graph = random_dag(rng, n, 3.0);
                let order = graph.topological_sort();
                assert_eq!(order.len(), n as usize);

                let mut rank = vec![INVALID_NODE; n as usize];
                for (i, &u) in order.iter().enumerate() {
                    assert_eq!(rank[u as usize], INVALID_NODE);
                    rank[u as usize] = i as Node;
                }

                for Edge(u, v) in graph.edges(false) {
                    assert!(rank[u as usize] < rank[v as usize]);
                }
            }
        }
    }

    #[test]
    fn deep_path() {
        // a recursive DFS would overflow the stack here
        let n: Node = 200_000;
        let graph = adjacency_from_edges(n, (0..n - 1).map(|u| (u, u + 1)));
        assert_eq!(graph.topological_sort(), (0..n).collect_vec());
        assert_eq!(graph.dfs_postorder(), (0..n).rev().collect_vec());
    }
}
