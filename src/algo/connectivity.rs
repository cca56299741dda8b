/*!
# Strongly Connected Components

Tarjan's algorithm as a lazy iterator ([`StronglyConnectedComponents`]) plus derived structures:
the component list in topological order ([`Connectivity::tarjan_scc`]) and the condensation DAG
([`Connectivity::condensation`]).
*/

use std::iter::FusedIterator;

use itertools::Itertools;
use tracing::debug;

use super::*;

pub trait Connectivity: AdjacencyList + Sized {
    /// Returns an iterator over the strongly connected components of the graph.
    /// Components are emitted in **reverse** topological order of the condensation.
    fn strongly_connected_components(&self) -> StronglyConnectedComponents<'_, Self> {
        StronglyConnectedComponents::new(self)
    }

    /// Same as [`Connectivity::strongly_connected_components`], but includes SCCs of size 1
    /// if and only if the node has a self-loop
    fn strongly_connected_components_no_singletons(&self) -> StronglyConnectedComponents<'_, Self> {
        StronglyConnectedComponents::new(self).include_singletons(false)
    }

    /// Returns all strongly connected components in **topological** order of the condensation,
    /// i.e. if there is an edge from component `A` to component `B != A`, then `A` comes first.
    /// Within a component, nodes are listed in the order they are popped from Tarjan's stack.
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// let adj: Vec<Vec<Node>> = vec![vec![1], vec![0, 2], vec![]];
    /// assert_eq!(adj.tarjan_scc(), vec![vec![1, 0], vec![2]]);
    /// ```
    fn tarjan_scc(&self) -> Vec<Vec<Node>> {
        let mut sccs = self.strongly_connected_components().collect_vec();
        sccs.reverse();

        debug!(
            nodes = self.number_of_nodes(),
            components = sccs.len(),
            "computed strongly connected components"
        );
        sccs
    }

    /// Contracts every strongly connected component into a single node
    fn condensation(&self) -> Condensation {
        Condensation::new(self)
    }

    /// Returns *true* if every node can reach every other node.
    /// The empty graph is not considered strongly connected.
    fn is_strongly_connected(&self) -> bool {
        let mut sccs = self.strongly_connected_components();
        sccs.next().is_some_and(|first| first.len() == self.len()) && sccs.next().is_none()
    }

    /// Returns *true* if the directed graph contains no cycle (self-loops count as cycles)
    fn is_acyclic(&self) -> bool {
        self.strongly_connected_components_no_singletons()
            .next()
            .is_none()
    }
}

impl<G> Connectivity for G where G: AdjacencyList + Sized {}

/// Returns the strongly connected components of `graph` in topological order; see
/// [`Connectivity::tarjan_scc`]. `index` maps an edge to its target.
pub fn tarjan_scc<E, F>(graph: &[Vec<E>], index: F) -> Vec<Vec<Node>>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).tarjan_scc()
}

/// Implementation of Tarjan's Algorithm for Strongly Connected Components.
/// It is designed as an iterator that emits the nodes of one strongly connected component at a
/// time, in the order they leave Tarjan's stack. The components themselves are produced in the
/// reverse topological order of the SCCs (i.e. if each SCC were contracted into a single node).
/// Both orders are deterministic for a fixed edge order.
pub struct StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    idx: Node,

    states: Vec<NodeState>,
    potentially_unvisited: usize,

    include_singletons: bool,

    path_stack: Vec<Node>,

    call_stack: Vec<StackFrame<'a, G>>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,

            include_singletons: true,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// Each node that is not part of a circle is returned as its own SCC.
    /// By setting `include = false`, those nodes are not returned (which can lead to a significant
    /// performance boost)
    pub fn set_include_singletons(&mut self, include: bool) {
        self.include_singletons = include;
    }

    pub fn include_singletons(mut self, include: bool) -> Self {
        self.set_include_singletons(include);
        self
    }

    /// Just like in a classic DFS where we want to compute a spanning-forest, we will need to
    /// to visit each node at least once. We start we node 0, and cover all nodes reachable from
    /// there in `search`. Then, we search for an untouched node here, and start over.
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.len() {
            if !self.states[self.potentially_unvisited].visited {
                let v = node_from_index(self.potentially_unvisited);
                self.push_node(v, None);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    /// Put a pristine stack frame on the call stack. Roughly speaking, this is the first step
    /// to a recursive call of search.
    fn push_node(&mut self, node: Node, parent: Option<Node>) {
        self.call_stack.push(StackFrame {
            node,
            parent: parent.unwrap_or(node),
            initial_stack_len: 0,
            first_call: true,
            has_loop: false,
            neighbors: self.graph.neighbors_of(node),
        });
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        /*
        Tarjan's algorithm is typically described recursively. We use the explicit call stack
        `self.call_stack` instead, which (1) lets us pause after each component to build an
        iterator and (2) avoids stack overflows on deep graphs.

        On first visit of a node v it is assigned a DFS index and the same low_link value. The
        low_link stores the smallest known index of any node on the path stack known to be
        reachable from v. Eventually, all nodes in an SCC share the low_link of the unique node
        with this index, the root of the SCC.
        */

        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = node_from_index(self.path_stack.len());

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            for w in frame.neighbors.by_ref() {
                let w_state = self.states[w as usize];
                frame.has_loop |= w == v;

                if !w_state.visited {
                    self.push_node(w, Some(v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[v as usize].try_lower_link(w_state.index);
                }
            }

            let frame = self.call_stack.pop()?;
            let state = self.states[v as usize];

            self.states[frame.parent as usize].try_lower_link(state.low_link);

            if state.is_root() {
                if !self.include_singletons
                    && self.path_stack.last() == Some(&v)
                    && !frame.has_loop
                {
                    // skip producing component descriptor, since we have a singleton node
                    self.states[v as usize].on_stack = false;
                    self.path_stack.pop();
                } else {
                    // the component goes into the result in pop order, root last
                    let component = self
                        .path_stack
                        .drain(frame.initial_stack_len as usize..)
                        .rev()
                        .collect_vec();

                    for &w in &component {
                        self.states[w as usize].on_stack = false;
                    }

                    debug_assert_eq!(component.last(), Some(&v));

                    return Some(component);
                }
            }
        }

        None
    }
}

impl<G> Iterator for StronglyConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<Node>;

    /// Returns either a vector of node ids that form an SCC or None if no further SCC was found
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for StronglyConnectedComponents<'_, G> where G: AdjacencyList {}

struct StackFrame<'a, G>
where
    G: AdjacencyList + 'a,
{
    node: Node,
    parent: Node,
    initial_stack_len: Node,
    first_call: bool,
    has_loop: bool,
    neighbors: G::NeighborIter<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, u: Node) {
        debug_assert!(!self.visited);
        self.index = u;
        self.low_link = u;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: Node) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}

/// The DAG obtained by contracting every strongly connected component into a single node.
///
/// Component `i` of the condensation is `components[i]`; components are numbered in
/// topological order, so every edge of `dag` points from a smaller to a larger index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condensation {
    components: Vec<Vec<Node>>,
    component_of: Vec<Node>,
    dag: Vec<Vec<Node>>,
}

impl Condensation {
    /// Computes the condensation of `graph`
    pub fn new<G: AdjacencyList>(graph: &G) -> Self {
        let components = graph.tarjan_scc();

        let mut component_of = vec![INVALID_NODE; graph.len()];
        for (i, comp) in components.iter().enumerate() {
            for &u in comp {
                component_of[u as usize] = node_from_index(i);
            }
        }

        let dag = components
            .iter()
            .enumerate()
            .map(|(i, comp)| {
                let i = node_from_index(i);
                comp.iter()
                    .flat_map(|&u| graph.neighbors_of(u))
                    .map(|v| component_of[v as usize])
                    .filter(|&c| c != i)
                    .sorted_unstable()
                    .dedup()
                    .collect_vec()
            })
            .collect_vec();

        Self {
            components,
            component_of,
            dag,
        }
    }

    /// Number of strongly connected components
    pub fn number_of_components(&self) -> NumNodes {
        node_from_index(self.components.len())
    }

    /// Components in topological order
    pub fn components(&self) -> &[Vec<Node>] {
        &self.components
    }

    /// Index of the component containing `u`
    /// ** Panics if `u >= n` **
    pub fn component_of(&self, u: Node) -> Node {
        self.component_of[u as usize]
    }

    /// Adjacency list of the condensation DAG (deduplicated, sorted, no self-loops)
    pub fn dag(&self) -> &Vec<Vec<Node>> {
        &self.dag
    }

    /// Consumes the condensation, returning `(components, component_of, dag)`
    pub fn into_parts(self) -> (Vec<Vec<Node>>, Vec<Node>, Vec<Vec<Node>>) {
        (self.components, self.component_of, self.dag)
    }
}

/// Sorts the nodes in each component increasingly and then the components themselves lexicographically.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort();
    components
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::testing::*;

    fn scc_graph() -> Vec<Vec<Node>> {
        adjacency_from_edges(
            8,
            [
                (0, 1),
                (1, 2),
                (1, 4),
                (1, 5),
                (2, 6),
                (2, 3),
                (3, 2),
                (3, 7),
                (4, 0),
                (4, 5),
                (5, 6),
                (6, 5),
                (7, 3),
                (7, 6),
            ],
        )
    }

    #[test]
    pub fn scc() {
        let graph = scc_graph();

        let sccs = graph.strongly_connected_components().collect_vec();
        assert_eq!(sccs.len(), 3);
        assert!(sccs.iter().all(|c| !c.is_empty()));

        let sccs = sort_components(sccs);
        assert_eq!(sccs[0], [0, 1, 4]);
        assert_eq!(sccs[1], [2, 3, 7]);
        assert_eq!(sccs[2], [5, 6]);
    }

    #[test]
    pub fn scc_singletons() {
        // {0,1} and {4,5} are scc pairs, 2 is a loop, 3 is a singleton
        let graph = adjacency_from_edges(6, [(0, 1), (1, 0), (2, 2), (4, 5), (5, 4)]);

        {
            let sccs = sort_components(graph.strongly_connected_components().collect_vec());
            assert_eq!(sccs, vec![vec![0, 1], vec![2], vec![3], vec![4, 5]]);
        }

        {
            let sccs = sort_components(
                graph
                    .strongly_connected_components_no_singletons()
                    .collect_vec(),
            );
            assert_eq!(sccs, vec![vec![0, 1], vec![2], vec![4, 5]]);
        }

        assert!(!graph.is_acyclic());
        assert!(adjacency_from_edges(3, [(0, 1), (1, 2), (0, 2)]).is_acyclic());
    }

    #[test]
    fn tarjan_scc_reference_dag() {
        let graph = dag_neg1();
        let sccs = tarjan_scc(&graph, |e| e.0);
        assert_eq!(
            sccs,
            [9, 8, 10, 7, 5, 6, 3, 2, 1, 0, 4].map(|u| vec![u]).to_vec()
        );
    }

    #[test]
    fn tarjan_scc_reference_cyclic() {
        let graph = cyc_neg1();
        assert_eq!(
            tarjan_scc(&graph, |e| e.0),
            vec![vec![7], vec![1, 3, 2, 0], vec![6, 5, 4]]
        );
    }

    #[test]
    fn condensation() {
        let graph = scc_graph();
        let cond = graph.condensation();
        assert_eq!(cond.number_of_components(), 3);

        let c = |u| cond.component_of(u);
        assert_eq!(c(0), c(4));
        assert_eq!(c(2), c(7));
        assert_eq!(c(5), c(6));
        assert!(c(0) < c(2) && c(2) < c(5));

        assert_eq!(cond.dag()[c(0) as usize], vec![c(2), c(5)]);
        assert_eq!(cond.dag()[c(2) as usize], vec![c(5)]);
        assert!(cond.dag()[c(5) as usize].is_empty());
    }

    #[test]
    fn strongly_connected() {
        assert!(adjacency_from_edges(3, [(0, 1), (1, 2), (2, 0)]).is_strongly_connected());
        assert!(!adjacency_from_edges(3, [(0, 1), (1, 2), (2, 1)]).is_strongly_connected());
        assert!(adjacency_from_edges(1, Vec::<Edge>::new()).is_strongly_connected());
        assert!(!Vec::<Vec<Node>>::new().is_strongly_connected());
    }

    #[test]
    fn scc_random_partition() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for i in 0..10 {
            let n = 300;
            let graph = random_digraph(rng, n, 0.3 * i as f64);
            let sccs = graph.tarjan_scc();

            // every node exactly once
            let mut seen = vec![false; n as usize];
            for &u in sccs.iter().flatten() {
                assert!(!seen[u as usize]);
                seen[u as usize] = true;
            }
            assert!(seen.iter().all(|&x| x));

            // mutual reachability inside, topological order between components
            let reach = (0..n)
                .map(|u| brute_force_reachable(&graph, u))
                .collect_vec();
            let cond = graph.condensation();
            for u in 0..n {
                for v in 0..n {
                    let same = cond.component_of(u) == cond.component_of(v);
                    if u != v {
                        assert_eq!(same, reach[u as usize][v as usize] && reach[v as usize][u as usize]);
                    }
                    if !same && reach[u as usize][v as usize] {
                        assert!(cond.component_of(u) < cond.component_of(v));
                    }
                }
            }

            // the condensation is acyclic
            assert!(cond.dag().is_acyclic());
        }
    }

    #[test]
    fn scc_long_cycle() {
        // assert that we can deal with very deep stacks
        let n: Node = 100_000;
        let graph = adjacency_from_edges(n, (0..n).map(|u| (u, (u + 1) % n)));
        let sccs = graph.tarjan_scc();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n as usize);
        assert!(graph.is_strongly_connected());
    }
}
