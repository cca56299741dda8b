/*!
# Chain Decomposition & Biconnectivity

All routines expect an **undirected** graph stored symmetrically (edge `{u, v}` is listed in the
rows of both `u` and `v`); the graph may be disconnected and may contain parallel edges.

Two approaches are provided:
- [`Biconnectivity::chain_decomposition`] (Schmidt's chain decomposition) from which cut vertices,
  cut edges and biconnected components are derived,
- [`Biconnectivity::cut_vertices_and_edges`], a single low-point search.

Both are based on [`DepthFirstEvents`] and therefore work on arbitrarily deep graphs.
*/

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use stream_bitset::prelude::*;
use tracing::debug;

use super::*;

/// A path or cycle produced by the chain decomposition: one back edge followed by tree edges
/// walking up the DFS tree. The chain is a cycle iff its first and last node coincide.
pub type Chain = Vec<Node>;

pub trait Biconnectivity: IndexedAdjacencyList {
    /// Computes the chain decomposition of the graph.
    ///
    /// Returns one list of chains per DFS tree (i.e. per connected component, with trees started
    /// at the smallest undiscovered node). For every node `v` in preorder and every back edge
    /// `v - u` to a descendant `u` (in edge order), the chain `v, u, parent(u), ...` is emitted;
    /// it stops at the first node that was already part of an earlier chain.
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// // triangle 0-1-2 with a pendant node 3
    /// let adj = symmetric_adjacency_from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)]);
    /// assert_eq!(adj.chain_decomposition(), vec![vec![vec![0, 2, 1, 0]]]);
    /// ```
    fn chain_decomposition(&self) -> Vec<Vec<Chain>> {
        let n = self.len();
        let mut parent = vec![INVALID_NODE; n];
        let mut discovery = vec![INVALID_NODE; n];
        let mut preorder = Vec::with_capacity(n);
        let mut tree_starts = Vec::new();

        for event in self.depth_first_events() {
            if let DfsEvent::Enter { node, parent: p } = event {
                match p {
                    Some(p) => parent[node as usize] = p,
                    None => tree_starts.push(preorder.len()),
                }
                discovery[node as usize] = node_from_index(preorder.len());
                preorder.push(node);
            }
        }

        let mut visited = self.vertex_bitset_unset();
        // the first copy of a tree edge (seen from the parent) is no back edge
        let mut tree_edge_skipped = self.vertex_bitset_unset();

        let decomposition = tree_starts
            .iter()
            .copied()
            .chain([n])
            .tuple_windows()
            .map(|(begin, end)| {
                let mut chains = Vec::new();
                for &v in &preorder[begin..end] {
                    visited.set_bit(v);

                    for u in self.neighbors_of(v) {
                        if discovery[u as usize] <= discovery[v as usize] {
                            continue;
                        }

                        if parent[u as usize] == v && !tree_edge_skipped.set_bit(u) {
                            continue;
                        }

                        let mut chain = vec![v];
                        let mut w = u;
                        while !visited.set_bit(w) {
                            chain.push(w);
                            w = parent[w as usize];
                        }
                        chain.push(w);
                        chains.push(chain);
                    }
                }
                chains
            })
            .collect_vec();

        debug!(
            trees = decomposition.len(),
            chains = decomposition.iter().map(|c| c.len()).sum::<usize>(),
            "computed chain decomposition"
        );

        decomposition
    }

    /// Derives the cut vertices (articulation points) from a chain decomposition of this graph.
    ///
    /// A node is a cut vertex iff it is the first node of a cycle chain that is not the first
    /// chain of its tree, or it is an endpoint of a cut edge with a further neighbor (self-loops
    /// do not count).
    /// Returned in increasing order.
    fn cut_vertices_from_chains(&self, chains: &[Vec<Chain>]) -> Vec<Node> {
        let mut cut = chains
            .iter()
            .flat_map(|tree| tree.iter().skip(1))
            .filter(|chain| is_cycle(chain))
            .map(|chain| chain[0])
            .collect_vec();

        // a bridge endpoint separates iff it has a neighbor besides the other endpoint
        for Edge(u, v) in self.cut_edges_from_chains(chains) {
            for (x, other) in [(u, v), (v, u)] {
                if self.neighbors_of(x).any(|y| y != x && y != other) {
                    cut.push(x);
                }
            }
        }

        cut.sort_unstable();
        cut.dedup();
        cut
    }

    /// Derives the cut edges (bridges) from a chain decomposition of this graph: exactly the
    /// edges not covered by any chain. Edges are normalized and returned in sorted order.
    fn cut_edges_from_chains(&self, chains: &[Vec<Chain>]) -> Vec<Edge> {
        let covered: FxHashSet<Edge> = chains
            .iter()
            .flatten()
            .flat_map(|chain| {
                chain
                    .iter()
                    .tuple_windows()
                    .map(|(&a, &b)| Edge(a, b).normalized())
            })
            .collect();

        self.edges(true)
            .filter(|e| !e.is_loop() && !covered.contains(e))
            .sorted()
            .dedup()
            .collect()
    }

    /// Computes cut vertices and cut edges in a single low-point search.
    ///
    /// Both lists are sorted; edges are normalized. Only one copy of the edge to the DFS parent
    /// is ignored, so parallel edges never form a bridge.
    fn cut_vertices_and_edges(&self) -> (Vec<Node>, Vec<Edge>) {
        LowPointSearch::new(self).compute()
    }
}

impl<G> Biconnectivity for G where G: IndexedAdjacencyList {}

/// Groups the nodes of the graph into biconnected components using its chain decomposition.
///
/// Every cycle chain opens a new component; a path chain joins the component owning the tree
/// edge into its last node. Nodes are listed in order of first appearance and a cut vertex
/// appears in every component it belongs to. Bridges do not form components of their own.
pub fn biconnected_components(chains: &[Vec<Chain>]) -> Vec<Vec<Node>> {
    let mut components: Vec<Vec<Node>> = Vec::new();
    // child endpoint of a tree edge -> component containing that edge
    let mut owner: FxHashMap<Node, usize> = FxHashMap::default();

    for chain in chains.iter().flatten() {
        let Some((&last, inner)) = chain.split_last() else {
            continue;
        };
        let interior = inner.get(1..).unwrap_or_default();

        let component = if is_cycle(chain) {
            components.push(inner.to_vec());
            components.len() - 1
        } else {
            let component = *owner
                .get(&last)
                .expect("path chain must end on a tree edge of an earlier chain");
            components[component].extend_from_slice(interior);
            component
        };

        owner.extend(interior.iter().map(|&u| (u, component)));
    }

    components
}

fn is_cycle(chain: &[Node]) -> bool {
    chain.len() > 1 && chain.first() == chain.last()
}

/// Chain decomposition of `graph`; see [`Biconnectivity::chain_decomposition`].
pub fn chain_decomposition<E, F>(graph: &[Vec<E>], index: F) -> Vec<Vec<Chain>>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).chain_decomposition()
}

/// Cut vertices of `graph` derived from its chain decomposition; see
/// [`Biconnectivity::cut_vertices_from_chains`].
pub fn cut_vertices<E, F>(graph: &[Vec<E>], index: F, chains: &[Vec<Chain>]) -> Vec<Node>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).cut_vertices_from_chains(chains)
}

/// Cut edges of `graph` derived from its chain decomposition; see
/// [`Biconnectivity::cut_edges_from_chains`].
pub fn cut_edges<E, F>(graph: &[Vec<E>], index: F, chains: &[Vec<Chain>]) -> Vec<Edge>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).cut_edges_from_chains(chains)
}

/// Cut vertices and cut edges of `graph` via low points; see
/// [`Biconnectivity::cut_vertices_and_edges`].
pub fn cut_vertices_and_edges<E, F>(graph: &[Vec<E>], index: F) -> (Vec<Node>, Vec<Edge>)
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).cut_vertices_and_edges()
}

struct LowPointSearch<'a, G>
where
    G: IndexedAdjacencyList,
{
    graph: &'a G,
    nodes_info: Vec<NodeInfo>,
    time: Node,
    parent_edge_skipped: NodeBitSet,
    cut_vertices: NodeBitSet,
    bridges: Vec<Edge>,
}

impl<'a, G> LowPointSearch<'a, G>
where
    G: IndexedAdjacencyList,
{
    fn new(graph: &'a G) -> Self {
        Self {
            graph,
            nodes_info: vec![NodeInfo::default(); graph.len()],
            time: 0,
            parent_edge_skipped: graph.vertex_bitset_unset(),
            cut_vertices: graph.vertex_bitset_unset(),
            bridges: Vec::new(),
        }
    }

    fn compute(mut self) -> (Vec<Node>, Vec<Edge>) {
        let mut root_children = 0;

        for event in self.graph.depth_first_events() {
            match event {
                DfsEvent::Enter { node, parent } => {
                    if parent.is_none() {
                        root_children = 0;
                    }

                    self.nodes_info[node as usize] = NodeInfo {
                        parent: parent.unwrap_or(INVALID_NODE),
                        discovery: self.time,
                        low: self.time,
                    };
                    self.time += 1;
                }

                DfsEvent::Revisit { from, to } => {
                    if self.nodes_info[from as usize].parent == to
                        && !self.parent_edge_skipped.set_bit(from)
                    {
                        continue;
                    }

                    let to_disc = self.nodes_info[to as usize].discovery;
                    self.nodes_info[from as usize].update_low(to_disc);
                }

                DfsEvent::Leave {
                    node,
                    parent: Some(parent),
                } => {
                    let info = self.nodes_info[node as usize];
                    self.nodes_info[parent as usize].update_low(info.low);

                    if info.low == info.discovery {
                        self.bridges.push(Edge(parent, node).normalized());
                    }

                    let parent_info = self.nodes_info[parent as usize];
                    if parent_info.parent == INVALID_NODE {
                        root_children += 1;
                    } else if info.low >= parent_info.discovery {
                        self.cut_vertices.set_bit(parent);
                    }
                }

                DfsEvent::Leave { node, parent: None } => {
                    if root_children > 1 {
                        self.cut_vertices.set_bit(node);
                    }
                }
            }
        }

        self.bridges.sort_unstable();

        debug!(
            cut_vertices = self.cut_vertices.cardinality(),
            bridges = self.bridges.len(),
            "computed low points"
        );

        (self.cut_vertices.iter_set_bits().collect(), self.bridges)
    }
}

#[derive(Clone, Copy, Default)]
struct NodeInfo {
    parent: Node,
    discovery: Node,
    low: Node,
}

impl NodeInfo {
    fn update_low(&mut self, low: Node) {
        self.low = self.low.min(low);
    }
}
