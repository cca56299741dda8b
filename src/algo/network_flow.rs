/*!
# Maximum Flow

Two engines computing maximum `(s, t)`-flows on a dense capacity matrix:
- [`DinicFlow`]: level graphs built by BFS and blocking flows found with current-arc pointers,
- [`PushRelabelFlow`]: preflow push/relabel with FIFO or highest-label selection and an optional
  gap heuristic.

Both implement [`MaxFlow`] and are generic over the [`Numeric`] capacity type (integers, floats,
rationals). The capacities are never modified: every call of [`MaxFlow::calc_max_flow`] starts
from the zero flow, so an engine can be queried for many `(s, t)` pairs in a row.

The residual network ([`ResidualMatrix`]) implements [`AdjacencyList`], so the generic traversals
of this crate are used for level graphs and minimum cuts.

# Examples
```
use graphalgos::{prelude::*, algo::*};

let capacity = vec![vec![0, 3, 5], vec![0, 0, 2], vec![0, 0, 0]];
let mut dinic = DinicFlow::new(capacity.clone(), i32::MAX);
assert_eq!(dinic.calc_max_flow(0, 2), 7);
assert_eq!(dinic.flows(), vec![vec![0, 2, 5], vec![0, 0, 2], vec![0, 0, 0]]);

let mut push_relabel = PushRelabelFlow::new(capacity, i32::MAX).selection(Selection::HighestLabel);
assert_eq!(push_relabel.calc_max_flow(0, 2), 7);
```
*/

use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use super::*;
use crate::error::Result;

/// Common interface of the max-flow engines
pub trait MaxFlow<T: Numeric> {
    /// Shared access to the residual network of the last computation
    fn network(&self) -> &ResidualMatrix<T>;

    /// Computes the value of a maximum flow from `source` to `sink` on the original capacities.
    /// Afterwards [`MaxFlow::flows`] returns the flow realizing this value.
    /// `calc_max_flow(s, s)` is zero.
    /// ** Panics if `source >= n || sink >= n` **
    fn calc_max_flow(&mut self, source: Node, sink: Node) -> T;

    /// Same as [`MaxFlow::calc_max_flow`] but returns an error for nodes out of range
    fn checked_max_flow(&mut self, source: Node, sink: Node) -> Result<T> {
        let n = self.network().number_of_nodes();
        if let Some(node) = [source, sink].into_iter().find(|&u| u >= n) {
            return Err(GraphError::NodeOutOfRange { node, n });
        }

        Ok(self.calc_max_flow(source, sink))
    }

    /// Returns the flow matrix of the last computation: entry `[i][j]` is the (nonnegative) flow
    /// sent along `i -> j`. Opposite flows on antiparallel edges cancel each other.
    fn flows(&self) -> Vec<Vec<T>> {
        self.network().flows()
    }

    /// Returns the source side of a minimum cut of the last computation, i.e. all nodes
    /// reachable from the source in the residual network, in increasing order.
    /// Empty if no computation was run yet.
    fn min_cut(&self) -> Vec<Node> {
        self.network().source_side()
    }
}

/// Capacities and flow of a network on `n` nodes.
///
/// Flow on antiparallel edges is cancelled when pushed, so at most one of `flow(u, v)` and
/// `flow(v, u)` is nonzero and no intermediate value ever becomes negative (unsigned capacity
/// types work as well).
///
/// As [`AdjacencyList`], `v` is a neighbor of `u` iff the residual capacity of `u -> v` exceeds
/// epsilon (see [`Numeric::exceeds_epsilon`]); self-loops are ignored.
#[derive(Debug, Clone)]
pub struct ResidualMatrix<T> {
    capacity: Vec<Vec<T>>,
    flow: Vec<Vec<T>>,
    inf: T,
    source: Option<Node>,
}

impl<T: Numeric> ResidualMatrix<T> {
    /// Creates a network from a square capacity matrix; `inf` must exceed every path capacity.
    /// ** Panics if `capacity` is not square **
    pub fn new(capacity: Vec<Vec<T>>, inf: T) -> Self {
        let n = capacity.len();
        assert!(
            capacity.iter().all(|row| row.len() == n),
            "capacity matrix must be square"
        );
        Self {
            flow: vec![vec![T::zero(); n]; n],
            capacity,
            inf,
            source: None,
        }
    }

    /// Same as [`ResidualMatrix::new`] but returns an error if `capacity` is not square
    pub fn try_new(capacity: Vec<Vec<T>>, inf: T) -> Result<Self> {
        let expected = capacity.len();
        if let Some((row, len)) = capacity
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(GraphError::NotSquare { row, len, expected });
        }

        Ok(Self::new(capacity, inf))
    }

    /// Clears all flow and remembers `source` for cut queries
    pub fn reset(&mut self, source: Node) {
        self.flow
            .iter_mut()
            .for_each(|row| row.iter_mut().for_each(|f| *f = T::zero()));
        self.source = Some(source);
    }

    /// The `inf` sentinel the network was built with
    pub fn inf(&self) -> T {
        self.inf
    }

    /// Capacity of `u -> v`
    pub fn capacity(&self, u: Node, v: Node) -> T {
        self.capacity[u as usize][v as usize]
    }

    /// Flow sent along `u -> v`
    pub fn flow(&self, u: Node, v: Node) -> T {
        self.flow[u as usize][v as usize]
    }

    /// Remaining capacity of `u -> v`, including flow on `v -> u` that can be sent back
    pub fn residual(&self, u: Node, v: Node) -> T {
        self.capacity(u, v) - self.flow(u, v) + self.flow(v, u)
    }

    /// Sends `amount <= residual(u, v)` units along `u -> v`, cancelling flow on `v -> u` first
    pub fn push(&mut self, u: Node, v: Node, amount: T) {
        let (u, v) = (u as usize, v as usize);
        let cancelled = amount.min_of(self.flow[v][u]);
        self.flow[v][u] = self.flow[v][u] - cancelled;
        self.flow[u][v] = self.flow[u][v] + (amount - cancelled);
    }

    /// The flow matrix
    pub fn flows(&self) -> Vec<Vec<T>> {
        self.flow.clone()
    }

    /// Nodes reachable from the last source in the residual network (sorted)
    pub fn source_side(&self) -> Vec<Node> {
        match self.source {
            Some(s) => self.bfs(s).sorted_unstable().collect(),
            None => Vec::new(),
        }
    }

    /// Total flow leaving `u`
    pub fn outflow(&self, u: Node) -> T {
        self.flow[u as usize]
            .iter()
            .fold(T::zero(), |acc, &f| acc + f)
    }

    /// Total flow entering `u`
    pub fn inflow(&self, u: Node) -> T {
        self.flow
            .iter()
            .fold(T::zero(), |acc, row| acc + row[u as usize])
    }
}

impl<T: Numeric> GraphNodeOrder for ResidualMatrix<T> {
    fn number_of_nodes(&self) -> NumNodes {
        node_from_index(self.capacity.len())
    }
}

impl<T: Numeric> AdjacencyList for ResidualMatrix<T> {
    type NeighborIter<'a>
        = ResidualNeighbors<'a, T>
    where
        Self: 'a;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        ResidualNeighbors {
            network: self,
            node: u,
            next: 0,
        }
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        node_from_index(self.neighbors_of(u).count())
    }
}

/// Iterator over the residual neighbors of a node, see [`ResidualMatrix`]
pub struct ResidualNeighbors<'a, T> {
    network: &'a ResidualMatrix<T>,
    node: Node,
    next: Node,
}

impl<T: Numeric> Iterator for ResidualNeighbors<'_, T> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.network.number_of_nodes() {
            let v = self.next;
            self.next += 1;

            if v != self.node && self.network.residual(self.node, v).exceeds_epsilon() {
                return Some(v);
            }
        }

        None
    }
}

/// Dinic's algorithm: repeatedly builds the BFS level graph of the residual network and saturates
/// it with a blocking flow. The blocking flow is found by an explicit-stack DFS that keeps a
/// current-arc pointer per node. `O(n^2 m)`.
pub struct DinicFlow<T> {
    network: ResidualMatrix<T>,
    level: Vec<Node>,
    current_arc: Vec<Node>,
    path: Vec<Node>,
}

impl<T: Numeric> DinicFlow<T> {
    /// Creates an engine for the square matrix `capacity`; `inf` bounds every path capacity.
    /// ** Panics if `capacity` is not square **
    pub fn new(capacity: Vec<Vec<T>>, inf: T) -> Self {
        Self::from_network(ResidualMatrix::new(capacity, inf))
    }

    /// Same as [`DinicFlow::new`] but returns an error if `capacity` is not square
    pub fn try_new(capacity: Vec<Vec<T>>, inf: T) -> Result<Self> {
        Ok(Self::from_network(ResidualMatrix::try_new(capacity, inf)?))
    }

    fn from_network(network: ResidualMatrix<T>) -> Self {
        let n = network.len();
        Self {
            network,
            level: vec![INVALID_NODE; n],
            current_arc: vec![0; n],
            path: Vec::with_capacity(n),
        }
    }

    /// Computes BFS levels from `s`; returns *true* if `t` is reachable
    fn build_levels(&mut self, s: Node, t: Node) -> bool {
        self.level.fill(INVALID_NODE);
        let mut bfs = self.network.bfs_with_predecessor(s);
        bfs.depths_into(&mut self.level);
        self.level[t as usize] != INVALID_NODE
    }

    /// Finds one augmenting path in the level graph and saturates its bottleneck.
    /// Returns `None` once the level graph is blocked.
    fn augment(&mut self, s: Node, t: Node) -> Option<T> {
        let n = self.network.number_of_nodes();
        self.path.clear();
        self.path.push(s);

        loop {
            let u = *self.path.last()?;

            if u == t {
                let bottleneck = self
                    .path
                    .iter()
                    .tuple_windows()
                    .fold(self.network.inf(), |acc, (&a, &b)| {
                        acc.min_of(self.network.residual(a, b))
                    });

                for (&a, &b) in self.path.iter().tuple_windows() {
                    self.network.push(a, b, bottleneck);
                }
                return Some(bottleneck);
            }

            let next_level = self.level[u as usize] + 1;
            let mut advanced = false;
            while self.current_arc[u as usize] < n {
                let v = self.current_arc[u as usize];
                if self.level[v as usize] == next_level
                    && self.network.residual(u, v).exceeds_epsilon()
                {
                    self.path.push(v);
                    advanced = true;
                    break;
                }
                self.current_arc[u as usize] += 1;
            }

            if !advanced {
                // dead end: never enter `u` again in this phase
                self.path.pop();
                let &p = self.path.last()?;
                self.current_arc[p as usize] += 1;
            }
        }
    }
}

impl<T: Numeric> MaxFlow<T> for DinicFlow<T> {
    fn network(&self) -> &ResidualMatrix<T> {
        &self.network
    }

    fn calc_max_flow(&mut self, source: Node, sink: Node) -> T {
        self.network.reset(source);
        if source == sink {
            return T::zero();
        }

        let mut total = T::zero();
        let mut phases = 0usize;
        let mut augmentations = 0usize;

        while self.build_levels(source, sink) {
            phases += 1;
            self.current_arc.fill(0);

            while let Some(pushed) = self.augment(source, sink) {
                total = total + pushed;
                augmentations += 1;
            }
        }

        debug!(source, sink, phases, augmentations, "dinic max flow");

        total
    }
}

/// Order in which [`PushRelabelFlow`] discharges active nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Active nodes are processed in first-in first-out order, `O(n^3)`
    #[default]
    Fifo,
    /// The active node with the largest height is processed first, `O(n^2 sqrt(m))`
    HighestLabel,
}

/// Goldberg-Tarjan push-relabel algorithm.
///
/// The source starts at height `n` and saturates all its edges. Active nodes (positive excess)
/// push to admissible neighbors one level below and are relabeled otherwise. Heights may exceed
/// `n`, which lets excess that cannot reach the sink flow back to the source, so the final
/// preflow is a proper flow.
///
/// The engine is configured via builder/setter pairs before running it:
/// ```
/// use graphalgos::{prelude::*, algo::*};
///
/// let capacity = vec![vec![0.0, 5.0, 2.0], vec![7.0, 0.0, 4.0], vec![1.0, 3.0, 0.0]];
/// let mut engine = PushRelabelFlow::new(capacity, f64::INFINITY)
///     .selection(Selection::HighestLabel)
///     .gap_heuristic(false);
/// assert_eq!(engine.calc_max_flow(0, 1), 7.0);
/// ```
pub struct PushRelabelFlow<T> {
    network: ResidualMatrix<T>,
    selection: Selection,
    gap_heuristic: bool,

    height: Vec<Node>,
    excess: Vec<T>,
    current_arc: Vec<Node>,
    nodes_at_height: Vec<NumNodes>,

    active: NodeBitSet,
    queue: VecDeque<Node>,
    buckets: Vec<Vec<Node>>,
    highest: usize,

    source: Node,
    sink: Node,
    pushes: usize,
    relabels: usize,
    gaps: usize,
}

impl<T: Numeric> PushRelabelFlow<T> {
    /// Creates an engine for the square matrix `capacity`; `inf` bounds every path capacity.
    /// ** Panics if `capacity` is not square **
    pub fn new(capacity: Vec<Vec<T>>, inf: T) -> Self {
        Self::from_network(ResidualMatrix::new(capacity, inf))
    }

    /// Same as [`PushRelabelFlow::new`] but returns an error if `capacity` is not square
    pub fn try_new(capacity: Vec<Vec<T>>, inf: T) -> Result<Self> {
        Ok(Self::from_network(ResidualMatrix::try_new(capacity, inf)?))
    }

    fn from_network(network: ResidualMatrix<T>) -> Self {
        let n = network.len();
        Self {
            selection: Selection::default(),
            gap_heuristic: true,

            height: vec![0; n],
            excess: vec![T::zero(); n],
            current_arc: vec![0; n],
            nodes_at_height: vec![0; 2 * n + 1],

            active: network.vertex_bitset_unset(),
            queue: VecDeque::with_capacity(n),
            buckets: vec![Vec::new(); 2 * n + 1],
            highest: 0,

            source: 0,
            sink: 0,
            pushes: 0,
            relabels: 0,
            gaps: 0,

            network,
        }
    }

    /// Sets the order in which active nodes are discharged
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Sets the order in which active nodes are discharged
    pub fn selection(mut self, selection: Selection) -> Self {
        self.set_selection(selection);
        self
    }

    /// Enables/disables the gap heuristic: if no node remains at some height `h < n`, all nodes
    /// above `h` are cut off from the sink and are lifted beyond `n` at once.
    pub fn set_gap_heuristic(&mut self, enabled: bool) {
        self.gap_heuristic = enabled;
    }

    /// Enables/disables the gap heuristic, see [`PushRelabelFlow::set_gap_heuristic`]
    pub fn gap_heuristic(mut self, enabled: bool) -> Self {
        self.set_gap_heuristic(enabled);
        self
    }

    fn initialize(&mut self, source: Node, sink: Node) {
        let n = self.network.number_of_nodes();

        self.network.reset(source);
        self.height.fill(0);
        self.excess.fill(T::zero());
        self.current_arc.fill(0);
        self.nodes_at_height.fill(0);
        self.active.clear_all();
        self.queue.clear();
        self.buckets.iter_mut().for_each(|b| b.clear());
        self.highest = 0;

        self.source = source;
        self.sink = sink;
        self.pushes = 0;
        self.relabels = 0;
        self.gaps = 0;

        self.height[source as usize] = n;
        self.nodes_at_height[0] = n - 1;
        self.nodes_at_height[n as usize] = 1;

        for v in self.network.vertices() {
            let amount = self.network.residual(source, v);
            if v != source && amount.exceeds_epsilon() {
                // the excess of the source is never inspected, so it is not tracked
                self.network.push(source, v, amount);
                self.excess[v as usize] = self.excess[v as usize] + amount;
                self.activate(v);
            }
        }
    }

    fn activate(&mut self, v: Node) {
        if v == self.source
            || v == self.sink
            || !self.excess[v as usize].exceeds_epsilon()
            || self.active.set_bit(v)
        {
            return;
        }

        self.enqueue(v);
    }

    fn enqueue(&mut self, v: Node) {
        match self.selection {
            Selection::Fifo => self.queue.push_back(v),
            Selection::HighestLabel => {
                let h = self.height[v as usize] as usize;
                self.buckets[h].push(v);
                self.highest = self.highest.max(h);
            }
        }
    }

    fn next_active(&mut self) -> Option<Node> {
        match self.selection {
            Selection::Fifo => self.queue.pop_front(),
            Selection::HighestLabel => loop {
                if let Some(v) = self.buckets[self.highest].pop() {
                    // entries are stale if the node was lifted by the gap heuristic
                    if self.active.get_bit(v) && self.height[v as usize] as usize == self.highest {
                        return Some(v);
                    }
                } else if self.highest == 0 {
                    return None;
                } else {
                    self.highest -= 1;
                }
            },
        }
    }

    /// Pushes the excess of `u` until it is gone (or only rounding noise remains)
    fn discharge(&mut self, u: Node) {
        let n = self.network.number_of_nodes();

        while self.excess[u as usize].exceeds_epsilon() {
            let v = self.current_arc[u as usize];
            if v == n {
                if !self.relabel(u) {
                    break;
                }
                continue;
            }

            let residual = self.network.residual(u, v);
            if u != v
                && self.height[u as usize] == self.height[v as usize] + 1
                && residual.exceeds_epsilon()
            {
                let amount = self.excess[u as usize].min_of(residual);
                self.network.push(u, v, amount);
                self.excess[u as usize] = self.excess[u as usize] - amount;
                self.excess[v as usize] = self.excess[v as usize] + amount;
                self.pushes += 1;
                self.activate(v);
            } else {
                self.current_arc[u as usize] += 1;
            }
        }
    }

    /// Lifts `u` one above its lowest residual neighbor. Returns *false* if `u` has no residual
    /// edge at all, which only happens if its excess is rounding noise.
    fn relabel(&mut self, u: Node) -> bool {
        let Some(new_height) = self
            .network
            .neighbors_of(u)
            .map(|v| self.height[v as usize] + 1)
            .min()
        else {
            return false;
        };

        let old_height = self.height[u as usize];
        self.set_height(u, new_height);
        self.current_arc[u as usize] = 0;
        self.relabels += 1;

        let n = self.network.number_of_nodes();
        if self.gap_heuristic && old_height < n && self.nodes_at_height[old_height as usize] == 0 {
            self.close_gap(old_height);
        }

        true
    }

    fn set_height(&mut self, u: Node, height: Node) {
        self.nodes_at_height[self.height[u as usize] as usize] -= 1;
        self.height[u as usize] = height;
        self.nodes_at_height[height as usize] += 1;
    }

    /// No node is left at height `gap < n`: nodes above it can no longer reach the sink
    fn close_gap(&mut self, gap: Node) {
        let n = self.network.number_of_nodes();
        self.gaps += 1;

        for w in self.network.vertices() {
            let h = self.height[w as usize];
            if w != self.source && gap < h && h < n {
                self.set_height(w, n + 1);
                self.current_arc[w as usize] = 0;
                if self.active.get_bit(w) && self.selection == Selection::HighestLabel {
                    self.enqueue(w);
                }
            }
        }

        trace!(gap, "closed gap");
    }
}

impl<T: Numeric> MaxFlow<T> for PushRelabelFlow<T> {
    fn network(&self) -> &ResidualMatrix<T> {
        &self.network
    }

    fn calc_max_flow(&mut self, source: Node, sink: Node) -> T {
        if source == sink {
            self.network.reset(source);
            return T::zero();
        }

        self.initialize(source, sink);

        while let Some(u) = self.next_active() {
            self.active.clear_bit(u);
            self.discharge(u);
        }

        debug!(
            source,
            sink,
            pushes = self.pushes,
            relabels = self.relabels,
            gaps = self.gaps,
            "push-relabel max flow"
        );

        self.excess[sink as usize]
    }
}
