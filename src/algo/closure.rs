/*!
# Transitive Closure & Reduction

- [`Closure::transitive_closure`] lists, for every node, the nodes reachable via a path of length
  at least one (one marked search per node),
- [`Closure::reachability`] computes the same relation as bitsets through the condensation, which
  is much faster on large sparse graphs,
- [`Closure::transitive_reduction`] removes every edge implied by a longer path.
*/

use itertools::Itertools;
use stream_bitset::prelude::*;
use tracing::debug;

use super::*;

pub trait Closure: AdjacencyList {
    /// Returns for every node `u` the nodes reachable from `u` by a path of length at least one,
    /// in discovery order of a marked depth-first search (see [`DFSWithSet`]).
    /// A node is never listed in its own row, even if it lies on a cycle.
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// let adj: Vec<Vec<Node>> = vec![vec![1], vec![2], vec![0], vec![]];
    /// assert_eq!(adj.transitive_closure(), vec![vec![1, 2], vec![2, 0], vec![0, 1], vec![]]);
    /// ```
    fn transitive_closure(&self) -> Vec<Vec<Node>> {
        self.vertices()
            .map(|u| {
                let mut reached = DFSWithSet::<_, NodeSet>::new(self, u)
                    .into_visited()
                    .into_vec();
                // the start node is always inserted first
                reached.remove(0);
                reached
            })
            .collect()
    }

    /// Returns the transitive closure as one bitset per node.
    ///
    /// Node `v` is in the set of `u` iff there is a path of length at least one from `u` to `v`;
    /// in particular `u` is in its own set iff it lies on a cycle (or has a self-loop).
    /// The sets are computed on the condensation and propagated in reverse topological order.
    fn reachability(&self) -> Vec<NodeBitSet> {
        let cond = self.condensation();
        let components = cond.components();
        let dag = cond.dag();

        let mut reach = vec![self.vertex_bitset_unset(); components.len()];
        for c in (0..components.len()).rev() {
            let (head, tail) = reach.split_at_mut(c + 1);
            let set = &mut head[c];

            let component = &components[c];
            let is_cyclic = component.len() > 1
                || component
                    .iter()
                    .any(|&u| self.neighbors_of(u).any(|v| v == u));
            if is_cyclic {
                set.set_bits(component.iter().copied());
            }

            for &d in &dag[c] {
                // the condensation is numbered topologically, so `d > c`
                let d = d as usize;
                set.set_bits(components[d].iter().copied());
                set.set_bits(tail[d - c - 1].iter_set_bits());
            }
        }

        debug!(
            components = components.len(),
            pairs = reach.iter().map(|r| r.cardinality() as usize).sum::<usize>(),
            "computed reachability"
        );

        self.vertices()
            .map(|u| reach[cond.component_of(u) as usize].clone())
            .collect()
    }

    /// Returns the transitive reduction: the edge `(u, v)` is kept iff no other path of length
    /// at least two leads from `u` to `v`. Self-loops and parallel edges are dropped and rows are
    /// sorted increasingly.
    ///
    /// The reduction is only unique on DAGs; contract cycles first via
    /// [`Connectivity::condensation`].
    ///
    /// # Examples
    /// ```
    /// use graphalgos::{prelude::*, algo::*};
    ///
    /// let adj: Vec<Vec<Node>> = vec![vec![2, 1], vec![2], vec![]];
    /// assert_eq!(adj.transitive_reduction(), vec![vec![1], vec![2], vec![]]);
    /// ```
    fn transitive_reduction(&self) -> Vec<Vec<Node>> {
        let reach = self.reachability();
        let mut removed = 0usize;

        let reduction = self
            .vertices()
            .map(|u| {
                let successors = self
                    .neighbors_of(u)
                    .filter(|&v| v != u)
                    .sorted_unstable()
                    .dedup()
                    .collect_vec();

                let kept = successors
                    .iter()
                    .copied()
                    .filter(|&v| {
                        !successors
                            .iter()
                            .any(|&w| w != v && reach[w as usize].get_bit(v))
                    })
                    .collect_vec();

                removed += successors.len() - kept.len();
                kept
            })
            .collect_vec();

        debug!(removed, "computed transitive reduction");

        reduction
    }
}

impl<G> Closure for G where G: AdjacencyList {}

/// Transitive closure of `graph` in list form; see [`Closure::transitive_closure`].
pub fn transitive_closure<E, F>(graph: &[Vec<E>], index: F) -> Vec<Vec<Node>>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).transitive_closure()
}

/// Transitive closure of `graph` as bitsets; see [`Closure::reachability`].
pub fn reachability<E, F>(graph: &[Vec<E>], index: F) -> Vec<NodeBitSet>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).reachability()
}

/// Transitive reduction of `graph`; see [`Closure::transitive_reduction`].
pub fn transitive_reduction<E, F>(graph: &[Vec<E>], index: F) -> Vec<Vec<Node>>
where
    F: Fn(&E) -> Node,
{
    EdgeListView::new(graph, index).transitive_reduction()
}
