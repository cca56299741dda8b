/*!
# Bipartite Matching

A *matching* is a set of edges without shared endpoints; a **maximum matching** is one of largest
possible size. This module computes maximum matchings of bipartite graphs with Kuhn's
augmenting-path algorithm:

- [`bipartite_matching`] takes candidate `(left, right)` pairs,
- [`Matching::maximum_bipartite_matching`] treats row `u` of an adjacency list as the
  candidates of left node `u`,
- [`BipartiteMatcher`] exposes the partners of both sides after the computation.

The result is deterministic: left nodes are processed in increasing order, and the candidates
of each left node are tried in the order given (first fit).
*/

use itertools::Itertools;
use tracing::debug;

use super::*;
use crate::error::Result;

/// Kuhn's augmenting-path matcher on an explicit candidate list.
///
/// Left and right nodes share the index space `0..n`; a node should only appear on one side.
/// The augmenting-path search uses an explicit stack, so long alternating paths are fine.
///
/// # Examples
/// ```
/// use graphalgos::{prelude::*, algo::*};
///
/// let mut matcher = BipartiteMatcher::new(4, &[(0, 2), (0, 3), (1, 3)]);
/// assert_eq!(matcher.compute(), vec![(0, 2), (1, 3)]);
/// assert_eq!(matcher.partner_of(3), Some(1));
/// ```
pub struct BipartiteMatcher {
    candidates: Vec<Vec<Node>>,
    left_partner: Vec<Node>,
    right_partner: Vec<Node>,
    visited: NodeBitSet,
    stack: Vec<(Node, NumNodes)>,
}

impl BipartiteMatcher {
    /// Creates a matcher on `n` nodes from `(left, right)` candidate pairs.
    ///
    /// # Panics
    /// Panics if an endpoint is not in `0..n`.
    pub fn new(n: NumNodes, edges: &[(Node, Node)]) -> Self {
        let candidates = adjacency_from_edges(n, edges.iter().copied());
        Self::from_candidates(candidates)
    }

    /// Like [`BipartiteMatcher::new`] but reports out-of-range endpoints as an error.
    pub fn try_new(n: NumNodes, edges: &[(Node, Node)]) -> Result<Self> {
        if let Some(&node) = edges.iter().flat_map(|(u, v)| [u, v]).find(|&&x| x >= n) {
            return Err(GraphError::NodeOutOfRange { node, n });
        }
        Ok(Self::new(n, edges))
    }

    fn from_candidates(candidates: Vec<Vec<Node>>) -> Self {
        let n = candidates.len();
        Self {
            left_partner: vec![INVALID_NODE; n],
            right_partner: vec![INVALID_NODE; n],
            visited: NodeBitSet::new(node_from_index(n)),
            stack: Vec::new(),
            candidates,
        }
    }

    /// Computes a maximum matching and returns it as `(left, right)` pairs sorted by left node.
    /// Repeated calls start from scratch and return the same matching.
    pub fn compute(&mut self) -> Vec<(Node, Node)> {
        self.left_partner.fill(INVALID_NODE);
        self.right_partner.fill(INVALID_NODE);

        let mut augmentations = 0usize;
        for u in 0..node_from_index(self.candidates.len()) {
            if self.candidates[u as usize].is_empty() {
                continue;
            }
            self.visited.clear_all();
            if self.try_augment(u) {
                augmentations += 1;
            }
        }

        let matching = self.matching();
        debug_assert_eq!(matching.len(), augmentations);
        debug!(
            nodes = self.candidates.len(),
            size = matching.len(),
            "computed maximum bipartite matching"
        );

        matching
    }

    /// Returns the current matching as `(left, right)` pairs sorted by left node
    pub fn matching(&self) -> Vec<(Node, Node)> {
        self.left_partner
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r != INVALID_NODE)
            .map(|(u, &r)| (node_from_index(u), r))
            .collect_vec()
    }

    /// Returns the node matched to `u` (on either side), if any
    pub fn partner_of(&self, u: Node) -> Option<Node> {
        [self.left_partner[u as usize], self.right_partner[u as usize]]
            .into_iter()
            .find(|&p| p != INVALID_NODE)
    }

    /// Searches an alternating path from the free left node `root` to a free right node and
    /// flips it. Right nodes visited without success stay marked for the rest of this search.
    fn try_augment(&mut self, root: Node) -> bool {
        self.stack.clear();
        self.stack.push((root, 0));

        while let Some((u, cursor)) = self.stack.last_mut() {
            let u = *u;
            let Some(&r) = self.candidates[u as usize].get(*cursor as usize) else {
                self.stack.pop();
                continue;
            };
            *cursor += 1;

            if self.visited.set_bit(r) {
                continue;
            }

            let owner = self.right_partner[r as usize];
            if owner != INVALID_NODE {
                self.stack.push((owner, 0));
                continue;
            }

            // every frame's last-tried candidate is the edge it is matched along
            for &(x, cursor) in &self.stack {
                let taken = self.candidates[x as usize][cursor as usize - 1];
                self.left_partner[x as usize] = taken;
                self.right_partner[taken as usize] = x;
            }
            return true;
        }

        false
    }
}

/// Provides maximum matchings of bipartite graphs given as candidate lists
pub trait Matching: AdjacencyList {
    /// Computes a **maximum matching** where row `u` lists the right partners left node `u`
    /// may be matched with. Rows of right nodes are expected to be empty.
    ///
    /// Returns pairs `(left, right)` sorted by left node.
    fn maximum_bipartite_matching(&self) -> Vec<(Node, Node)> {
        let candidates = self
            .vertices()
            .map(|u| self.neighbors_of(u).collect_vec())
            .collect_vec();
        BipartiteMatcher::from_candidates(candidates).compute()
    }
}

impl<G> Matching for G where G: AdjacencyList {}

/// Maximum matching of the bipartite graph on `n` nodes with candidate `(left, right)` pairs;
/// see [`BipartiteMatcher`].
///
/// # Examples
/// ```
/// use graphalgos::algo::bipartite_matching;
///
/// assert_eq!(bipartite_matching(4, &[(0, 2), (1, 2), (1, 3)]), vec![(0, 2), (1, 3)]);
/// ```
pub fn bipartite_matching(n: NumNodes, edges: &[(Node, Node)]) -> Vec<(Node, Node)> {
    BipartiteMatcher::new(n, edges).compute()
}
