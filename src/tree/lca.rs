use itertools::Itertools;
use tracing::debug;

use super::*;

/// Constant-time lowest common ancestor queries on a static rooted tree.
///
/// The tree is flattened into an Euler tour (every node is written when entered and again after
/// each of its children) of length `2n - 1`. The lowest common ancestor of `u` and `v` is the
/// shallowest node of the tour between their first occurrences, which a sparse table answers in
/// `O(1)` after `O(n log n)` preprocessing.
///
/// # Examples
/// ```
/// use graphalgos::{prelude::*, tree::*};
///
/// let tree: Vec<Vec<Node>> = vec![vec![1, 2], vec![0], vec![0, 3], vec![2]];
/// let lca = LowestCommonAncestor::new(&tree);
/// assert_eq!(lca.ancestor(1, 3), 0);
/// assert_eq!(lca.ancestor(2, 3), 2);
/// assert_eq!(lca.distance(1, 3), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LowestCommonAncestor {
    root: Node,
    depth: Vec<NumNodes>,
    first_visit: Vec<u32>,
    /// `sparse[k][i]` is the shallowest node of `tour[i..i + 2^k]`
    sparse: Vec<Vec<Node>>,
}

impl LowestCommonAncestor {
    /// Builds the structure for `tree` rooted at node `0`.
    ///
    /// # Panics
    /// Panics if `tree` is not a tree on at least one node.
    pub fn new<G>(tree: &G) -> Self
    where
        G: IndexedAdjacencyList,
    {
        Self::with_root(tree, 0)
    }

    /// Builds the structure for `tree` rooted at `root`.
    ///
    /// # Panics
    /// Panics if `tree` is not a tree or `root` is out of range.
    pub fn with_root<G>(tree: &G, root: Node) -> Self
    where
        G: IndexedAdjacencyList,
    {
        Self::from_rooted(tree, RootedTree::build_checked(tree, root))
    }

    /// Same as [`LowestCommonAncestor::with_root`] but reports malformed input as error
    pub fn try_with_root<G>(tree: &G, root: Node) -> Result<Self>
    where
        G: IndexedAdjacencyList,
    {
        Ok(Self::from_rooted(tree, RootedTree::try_build(tree, root)?))
    }

    fn from_rooted<G>(tree: &G, rooted: RootedTree) -> Self
    where
        G: IndexedAdjacencyList,
    {
        let mut first_visit = vec![0; tree.len()];
        let mut tour = Vec::with_capacity(2 * tree.len() - 1);
        for event in DepthFirstEvents::with_roots(tree, [rooted.root]) {
            match event {
                DfsEvent::Enter { node, .. } => {
                    first_visit[node as usize] = tour.len() as u32;
                    tour.push(node);
                }
                DfsEvent::Leave {
                    parent: Some(p), ..
                } => tour.push(p),
                _ => {}
            }
        }
        debug_assert_eq!(tour.len(), 2 * tree.len() - 1);

        let depth = rooted.depth;
        let shallower = |a: Node, b: Node| {
            if depth[b as usize] < depth[a as usize] {
                b
            } else {
                a
            }
        };

        let len = tour.len();
        let mut sparse = vec![tour];
        let mut width = 1;
        while 2 * width <= len {
            let prev = &sparse[sparse.len() - 1];
            let level = (0..=len - 2 * width)
                .map(|i| shallower(prev[i], prev[i + width]))
                .collect_vec();
            sparse.push(level);
            width *= 2;
        }

        debug!(
            nodes = tree.len(),
            levels = sparse.len(),
            "built lowest common ancestor table"
        );

        Self {
            root: rooted.root,
            depth,
            first_visit,
            sparse,
        }
    }

    /// Returns the root of the tree
    pub fn root(&self) -> Node {
        self.root
    }

    /// Returns the number of edges between `u` and the root
    pub fn depth(&self, u: Node) -> NumNodes {
        self.depth[u as usize]
    }

    /// Returns the deepest node that is an ancestor of both `u` and `v`
    /// (every node is an ancestor of itself).
    /// ** Panics if `u >= n` or `v >= n` **
    pub fn ancestor(&self, u: Node, v: Node) -> Node {
        let (l, r) = {
            let a = self.first_visit[u as usize] as usize;
            let b = self.first_visit[v as usize] as usize;
            (a.min(b), a.max(b))
        };

        let level = (r - l + 1).ilog2() as usize;
        let a = self.sparse[level][l];
        let b = self.sparse[level][r + 1 - (1 << level)];
        if self.depth(b) < self.depth(a) { b } else { a }
    }

    /// Returns the number of edges on the path between `u` and `v`
    pub fn distance(&self, u: Node, v: Node) -> NumNodes {
        let w = self.ancestor(u, v);
        self.depth(u) + self.depth(v) - 2 * self.depth(w)
    }
}
