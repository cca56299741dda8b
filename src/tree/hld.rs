use std::ops::Range;

use itertools::Itertools;
use tracing::debug;

use super::*;

/// Heavy-light decomposition of a static rooted tree.
///
/// The *heavy child* of a node is its first child (in adjacency order) with a largest subtree.
/// Following heavy children splits the tree into vertex-disjoint *heavy chains*; every
/// root-to-node path meets at most `O(log n)` of them. Nodes are numbered by a depth-first
/// traversal that always descends into the heavy child first, so every heavy chain and every
/// subtree occupies a contiguous range of positions.
///
/// # Examples
/// ```
/// use graphalgos::{prelude::*, tree::*};
///
/// let tree: Vec<Vec<Node>> = vec![vec![1, 2], vec![0], vec![0, 3], vec![2]];
/// let hld = HeavyLightDecomposition::new(&tree);
/// assert_eq!(hld.parent(3, 1), Some(2));
/// assert_eq!(hld.parent(3, 2), Some(0));
/// assert_eq!(hld.parent(3, 3), None);
/// assert_eq!(hld.lca(1, 3), 0);
/// ```
#[derive(Debug, Clone)]
pub struct HeavyLightDecomposition {
    root: Node,
    parent: Vec<Node>,
    depth: Vec<NumNodes>,
    size: Vec<NumNodes>,
    heavy: Vec<Node>,
    head: Vec<Node>,
    position: Vec<NumNodes>,
    /// inverse of `position`
    node_at: Vec<Node>,
}

impl HeavyLightDecomposition {
    /// Decomposes `tree` rooted at node `0`.
    ///
    /// # Panics
    /// Panics if `tree` is not a tree on at least one node.
    pub fn new<G>(tree: &G) -> Self
    where
        G: IndexedAdjacencyList,
    {
        Self::with_root(tree, 0)
    }

    /// Decomposes `tree` rooted at `root`.
    ///
    /// # Panics
    /// Panics if `tree` is not a tree or `root` is out of range.
    pub fn with_root<G>(tree: &G, root: Node) -> Self
    where
        G: IndexedAdjacencyList,
    {
        Self::from_rooted(tree, RootedTree::build_checked(tree, root))
    }

    /// Same as [`HeavyLightDecomposition::with_root`] but reports malformed input as error
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
        let n = tree.len();

        // children are finished before their parent in reverse preorder
        let mut size = vec![1; n];
        let mut heavy = vec![INVALID_NODE; n];
        for &u in rooted.preorder.iter().rev() {
            for v in rooted.children_of(tree, u) {
                size[u as usize] += size[v as usize];
                let h = heavy[u as usize];
                if h == INVALID_NODE || size[h as usize] < size[v as usize] {
                    heavy[u as usize] = v;
                }
            }
        }

        let mut head = vec![rooted.root; n];
        let mut position = vec![0; n];
        let mut node_at = Vec::with_capacity(n);
        let mut stack = vec![rooted.root];
        while let Some(u) = stack.pop() {
            position[u as usize] = node_from_index(node_at.len());
            node_at.push(u);

            let h = heavy[u as usize];
            if h == INVALID_NODE {
                continue;
            }

            // pushed last to be numbered right after `u`
            let light = rooted
                .children_of(tree, u)
                .filter(|&v| v != h)
                .collect_vec();
            for &v in light.iter().rev() {
                head[v as usize] = v;
                stack.push(v);
            }
            head[h as usize] = head[u as usize];
            stack.push(h);
        }

        debug!(
            nodes = n,
            chains = (0..n).filter(|&u| head[u] == node_from_index(u)).count(),
            "built heavy-light decomposition"
        );

        Self {
            root: rooted.root,
            parent: rooted.parent,
            depth: rooted.depth,
            size,
            heavy,
            head,
            position,
            node_at,
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

    /// Returns the number of nodes in the subtree of `u`
    pub fn subtree_size(&self, u: Node) -> NumNodes {
        self.size[u as usize]
    }

    /// Returns the heavy child of `u` or `None` if `u` is a leaf
    pub fn heavy_child(&self, u: Node) -> Option<Node> {
        let h = self.heavy[u as usize];
        (h != INVALID_NODE).then_some(h)
    }

    /// Returns the topmost node of the heavy chain containing `u`
    pub fn head(&self, u: Node) -> Node {
        self.head[u as usize]
    }

    /// Returns the position of `u` in the heavy-first depth-first numbering
    pub fn position(&self, u: Node) -> NumNodes {
        self.position[u as usize]
    }

    /// Returns the node numbered `pos`
    pub fn node_at(&self, pos: NumNodes) -> Node {
        self.node_at[pos as usize]
    }

    /// Returns the positions of all nodes in the subtree of `u`
    pub fn subtree_range(&self, u: Node) -> Range<NumNodes> {
        let start = self.position(u);
        start..start + self.subtree_size(u)
    }

    /// Returns the `k`-th ancestor of `u`, i.e. `u` itself for `k = 0`, its parent for `k = 1`
    /// and so on; `None` if `k` exceeds the depth of `u`. Runs in `O(log n)`.
    pub fn parent(&self, mut u: Node, mut k: NumNodes) -> Option<Node> {
        if k > self.depth(u) {
            return None;
        }

        loop {
            let h = self.head(u);
            let climb = self.depth(u) - self.depth(h);
            if k <= climb {
                // the chain from `h` down to `u` is numbered consecutively
                return Some(self.node_at(self.position(u) - k));
            }
            k -= climb + 1;
            u = self.parent[h as usize];
        }
    }

    /// Returns the lowest common ancestor of `u` and `v` in `O(log n)`
    pub fn lca(&self, mut u: Node, mut v: Node) -> Node {
        while self.head(u) != self.head(v) {
            if self.depth(self.head(u)) < self.depth(self.head(v)) {
                std::mem::swap(&mut u, &mut v);
            }
            u = self.parent[self.head(u) as usize];
        }

        if self.depth(u) <= self.depth(v) { u } else { v }
    }

    /// Returns `O(log n)` disjoint position ranges whose union are exactly the nodes on the path
    /// between `u` and `v` (both included). The ranges are not sorted.
    pub fn path_segments(&self, mut u: Node, mut v: Node) -> Vec<Range<NumNodes>> {
        let mut segments = Vec::new();
        while self.head(u) != self.head(v) {
            if self.depth(self.head(u)) < self.depth(self.head(v)) {
                std::mem::swap(&mut u, &mut v);
            }
            let h = self.head(u);
            segments.push(self.position(h)..self.position(u) + 1);
            u = self.parent[h as usize];
        }

        let (lo, hi) = (self.position(u), self.position(v));
        segments.push(lo.min(hi)..lo.max(hi) + 1);
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn naive_kth_ancestor(rooted: &RootedTree, mut u: Node, k: NumNodes) -> Option<Node> {
        for _ in 0..k {
            u = rooted.parent[u as usize];
            if u == INVALID_NODE {
                return None;
            }
        }
        Some(u)
    }

    fn naive_path(rooted: &RootedTree, mut u: Node, mut v: Node) -> Vec<Node> {
        let mut path = Vec::new();
        while u != v {
            if rooted.depth[u as usize] >= rooted.depth[v as usize] {
                path.push(u);
                u = rooted.parent[u as usize];
            } else {
                path.push(v);
                v = rooted.parent[v as usize];
            }
        }
        path.push(u);
        path.sort_unstable();
        path
    }

    #[test]
    fn reference_tree() {
        let tree: Vec<Vec<Node>> = vec![vec![1, 2], vec![0], vec![0, 3], vec![2]];
        let hld = HeavyLightDecomposition::new(&tree);

        assert_eq!(hld.parent(3, 0), Some(3));
        assert_eq!(hld.parent(3, 1), Some(2));
        assert_eq!(hld.parent(3, 2), Some(0));
        assert_eq!(hld.parent(3, 3), None);
        assert_eq!(hld.parent(1, 1), Some(0));

        assert_eq!(hld.heavy_child(0), Some(2));
        assert_eq!(hld.heavy_child(1), None);
        assert_eq!((0..4).map(|u| hld.head(u)).collect_vec(), vec![0, 1, 0, 0]);
        assert_eq!((0..4).map(|u| hld.position(u)).collect_vec(), vec![0, 3, 1, 2]);
        assert_eq!(hld.subtree_range(2), 1..3);
        assert_eq!(hld.subtree_range(0), 0..4);

        assert_eq!(hld.lca(1, 3), 0);
        assert_eq!(hld.path_segments(1, 3), vec![3..4, 0..3]);
    }

    #[test]
    fn first_heaviest_child_wins() {
        // both children of the root have subtrees of size 2
        let tree = symmetric_adjacency_from_edges(5, [(0, 3), (0, 1), (1, 2), (3, 4)]);
        let hld = HeavyLightDecomposition::new(&tree);
        assert_eq!(hld.heavy_child(0), Some(3));
        assert_eq!(hld.subtree_size(0), 5);
        assert_eq!(
            (0..5).map(|p| hld.node_at(p)).collect_vec(),
            vec![0, 3, 4, 1, 2]
        );
    }

    #[test]
    fn invalid_trees() {
        let forest: Vec<Vec<Node>> = vec![vec![1], vec![0], vec![3], vec![2]];
        assert!(matches!(
            HeavyLightDecomposition::try_with_root(&forest, 0),
            Err(GraphError::NotATree { .. })
        ));
        let empty: Vec<Vec<Node>> = Vec::new();
        assert_eq!(
            HeavyLightDecomposition::try_with_root(&empty, 0).err(),
            Some(GraphError::EmptyGraph)
        );

        // child listed twice instead of once in each direction
        let one_sided: Vec<Vec<Node>> = vec![vec![1, 1], vec![]];
        assert_eq!(
            HeavyLightDecomposition::try_with_root(&one_sided, 0).err(),
            Some(GraphError::AsymmetricEdge { from: 0, to: 1 })
        );
    }

    #[test]
    fn random_trees() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for i in 0..30 {
            let n = 1 + 13 * i;
            let tree = random_tree(rng, n);
            let root = rng.random_range(0..n);

            let hld = HeavyLightDecomposition::try_with_root(&tree, root).unwrap();
            let rooted = RootedTree::build(&tree, root);
            let lca = LowestCommonAncestor::with_root(&tree, root);

            // positions form a permutation with contiguous subtrees and chains
            assert!((0..n).map(|u| hld.position(u)).all_unique());
            for u in 0..n {
                assert_eq!(hld.node_at(hld.position(u)), u);
                if let Some(h) = hld.heavy_child(u) {
                    assert_eq!(hld.position(h), hld.position(u) + 1);
                    assert_eq!(hld.head(h), hld.head(u));
                }
                let p = rooted.parent[u as usize];
                if p != INVALID_NODE {
                    let range = hld.subtree_range(p);
                    assert!(range.contains(&hld.position(u)));
                    assert!(hld.subtree_range(u).end <= range.end);
                }
            }

            for _ in 0..100 {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                let k = rng.random_range(0..=rooted.depth[u as usize] + 1);

                assert_eq!(hld.parent(u, k), naive_kth_ancestor(&rooted, u, k));
                assert_eq!(hld.lca(u, v), lca.ancestor(u, v));

                let segments = hld.path_segments(u, v);
                let covered = segments
                    .into_iter()
                    .flatten()
                    .map(|p| hld.node_at(p))
                    .sorted_unstable()
                    .collect_vec();
                assert_eq!(covered, naive_path(&rooted, u, v));
            }
        }
    }

    #[test]
    fn long_path() {
        let n = 100_000;
        let tree = symmetric_adjacency_from_edges(n, (1..n).map(|u| (u - 1, u)));
        let hld = HeavyLightDecomposition::new(&tree);

        assert_eq!(hld.head(n - 1), 0);
        assert_eq!(hld.parent(n - 1, n - 1), Some(0));
        assert_eq!(hld.parent(n - 1, 12), Some(n - 13));
        assert_eq!(hld.path_segments(3, n - 1), vec![3..n]);
    }
}
