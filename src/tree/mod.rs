/*!
# Tree Queries

Static query structures on rooted trees. A tree is given as symmetric adjacency list
(every edge `{u, v}` appears in the rows of both endpoints) together with a root; the
structures are built once and afterwards only answer read-only queries.

- [`LowestCommonAncestor`] answers ancestor queries in constant time via an Euler tour,
- [`HeavyLightDecomposition`] splits the tree into heavy chains to answer k-th ancestor and
  path queries in logarithmic time.

Both structures are built with an explicit-stack traversal, so path-like trees with millions of
nodes are fine. Constructors named `try_*` validate the input and report a [`GraphError`];
the plain constructors panic on malformed trees.
*/

mod hld;
mod lca;

pub use hld::*;
pub use lca::*;

use tracing::debug;

use crate::{algo::*, error::Result, prelude::*};

/// Parent pointers, depths and preorder of a tree rooted at `root`.
pub(crate) struct RootedTree {
    pub root: Node,
    /// `INVALID_NODE` for the root
    pub parent: Vec<Node>,
    pub depth: Vec<NumNodes>,
    pub preorder: Vec<Node>,
}

impl RootedTree {
    /// Checks that `tree` is a symmetric adjacency list of a tree on at least one node and
    /// orients it away from `root`.
    pub fn try_build<G>(tree: &G, root: Node) -> Result<Self>
    where
        G: IndexedAdjacencyList,
    {
        let n = tree.number_of_nodes();
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if root >= n {
            return Err(GraphError::NodeOutOfRange { node: root, n });
        }
        if let Some(node) = tree
            .vertices()
            .flat_map(|u| tree.neighbors_of(u))
            .find(|&v| v >= n)
        {
            return Err(GraphError::NodeOutOfRange { node, n });
        }

        let endpoints = tree.number_of_edges() as u64;
        let expected = 2 * (n as u64 - 1);
        if endpoints != expected {
            return Err(GraphError::NotATree {
                nodes: n,
                expected,
                endpoints,
            });
        }

        let rooted = Self::build(tree, root);
        let reached = node_from_index(rooted.preorder.len());
        if reached != n {
            return Err(GraphError::Disconnected { reached, n });
        }

        // every non-root node must list its parent once and be listed by it once
        let mut up = vec![0u32; n as usize];
        let mut down = vec![0u32; n as usize];
        for u in tree.vertices() {
            for v in tree.neighbors_of(u) {
                if rooted.parent[v as usize] == u {
                    down[v as usize] += 1;
                } else if rooted.parent[u as usize] == v {
                    up[u as usize] += 1;
                } else {
                    return Err(GraphError::AsymmetricEdge { from: u, to: v });
                }
            }
        }
        if let Some(v) = tree
            .vertices()
            .find(|&v| v != root && (up[v as usize] != 1 || down[v as usize] != 1))
        {
            let p = rooted.parent[v as usize];
            let (from, to) = if down[v as usize] != 1 { (p, v) } else { (v, p) };
            return Err(GraphError::AsymmetricEdge { from, to });
        }

        Ok(rooted)
    }

    /// Orients the component of `root` without validation; unreached nodes keep
    /// `INVALID_NODE` as parent.
    pub fn build<G>(tree: &G, root: Node) -> Self
    where
        G: IndexedAdjacencyList,
    {
        let mut parent = vec![INVALID_NODE; tree.len()];
        let mut depth = vec![0; tree.len()];
        let mut preorder = Vec::with_capacity(tree.len());

        for event in DepthFirstEvents::with_roots(tree, [root]) {
            if let DfsEvent::Enter { node, parent: p } = event {
                if let Some(p) = p {
                    parent[node as usize] = p;
                    depth[node as usize] = depth[p as usize] + 1;
                }
                preorder.push(node);
            }
        }

        debug!(
            root,
            nodes = preorder.len(),
            height = preorder.iter().map(|&u| depth[u as usize]).max(),
            "rooted tree"
        );

        Self {
            root,
            parent,
            depth,
            preorder,
        }
    }

    /// Like [`RootedTree::try_build`] but panics on malformed input
    pub fn build_checked<G>(tree: &G, root: Node) -> Self
    where
        G: IndexedAdjacencyList,
    {
        match Self::try_build(tree, root) {
            Ok(rooted) => rooted,
            Err(err) => panic!("invalid tree: {err}"),
        }
    }

    /// Returns the children of `u` in adjacency order
    pub fn children_of<'a, G>(&'a self, tree: &'a G, u: Node) -> impl Iterator<Item = Node> + 'a
    where
        G: AdjacencyList,
    {
        tree.neighbors_of(u)
            .filter(move |&v| self.parent[v as usize] == u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooting() {
        let adj: Vec<Vec<Node>> = vec![vec![1, 2], vec![0], vec![0, 3], vec![2]];
        let rooted = RootedTree::try_build(&adj, 2).unwrap();

        assert_eq!(rooted.parent, vec![2, 0, INVALID_NODE, 2]);
        assert_eq!(rooted.depth, vec![1, 2, 0, 1]);
        assert_eq!(rooted.preorder, vec![2, 0, 1, 3]);
        assert_eq!(rooted.children_of(&adj, 2).collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(rooted.children_of(&adj, 1).count(), 0);
    }

    #[test]
    fn validation() {
        let empty: Vec<Vec<Node>> = Vec::new();
        assert_eq!(
            RootedTree::try_build(&empty, 0).err(),
            Some(GraphError::EmptyGraph)
        );

        let path: Vec<Vec<Node>> = vec![vec![1], vec![0, 2], vec![1]];
        assert_eq!(
            RootedTree::try_build(&path, 3).err(),
            Some(GraphError::NodeOutOfRange { node: 3, n: 3 })
        );

        let dangling: Vec<Vec<Node>> = vec![vec![1], vec![0, 5], vec![1]];
        assert_eq!(
            RootedTree::try_build(&dangling, 0).err(),
            Some(GraphError::NodeOutOfRange { node: 5, n: 3 })
        );

        let directed: Vec<Vec<Node>> = vec![vec![1], vec![2], vec![]];
        assert_eq!(
            RootedTree::try_build(&directed, 0).err(),
            Some(GraphError::NotATree {
                nodes: 3,
                expected: 4,
                endpoints: 2
            })
        );

        // a triangle plus an isolated node has the right number of endpoints
        let split: Vec<Vec<Node>> = vec![vec![1, 2], vec![0, 2], vec![0, 1], vec![]];
        assert_eq!(
            RootedTree::try_build(&split, 0).err(),
            Some(GraphError::Disconnected { reached: 3, n: 4 })
        );

        // right endpoint count and connected, but node 1 never lists its parent
        let one_sided: Vec<Vec<Node>> = vec![vec![1, 1], vec![]];
        assert_eq!(
            RootedTree::try_build(&one_sided, 0).err(),
            Some(GraphError::AsymmetricEdge { from: 0, to: 1 })
        );

        let looped: Vec<Vec<Node>> = vec![vec![1, 0], vec![0, 2], vec![1]];
        assert!(matches!(
            RootedTree::try_build(&looped, 0),
            Err(GraphError::NotATree { .. })
        ));
        // the self-loop stands in for the missing entry 1 -> 0
        let looped: Vec<Vec<Node>> = vec![vec![1, 0], vec![2], vec![1]];
        assert_eq!(
            RootedTree::try_build(&looped, 0).err(),
            Some(GraphError::AsymmetricEdge { from: 0, to: 0 })
        );

        let single: Vec<Vec<Node>> = vec![vec![]];
        assert!(RootedTree::try_build(&single, 0).is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid tree")]
    fn build_checked_panics() {
        let directed: Vec<Vec<Node>> = vec![vec![1], vec![]];
        RootedTree::build_checked(&directed, 0);
    }
}
