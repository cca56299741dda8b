use thiserror::Error;

use crate::node::*;

/// Structural problems detected by the validating (`try_*`) constructors.
///
/// Algorithms themselves never fail: unreachable vertices and empty results are reported via
/// `None`, the caller's `inf` sentinel or empty collections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("node {node} is out of range for a graph with {n} nodes")]
    NodeOutOfRange { node: Node, n: NumNodes },

    #[error("cannot build a tree structure without nodes")]
    EmptyGraph,

    #[error("a tree on {nodes} nodes has {expected} edge endpoints, found {endpoints}")]
    NotATree {
        nodes: NumNodes,
        expected: u64,
        endpoints: u64,
    },

    #[error("only {reached} of {n} nodes are reachable from the root")]
    Disconnected { reached: NumNodes, n: NumNodes },

    #[error("tree edge {from} -> {to} is not stored exactly once in each direction")]
    AsymmetricEdge { from: Node, to: Node },
}

pub type Result<T> = std::result::Result<T, GraphError>;
