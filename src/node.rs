/*!
# Node Representation

Vertices are `u32` values in the range `0..n`. Graph inputs elsewhere in the crate are
`Vec<Vec<E>>` indexed by vertex, so a vertex is simply a row index of the adjacency list.
*/

use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid; used as "unset" marker in dense arrays
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// Converts a row index of an adjacency list into a [`Node`].
#[inline]
pub(crate) fn node_from_index(index: usize) -> Node {
    debug_assert!(index < INVALID_NODE as usize);
    index as Node
}
