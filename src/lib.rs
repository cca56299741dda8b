/*!
`graphalgos` is a library of classical graph algorithms operating on plain, vertex-indexed
adjacency lists.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
A graph is a `Vec<Vec<E>>`: row `u` lists the edges leaving `u` in a fixed order, and that order
determines the (deterministic) output of every algorithm. The edge payload `E` is opaque; all
algorithms only need a way to extract the target of an edge:

- `Vec<Vec<Node>>` is an unweighted adjacency list,
- `Vec<Vec<(Node, W)>>` is a weighted adjacency list (the weight is the second component),
- [`EdgeListView`](crate::repr::EdgeListView) wraps any `&[Vec<E>]` with an accessor `Fn(&E) -> Node`.

Undirected graphs are stored symmetrically, i.e. edge `{u, v}` appears in the rows of both
endpoints. For edges as results we use the simple tuple-struct `Edge(Node, Node)`.

# Design

Algorithms are provided as configurable structs that one can alter to their needs using the
*Builder* / *Setter* pattern before running them. The most commonly used functionality is
additionally implemented via traits on the graph itself (`adj.topological_sort()`), and as free
functions taking the adjacency list and edge accessor (`topological_sort(&adj, |e| e.0)`).

Weighted algorithms are generic over [`Numeric`](crate::numeric::Numeric), which is implemented
for all primitive integers and floats as well as exact rationals.

# Usage

- [`prelude`] includes definitions for nodes, edges, basic graph operation traits and representations,
- [`algo`] includes traversals, strongly connected components, biconnectivity, transitive
  closure/reduction, shortest paths, maximum flow and bipartite matching,
- [`tree`] includes static query structures on rooted trees (LCA, heavy-light decomposition).

In most use-cases, `use graphalgos::{prelude::*, algo::*};` suffices for your needs.

# Logging

Expensive computations emit [`tracing`] events at `debug` level (and `trace` for inner loops).
The library never installs a subscriber.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod node;
pub mod numeric;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod tree;
pub mod utils;

/// `graphalgos::prelude` includes definitions for nodes and edges, all basic graph operation
/// traits as well as the representations.
pub mod prelude {
    pub use super::{edge::*, error::GraphError, node::*, numeric::*, ops::*, repr::*};
}
