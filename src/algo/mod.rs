/*!
# Graph Algorithms

This module provides the graph algorithms of the crate. All algorithms are re-exported at the
top level of this module, so you can simply do:
```rust
use graphalgos::algo::*;
```
and gain access to traversal, connectivity, closure, shortest path, flow and matching routines.

Most algorithms are available twice: as trait methods on any graph implementing the traits of
[`ops`](crate::ops) (e.g. `adj.topological_sort()`), and as free functions working on
`&[Vec<E>]` with an edge accessor `Fn(&E) -> Node` (e.g. `topological_sort(&adj, |e| e.0)`).
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod biconnectivity;
mod closure;
mod connectivity;
mod matching;
mod network_flow;
mod shortest_paths;
mod traversal;

use crate::{prelude::*, utils::*};

pub use biconnectivity::*;
pub use closure::*;
pub use connectivity::*;
pub use matching::*;
pub use network_flow::*;
pub use shortest_paths::*;
pub use traversal::*;
