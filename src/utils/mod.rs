/*!
# Utilities

Abstractions over [`Set`]s so that traversals can choose how visited nodes are tracked, and the
[`FromCapacity`] helper to construct them generically.
*/

use std::{collections::HashSet, hash::RandomState};

use fxhash::{FxBuildHasher, FxHashSet};

pub mod set;

pub use set::{NodeSet, Set};

use stream_bitset::{PrimIndex, bitset::BitSetImpl};

use crate::node::*;

/// Helper trait for datastructure that can be initialized with capacity.
/// Can be interpreted as reserved space or guaranteed used space.
pub trait FromCapacity: Sized {
    /// Create a new instance with a given capacity
    fn from_capacity(capacity: usize) -> Self {
        Self::from_total_used_capacity(capacity, capacity)
    }

    /// Creates a new instance from the total capacity (ie. max-value for example) and the actual
    /// capacity that will be used (space-wise).
    fn from_total_used_capacity(total: usize, used: usize) -> Self;
}

impl<I> FromCapacity for BitSetImpl<I>
where
    I: PrimIndex,
{
    fn from_total_used_capacity(total: usize, _used: usize) -> Self {
        // bitsets are always sized to the maximum element
        Self::new(I::from_usize(total).expect("capacity exceeds index type"))
    }
}

impl<T> FromCapacity for HashSet<T, RandomState> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity(used)
    }
}

impl<T> FromCapacity for FxHashSet<T> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity_and_hasher(used, FxBuildHasher::default())
    }
}

impl FromCapacity for NodeSet {
    fn from_total_used_capacity(total: usize, _used: usize) -> Self {
        NodeSet::new(node_from_index(total))
    }
}
