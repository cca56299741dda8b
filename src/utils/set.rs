/*!
# Generalized Sets

Traversals are parameterized by the set that tracks visited nodes, allowing algorithms to pick
the most suitable implementation:
- Dense membership -> `BitSetImpl` (the default for searches)
- Sparse membership -> `HashSet` / `FxHashSet`
- Insertion order matters -> [`NodeSet`]
*/

use std::{
    collections::{HashSet, hash_set::Iter},
    hash::{BuildHasher, Hash},
    iter::{Cloned, Copied},
};

use num::ToPrimitive;
use stream_bitset::{
    PrimIndex,
    bitset::BitSetImpl,
    prelude::{BitmaskSliceStream, BitmaskStreamConsumer, BitmaskStreamToIndices, ToBitmaskStream},
};

use crate::node::*;

/// Minimalist trait for a set-like collection.
pub trait Set<T> {
    /// Inserts `value` into the set.
    /// Returns `true` if the element was already present.
    fn insert(&mut self, value: T) -> bool;

    /// Removes `value` from the set.
    /// Returns `true` if the element was present.
    fn remove(&mut self, value: &T) -> bool;

    /// Iterator over elements in set.
    ///
    /// Returned by [`Set::iter`].
    type SetIter<'a>: Iterator<Item = T>
    where
        Self: 'a,
        T: Clone;

    /// Returns an iterator over all elements in the set.
    fn iter(&self) -> Self::SetIter<'_>
    where
        T: Clone;

    /// Returns `true` if the set contains `value`.
    fn contains(&self, value: &T) -> bool;

    /// Clears all elements from the set.
    fn clear(&mut self);

    /// Returns the number of elements in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, S> Set<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, value: T) -> bool {
        !HashSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    type SetIter<'a>
        = Cloned<Iter<'a, T>>
    where
        Self: 'a,
        T: Clone;

    fn iter(&self) -> Self::SetIter<'_>
    where
        T: Clone,
    {
        HashSet::iter(self).cloned()
    }

    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn clear(&mut self) {
        HashSet::clear(self);
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<I> Set<I> for BitSetImpl<I>
where
    I: PrimIndex,
{
    fn insert(&mut self, value: I) -> bool {
        self.set_bit(value)
    }

    fn remove(&mut self, value: &I) -> bool {
        self.clear_bit(*value)
    }

    type SetIter<'a>
        = BitmaskStreamToIndices<BitmaskSliceStream<'a>, I, true>
    where
        Self: 'a,
        I: Clone;

    fn iter(&self) -> Self::SetIter<'_> {
        self.bitmask_stream().iter_set_bits()
    }

    fn contains(&self, value: &I) -> bool {
        self.get_bit(*value)
    }

    fn clear(&mut self) {
        self.clear_all();
    }

    fn len(&self) -> usize {
        self.cardinality().to_usize().unwrap_or(usize::MAX)
    }
}

/// A set of nodes (0..n) that iterates its elements in insertion order.
///
/// Used where the discovery order of a search is part of the result, e.g. the reachable sets
/// reported by [`Closure::transitive_closure`](crate::algo::Closure::transitive_closure).
#[derive(Debug, Clone)]
pub struct NodeSet {
    data: Vec<Node>,
    positions: Vec<Node>,
}

impl NodeSet {
    /// Creates an empty node-set of size `n`
    pub fn new(n: NumNodes) -> Self {
        Self {
            data: Vec::new(),
            positions: vec![INVALID_NODE; n as usize],
        }
    }

    /// Returns the elements in insertion order
    pub fn as_slice(&self) -> &[Node] {
        &self.data
    }

    /// Consumes the set and returns its elements in insertion order
    pub fn into_vec(self) -> Vec<Node> {
        self.data
    }
}

impl Set<Node> for NodeSet {
    fn insert(&mut self, value: Node) -> bool {
        let index = value as usize;
        if self.positions[index] != INVALID_NODE {
            return true;
        }

        self.positions[index] = node_from_index(self.data.len());
        self.data.push(value);

        false
    }

    /// Removes `value`; the last inserted element takes its place in the iteration order.
    fn remove(&mut self, value: &Node) -> bool {
        let index = *value as usize;
        let pos = match self.positions[index] {
            INVALID_NODE => return false,
            pos => pos as usize,
        };

        self.data.swap_remove(pos);
        if pos < self.data.len() {
            self.positions[self.data[pos] as usize] = self.positions[index];
        }

        self.positions[index] = INVALID_NODE;

        true
    }

    type SetIter<'a>
        = Copied<std::slice::Iter<'a, Node>>
    where
        Self: 'a,
        Node: Clone;

    fn iter(&self) -> Self::SetIter<'_> {
        self.data.iter().copied()
    }

    fn contains(&self, value: &Node) -> bool {
        self.positions[*value as usize] != INVALID_NODE
    }

    fn clear(&mut self) {
        for &u in &self.data {
            self.positions[u as usize] = INVALID_NODE;
        }
        self.data.clear();
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
