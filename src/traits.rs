//! Capability traits implemented selectively by the containers.
//!
//! Rather than one inheritance lattice, each capability is a small trait:
//!
//! | Trait | Capability | Implemented by |
//! |-------|------------|----------------|
//! | [`Collection`] | element count | everything |
//! | [`Indexable`] | positional reads | `Vector`, `SortedSet`, `[T]`, `Vec`, `VecDeque` |
//! | [`Ordered`] | comparator-ordered ends | `SortedSet`, `SortedMap` (keys) |
//! | [`KeyedStore`] | key → value storage | `SortedMap`, `BTreeMap` |
//!
//! The std impls let the binary-search kernel and generic callers treat std collections
//! and crate containers alike.

use std::collections::{BTreeMap, VecDeque};

use crate::compare::Comparator;
use crate::error::Result;
use crate::utils::index;

/// Anything with a known element count.
pub trait Collection {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index-addressable sequences.
pub trait Indexable<T>: Collection {
    /// Element at a position in `0..len`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    fn item(&self, index: usize) -> &T;

    /// Element at a position resolved with negative indexing (`-1` is the last element).
    fn at(&self, index: isize) -> Result<&T> {
        let i = index::element(index, self.len())?;
        Ok(self.item(i))
    }
}

/// Containers kept in ascending order under a [`Comparator`].
pub trait Ordered<T> {
    fn comparator(&self) -> &Comparator<T>;

    /// Smallest element; fails with `EmptyCollection` when empty.
    fn first(&self) -> Result<&T>;

    /// Largest element; fails with `EmptyCollection` when empty.
    fn last(&self) -> Result<&T>;
}

/// Key → value stores.
pub trait KeyedStore<K, V>: Collection {
    fn lookup(&self, key: &K) -> Option<&V>;

    fn contains_key(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Inserts or overwrites, returning the previous value.
    fn store(&mut self, key: K, value: V) -> Option<V>;

    /// Removes the entry, returning its value.
    fn discard(&mut self, key: &K) -> Option<V>;
}

// --- std impls ---

impl<T> Collection for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> Indexable<T> for [T] {
    fn item(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> Collection for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> Indexable<T> for Vec<T> {
    fn item(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T, const N: usize> Collection for [T; N] {
    fn len(&self) -> usize {
        N
    }
}

impl<T, const N: usize> Indexable<T> for [T; N] {
    fn item(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> Collection for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> Indexable<T> for VecDeque<T> {
    fn item(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<K, V> Collection for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<K: Ord, V> KeyedStore<K, V> for BTreeMap<K, V> {
    fn lookup(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn store(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn discard(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }
}
