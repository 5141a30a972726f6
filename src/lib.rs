//! # Sorted Collections
//!
//! Comparator-ordered containers built on one growable array and one binary-search
//! kernel.
//!
//! This crate provides `SortedMap`, `SortedSet` and `PriorityQueue`, plus the `Vector` they
//! store their elements in. Every sorted container keeps its contents strictly ascending
//! under a `Comparator`, so iteration order is part of the API rather than an accident of
//! hashing.
//!
//! ## Key Features
//!
//! * **Pluggable ordering:** containers take any `Comparator`. Two containers can be
//!   combined only when they share the same comparator identity; mixing orders fails with
//!   `Error::IncompatibleCollection` instead of producing garbage.
//! * **Merge-walk set algebra:** union, intersection, difference and symmetric difference
//!   run in O(n + m), with allocating and in-place forms. Disjoint or boundary-touching
//!   operands are answered from their ends without walking the interior.
//! * **Negative indexing:** positional operations accept `isize`, with `-1` meaning the
//!   last element.
//! * **Rollback:** `Vector::try_insert_many` restores the exact prior state when an element
//!   fails validation part way through.
//!
//! ## Examples
//!
//! ### SortedMap
//!
//! ```rust
//! use sorted_collections::{Error, SortedMap};
//!
//! let mut map: SortedMap<i32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
//!
//! map.rename(&2, 10).unwrap();
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 10]);
//!
//! // The target key already exists.
//! assert_eq!(map.rename(&1, 3), Err(Error::DuplicateKey));
//! ```
//!
//! ### SortedSet
//!
//! ```rust
//! use sorted_collections::SortedSet;
//!
//! let a: SortedSet<i32> = [1, 2, 3].into_iter().collect();
//! let b: SortedSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(a.intersect(&b).unwrap().as_slice(), &[2, 3]);
//! assert!(a.intersect(&b).unwrap().is_subset(&a).unwrap());
//! ```
//!
//! ### Binary search
//!
//! ```rust
//! use sorted_collections::{Comparator, algorithms::search};
//!
//! let cmp = Comparator::natural();
//! assert_eq!(search::binary_search(&[1, 3, 5, 7], &4, &cmp), Err(2));
//! assert_eq!(search::binary_search(&[1, 3, 5, 7], &5, &cmp), Ok(2));
//! ```
//!
//! ## Thread safety
//!
//! `Comparator` is reference counted and not `Send`, so containers stay on the thread
//! that built them. Callers that share a container must serialize access themselves.

// --- Module Declarations ---

pub mod algorithms;
pub mod compare;
pub mod error;
pub mod heap;
pub mod maps;
pub mod sets;
pub mod traits;
pub(crate) mod utils;
pub mod vecs;

#[cfg(test)]
mod proptests;

// --- Re-exports ---

pub use compare::Comparator;
pub use error::{Error, Result};
pub use heap::{AnyHeap, PriorityQueue};
pub use maps::SortedMap;
pub use sets::SortedSet;
pub use traits::{Collection, Indexable, KeyedStore, Ordered};
pub use vecs::Vector;
