//! Comparator-ordered priority queue.
//!
//! [`PriorityQueue`] is a binary max-heap over a [`Vector`] of stamped slots; equal
//! priorities leave the queue in push order. [`AnyHeap`] lets callers treat it and std
//! `BinaryHeap` alike.

use core::cmp::Ordering;
use core::fmt::{self, Debug};
use std::collections::BinaryHeap;

use crate::compare::Comparator;
use crate::error::{Error, Result};
use crate::traits::Collection;
use crate::vecs::Vector;

/// A trait for abstraction over priority queue types (std `BinaryHeap`, [`PriorityQueue`]).
pub trait AnyHeap<T> {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
    fn peek(&self) -> Option<&T>;
    fn clear(&mut self);
}

impl<T: Ord> AnyHeap<T> for BinaryHeap<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push(&mut self, item: T) {
        self.push(item);
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn peek(&self) -> Option<&T> {
        self.peek()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<T> AnyHeap<T> for PriorityQueue<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push(&mut self, item: T) {
        self.push(item);
    }
    fn pop(&mut self) -> Option<T> {
        self.try_pop()
    }
    fn peek(&self) -> Option<&T> {
        self.peek().ok()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

struct Slot<T> {
    stamp: u64,
    value: T,
}

impl<T: Clone> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            stamp: self.stamp,
            value: self.value.clone(),
        }
    }
}

/// A binary max-heap ordered by a [`Comparator`], with first-in-first-out ties.
///
/// # Behavior
/// * **Priority:** the element ordering greatest under the comparator pops first.
/// * **Ties:** elements that compare `Equal` pop in the order they were pushed. Every
///   push takes a monotonically increasing stamp that breaks ties.
/// * **Complexity:** push and pop are O(log n); peek is O(1).
///
/// # Safety Invariants
/// * Slot `i` outranks (or equals) its children `2i + 1` and `2i + 2`.
///
/// # Examples
/// ```
/// use sorted_collections::PriorityQueue;
///
/// let mut q = PriorityQueue::new();
/// q.push((1, "low"));
/// q.push((5, "high"));
/// q.push((3, "mid"));
/// assert_eq!(q.pop(), Ok((5, "high")));
/// assert_eq!(q.peek(), Ok(&(3, "mid")));
/// ```
pub struct PriorityQueue<T> {
    slots: Vector<Slot<T>>,
    comparator: Comparator<T>,
    next_stamp: u64,
}

impl<T: Ord> PriorityQueue<T> {
    /// Creates an empty queue popping the greatest element under `T`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue popping the greatest element under `comparator`.
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            slots: Vector::new(),
            comparator,
            next_stamp: 0,
        }
    }

    #[inline]
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Removes every element and restarts the tie-break stamps.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.next_stamp = 0;
    }

    /// Pushes an item onto the heap. O(log n).
    pub fn push(&mut self, value: T) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.slots.push(Slot { stamp, value });
        self.sift_up(self.slots.len() - 1);
    }

    /// The highest-priority item, or [`Error::EmptyCollection`].
    pub fn peek(&self) -> Result<&T> {
        self.slots.first().map(|slot| &slot.value)
    }

    /// Removes the highest-priority item, or fails with [`Error::EmptyCollection`].
    pub fn pop(&mut self) -> Result<T> {
        self.try_pop().ok_or(Error::EmptyCollection)
    }

    pub fn try_pop(&mut self) -> Option<T> {
        let last = self.slots.len().checked_sub(1)?;
        self.slots.as_mut_slice().swap(0, last);
        let slot = self.slots.try_pop()?;
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Some(slot.value)
    }

    /// Consumes the queue, returning its items in pop order (highest priority first).
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(value) = self.try_pop() {
            out.push(value);
        }
        out
    }

    /// Iterates in arbitrary (heap) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.as_slice().iter().map(|slot| &slot.value)
    }

    /// `true` if `a` must pop before `b`.
    #[inline]
    fn outranks(&self, a: &Slot<T>, b: &Slot<T>) -> bool {
        match self.comparator.compare(&a.value, &b.value) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => a.stamp < b.stamp,
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.outranks(&self.slots[i], &self.slots[parent]) {
                break;
            }
            self.slots.as_mut_slice().swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.slots.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < len && self.outranks(&self.slots[right], &self.slots[left]) {
                best = right;
            }
            if !self.outranks(&self.slots[best], &self.slots[i]) {
                break;
            }
            self.slots.as_mut_slice().swap(i, best);
            i = best;
        }
    }
}

impl<T> Collection for PriorityQueue<T> {
    fn len(&self) -> usize {
        self.slots.len()
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for PriorityQueue<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            comparator: self.comparator.clone(),
            next_stamp: self.next_stamp,
        }
    }
}

impl<T: Debug> Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.slots.reserve(self.slots.len() + iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut q = Self::new();
        q.extend(iter);
        q
    }
}
