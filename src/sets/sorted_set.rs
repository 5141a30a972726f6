//! Comparator-ordered set backed by a sorted [`Vector`].
//!
//! [`SortedSet`] keeps its elements strictly ascending under its [`Comparator`], so
//! iteration order is part of the contract. Lookups go through the binary-search kernel;
//! set algebra runs as merge walks over the two sorted buffers (see
//! [`algorithms::merge`](crate::algorithms::merge)).

use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::slice;

use crate::algorithms::{merge, search};
use crate::compare::{self, Comparator};
use crate::error::{Error, Result};
use crate::traits::{Collection, Indexable, Ordered};
use crate::utils::index;
use crate::vecs::{Vector, VectorIntoIter};

/// A set of unique elements stored in ascending comparator order.
///
/// Equality between elements means `compare(a, b) == Equal`; `T` itself need not
/// implement `Eq`.
///
/// # Design Consideration
/// - **Sorted vector vs tree**: a contiguous buffer gives O(log n) lookups and cheap,
///   cache-friendly O(n + m) merges; insertion and removal pay an O(n) shift.
/// - **Compatibility**: every binary operation first checks that both sets share the same
///   comparator identity and fails with [`Error::IncompatibleCollection`] otherwise.
///
/// # Examples
/// ```
/// use sorted_collections::SortedSet;
///
/// let a: SortedSet<i32> = [3, 1, 2, 1].into_iter().collect();
/// assert_eq!(a.as_slice(), &[1, 2, 3]);
///
/// let b: SortedSet<i32> = [3, 4, 5].into_iter().collect();
/// assert_eq!(a.union(&b).unwrap().as_slice(), &[1, 2, 3, 4, 5]);
/// assert_eq!(a.intersect(&b).unwrap().as_slice(), &[3]);
/// ```
pub struct SortedSet<T> {
    elements: Vector<T>,
    comparator: Comparator<T>,
}

impl<T: Ord> SortedSet<T> {
    /// Creates an empty set ordered by `T`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }

    /// Creates an empty set with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vector::with_capacity(capacity),
            comparator: Comparator::natural(),
        }
    }
}

impl<T> SortedSet<T> {
    /// Creates an empty set ordered by `comparator`.
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            elements: Vector::new(),
            comparator,
        }
    }

    /// Builds a set from arbitrary input: sorts once, then keeps the first of every run of
    /// equal elements (the same outcome as adding them one by one).
    pub fn from_iter_with<I>(iter: I, comparator: Comparator<T>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut elements: Vector<T> = iter.into_iter().collect();
        elements.sort_by_comparator(&comparator);
        elements.dedup_by(|kept, next| comparator.compare(kept, next) == Ordering::Equal);
        Self { elements, comparator }
    }

    /// Reconstructs a set from its serialized parts.
    ///
    /// Every element goes through [`try_add`](SortedSet::try_add), so an unsorted or
    /// duplicated payload still yields a valid set.
    pub fn from_parts<I>(elements: I, comparator: Comparator<T>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_comparator(comparator);
        let mut dropped = 0usize;
        for element in elements {
            if !set.try_add(element) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::debug!("dropped {dropped} duplicate elements while rebuilding a sorted set");
        }
        set
    }

    /// Splits the set into its ordered elements and comparator.
    pub fn into_parts(self) -> (Vector<T>, Comparator<T>) {
        (self.elements, self.comparator)
    }

    #[inline]
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.elements.as_slice()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.as_slice().iter()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    #[inline]
    fn search(&self, value: &T) -> core::result::Result<usize, usize> {
        search::binary_search(&self.elements, value, &self.comparator)
    }

    // ─── Lookup ──────────────────────────────────────────────────────────────

    /// Returns `true` if an element equal to `value` is present. O(log n).
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_ok()
    }

    /// Position of `value` in iteration order.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.search(value).ok()
    }

    /// The element at `index`; negative indices count from the largest element.
    pub fn get(&self, index: isize) -> Result<&T> {
        self.elements.get(index)
    }

    pub fn first(&self) -> Result<&T> {
        self.elements.first()
    }

    pub fn last(&self) -> Result<&T> {
        self.elements.last()
    }

    /// Number of elements ordering before `value`.
    pub fn lower_bound(&self, value: &T) -> usize {
        search::lower_bound(&self.elements, value, &self.comparator)
    }

    /// Number of elements ordering before or equal to `value`.
    pub fn upper_bound(&self, value: &T) -> usize {
        search::upper_bound(&self.elements, value, &self.comparator)
    }

    /// Elements `x` with `from <= x < to`.
    pub fn range(&self, from: &T, to: &T) -> &[T] {
        let start = self.lower_bound(from);
        let end = self.lower_bound(to).max(start);
        &self.elements.as_slice()[start..end]
    }

    // ─── Mutation ────────────────────────────────────────────────────────────

    /// Inserts `value`; fails with [`Error::DuplicateElement`] if an equal element exists.
    pub fn add(&mut self, value: T) -> Result<()> {
        if self.try_add(value) {
            Ok(())
        } else {
            Err(Error::DuplicateElement)
        }
    }

    /// Inserts `value` unless an equal element exists. Returns `true` if inserted.
    pub fn try_add(&mut self, value: T) -> bool {
        match self.search(&value) {
            Ok(_) => false,
            Err(at) => {
                self.elements.insert_at(at, value);
                true
            }
        }
    }

    /// Removes and returns the element equal to `value`; fails with
    /// [`Error::UnknownElement`] if absent.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        self.try_remove(value).ok_or(Error::UnknownElement)
    }

    pub fn try_remove(&mut self, value: &T) -> Option<T> {
        match self.search(value) {
            Ok(at) => Some(self.elements.remove_at(at)),
            Err(_) => None,
        }
    }

    /// Removes the element at `index` (negative indices count from the back).
    pub fn remove_at(&mut self, index: isize) -> Result<T> {
        let i = index::element(index, self.len())?;
        Ok(self.elements.remove_at(i))
    }

    pub fn pop_first(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.elements.remove_at(0))
    }

    pub fn pop_last(&mut self) -> Result<T> {
        self.elements.pop()
    }

    /// Keeps only the elements matching `f`. Order is preserved, so no re-sort is needed.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.elements.retain(f);
    }

    // ─── Cross-cutting operations ────────────────────────────────────────────

    /// A new set, with the same comparator, holding the elements matching `pred`.
    pub fn filter<F>(&self, pred: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        Self {
            elements: self.elements.filter(pred),
            comparator: self.comparator.clone(),
        }
    }

    /// Splits into `(matching, rest)`, both with this set's comparator.
    pub fn partition<F>(&self, pred: F) -> (Self, Self)
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let (yes, no) = self.elements.partition(pred);
        (
            Self {
                elements: yes,
                comparator: self.comparator.clone(),
            },
            Self {
                elements: no,
                comparator: self.comparator.clone(),
            },
        )
    }

    /// Maps every element into a set ordered by `U`'s natural order.
    pub fn map<U, F>(&self, f: F) -> SortedSet<U>
    where
        U: Ord,
        F: FnMut(&T) -> U,
    {
        SortedSet::from_iter_with(self.iter().map(f), Comparator::natural())
    }

    /// Three-way comparison of two sets, element by element under the shared comparator.
    /// Fails with [`Error::NotComparable`] if the comparators differ.
    pub fn compare_to(&self, other: &Self) -> Result<Ordering> {
        compare::ensure_comparable(&self.comparator, &other.comparator)?;
        Ok(compare::compare_sequences(
            &self.comparator,
            self.iter(),
            other.iter(),
        ))
    }

    // ─── Set algebra ─────────────────────────────────────────────────────────

    fn assert_compatible(&self, other: &Self) -> Result<()> {
        compare::ensure_compatible(&self.comparator, &other.comparator)
    }

    fn with_elements(&self, elements: Vector<T>) -> Self {
        Self {
            elements,
            comparator: self.comparator.clone(),
        }
    }

    /// Elements in `self` or `other`.
    pub fn union(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
    {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        Ok(self.with_elements(merge::union(&self.elements, &other.elements, |a, b| {
            cmp.compare(a, b)
        })))
    }

    /// Elements in both `self` and `other`.
    pub fn intersect(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
    {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        Ok(self.with_elements(merge::intersection(
            &self.elements,
            &other.elements,
            |a, b| cmp.compare(a, b),
        )))
    }

    /// Elements of `self` not in `other`.
    pub fn diff(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
    {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        Ok(self.with_elements(merge::difference(
            &self.elements,
            &other.elements,
            |a, b| cmp.compare(a, b),
        )))
    }

    /// Elements in exactly one of `self` and `other`.
    pub fn symmetric_diff(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
    {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        Ok(self.with_elements(merge::symmetric_difference(
            &self.elements,
            &other.elements,
            |a, b| cmp.compare(a, b),
        )))
    }

    /// In-place [`union`](SortedSet::union).
    pub fn union_with(&mut self, other: &Self) -> Result<()>
    where
        T: Clone,
    {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        merge::union_in_place(&mut self.elements, &other.elements, |a, b| cmp.compare(a, b));
        Ok(())
    }

    /// In-place [`intersect`](SortedSet::intersect).
    pub fn intersect_with(&mut self, other: &Self) -> Result<()> {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        merge::intersection_in_place(&mut self.elements, &other.elements, |a, b| {
            cmp.compare(a, b)
        });
        Ok(())
    }

    /// In-place [`diff`](SortedSet::diff).
    pub fn diff_with(&mut self, other: &Self) -> Result<()> {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        merge::difference_in_place(&mut self.elements, &other.elements, |a, b| cmp.compare(a, b));
        Ok(())
    }

    /// In-place [`symmetric_diff`](SortedSet::symmetric_diff).
    pub fn symmetric_diff_with(&mut self, other: &Self) -> Result<()>
    where
        T: Clone,
    {
        self.assert_compatible(other)?;
        let cmp = &self.comparator;
        merge::symmetric_difference_in_place(&mut self.elements, &other.elements, |a, b| {
            cmp.compare(a, b)
        });
        Ok(())
    }

    // ─── Relational predicates ───────────────────────────────────────────────

    /// `true` if both sets hold the same elements.
    pub fn is_equal_set(&self, other: &Self) -> Result<bool> {
        self.assert_compatible(other)?;
        Ok(merge::is_equal(&self.elements, &other.elements, |a, b| {
            self.comparator.compare(a, b)
        }))
    }

    /// `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> Result<bool> {
        self.assert_compatible(other)?;
        Ok(merge::is_subset(&self.elements, &other.elements, |a, b| {
            self.comparator.compare(a, b)
        }))
    }

    /// `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> Result<bool> {
        other.is_subset(self)
    }

    /// `true` if `self` is a subset of `other` and strictly smaller.
    pub fn is_proper_subset(&self, other: &Self) -> Result<bool> {
        self.assert_compatible(other)?;
        Ok(self.len() < other.len() && self.is_subset(other)?)
    }

    /// `true` if `self` is a superset of `other` and strictly larger.
    pub fn is_proper_superset(&self, other: &Self) -> Result<bool> {
        other.is_proper_subset(self)
    }

    /// `true` if the sets share at least one element.
    pub fn is_intersecting(&self, other: &Self) -> Result<bool> {
        self.assert_compatible(other)?;
        Ok(merge::is_intersecting(
            &self.elements,
            &other.elements,
            |a, b| self.comparator.compare(a, b),
        ))
    }
}

// --- Traits ---

impl<T> Collection for SortedSet<T> {
    fn len(&self) -> usize {
        self.elements.len()
    }
}

impl<T> Indexable<T> for SortedSet<T> {
    fn item(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T> Ordered<T> for SortedSet<T> {
    fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    fn first(&self) -> Result<&T> {
        self.elements.first()
    }

    fn last(&self) -> Result<&T> {
        self.elements.last()
    }
}

impl<T: Clone> Clone for SortedSet<T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: Ord> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for SortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Sets are equal when they share a comparator and hold equal elements under it.
impl<T> PartialEq for SortedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.comparator.same_as(&other.comparator)
            && merge::is_equal(&self.elements, &other.elements, |a, b| {
                self.comparator.compare(a, b)
            })
    }
}

impl<T> Eq for SortedSet<T> {}

impl<T: Ord> FromIterator<T> for SortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, Comparator::natural())
    }
}

impl<T> Extend<T> for SortedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.try_add(value);
        }
    }
}

impl<T> IntoIterator for SortedSet<T> {
    type Item = T;
    type IntoIter = VectorIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SortedSet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for SortedSet<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for SortedSet<T>
where
    T: Ord + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(Self::from_parts(elements, Comparator::natural()))
    }
}
