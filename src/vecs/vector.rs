//! Contiguous growable array with explicit capacity management.
//!
//! [`Vector`] is the storage engine under every container in the crate. It owns a
//! fixed-size slot buffer of `MaybeUninit<T>` plus a logical length; capacity changes only
//! through [`reserve`](Vector::reserve), [`expand`](Vector::expand) and
//! [`shrink`](Vector::shrink). Because it `Deref`s to `[T]`, slice methods are available
//! directly.
//!
//! Positional methods take an `isize` and resolve negative indices from the back
//! (`-1` is the last element). Anything still out of range after that fails with
//! [`Error::IndexOutOfRange`].

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, MaybeUninit};
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use crate::algorithms::search;
use crate::compare::Comparator;
use crate::error::{Error, Result};
use crate::traits::{Collection, Indexable};
use crate::utils::index;

/// A growable array that keeps `len <= capacity` and never holds live values past `len`.
///
/// # Growth policy
/// [`expand`](Vector::expand) doubles the capacity until the requested room fits; an
/// empty buffer is sized exactly to the request. [`reserve`](Vector::reserve) grows to an
/// exact minimum and never shrinks.
///
/// # Design Consideration
/// Vacated slots (after `remove`, `remove_many`, `truncate`, ...) are dropped in place and
/// left uninitialized, so the buffer never retains ownership of logically removed values.
///
/// # Examples
/// ```
/// use sorted_collections::Vector;
///
/// let mut v: Vector<i32> = Vector::from_iter([1, 2, 5]);
/// v.insert_many(2, [3, 4]).unwrap();
/// assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
/// assert_eq!(v.get(-1), Ok(&5));
/// assert_eq!(v.remove_many(1, 10), Ok(4));
/// assert_eq!(v.as_slice(), &[1]);
/// ```
pub struct Vector<T> {
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

impl<T> Vector<T> {
    /// Creates an empty vector. Does not allocate.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty vector with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Box::new_uninit_slice(capacity),
            len: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    fn as_ptr(&self) -> *const T {
        self.buf.as_ptr() as *const T
    }

    #[inline(always)]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr() as *mut T
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    // ─── Capacity ────────────────────────────────────────────────────────────

    /// Moves the live elements into a fresh buffer of exactly `capacity` slots.
    fn set_capacity(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let mut buf = Box::new_uninit_slice(capacity);
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), buf.as_mut_ptr() as *mut T, self.len);
        }
        log::trace!(
            "vector capacity {} -> {} (len {})",
            self.buf.len(),
            capacity,
            self.len
        );
        // The old buffer only holds `MaybeUninit`, so dropping it releases memory
        // without touching the moved elements.
        self.buf = buf;
    }

    /// Grows the capacity to at least `min_capacity`. Never shrinks.
    pub fn reserve(&mut self, min_capacity: usize) {
        if min_capacity > self.capacity() {
            self.set_capacity(min_capacity);
        }
    }

    /// Ensures room for at least `extra` more elements and returns the spare capacity.
    ///
    /// Capacity doubles until `len + extra` fits, or becomes exactly `len + extra` when the
    /// buffer is currently empty.
    pub fn expand(&mut self, extra: usize) -> usize {
        let required = match self.len.checked_add(extra) {
            Some(required) => required,
            None => capacity_overflow(),
        };
        let capacity = self.capacity();
        if required > capacity {
            let new_capacity = if capacity == 0 {
                required
            } else {
                let mut grown = capacity;
                while grown < required {
                    grown = grown.checked_mul(2).unwrap_or(required);
                }
                grown
            };
            self.set_capacity(new_capacity);
        }
        self.capacity() - self.len
    }

    /// Sets the capacity exactly to the current length.
    pub fn shrink(&mut self) {
        if self.capacity() > self.len {
            self.set_capacity(self.len);
        }
    }

    /// Shrinks the capacity to `max(len, min_capacity)` if it is currently larger.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        let target = self.len.max(min_capacity);
        if self.capacity() > target {
            self.set_capacity(target);
        }
    }

    // ─── Positional access ───────────────────────────────────────────────────

    /// Returns the element at `index`; negative indices count from the back.
    pub fn get(&self, index: isize) -> Result<&T> {
        let i = index::element(index, self.len)?;
        Ok(&self.as_slice()[i])
    }

    pub fn get_mut(&mut self, index: isize) -> Result<&mut T> {
        let i = index::element(index, self.len)?;
        Ok(&mut self.as_mut_slice()[i])
    }

    /// Overwrites the element at `index`, returning the previous value.
    pub fn set(&mut self, index: isize, value: T) -> Result<T> {
        let i = index::element(index, self.len)?;
        Ok(mem::replace(&mut self.as_mut_slice()[i], value))
    }

    pub fn first(&self) -> Result<&T> {
        self.as_slice().first().ok_or(Error::EmptyCollection)
    }

    pub fn last(&self) -> Result<&T> {
        self.as_slice().last().ok_or(Error::EmptyCollection)
    }

    /// Swaps the elements at two positions.
    pub fn swap(&mut self, a: isize, b: isize) -> Result<()> {
        let a = index::element(a, self.len)?;
        let b = index::element(b, self.len)?;
        self.as_mut_slice().swap(a, b);
        Ok(())
    }

    // ─── Insertion ───────────────────────────────────────────────────────────

    #[inline(always)]
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.expand(1);
        }
        unsafe {
            ptr::write(self.as_mut_ptr().add(self.len), value);
        }
        self.len += 1;
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Result<T> {
        self.try_pop().ok_or(Error::EmptyCollection)
    }

    pub fn try_pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
        }
    }

    /// Inserts `value` before position `index` (`index == len` appends).
    pub fn insert(&mut self, index: isize, value: T) -> Result<()> {
        let at = index::boundary(index, self.len)?;
        self.insert_at(at, value);
        Ok(())
    }

    pub(crate) fn insert_at(&mut self, at: usize, value: T) {
        assert!(at <= self.len);
        if self.len == self.capacity() {
            self.expand(1);
        }
        unsafe {
            let p = self.as_mut_ptr().add(at);
            ptr::copy(p, p.add(1), self.len - at);
            ptr::write(p, value);
        }
        self.len += 1;
    }

    /// Inserts every element of `items` before position `index`, preserving their order.
    /// Returns the number of inserted elements.
    pub fn insert_many<I>(&mut self, index: isize, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_insert_many(index, items, |_| Ok(()))
    }

    /// Like [`insert_many`](Vector::insert_many), but checks each element with `validate`
    /// before it is stored.
    ///
    /// On the first rejection every element inserted by this call is dropped, trailing
    /// elements are shifted back and `len` is restored exactly; then the validator's error
    /// is returned. Capacity grown by the call is kept.
    ///
    /// # Pseudo-code Implementation
    /// ```text
    /// if source reports an exact length n:
    ///     expand(n); shift tail right by n        // one expansion, one shift
    ///     write items into the gap
    /// remaining items (unknown length):
    ///     push each at the end, expanding as needed
    ///     rotate the appended run into position
    /// ```
    pub fn try_insert_many<I, F>(&mut self, index: isize, items: I, mut validate: F) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> Result<()>,
    {
        let at = index::boundary(index, self.len)?;
        let mut iter = items.into_iter();
        let exact = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => self.fill_exact(at, lower, &mut iter, &mut validate)?,
            _ => 0,
        };
        match self.fill_progressive(at + exact, &mut iter, &mut validate) {
            Ok(rest) => Ok(exact + rest),
            Err(err) => {
                self.remove_range(at, exact);
                Err(err)
            }
        }
    }

    fn fill_exact<I, F>(&mut self, at: usize, n: usize, iter: &mut I, validate: &mut F) -> Result<usize>
    where
        I: Iterator<Item = T>,
        F: FnMut(&T) -> Result<()>,
    {
        if n == 0 {
            return Ok(0);
        }
        self.expand(n);
        let old_len = self.len;
        let tail = old_len - at;
        unsafe {
            let base = self.as_mut_ptr();
            ptr::copy(base.add(at), base.add(at + n), tail);
            // The shifted tail is hidden while the gap is filled: a panicking source leaks
            // it instead of dropping it twice.
            self.len = at;

            let mut written = 0;
            let mut failure = None;
            while written < n {
                let Some(item) = iter.next() else { break };
                if let Err(err) = validate(&item) {
                    failure = Some(err);
                    break;
                }
                ptr::write(base.add(at + written), item);
                written += 1;
            }

            if let Some(err) = failure {
                ptr::drop_in_place(slice::from_raw_parts_mut(base.add(at), written));
                ptr::copy(base.add(at + n), base.add(at), tail);
                self.len = old_len;
                log::debug!("rolled back insertion of {written} elements at {at}");
                return Err(err);
            }
            if written < n {
                ptr::copy(base.add(at + n), base.add(at + written), tail);
            }
            self.len = old_len + written;
            Ok(written)
        }
    }

    fn fill_progressive<I, F>(&mut self, at: usize, iter: &mut I, validate: &mut F) -> Result<usize>
    where
        I: Iterator<Item = T>,
        F: FnMut(&T) -> Result<()>,
    {
        let old_len = self.len;
        for item in iter {
            if let Err(err) = validate(&item) {
                let appended = self.len - old_len;
                self.truncate(old_len);
                log::debug!("rolled back insertion of {appended} elements at {at}");
                return Err(err);
            }
            self.push(item);
        }
        let appended = self.len - old_len;
        if appended > 0 && at < old_len {
            self.as_mut_slice()[at..].rotate_right(appended);
        }
        Ok(appended)
    }

    // ─── Removal ─────────────────────────────────────────────────────────────

    /// Removes and returns the element at `index`, shifting the tail left.
    pub fn remove(&mut self, index: isize) -> Result<T> {
        let i = index::element(index, self.len)?;
        Ok(self.remove_at(i))
    }

    pub(crate) fn remove_at(&mut self, i: usize) -> T {
        assert!(i < self.len);
        unsafe {
            let p = self.as_mut_ptr().add(i);
            let value = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - i - 1);
            self.len -= 1;
            value
        }
    }

    /// Removes up to `count` elements starting at `index`. `count` is clamped to the
    /// number of elements available; returns how many were removed.
    pub fn remove_many(&mut self, index: isize, count: usize) -> Result<usize> {
        let at = index::boundary(index, self.len)?;
        let count = count.min(self.len - at);
        self.remove_range(at, count);
        Ok(count)
    }

    pub(crate) fn remove_range(&mut self, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        assert!(at + count <= self.len);
        let old_len = self.len;
        unsafe {
            self.len = at;
            let p = self.as_mut_ptr().add(at);
            ptr::drop_in_place(slice::from_raw_parts_mut(p, count));
            ptr::copy(p.add(count), p, old_len - at - count);
        }
        self.len = old_len - count;
    }

    /// Drops every element at or after `len`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            let old_len = self.len;
            self.len = len;
            unsafe {
                let p = self.as_mut_ptr().add(len);
                ptr::drop_in_place(slice::from_raw_parts_mut(p, old_len - len));
            }
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Keeps only the elements for which `f` returns `true`, preserving order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len;
        self.len = 0;
        let p = self.as_mut_ptr();
        let mut kept = 0;
        for i in 0..len {
            unsafe {
                let cur = p.add(i);
                if f(&*cur) {
                    if kept != i {
                        ptr::copy_nonoverlapping(cur, p.add(kept), 1);
                    }
                    kept += 1;
                } else {
                    ptr::drop_in_place(cur);
                }
            }
        }
        self.len = kept;
    }

    /// Removes consecutive elements for which `same(kept, candidate)` is `true`, keeping the
    /// first of each run.
    pub fn dedup_by<F>(&mut self, mut same: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        let len = self.len;
        if len <= 1 {
            return;
        }
        self.len = 0;
        let p = self.as_mut_ptr();
        let mut kept = 1;
        for i in 1..len {
            unsafe {
                let cur = p.add(i);
                if same(&*p.add(kept - 1), &*cur) {
                    ptr::drop_in_place(cur);
                } else {
                    if kept != i {
                        ptr::copy_nonoverlapping(cur, p.add(kept), 1);
                    }
                    kept += 1;
                }
            }
        }
        self.len = kept;
    }

    // ─── Ordering helpers ────────────────────────────────────────────────────

    /// Stable sort under `cmp`.
    pub fn sort_by_comparator(&mut self, cmp: &Comparator<T>) {
        self.as_mut_slice().sort_by(|a, b| cmp.compare(a, b));
    }

    /// Binary search over the whole vector, which must be sorted under `cmp`.
    pub fn binary_search_by_comparator(&self, target: &T, cmp: &Comparator<T>) -> core::result::Result<usize, usize> {
        search::binary_search(self, target, cmp)
    }

    pub fn lower_bound(&self, target: &T, cmp: &Comparator<T>) -> usize {
        search::lower_bound(self, target, cmp)
    }

    pub fn upper_bound(&self, target: &T, cmp: &Comparator<T>) -> usize {
        search::upper_bound(self, target, cmp)
    }

    // ─── Cross-cutting operations ────────────────────────────────────────────

    /// Returns the position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|x| x == value)
    }

    /// Maps every element into a new vector.
    pub fn map<U, F>(&self, f: F) -> Vector<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut out = Vector::with_capacity(self.len);
        out.extend(self.as_slice().iter().map(f));
        out
    }

    /// Returns a new vector with the elements matching `pred`.
    pub fn filter<F>(&self, mut pred: F) -> Vector<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        self.as_slice().iter().filter(|x| pred(*x)).cloned().collect()
    }

    /// Splits into `(matching, rest)`, both in original order.
    pub fn partition<F>(&self, mut pred: F) -> (Vector<T>, Vector<T>)
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut yes = Vector::new();
        let mut no = Vector::new();
        for x in self.as_slice() {
            if pred(x) {
                yes.push(x.clone());
            } else {
                no.push(x.clone());
            }
        }
        (yes, no)
    }

    /// Deep copy of up to `len` elements starting at `begin`.
    pub fn slice(&self, begin: isize, len: usize) -> Result<Vector<T>>
    where
        T: Clone,
    {
        let at = index::boundary(begin, self.len)?;
        let len = len.min(self.len - at);
        Ok(self.as_slice()[at..at + len].iter().cloned().collect())
    }
}

impl<T: Clone> Vector<T> {
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.expand(other.len());
        for item in other {
            self.push(item.clone());
        }
    }
}

// ─── Trait impls ─────────────────────────────────────────────────────────────

impl<T> Collection for Vector<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> Indexable<T> for Vector<T> {
    fn item(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut out = Vector::with_capacity(self.len);
        for item in self.as_slice() {
            out.push(item.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> core::ops::Index<usize> for Vector<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T> core::ops::IndexMut<usize> for Vector<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.expand(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Vector::new();
        v.extend(iter);
        v
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(v: Vec<T>) -> Self {
        v.into_iter().collect()
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(v: Vector<T>) -> Self {
        v.into_iter().collect()
    }
}

/// Owning iterator over a [`Vector`].
pub struct VectorIntoIter<T> {
    buf: Box<[MaybeUninit<T>]>,
    pos: usize,
    end: usize,
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = VectorIntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let end = self.len;
        // `self` is left empty with no buffer, so its Drop is a no-op.
        self.len = 0;
        let buf = mem::take(&mut self.buf);
        VectorIntoIter { buf, pos: 0, end }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Iterator for VectorIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.pos < self.end {
            let value = unsafe { self.buf[self.pos].assume_init_read() };
            self.pos += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for VectorIntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.pos < self.end {
            self.end -= 1;
            Some(unsafe { self.buf[self.end].assume_init_read() })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for VectorIntoIter<T> {}

impl<T> Drop for VectorIntoIter<T> {
    fn drop(&mut self) {
        for slot in &mut self.buf[self.pos..self.end] {
            unsafe { slot.assume_init_drop() };
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Vector<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Vector<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Vector::from)
    }
}
