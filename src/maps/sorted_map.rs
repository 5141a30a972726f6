//! Comparator-ordered map backed by a sorted [`Vector`] of `(key, value)` pairs.
//!
//! [`SortedMap`] keeps its entries strictly ascending by key. Every lookup is a binary
//! search over the entry buffer, every insertion lands at the searched insertion point,
//! and key relabeling (`rename`, `move_key`) rotates a single entry into its new slot
//! instead of removing and re-inserting it.
//!
//! ## Example
//! ```rust
//! use sorted_collections::SortedMap;
//!
//! let mut map = SortedMap::new();
//! map.set(5, "five");
//! map.set(2, "two");
//! map.set(8, "eight");
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 5, 8]);
//!
//! map.rename(&2, 10).unwrap();
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![5, 8, 10]);
//! assert_eq!(map.get(&10), Ok(&"two"));
//! ```

use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::iter::FusedIterator;
use core::mem;
use core::slice;

use crate::algorithms::search;
use crate::compare::{self, Comparator};
use crate::error::{Error, Result};
use crate::traits::{Collection, KeyedStore, Ordered};
use crate::utils::index;
use crate::vecs::{Vector, VectorIntoIter};

/// A map whose entries are stored in ascending key order under a [`Comparator`].
///
/// Keys are unique under the comparator: two keys `a`, `b` collide when
/// `compare(a, b) == Equal`.
///
/// # Design Consideration
/// - **Storage**: one contiguous buffer of pairs; O(log n) lookups, O(n) insert/remove.
/// - **Soft variants**: each failing operation (`get`, `add`, `replace`, `remove`,
///   `rename`) has a `try_` twin that reports the same outcome through `Option`/`bool`.
pub struct SortedMap<K, V> {
    entries: Vector<(K, V)>,
    comparator: Comparator<K>,
}

impl<K: Ord, V> SortedMap<K, V> {
    /// Creates an empty map ordered by `K`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vector::with_capacity(capacity),
            comparator: Comparator::natural(),
        }
    }
}

impl<K, V> SortedMap<K, V> {
    /// Creates an empty map ordered by `comparator`.
    pub fn with_comparator(comparator: Comparator<K>) -> Self {
        Self {
            entries: Vector::new(),
            comparator,
        }
    }

    /// Builds a map from arbitrary pairs in one sort. On duplicate keys the last value wins
    /// and the first key is kept, exactly as repeated [`set`](SortedMap::set) calls would.
    pub fn from_iter_with<I>(iter: I, comparator: Comparator<K>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut sorted: Vector<(K, V)> = iter.into_iter().collect();
        sorted
            .as_mut_slice()
            .sort_by(|a, b| comparator.compare(&a.0, &b.0));

        let mut entries: Vector<(K, V)> = Vector::with_capacity(sorted.len());
        for (key, value) in sorted {
            match entries.as_mut_slice().last_mut() {
                Some(last) if comparator.compare(&last.0, &key) == Ordering::Equal => {
                    last.1 = value;
                }
                _ => entries.push((key, value)),
            }
        }
        Self { entries, comparator }
    }

    /// Reconstructs a map from its serialized parts, re-running every pair through
    /// [`set`](SortedMap::set).
    pub fn from_parts<I>(entries: I, comparator: Comparator<K>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_comparator(comparator);
        for (key, value) in entries {
            map.set(key, value);
        }
        map
    }

    /// Splits the map into its ordered entries and comparator.
    pub fn into_parts(self) -> (Vector<(K, V)>, Comparator<K>) {
        (self.entries, self.comparator)
    }

    #[inline]
    pub fn comparator(&self) -> &Comparator<K> {
        &self.comparator
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn search(&self, key: &K) -> core::result::Result<usize, usize> {
        let cmp = &self.comparator;
        search::binary_search_by(&self.entries, 0..self.entries.len(), |entry: &(K, V)| {
            cmp.compare(&entry.0, key)
        })
    }

    fn locate(&self, key: &K) -> Result<usize> {
        self.search(key).map_err(|_| Error::UnknownKey)
    }

    // ─── Lookup ──────────────────────────────────────────────────────────────

    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// Value for `key`, or [`Error::UnknownKey`].
    pub fn get(&self, key: &K) -> Result<&V> {
        let i = self.locate(key)?;
        Ok(&self.entries[i].1)
    }

    pub fn try_get(&self, key: &K) -> Option<&V> {
        self.get(key).ok()
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let i = self.locate(key)?;
        Ok(&mut self.entries[i].1)
    }

    /// Position of `key` in iteration order.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.search(key).ok()
    }

    /// Entry at `index`; negative indices count from the largest key.
    pub fn entry_at(&self, index: isize) -> Result<(&K, &V)> {
        let i = index::element(index, self.len())?;
        let (k, v) = &self.entries[i];
        Ok((k, v))
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Result<(&K, &V)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Result<(&K, &V)> {
        self.entries.last().map(|(k, v)| (k, v))
    }

    /// Number of keys ordering before `key`.
    pub fn lower_bound(&self, key: &K) -> usize {
        let cmp = &self.comparator;
        search::lower_bound_by(&self.entries, 0..self.entries.len(), |entry: &(K, V)| {
            cmp.compare(&entry.0, key)
        })
    }

    /// Number of keys ordering before or equal to `key`.
    pub fn upper_bound(&self, key: &K) -> usize {
        let cmp = &self.comparator;
        search::upper_bound_by(&self.entries, 0..self.entries.len(), |entry: &(K, V)| {
            cmp.compare(&entry.0, key)
        })
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.as_slice().iter(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.entries.as_slice().iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.entries.as_slice().iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator + '_ {
        self.entries.as_mut_slice().iter_mut().map(|(_, v)| v)
    }

    // ─── Insertion ───────────────────────────────────────────────────────────

    /// Inserts or overwrites, returning the previous value. The stored key is kept on
    /// overwrite.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Ok(i) => Some(mem::replace(&mut self.entries[i].1, value)),
            Err(i) => {
                self.entries.insert_at(i, (key, value));
                None
            }
        }
    }

    /// Inserts a new entry; fails with [`Error::DuplicateKey`] if `key` is present.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        match self.search(&key) {
            Ok(_) => Err(Error::DuplicateKey),
            Err(i) => {
                self.entries.insert_at(i, (key, value));
                Ok(())
            }
        }
    }

    pub fn try_add(&mut self, key: K, value: V) -> bool {
        self.add(key, value).is_ok()
    }

    /// Overwrites the value of an existing key, returning the previous value. Never inserts.
    pub fn replace(&mut self, key: &K, value: V) -> Result<V> {
        let i = self.locate(key)?;
        Ok(mem::replace(&mut self.entries[i].1, value))
    }

    pub fn try_replace(&mut self, key: &K, value: V) -> Option<V> {
        self.replace(key, value).ok()
    }

    // ─── Removal ─────────────────────────────────────────────────────────────

    /// Removes `key`, returning its value, or fails with [`Error::UnknownKey`].
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let i = self.locate(key)?;
        Ok(self.entries.remove_at(i).1)
    }

    pub fn try_remove(&mut self, key: &K) -> Option<V> {
        self.remove(key).ok()
    }

    pub fn pop_first(&mut self) -> Result<(K, V)> {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.entries.remove_at(0))
    }

    pub fn pop_last(&mut self) -> Result<(K, V)> {
        self.entries.pop()
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.entries.retain(|(k, v)| f(k, v));
    }

    // ─── Key mutation ────────────────────────────────────────────────────────

    /// Exchanges the values stored under `a` and `b`; keys stay where they are.
    pub fn swap(&mut self, a: &K, b: &K) -> Result<()> {
        let i = self.locate(a)?;
        let j = self.locate(b)?;
        if i != j {
            let (lo, hi) = (i.min(j), i.max(j));
            let (left, right) = self.entries.as_mut_slice().split_at_mut(hi);
            mem::swap(&mut left[lo].1, &mut right[0].1);
        }
        Ok(())
    }

    /// Relabels `source` as `target`, keeping its value. Fails with
    /// [`Error::UnknownKey`] if `source` is absent and [`Error::DuplicateKey`] if
    /// `target` already exists. Renaming a key to itself does nothing.
    pub fn rename(&mut self, source: &K, target: K) -> Result<()> {
        let from = self.locate(source)?;
        if self.comparator.compare(source, &target) == Ordering::Equal {
            return Ok(());
        }
        match self.search(&target) {
            Ok(_) => Err(Error::DuplicateKey),
            Err(to) => {
                self.relabel(from, to, target);
                Ok(())
            }
        }
    }

    pub fn try_rename(&mut self, source: &K, target: K) -> bool {
        self.rename(source, target).is_ok()
    }

    /// Moves the value under `source` to `target`, overwriting any entry already at
    /// `target`. Fails with [`Error::UnknownKey`] if `source` is absent.
    pub fn move_key(&mut self, source: &K, target: K) -> Result<()> {
        let mut from = self.locate(source)?;
        if self.comparator.compare(source, &target) == Ordering::Equal {
            return Ok(());
        }
        let to = match self.search(&target) {
            Ok(existing) => {
                log::trace!("move overwrites the entry at position {existing}");
                self.entries.remove_at(existing);
                if existing < from {
                    from -= 1;
                }
                // The overwritten slot is now the insertion point for `target`.
                existing
            }
            Err(to) => to,
        };
        self.relabel(from, to, target);
        Ok(())
    }

    /// Gives the entry at `from` the key `target`, whose insertion point in the current
    /// buffer is `to` (`to` counts the entry at `from` itself). The entry ends up at `to`
    /// when `to <= from` and at `to - 1` otherwise, matching a remove followed by a fresh
    /// search.
    fn relabel(&mut self, from: usize, to: usize, target: K) {
        let entries = self.entries.as_mut_slice();
        entries[from].0 = target;
        if from < to {
            entries[from..to].rotate_left(1);
        } else {
            entries[to..=from].rotate_right(1);
        }
    }

    // ─── Bulk operations ─────────────────────────────────────────────────────

    /// Copies every entry of `sources` into `self` with [`set`](SortedMap::set)
    /// semantics. Sources apply left to right, so later ones win on key collisions.
    ///
    /// All comparators are checked before anything is written; on
    /// [`Error::IncompatibleCollection`] `self` is unchanged.
    pub fn merge(&mut self, sources: &[&SortedMap<K, V>]) -> Result<()>
    where
        K: Clone,
        V: Clone,
    {
        for source in sources {
            compare::ensure_compatible(&self.comparator, &source.comparator)?;
        }
        for source in sources {
            self.entries.reserve(self.entries.len() + source.len());
            for (key, value) in source.entries.as_slice() {
                self.set(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    /// A new map holding only the entries whose keys appear in `keys`. Absent keys are
    /// skipped.
    pub fn project<'a, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: Clone + 'a,
        V: Clone,
    {
        let mut out = Self::with_comparator(self.comparator.clone());
        for key in keys {
            if let Ok(i) = self.search(key) {
                let (k, v) = &self.entries[i];
                out.set(k.clone(), v.clone());
            }
        }
        out
    }

    /// A new map, with the same comparator, holding the entries matching `pred`.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        Self {
            entries: self.entries.filter(|(k, v)| pred(k, v)),
            comparator: self.comparator.clone(),
        }
    }

    /// Splits into `(matching, rest)`.
    pub fn partition<F>(&self, mut pred: F) -> (Self, Self)
    where
        K: Clone,
        V: Clone,
        F: FnMut(&K, &V) -> bool,
    {
        let (yes, no) = self.entries.partition(|(k, v)| pred(k, v));
        (
            Self {
                entries: yes,
                comparator: self.comparator.clone(),
            },
            Self {
                entries: no,
                comparator: self.comparator.clone(),
            },
        )
    }

    /// Maps every value; keys and their order are unchanged.
    pub fn map_values<W, F>(&self, mut f: F) -> SortedMap<K, W>
    where
        K: Clone,
        F: FnMut(&K, &V) -> W,
    {
        SortedMap {
            entries: self.entries.map(|(k, v)| (k.clone(), f(k, v))),
            comparator: self.comparator.clone(),
        }
    }

    /// Three-way comparison: keys under the shared comparator, then values. Fails with
    /// [`Error::NotComparable`] if the comparators differ.
    pub fn compare_to(&self, other: &Self) -> Result<Ordering>
    where
        V: Ord,
    {
        compare::ensure_comparable(&self.comparator, &other.comparator)?;
        for ((ka, va), (kb, vb)) in self.entries.iter().zip(other.entries.iter()) {
            let ord = self.comparator.compare(ka, kb).then_with(|| va.cmp(vb));
            if ord != Ordering::Equal {
                return Ok(ord);
            }
        }
        Ok(self.len().cmp(&other.len()))
    }
}

// --- Iterators ---

/// Borrowing iterator over `(key, value)` pairs in ascending key order.
pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a SortedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for SortedMap<K, V> {
    type Item = (K, V);
    type IntoIter = VectorIntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// --- Traits ---

impl<K, V> Collection for SortedMap<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> KeyedStore<K, V> for SortedMap<K, V> {
    fn lookup(&self, key: &K) -> Option<&V> {
        self.try_get(key)
    }

    fn store(&mut self, key: K, value: V) -> Option<V> {
        self.set(key, value)
    }

    fn discard(&mut self, key: &K) -> Option<V> {
        self.try_remove(key)
    }
}

/// Ordered over keys.
impl<K, V> Ordered<K> for SortedMap<K, V> {
    fn comparator(&self) -> &Comparator<K> {
        &self.comparator
    }

    fn first(&self) -> Result<&K> {
        self.entries.first().map(|(k, _)| k)
    }

    fn last(&self) -> Result<&K> {
        self.entries.last().map(|(k, _)| k)
    }
}

impl<K: Clone, V: Clone> Clone for SortedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: Ord, V> Default for SortedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Debug, V: Debug> Debug for SortedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal when they share a comparator, hold equal keys under it, and equal values.
impl<K, V: PartialEq> PartialEq for SortedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.comparator.same_as(&other.comparator)
            && self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| {
                    self.comparator.compare(ka, kb) == Ordering::Equal && va == vb
                })
    }
}

impl<K, V: Eq> Eq for SortedMap<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for SortedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_iter_with(iter, Comparator::natural())
    }
}

impl<K, V> Extend<(K, V)> for SortedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for SortedMap<K, V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for SortedMap<K, V>
where
    K: Ord + serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct MapVisitor<K, V>(core::marker::PhantomData<(K, V)>);

        impl<'de, K, V> serde::de::Visitor<'de> for MapVisitor<K, V>
        where
            K: Ord + serde::Deserialize<'de>,
            V: serde::Deserialize<'de>,
        {
            type Value = SortedMap<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A>(self, mut access: A) -> core::result::Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                // The declared length comes from the payload; only trust it up to a bound.
                let hint = access.size_hint().unwrap_or(0).min(MAX_PREALLOCATED_ENTRIES);
                let mut map = SortedMap::with_capacity(hint);
                while let Some((key, value)) = access.next_entry()? {
                    map.set(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(core::marker::PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(keys: &[i32]) -> SortedMap<i32, String> {
        keys.iter().map(|k| (*k, format!("v{k}"))).collect()
    }

    fn keys_of<V>(m: &SortedMap<i32, V>) -> Vec<i32> {
        m.keys().copied().collect()
    }

    #[test]
    fn test_sorted_map_set_orders_keys() {
        let mut m = SortedMap::new();
        assert_eq!(m.set(5, 'a'), None);
        assert_eq!(m.set(2, 'b'), None);
        assert_eq!(m.set(8, 'c'), None);
        assert_eq!(keys_of(&m), vec![2, 5, 8]);
        assert_eq!(m.set(5, 'z'), Some('a'));
        assert_eq!(m.get(&5), Ok(&'z'));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_sorted_map_hard_and_soft_lookups() {
        let mut m = map(&[1, 2, 3]);
        assert_eq!(m.get(&2).map(String::as_str), Ok("v2"));
        assert_eq!(m.get(&9), Err(Error::UnknownKey));
        assert_eq!(m.try_get(&9), None);
        assert!(m.contains_key(&3));
        m.get_mut(&3).unwrap().push('!');
        assert_eq!(m.try_get(&3).map(String::as_str), Some("v3!"));
        assert_eq!(m.get_mut(&0).unwrap_err(), Error::UnknownKey);
    }

    #[test]
    fn test_sorted_map_add_and_replace() {
        let mut m = map(&[1]);
        assert_eq!(m.add(1, "x".into()), Err(Error::DuplicateKey));
        assert!(!m.try_add(1, "x".into()));
        assert!(m.try_add(0, "zero".into()));
        assert_eq!(keys_of(&m), vec![0, 1]);

        assert_eq!(m.replace(&1, "one".into()), Ok("v1".to_string()));
        assert_eq!(m.replace(&7, "seven".into()), Err(Error::UnknownKey));
        assert_eq!(m.try_replace(&7, "seven".into()), None);
        assert!(!m.contains_key(&7));
        assert_eq!(m.try_replace(&0, "z".into()), Some("zero".to_string()));
    }

    #[test]
    fn test_sorted_map_remove() {
        let mut m = map(&[1, 2, 3]);
        assert_eq!(m.remove(&2), Ok("v2".to_string()));
        assert_eq!(m.remove(&2), Err(Error::UnknownKey));
        assert_eq!(m.try_remove(&2), None);
        assert_eq!(m.pop_first().map(|(k, _)| k), Ok(1));
        assert_eq!(m.pop_last().map(|(k, _)| k), Ok(3));
        assert_eq!(m.pop_first(), Err(Error::EmptyCollection));
        assert_eq!(m.first(), Err(Error::EmptyCollection));
    }

    #[test]
    fn test_sorted_map_swap_values() {
        let mut m = map(&[1, 2, 3]);
        m.swap(&1, &3).unwrap();
        assert_eq!(keys_of(&m), vec![1, 2, 3]);
        assert_eq!(m.get(&1).map(String::as_str), Ok("v3"));
        assert_eq!(m.get(&3).map(String::as_str), Ok("v1"));
        m.swap(&2, &2).unwrap();
        assert_eq!(m.swap(&2, &9), Err(Error::UnknownKey));
        assert_eq!(m.swap(&9, &2), Err(Error::UnknownKey));
    }

    #[test]
    fn test_sorted_map_rename_scenario() {
        let mut m = map(&[1, 2, 3]);
        m.rename(&2, 10).unwrap();
        assert_eq!(keys_of(&m), vec![1, 3, 10]);
        assert_eq!(m.get(&10).map(String::as_str), Ok("v2"));

        assert_eq!(m.rename(&1, 3), Err(Error::DuplicateKey));
        assert_eq!(keys_of(&m), vec![1, 3, 10]);
        assert!(!m.try_rename(&1, 3));
        assert_eq!(m.rename(&4, 5), Err(Error::UnknownKey));
    }

    #[test]
    fn test_sorted_map_rename_to_self_is_noop() {
        let mut m = map(&[1, 2, 3]);
        m.rename(&2, 2).unwrap();
        m.move_key(&2, 2).unwrap();
        assert_eq!(m, map(&[1, 2, 3]));
    }

    #[test]
    fn test_sorted_map_rename_boundaries() {
        // Every (source, target) pair over a gapped key set, checked against
        // remove-then-reinsert.
        let base = [10, 20, 30, 40];
        for &source in &base {
            for target in [5, 15, 25, 35, 45] {
                let mut renamed = map(&base);
                renamed.rename(&source, target).unwrap();

                let mut expected = map(&base);
                let value = expected.remove(&source).unwrap();
                expected.add(target, value).unwrap();

                assert_eq!(renamed, expected, "rename {source} -> {target}");
            }
        }
    }

    #[test]
    fn test_sorted_map_rename_adjacent_slots() {
        let mut m = map(&[10, 20, 30]);
        m.rename(&20, 21).unwrap();
        assert_eq!(keys_of(&m), vec![10, 21, 30]);
        m.rename(&21, 19).unwrap();
        assert_eq!(keys_of(&m), vec![10, 19, 30]);
        m.rename(&10, 31).unwrap();
        assert_eq!(keys_of(&m), vec![19, 30, 31]);
        m.rename(&31, 0).unwrap();
        assert_eq!(keys_of(&m), vec![0, 19, 30]);
        assert_eq!(m.get(&0).map(String::as_str), Ok("v10"));
    }

    #[test]
    fn test_sorted_map_move_overwrites_target() {
        let mut m = map(&[1, 2, 3, 4]);
        m.move_key(&1, 3).unwrap();
        assert_eq!(keys_of(&m), vec![2, 3, 4]);
        assert_eq!(m.get(&3).map(String::as_str), Ok("v1"));

        m.move_key(&4, 2).unwrap();
        assert_eq!(keys_of(&m), vec![2, 3]);
        assert_eq!(m.get(&2).map(String::as_str), Ok("v4"));

        m.move_key(&2, 9).unwrap();
        assert_eq!(keys_of(&m), vec![3, 9]);
        assert_eq!(m.move_key(&7, 1), Err(Error::UnknownKey));
    }

    #[test]
    fn test_sorted_map_move_matches_remove_then_set() {
        let base = [10, 20, 30, 40];
        for &source in &base {
            for target in [5, 10, 15, 20, 25, 30, 35, 40, 45] {
                let mut moved = map(&base);
                moved.move_key(&source, target).unwrap();

                let mut expected = map(&base);
                let value = expected.remove(&source).unwrap();
                expected.set(target, value);
                assert_eq!(moved, expected, "move {source} -> {target}");
            }
        }
    }

    #[test]
    fn test_sorted_map_merge_left_to_right() {
        let mut base: SortedMap<i32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
        let first: SortedMap<i32, &str> = [(2, "first"), (3, "c")].into_iter().collect();
        let second: SortedMap<i32, &str> = [(3, "second"), (4, "d")].into_iter().collect();
        base.merge(&[&first, &second]).unwrap();
        assert_eq!(
            base.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![(1, "a"), (2, "first"), (3, "second"), (4, "d")]
        );
    }

    #[test]
    fn test_sorted_map_merge_rejects_foreign_comparator() {
        let mut base: SortedMap<i32, i32> = [(1, 1)].into_iter().collect();
        let ok: SortedMap<i32, i32> = [(2, 2)].into_iter().collect();
        let foreign = SortedMap::from_iter_with([(3, 3)], Comparator::new(|a: &i32, b: &i32| a.cmp(b)));
        assert_eq!(base.merge(&[&ok, &foreign]), Err(Error::IncompatibleCollection));
        assert_eq!(keys_of(&base), vec![1]);
    }

    #[test]
    fn test_sorted_map_project() {
        let m = map(&[1, 2, 3, 4]);
        let p = m.project(&[4, 2, 9, 2]);
        assert_eq!(keys_of(&p), vec![2, 4]);
        assert_eq!(p.get(&4).map(String::as_str), Ok("v4"));
        assert!(p.comparator().same_as(m.comparator()));
    }

    #[test]
    fn test_sorted_map_positional_and_bounds() {
        let m = map(&[10, 20, 30]);
        assert_eq!(m.entry_at(-1).map(|(k, _)| *k), Ok(30));
        assert_eq!(m.entry_at(0).map(|(k, _)| *k), Ok(10));
        assert!(m.entry_at(3).is_err());
        assert_eq!(m.index_of(&20), Some(1));
        assert_eq!(m.index_of(&25), None);
        assert_eq!(m.lower_bound(&20), 1);
        assert_eq!(m.upper_bound(&20), 2);
        assert_eq!(m.lower_bound(&25), 2);
        assert_eq!(m.first().map(|(k, _)| *k), Ok(10));
        assert_eq!(m.last().map(|(k, _)| *k), Ok(30));
        assert_eq!(Ordered::first(&m), Ok(&10));
    }

    #[test]
    fn test_sorted_map_custom_comparator() {
        let by_len = Comparator::new(|a: &String, b: &String| a.len().cmp(&b.len()));
        let mut m = SortedMap::with_comparator(by_len);
        m.set("ccc".to_string(), 3);
        m.set("a".to_string(), 1);
        m.set("bb".to_string(), 2);
        // Same length collides: the stored key is kept, the value overwritten.
        assert_eq!(m.set("zz".to_string(), 20), Some(2));
        let keys: Vec<&str> = m.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "bb", "ccc"]);
        assert_eq!(m.get(&"xx".to_string()), Ok(&20));
    }

    #[test]
    fn test_sorted_map_from_iter_last_value_wins() {
        let m: SortedMap<i32, char> = [(2, 'a'), (1, 'b'), (2, 'c')].into_iter().collect();
        assert_eq!(m.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), vec![(1, 'b'), (2, 'c')]);
        let rebuilt = SortedMap::from_parts([(2, 'a'), (1, 'b'), (2, 'c')], Comparator::natural());
        assert_eq!(m, rebuilt);
    }

    #[test]
    fn test_sorted_map_cross_cutting_ops() {
        let m: SortedMap<i32, i32> = (1..=6).map(|k| (k, k * 10)).collect();
        let even = m.filter(|k, _| k % 2 == 0);
        assert_eq!(keys_of(&even), vec![2, 4, 6]);

        let (small, big) = m.partition(|_, v| *v < 40);
        assert_eq!(keys_of(&small), vec![1, 2, 3]);
        assert_eq!(keys_of(&big), vec![4, 5, 6]);

        let labels = m.map_values(|k, v| format!("{k}:{v}"));
        assert_eq!(labels.get(&2).map(String::as_str), Ok("2:20"));

        let mut r = m.clone();
        r.retain(|k, _| *k > 4);
        assert_eq!(keys_of(&r), vec![5, 6]);

        let mut doubled = m.clone();
        doubled.values_mut().for_each(|v| *v *= 2);
        assert_eq!(doubled.values().copied().collect::<Vec<_>>(), vec![20, 40, 60, 80, 100, 120]);
    }

    #[test]
    fn test_sorted_map_compare_to() {
        let a: SortedMap<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
        let b: SortedMap<i32, i32> = [(1, 1), (2, 3)].into_iter().collect();
        let c: SortedMap<i32, i32> = [(1, 1)].into_iter().collect();
        assert_eq!(a.compare_to(&b), Ok(Ordering::Less));
        assert_eq!(a.compare_to(&c), Ok(Ordering::Greater));
        assert_eq!(a.compare_to(&a.clone()), Ok(Ordering::Equal));
        let foreign = SortedMap::from_iter_with([(1, 1)], Comparator::<i32>::natural().reversed());
        assert_eq!(a.compare_to(&foreign), Err(Error::NotComparable));
    }

    #[test]
    fn test_sorted_map_traits_exhaustive() {
        let mut m: SortedMap<i32, i32> = SortedMap::default();
        m.extend([(3, 30), (1, 10), (3, 33)]);
        assert_eq!(format!("{m:?}"), "{1: 10, 3: 33}");
        assert_eq!(m.store(2, 20), None);
        assert_eq!(m.lookup(&2), Some(&20));
        assert_eq!(m.discard(&2), Some(20));
        assert!(!KeyedStore::contains_key(&m, &2));
        assert_eq!(Collection::len(&m), 2);

        let borrowed: Vec<(i32, i32)> = (&m).into_iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(borrowed, vec![(1, 10), (3, 33)]);
        let reversed: Vec<i32> = m.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(reversed, vec![3, 1]);
        let owned: Vec<(i32, i32)> = m.clone().into_iter().collect();
        assert_eq!(owned, vec![(1, 10), (3, 33)]);

        let (entries, cmp) = m.into_parts();
        assert_eq!(entries.len(), 2);
        assert!(cmp.is_natural());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_sorted_map_serde_roundtrip() {
        let m: SortedMap<String, u32> = [("b".to_string(), 2), ("a".to_string(), 1)].into_iter().collect();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
        let back: SortedMap<String, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        let repaired: SortedMap<String, u32> = serde_json::from_str(r#"{"z":1,"c":2}"#).unwrap();
        assert_eq!(repaired.keys().cloned().collect::<Vec<_>>(), vec!["c", "z"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_sorted_map_serde_ignores_inflated_length() {
        use serde::Deserialize;
        use serde::de::value::{Error as ValueError, MapDeserializer};

        // Yields one entry but claims to hold 2^40 of them.
        struct Inflated(Option<(String, u32)>);

        impl Iterator for Inflated {
            type Item = (String, u32);

            fn next(&mut self) -> Option<Self::Item> {
                self.0.take()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (1 << 40, Some(1 << 40))
            }
        }

        let de: MapDeserializer<'_, Inflated, ValueError> =
            MapDeserializer::new(Inflated(Some(("k".to_string(), 7))));
        let m = SortedMap::<String, u32>::deserialize(de).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&"k".to_string()), Ok(&7));
    }
}
