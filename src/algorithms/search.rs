//! Binary search kernel over index-addressable sorted sequences.
//!
//! These three functions are the only way the sorted containers locate keys and
//! elements. Each works on a half-open range `begin..end` of any [`Indexable`] sequence
//! assumed sorted ascending, and makes O(log n) probes.
//!
//! The `_by` forms take a probe closure `f(element) -> Ordering` that compares an element
//! against the target (the same convention as `slice::binary_search_by`). The plain forms
//! search the whole sequence for `target` under a [`Comparator`].
//!
//! ```text
//! lower_bound: first i with f(S[i]) >= Equal    (where target would go, before equals)
//! upper_bound: first i with f(S[i]) == Greater  (just past the run of equals)
//! binary_search: i = lower_bound; Ok(i) if S[i] == target, else Err(i)
//! ```

use core::cmp::Ordering;
use core::ops::Range;

use crate::compare::Comparator;
use crate::traits::Indexable;

#[inline]
fn check_range(range: &Range<usize>, len: usize) {
    assert!(
        range.start <= range.end && range.end <= len,
        "search range {}..{} out of bounds for length {}",
        range.start,
        range.end,
        len
    );
}

/// First index in `range` whose element does not order before the target.
///
/// # Panics
/// Panics if `range` is not within `0..=seq.len()`.
pub fn lower_bound_by<T, S, F>(seq: &S, range: Range<usize>, mut f: F) -> usize
where
    S: Indexable<T> + ?Sized,
    F: FnMut(&T) -> Ordering,
{
    check_range(&range, seq.len());
    let (mut lo, mut hi) = (range.start, range.end);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if f(seq.item(mid)) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// First index in `range` whose element orders strictly after the target.
///
/// # Panics
/// Panics if `range` is not within `0..=seq.len()`.
pub fn upper_bound_by<T, S, F>(seq: &S, range: Range<usize>, mut f: F) -> usize
where
    S: Indexable<T> + ?Sized,
    F: FnMut(&T) -> Ordering,
{
    check_range(&range, seq.len());
    let (mut lo, mut hi) = (range.start, range.end);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if f(seq.item(mid)) != Ordering::Greater {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// `Ok(index)` of an element equal to the target, or `Err(insertion point)`.
///
/// The insertion point is always the lower bound, so inserting there keeps the range
/// sorted. On a match the returned index is the leftmost equal element.
pub fn binary_search_by<T, S, F>(seq: &S, range: Range<usize>, mut f: F) -> Result<usize, usize>
where
    S: Indexable<T> + ?Sized,
    F: FnMut(&T) -> Ordering,
{
    let end = range.end;
    let i = lower_bound_by(seq, range, &mut f);
    if i < end && f(seq.item(i)) == Ordering::Equal {
        Ok(i)
    } else {
        Err(i)
    }
}

/// [`lower_bound_by`] over the whole sequence under `cmp`.
pub fn lower_bound<T, S>(seq: &S, target: &T, cmp: &Comparator<T>) -> usize
where
    S: Indexable<T> + ?Sized,
{
    lower_bound_by(seq, 0..seq.len(), |x| cmp.compare(x, target))
}

/// [`upper_bound_by`] over the whole sequence under `cmp`.
pub fn upper_bound<T, S>(seq: &S, target: &T, cmp: &Comparator<T>) -> usize
where
    S: Indexable<T> + ?Sized,
{
    upper_bound_by(seq, 0..seq.len(), |x| cmp.compare(x, target))
}

/// [`binary_search_by`] over the whole sequence under `cmp`.
pub fn binary_search<T, S>(seq: &S, target: &T, cmp: &Comparator<T>) -> Result<usize, usize>
where
    S: Indexable<T> + ?Sized,
{
    binary_search_by(seq, 0..seq.len(), |x| cmp.compare(x, target))
}
