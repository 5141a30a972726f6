//! Merge-walk set algebra over strictly ascending slices.
//!
//! Every operation first classifies how the two ranges sit relative to each other by
//! comparing the tail of one against the head of the other ([`Layout`]). Disjoint ranges
//! and ranges that share only a boundary element are answered by concatenation,
//! truncation or an empty result, without touching the interior. Only overlapping ranges
//! fall through to the O(n + m) merge walk.
//!
//! Inputs must be sorted strictly ascending under the supplied comparison; outputs are
//! too. The allocating forms clone from both inputs; the `_in_place` forms rewrite a
//! [`Vector`] and clone only from the other side.

use core::cmp::Ordering;
use core::mem;

use crate::vecs::Vector;

/// Relative placement of two sorted ranges `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// At least one range is empty.
    Empty,
    /// Every element of `a` orders before every element of `b`.
    LeftFirst,
    /// `a` ends with the element `b` starts with; nothing else is shared.
    LeftTouches,
    /// Every element of `b` orders before every element of `a`.
    RightFirst,
    /// `b` ends with the element `a` starts with; nothing else is shared.
    RightTouches,
    /// The ranges interleave; only a merge walk can tell.
    Overlapping,
}

/// Classifies `a` against `b` with at most two comparisons.
pub fn layout<T, F>(a: &[T], b: &[T], mut cmp: F) -> Layout
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (Some(a_first), Some(a_last)) = (a.first(), a.last()) else {
        return Layout::Empty;
    };
    let (Some(b_first), Some(b_last)) = (b.first(), b.last()) else {
        return Layout::Empty;
    };
    match cmp(a_last, b_first) {
        Ordering::Less => return Layout::LeftFirst,
        Ordering::Equal => return Layout::LeftTouches,
        Ordering::Greater => {}
    }
    match cmp(b_last, a_first) {
        Ordering::Less => Layout::RightFirst,
        Ordering::Equal => Layout::RightTouches,
        Ordering::Greater => Layout::Overlapping,
    }
}

fn concat<T: Clone>(parts: &[&[T]]) -> Vector<T> {
    let mut out = Vector::with_capacity(parts.iter().map(|p| p.len()).sum());
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

// ─── Allocating forms ────────────────────────────────────────────────────────

/// Elements in `a` or `b`, once each.
pub fn union<T, F>(a: &[T], b: &[T], mut cmp: F) -> Vector<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a, b, &mut cmp) {
        Layout::Empty => concat(&[a, b]),
        Layout::LeftFirst => concat(&[a, b]),
        Layout::LeftTouches => concat(&[a, &b[1..]]),
        Layout::RightFirst => concat(&[b, a]),
        Layout::RightTouches => concat(&[b, &a[1..]]),
        Layout::Overlapping => {
            let mut out = Vector::with_capacity(a.len() + b.len());
            let (mut i, mut j) = (0, 0);
            while i < a.len() && j < b.len() {
                match cmp(&a[i], &b[j]) {
                    Ordering::Less => {
                        out.push(a[i].clone());
                        i += 1;
                    }
                    Ordering::Greater => {
                        out.push(b[j].clone());
                        j += 1;
                    }
                    Ordering::Equal => {
                        out.push(a[i].clone());
                        i += 1;
                        j += 1;
                    }
                }
            }
            out.extend_from_slice(&a[i..]);
            out.extend_from_slice(&b[j..]);
            out
        }
    }
}

/// Elements in both `a` and `b` (copies taken from `a`).
pub fn intersection<T, F>(a: &[T], b: &[T], mut cmp: F) -> Vector<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a, b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst | Layout::RightFirst => Vector::new(),
        Layout::LeftTouches => concat(&[&a[a.len() - 1..]]),
        Layout::RightTouches => concat(&[&a[..1]]),
        Layout::Overlapping => {
            let mut out = Vector::new();
            let (mut i, mut j) = (0, 0);
            while i < a.len() && j < b.len() {
                match cmp(&a[i], &b[j]) {
                    Ordering::Less => i += 1,
                    Ordering::Greater => j += 1,
                    Ordering::Equal => {
                        out.push(a[i].clone());
                        i += 1;
                        j += 1;
                    }
                }
            }
            out
        }
    }
}

/// Elements of `a` that are not in `b`.
pub fn difference<T, F>(a: &[T], b: &[T], mut cmp: F) -> Vector<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a, b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst | Layout::RightFirst => concat(&[a]),
        Layout::LeftTouches => concat(&[&a[..a.len() - 1]]),
        Layout::RightTouches => concat(&[&a[1..]]),
        Layout::Overlapping => {
            let mut out = Vector::new();
            let (mut i, mut j) = (0, 0);
            while i < a.len() && j < b.len() {
                match cmp(&a[i], &b[j]) {
                    Ordering::Less => {
                        out.push(a[i].clone());
                        i += 1;
                    }
                    Ordering::Greater => j += 1,
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                }
            }
            out.extend_from_slice(&a[i..]);
            out
        }
    }
}

/// Elements in exactly one of `a` and `b`.
pub fn symmetric_difference<T, F>(a: &[T], b: &[T], mut cmp: F) -> Vector<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a, b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst => concat(&[a, b]),
        Layout::LeftTouches => concat(&[&a[..a.len() - 1], &b[1..]]),
        Layout::RightFirst => concat(&[b, a]),
        Layout::RightTouches => concat(&[&b[..b.len() - 1], &a[1..]]),
        Layout::Overlapping => {
            let mut out = Vector::with_capacity(a.len() + b.len());
            let (mut i, mut j) = (0, 0);
            while i < a.len() && j < b.len() {
                match cmp(&a[i], &b[j]) {
                    Ordering::Less => {
                        out.push(a[i].clone());
                        i += 1;
                    }
                    Ordering::Greater => {
                        out.push(b[j].clone());
                        j += 1;
                    }
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                }
            }
            out.extend_from_slice(&a[i..]);
            out.extend_from_slice(&b[j..]);
            out
        }
    }
}

// ─── In-place forms ──────────────────────────────────────────────────────────

/// `a = a ∪ b`.
pub fn union_in_place<T, F>(a: &mut Vector<T>, b: &[T], mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a.as_slice(), b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst => a.extend_from_slice(b),
        Layout::LeftTouches => a.extend_from_slice(&b[1..]),
        Layout::RightFirst => prepend(a, b),
        Layout::RightTouches => prepend(a, &b[..b.len() - 1]),
        Layout::Overlapping => {
            let mut out = Vector::with_capacity(a.len() + b.len());
            let mut j = 0;
            for x in mem::take(a) {
                while j < b.len() && cmp(&b[j], &x) == Ordering::Less {
                    out.push(b[j].clone());
                    j += 1;
                }
                if j < b.len() && cmp(&b[j], &x) == Ordering::Equal {
                    j += 1;
                }
                out.push(x);
            }
            out.extend_from_slice(&b[j..]);
            *a = out;
        }
    }
}

/// `a = a ∩ b`.
pub fn intersection_in_place<T, F>(a: &mut Vector<T>, b: &[T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a.as_slice(), b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst | Layout::RightFirst => a.clear(),
        Layout::LeftTouches => {
            let n = a.len();
            a.remove_range(0, n - 1);
        }
        Layout::RightTouches => a.truncate(1),
        Layout::Overlapping => {
            let mut j = 0;
            a.retain(|x| {
                while j < b.len() && cmp(&b[j], x) == Ordering::Less {
                    j += 1;
                }
                j < b.len() && cmp(&b[j], x) == Ordering::Equal
            });
        }
    }
}

/// `a = a − b`.
pub fn difference_in_place<T, F>(a: &mut Vector<T>, b: &[T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a.as_slice(), b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst | Layout::RightFirst => {}
        Layout::LeftTouches => {
            a.try_pop();
        }
        Layout::RightTouches => a.remove_range(0, 1),
        Layout::Overlapping => {
            let mut j = 0;
            a.retain(|x| {
                while j < b.len() && cmp(&b[j], x) == Ordering::Less {
                    j += 1;
                }
                !(j < b.len() && cmp(&b[j], x) == Ordering::Equal)
            });
        }
    }
}

/// `a = a △ b`.
pub fn symmetric_difference_in_place<T, F>(a: &mut Vector<T>, b: &[T], mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a.as_slice(), b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst => a.extend_from_slice(b),
        Layout::LeftTouches => {
            a.try_pop();
            a.extend_from_slice(&b[1..]);
        }
        Layout::RightFirst => prepend(a, b),
        Layout::RightTouches => {
            a.remove_range(0, 1);
            prepend(a, &b[..b.len() - 1]);
        }
        Layout::Overlapping => {
            let mut out = Vector::with_capacity(a.len() + b.len());
            let mut j = 0;
            for x in mem::take(a) {
                while j < b.len() && cmp(&b[j], &x) == Ordering::Less {
                    out.push(b[j].clone());
                    j += 1;
                }
                if j < b.len() && cmp(&b[j], &x) == Ordering::Equal {
                    j += 1;
                } else {
                    out.push(x);
                }
            }
            out.extend_from_slice(&b[j..]);
            *a = out;
        }
    }
}

fn prepend<T: Clone>(a: &mut Vector<T>, items: &[T]) {
    // A slice iterator reports its exact length, so this is one expansion and one shift.
    let inserted = a.insert_many(0, items.iter().cloned());
    debug_assert_eq!(inserted, Ok(items.len()));
}

// ─── Predicates ──────────────────────────────────────────────────────────────

/// `true` if `a` and `b` hold the same elements.
pub fn is_equal<T, F>(a: &[T], b: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    if a.len() != b.len() {
        return false;
    }
    match (a.first(), b.first(), a.last(), b.last()) {
        (Some(af), Some(bf), Some(al), Some(bl)) => {
            if cmp(af, bf) != Ordering::Equal || cmp(al, bl) != Ordering::Equal {
                return false;
            }
        }
        _ => return true,
    }
    a.iter().zip(b).all(|(x, y)| cmp(x, y) == Ordering::Equal)
}

/// `true` if every element of `a` is in `b`.
pub fn is_subset<T, F>(a: &[T], b: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    if a.is_empty() {
        return true;
    }
    if a.len() > b.len() {
        return false;
    }
    match layout(a, b, &mut cmp) {
        Layout::Empty => return true,
        Layout::LeftFirst | Layout::RightFirst => return false,
        Layout::LeftTouches | Layout::RightTouches => return a.len() == 1,
        Layout::Overlapping => {}
    }
    if cmp(&a[0], &b[0]) == Ordering::Less || cmp(&a[a.len() - 1], &b[b.len() - 1]) == Ordering::Greater {
        return false;
    }
    let mut j = 0;
    for x in a {
        while j < b.len() && cmp(&b[j], x) == Ordering::Less {
            j += 1;
        }
        if j == b.len() || cmp(&b[j], x) != Ordering::Equal {
            return false;
        }
        j += 1;
    }
    true
}

/// `true` if `a` and `b` share at least one element.
pub fn is_intersecting<T, F>(a: &[T], b: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    match layout(a, b, &mut cmp) {
        Layout::Empty | Layout::LeftFirst | Layout::RightFirst => false,
        Layout::LeftTouches | Layout::RightTouches => true,
        Layout::Overlapping => {
            let (mut i, mut j) = (0, 0);
            while i < a.len() && j < b.len() {
                match cmp(&a[i], &b[j]) {
                    Ordering::Less => i += 1,
                    Ordering::Greater => j += 1,
                    Ordering::Equal => return true,
                }
            }
            false
        }
    }
}
