//! Negative-index normalization shared by every positional operation.
//!
//! A negative index counts from the back: `-1` is the last element and `-len` the
//! first. Positions are resolved once here so that `Vector`, `SortedSet` and
//! `SortedMap` agree on exactly which indices are valid.

use crate::error::{Error, Result};

/// Resolves `index` to an element position in `0..len`.
#[inline]
pub(crate) fn element(index: isize, len: usize) -> Result<usize> {
    match resolve(index, len) {
        Some(i) if i < len => Ok(i),
        _ => Err(Error::IndexOutOfRange { index, len }),
    }
}

/// Resolves `index` to an insertion point in `0..=len`.
#[inline]
pub(crate) fn boundary(index: isize, len: usize) -> Result<usize> {
    match resolve(index, len) {
        Some(i) if i <= len => Ok(i),
        _ => Err(Error::IndexOutOfRange { index, len }),
    }
}

#[inline]
fn resolve(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        Some(index as usize)
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}
