//! The ordering primitive shared by every sorted container.
//!
//! A [`Comparator`] is a cheap, clonable handle around a three-way comparison plus an
//! **identity tag**. Containers may only be combined when their comparators carry the
//! same identity; two closures that happen to compute the same order are still
//! distinct comparators unless one was cloned from the other.
//!
//! | Constructor | Identity |
//! |-------------|----------|
//! | [`Comparator::natural`] | shared by every natural comparator of `T` |
//! | `natural().reversed()` | shared by every reversed natural comparator of `T` |
//! | [`Comparator::new`] | fresh per call |
//! | `custom.reversed()` | fresh per call |
//! | `clone()` | same as the source |

use core::cmp::Ordering;
use core::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::error::{Error, Result};

const NATURAL_ID: u64 = 0;
const NATURAL_REVERSED_ID: u64 = 1;

static NEXT_ID: AtomicU64 = AtomicU64::new(2);

fn natural_order<T: Ord + ?Sized>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

enum Order<T: ?Sized> {
    Natural(fn(&T, &T) -> Ordering),
    Custom(Rc<dyn Fn(&T, &T) -> Ordering>),
}

impl<T: ?Sized> Clone for Order<T> {
    fn clone(&self) -> Self {
        match self {
            Order::Natural(f) => Order::Natural(*f),
            Order::Custom(f) => Order::Custom(Rc::clone(f)),
        }
    }
}

/// A total order over `T` with an explicit identity.
///
/// The comparison must be pure: containers never mutate the comparator they reference
/// and assume it is antisymmetric and transitive over every element they hold.
///
/// # Examples
/// ```
/// use sorted_collections::Comparator;
/// use std::cmp::Ordering;
///
/// let by_len = Comparator::new(|a: &String, b: &String| a.len().cmp(&b.len()));
/// assert_eq!(by_len.compare(&"ab".into(), &"c".into()), Ordering::Greater);
///
/// let natural = Comparator::<i32>::natural();
/// assert!(natural.same_as(&Comparator::natural()));
/// assert!(!by_len.same_as(&Comparator::new(|a: &String, b: &String| a.len().cmp(&b.len()))));
/// ```
pub struct Comparator<T: ?Sized> {
    id: u64,
    reversed: bool,
    order: Order<T>,
}

impl<T: ?Sized> Comparator<T> {
    /// Creates a comparator from an arbitrary total order. Each call mints a new identity.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            id: NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed),
            reversed: false,
            order: Order::Custom(Rc::new(f)),
        }
    }

    /// The natural (`Ord`) order of `T`.
    ///
    /// `Ord` on tuples, slices, `Vec`, `Option` and derived types already recurses field by
    /// field, so this is the deep structural comparison used when no comparator is given.
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self {
            id: NATURAL_ID,
            reversed: false,
            order: Order::Natural(natural_order::<T>),
        }
    }

    /// Returns the opposite order.
    pub fn reversed(&self) -> Self {
        let id = match (self.id, self.reversed) {
            (NATURAL_ID, false) => NATURAL_REVERSED_ID,
            (NATURAL_REVERSED_ID, true) => NATURAL_ID,
            _ => NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed),
        };
        Self {
            id,
            reversed: !self.reversed,
            order: self.order.clone(),
        }
    }

    /// Three-way comparison of `a` against `b`.
    #[inline]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ord = match &self.order {
            Order::Natural(f) => f(a, b),
            Order::Custom(f) => f(a, b),
        };
        if self.reversed { ord.reverse() } else { ord }
    }

    /// The identity tag of this comparator.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` if both comparators share the same identity.
    #[inline]
    pub fn same_as(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Returns `true` if this is the natural order of `T` (not reversed).
    #[inline]
    pub fn is_natural(&self) -> bool {
        self.id == NATURAL_ID
    }
}

/// Fails with [`Error::IncompatibleCollection`] unless both comparators share identity.
pub(crate) fn ensure_compatible<T: ?Sized>(a: &Comparator<T>, b: &Comparator<T>) -> Result<()> {
    if a.same_as(b) {
        Ok(())
    } else {
        log::warn!(
            "rejected operation between comparators #{} and #{}",
            a.id,
            b.id
        );
        Err(Error::IncompatibleCollection)
    }
}

/// Fails with [`Error::NotComparable`] unless both comparators share identity.
pub(crate) fn ensure_comparable<T: ?Sized>(a: &Comparator<T>, b: &Comparator<T>) -> Result<()> {
    if a.same_as(b) {
        Ok(())
    } else {
        log::warn!(
            "cannot order containers using comparators #{} and #{}",
            a.id,
            b.id
        );
        Err(Error::NotComparable)
    }
}

/// Lexicographic three-way comparison of two sequences under `cmp`; a proper prefix
/// orders first.
pub(crate) fn compare_sequences<'a, T, I, J>(cmp: &Comparator<T>, a: I, b: J) -> Ordering
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    J: IntoIterator<Item = &'a T>,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp.compare(x, y) {
                Ordering::Equal => continue,
                ord => return ord,
            },
        }
    }
}

impl<T: ?Sized> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            reversed: self.reversed,
            order: self.order.clone(),
        }
    }
}

impl<T: Ord + ?Sized> Default for Comparator<T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T: ?Sized> PartialEq for Comparator<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<T: ?Sized> Eq for Comparator<T> {}

impl<T: ?Sized> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            NATURAL_ID => f.write_str("Comparator(natural)"),
            NATURAL_REVERSED_ID => f.write_str("Comparator(natural, reversed)"),
            id => write!(f, "Comparator(#{id})"),
        }
    }
}
