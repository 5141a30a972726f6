//! Error type shared by every container in the crate.
//!
//! Hard operations (`get`, `add`, `remove`, `rename`, ...) report failures through
//! [`Error`]; their soft `try_*` twins report the same conditions through
//! `Option`/`bool` and never construct an error.

use thiserror::Error;

/// Errors raised by positional, keyed and cross-container operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A positional access fell outside the valid range after negative-index
    /// normalization (`-1` is the last element).
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index as supplied by the caller, before normalization.
        index: isize,
        /// Length of the container at the time of the call.
        len: usize,
    },

    /// The key is not present in the map.
    #[error("unknown key")]
    UnknownKey,

    /// The element is not present in the set.
    #[error("unknown element")]
    UnknownElement,

    /// The key is already present in the map.
    #[error("duplicate key")]
    DuplicateKey,

    /// The element is already present in the set.
    #[error("duplicate element")]
    DuplicateElement,

    /// Front/back/pop access on an empty container.
    #[error("collection is empty")]
    EmptyCollection,

    /// A binary operation was attempted between containers ordered by different
    /// comparators.
    #[error("collections are not compatible")]
    IncompatibleCollection,

    /// Two containers were compared for ordering while using different comparators.
    #[error("collections are not comparable")]
    NotComparable,

    /// An element was rejected by a container's validity constraint.
    #[error("invalid element: {0}")]
    InvalidElement(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::IndexOutOfRange { index: -4, len: 3 };
        assert_eq!(err.to_string(), "index -4 out of range for length 3");
        assert_eq!(Error::DuplicateKey.to_string(), "duplicate key");
        assert_eq!(
            Error::InvalidElement("negative".into()).to_string(),
            "invalid element: negative"
        );
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        assert_ne!(Error::UnknownKey, Error::UnknownElement);
        assert_ne!(Error::IncompatibleCollection, Error::NotComparable);
        assert_ne!(Error::InvalidElement(String::new()), Error::EmptyCollection);
    }
}
