#[allow(unused_imports)] // To link with documentation
use crate::{DynTuple, Matcher, Tuple, MAX_DEPTH};

/// An error arising from a structural operation on a tuple, or from constructing a [`Matcher`].
///
/// Running out of source data while building a tuple from an iterator is *not* an error: the
/// factory functions ([`DynTuple::from_iter_at`], [`Tuple::from_iter_at`]) return `Ok(None)` in
/// that case, since probing for "is there enough data" is an expected outcome.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The operation would have produced a tuple deeper than [`MAX_DEPTH`].
    #[error("a tuple of depth {depth} exceeds the maximum depth of {}", MAX_DEPTH)]
    Overflow {
        /// The depth the operation would have produced. For a sequence of values too long to
        /// store, this is `MAX_DEPTH + 1`: the rest of the sequence is never read.
        depth: usize,
    },
    /// A one-based position was out of range for the tuple it was used with.
    #[error("position {position} is out of range for a tuple of depth {depth}")]
    InvalidPosition {
        /// The offending position.
        position: usize,
        /// The depth of the tuple.
        depth: usize,
    },
    /// A zero-based index into an element store was out of range.
    #[error("index {index} is out of range for an element store of depth {depth}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The depth of the store.
        depth: usize,
    },
    /// The operation is meaningless on the empty tuple.
    #[error("`{operation}` is not supported on the empty tuple")]
    UnsupportedOnEmpty {
        /// The name of the operation.
        operation: &'static str,
    },
    /// Two tuples could not be ordered, because the elements at some position are not mutually
    /// comparable.
    #[error(
        "tuple elements at position {position} are not comparably ordered (`{left}` vs `{right}`)"
    )]
    NotComparable {
        /// The first position at which the elements could not be compared.
        position: usize,
        /// The type of the left element.
        left: &'static str,
        /// The type of the right element.
        right: &'static str,
    },
    /// A type-erased tuple did not have the depth required to view it as a typed tuple.
    #[error("expected a tuple of depth {expected}, found one of depth {found}")]
    DepthMismatch {
        /// The depth of the typed tuple.
        expected: usize,
        /// The depth of the type-erased tuple.
        found: usize,
    },
    /// An element of a type-erased tuple did not have the type required to view it as a typed
    /// tuple.
    #[error("expected `{expected}` at position {position}, found `{found}`")]
    TypeMismatch {
        /// The position of the element.
        position: usize,
        /// The type the typed tuple requires.
        expected: &'static str,
        /// The type actually found.
        found: &'static str,
    },
    /// A textual matcher element was not a valid regular expression.
    #[error("invalid pattern at position {position}")]
    Pattern {
        /// The position of the pattern in the matcher.
        position: usize,
        /// The error from compiling the pattern.
        #[source]
        source: regex::Error,
    },
}
