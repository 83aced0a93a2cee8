//! The unary numbers, represented by zero [`Z`] and successor [`S`].
//!
//! Typed tuple operations name positions and rotation counts with these: `splice::<_2>()` splits a
//! tuple before its second element, and `rotate_left::<_3>()` rotates it by three places. The
//! short synonyms `_0` .. `_32` live in [`types`].

/// The number zero.
///
/// # Examples
///
/// ```
/// use tupelo::unary::Z;
///
/// let zero: Z = Z;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Z;

/// The successor of `N` (i.e. `N + 1`).
///
/// # Examples
///
/// ```
/// use tupelo::unary::{S, Z};
///
/// let one: S<Z> = S(Z);
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct S<N>(pub N);

/// All unary numbers can be converted to their value-level equivalent `usize`.
///
/// # Examples
///
/// ```
/// use tupelo::unary::*;
///
/// assert_eq!(Z::VALUE, 0);
/// assert_eq!(<S<Z>>::VALUE, 1);
/// assert_eq!(<types::_16>::VALUE, 16);
/// ```
pub trait Unary: sealed::Unary + Sized + Sync + Send + 'static {
    /// The runtime value of this type-level number, as a `usize`.
    const VALUE: usize;
}

impl Unary for Z {
    const VALUE: usize = 0;
}

impl<N: Unary> Unary for S<N> {
    const VALUE: usize = N::VALUE + 1;
}

/// A one-based position: any unary number other than zero.
///
/// Its [`Index`](Position::Index) is the corresponding zero-based index, `Self - 1`, which is what
/// the type-level list operations in [`list`](crate::list) are indexed by.
///
/// ```compile_fail
/// use tupelo::unary::*;
///
/// fn position<P: Position>() {}
/// position::<Z>();
/// ```
pub trait Position: Unary {
    /// The zero-based index of this position.
    type Index: Unary;
}

impl<N: Unary> Position for S<N> {
    type Index = N;
}

pub mod types {
    //! Type synonyms for small unary numbers: rotation counts, and one-based positions in a tuple
    //! of depth at most [`MAX_DEPTH`](crate::MAX_DEPTH).
    tupelo_macro::generate_unary_types!(32);
}

mod sealed {
    use super::*;
    pub trait Unary: 'static {}
    impl Unary for Z {}
    impl<N: Unary> Unary for S<N> {}
}
