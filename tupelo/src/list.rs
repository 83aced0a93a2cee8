//! Conversions back and forth between flat tuples like `(A, B, C)` and their corresponding inductive
//! lists like `(A, (B, (C, ())))`, and the type-level operations on those lists which compute the
//! types of the results of structural tuple operations.
//!
//! Internally, typed tuples compute their result types over inductive type-level lists, but present
//! an external interface in terms of flat tuples, for readability. The traits [`Flat`] and [`List`]
//! convert between the two equivalent representations.
//!
//! At present, tuples up to size [`MAX_DEPTH`](crate::MAX_DEPTH) are supported. Since [`List`] is
//! only implemented for lists of at most that length, any typed operation whose result would be
//! deeper simply does not type-check.

use std::{
    any,
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use crate::unary::*;
use crate::{Element, Error, Value};

/// Convert a flat tuple into its corresponding inductive list structure.
pub trait Flat: Sized {
    /// The corresponding inductive list.
    type AsList: List<AsFlat = Self>;
}

/// Convert an inductive list structure into its corresponding flat tuple.
pub trait List: Sized {
    /// The corresponding flat tuple.
    type AsFlat: Flat<AsList = Self>;
}

tupelo_macro::impl_tuples!(16);

/// The inductive list corresponding to the flat tuple `T`.
pub type ListOf<T> = <T as Flat>::AsList;

/// The flat tuple corresponding to the inductive list `L`.
pub type FlatOf<L> = <L as List>::AsFlat;

/// The flat tuple of `A`'s elements followed by `B`'s.
pub type Joined<A, B> = FlatOf<<ListOf<A> as Append<ListOf<B>>>::Output>;

/// The flat tuple of `T`'s elements before the one-based position `P`.
pub type Head<T, P> = FlatOf<<ListOf<T> as SplitAt<<P as Position>::Index>>::Head>;

/// The flat tuple of `T`'s elements from the one-based position `P` onward.
pub type Tail<T, P> = FlatOf<<ListOf<T> as SplitAt<<P as Position>::Index>>::Tail>;

/// The type of `T`'s element at the one-based position `P`.
pub type At<T, P> = <ListOf<T> as ElementAt<<P as Position>::Index>>::Output;

/// The flat tuple `T` with `V` inserted before the one-based position `P`.
pub type Inserted<T, P, V> = FlatOf<<ListOf<T> as InsertAt<<P as Position>::Index, V>>::Output>;

/// The flat tuple `T` without its element at the one-based position `P`.
pub type Removed<T, P> = FlatOf<<ListOf<T> as RemoveAt<<P as Position>::Index>>::Output>;

/// The flat tuple `T` with its element at the one-based position `P` replaced by a `U`.
pub type Replaced<T, P, U> = FlatOf<<ListOf<T> as ReplaceAt<<P as Position>::Index, U>>::Output>;

/// The flat tuple `T` rotated `N` places to the left.
pub type RotatedLeft<T, N> = FlatOf<<ListOf<T> as RotateLeft<N>>::Output>;

/// The flat tuple `T` rotated `N` places to the right.
pub type RotatedRight<T, N> = FlatOf<<ListOf<T> as RotateRight<N>>::Output>;

/// The depth of the flat tuple `T`, as a unary number.
pub type DepthOf<T> = <ListOf<T> as HasLength>::Length;

/// Take the length of a type-level list as a unary type-level number.
pub trait HasLength {
    /// The length of a type-level list.
    type Length: Unary;
}

impl HasLength for () {
    type Length = Z;
}

impl<T, Ts: HasLength> HasLength for (T, Ts) {
    type Length = S<Ts::Length>;
}

/// A list with at least one element.
pub trait NonEmpty {}

impl<H, T> NonEmpty for (H, T) {}

/// A list with at least two elements.
pub trait Plural: NonEmpty {}

impl<H1, H2, T> Plural for (H1, (H2, T)) {}

/// Concatenate two lists: the type of [`join`](crate::Tuple::join).
pub trait Append<R> {
    /// `Self` followed by `R`.
    type Output;
}

impl<R> Append<R> for () {
    type Output = R;
}

impl<H, T: Append<R>, R> Append<R> for (H, T) {
    type Output = (H, T::Output);
}

/// Split a list into its first `N` elements and the rest: the type of
/// [`splice`](crate::Tuple::splice).
pub trait SplitAt<N: Unary> {
    /// The first `N` elements.
    type Head;
    /// Everything after the first `N` elements.
    type Tail;
}

impl<L> SplitAt<Z> for L {
    type Head = ();
    type Tail = L;
}

impl<N: Unary, H, T: SplitAt<N>> SplitAt<S<N>> for (H, T) {
    type Head = (H, T::Head);
    type Tail = T::Tail;
}

/// The element at zero-based index `N`.
pub trait ElementAt<N: Unary> {
    /// The element's type.
    type Output;
}

impl<H, T> ElementAt<Z> for (H, T) {
    type Output = H;
}

impl<N: Unary, H, T: ElementAt<N>> ElementAt<S<N>> for (H, T) {
    type Output = T::Output;
}

/// Insert `V` before zero-based index `N`: the type of [`add`](crate::Tuple::add).
pub trait InsertAt<N: Unary, V> {
    /// The list with `V` inserted.
    type Output;
}

impl<L, V> InsertAt<Z, V> for L {
    type Output = (V, L);
}

impl<N: Unary, H, T: InsertAt<N, V>, V> InsertAt<S<N>, V> for (H, T) {
    type Output = (H, T::Output);
}

/// Remove the element at zero-based index `N`: the type of [`remove`](crate::Tuple::remove).
pub trait RemoveAt<N: Unary> {
    /// The list without the element.
    type Output;
}

impl<H, T> RemoveAt<Z> for (H, T) {
    type Output = T;
}

impl<N: Unary, H, T: RemoveAt<N>> RemoveAt<S<N>> for (H, T) {
    type Output = (H, T::Output);
}

/// Replace the element at zero-based index `N` with `U`: the type of
/// [`transform`](crate::Tuple::transform).
pub trait ReplaceAt<N: Unary, U> {
    /// The list with the element replaced.
    type Output;
}

impl<H, T, U> ReplaceAt<Z, U> for (H, T) {
    type Output = (U, T);
}

impl<N: Unary, H, T: ReplaceAt<N, U>, U> ReplaceAt<S<N>, U> for (H, T) {
    type Output = (H, T::Output);
}

/// Split a non-empty list into everything but its last element, and its last element.
pub trait Unsnoc {
    /// Everything but the last element.
    type Init;
    /// The last element.
    type Last;
}

impl<H> Unsnoc for (H, ()) {
    type Init = ();
    type Last = H;
}

impl<H, H2, T> Unsnoc for (H, (H2, T))
where
    (H2, T): Unsnoc,
{
    type Init = (H, <(H2, T) as Unsnoc>::Init);
    type Last = <(H2, T) as Unsnoc>::Last;
}

/// Move the first element to the end.
pub trait RotateLeftOnce {
    /// The rotated list.
    type Output;
}

impl RotateLeftOnce for () {
    type Output = ();
}

impl<H, T: Append<(H, ())>> RotateLeftOnce for (H, T) {
    type Output = T::Output;
}

/// Move the last element to the front.
pub trait RotateRightOnce {
    /// The rotated list.
    type Output;
}

impl RotateRightOnce for () {
    type Output = ();
}

impl<H, T> RotateRightOnce for (H, T)
where
    (H, T): Unsnoc,
{
    type Output = (
        <(H, T) as Unsnoc>::Last,
        <(H, T) as Unsnoc>::Init,
    );
}

/// Rotate a list `N` places to the left: the type of
/// [`rotate_left`](crate::Tuple::rotate_left). Rotating by the length of the list is the identity.
pub trait RotateLeft<N: Unary> {
    /// The rotated list.
    type Output;
}

impl<L> RotateLeft<Z> for L {
    type Output = L;
}

impl<N: Unary, L: RotateLeftOnce> RotateLeft<S<N>> for L
where
    L::Output: RotateLeft<N>,
{
    type Output = <L::Output as RotateLeft<N>>::Output;
}

/// Rotate a list `N` places to the right: the type of
/// [`rotate_right`](crate::Tuple::rotate_right).
pub trait RotateRight<N: Unary> {
    /// The rotated list.
    type Output;
}

impl<L> RotateRight<Z> for L {
    type Output = L;
}

impl<N: Unary, L: RotateRightOnce> RotateRight<S<N>> for L
where
    L::Output: RotateRight<N>,
{
    type Output = <L::Output as RotateRight<N>>::Output;
}

/// Every element type of the list is an [`Element`], so a type-erased store can be checked against
/// the list before it is given a typed facade.
pub trait EachElement {
    /// Check that `values[offset..]` begins with the element types of this list, in order.
    fn type_check(values: &[Value], offset: usize) -> Result<(), Error>;
}

impl EachElement for () {
    fn type_check(_: &[Value], _: usize) -> Result<(), Error> {
        Ok(())
    }
}

impl<H: Element, T: EachElement> EachElement for (H, T) {
    fn type_check(values: &[Value], offset: usize) -> Result<(), Error> {
        match values.get(offset) {
            Some(value) if value.is::<H>() => T::type_check(values, offset + 1),
            Some(value) => Err(Error::TypeMismatch {
                position: offset + 1,
                expected: any::type_name::<H>(),
                found: value.type_name(),
            }),
            None => Err(Error::TypeMismatch {
                position: offset + 1,
                expected: any::type_name::<H>(),
                found: "nothing",
            }),
        }
    }
}

/// Every element type of the list is [`Eq`].
pub trait EachEq {}

impl EachEq for () {}

impl<H: Eq, T: EachEq> EachEq for (H, T) {}

/// Every element type of the list is [`Hash`].
pub trait EachHash {
    /// Feed `values[offset..]` into `state`, one element at a time.
    fn hash_each<St: Hasher>(values: &[Value], offset: usize, state: &mut St);
}

impl EachHash for () {
    fn hash_each<St: Hasher>(_: &[Value], _: usize, _: &mut St) {}
}

impl<H: Element + Hash, T: EachHash> EachHash for (H, T) {
    fn hash_each<St: Hasher>(values: &[Value], offset: usize, state: &mut St) {
        if let Some(value) = values.get(offset).and_then(Value::downcast_ref::<H>) {
            value.hash(state);
        }
        T::hash_each(values, offset + 1, state)
    }
}

/// Every element type of the list is [`Ord`].
pub trait EachOrd: EachEq {
    /// Lexicographically compare `left[offset..]` with `right[offset..]`.
    fn cmp_each(left: &[Value], right: &[Value], offset: usize) -> Ordering;
}

impl EachOrd for () {
    fn cmp_each(_: &[Value], _: &[Value], _: usize) -> Ordering {
        Ordering::Equal
    }
}

impl<H: Element + Ord, T: EachOrd> EachOrd for (H, T) {
    fn cmp_each(left: &[Value], right: &[Value], offset: usize) -> Ordering {
        let l = left.get(offset).and_then(Value::downcast_ref::<H>);
        let r = right.get(offset).and_then(Value::downcast_ref::<H>);
        l.cmp(&r).then_with(|| T::cmp_each(left, right, offset + 1))
    }
}

/// Every element type of the list is [`Serialize`](serde::Serialize).
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub trait EachSerialize {
    /// Serialize `values[offset..]` into `seq`, one element at a time.
    fn serialize_each<Seq>(values: &[Value], offset: usize, seq: &mut Seq) -> Result<(), Seq::Error>
    where
        Seq: serde::ser::SerializeTuple;
}

#[cfg(feature = "serde")]
impl EachSerialize for () {
    fn serialize_each<Seq>(_: &[Value], _: usize, _: &mut Seq) -> Result<(), Seq::Error>
    where
        Seq: serde::ser::SerializeTuple,
    {
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<H: Element + serde::Serialize, T: EachSerialize> EachSerialize for (H, T) {
    fn serialize_each<Seq>(values: &[Value], offset: usize, seq: &mut Seq) -> Result<(), Seq::Error>
    where
        Seq: serde::ser::SerializeTuple,
    {
        match values.get(offset).and_then(Value::downcast_ref::<H>) {
            Some(value) => seq.serialize_element(value)?,
            None => {
                return Err(serde::ser::Error::custom(format_args!(
                    "expected `{}` at position {}",
                    any::type_name::<H>(),
                    offset + 1
                )))
            }
        }
        T::serialize_each(values, offset + 1, seq)
    }
}

/// Every element type of the list is [`Deserialize`](serde::Deserialize).
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub trait EachDeserialize<'de> {
    /// Deserialize one value per element type from `seq`, appending each to `values`.
    fn deserialize_each<Seq>(seq: &mut Seq, values: &mut Vec<Value>) -> Result<(), Seq::Error>
    where
        Seq: serde::de::SeqAccess<'de>;
}

#[cfg(feature = "serde")]
impl<'de> EachDeserialize<'de> for () {
    fn deserialize_each<Seq>(_: &mut Seq, _: &mut Vec<Value>) -> Result<(), Seq::Error>
    where
        Seq: serde::de::SeqAccess<'de>,
    {
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de, H, T> EachDeserialize<'de> for (H, T)
where
    H: Element + serde::Deserialize<'de>,
    T: EachDeserialize<'de> + HasLength,
{
    fn deserialize_each<Seq>(seq: &mut Seq, values: &mut Vec<Value>) -> Result<(), Seq::Error>
    where
        Seq: serde::de::SeqAccess<'de>,
    {
        match seq.next_element::<H>()? {
            Some(value) => values.push(Value::new(value)),
            None => {
                let expected = values.len() + 1 + <T::Length as Unary>::VALUE;
                return Err(serde::de::Error::invalid_length(
                    values.len(),
                    &&*format!("a tuple of depth {}", expected),
                ));
            }
        }
        T::deserialize_each(seq, values)
    }
}
