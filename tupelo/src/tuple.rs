//! Typed tuples: a statically typed facade over a type-erased element store.

use std::{
    any,
    cmp::Ordering,
    collections::HashMap,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    marker::PhantomData,
    slice,
};

use crate::list::*;
use crate::unary::{Position, Unary};
use crate::{AsElements, DynTuple, Element, Elements, Error, IntoElements, Matcher, Value};

/// An immutable tuple whose element types are the native Rust tuple `Types`, so a
/// `Tuple<(i32, String)>` holds an `i32` at position 1 and a `String` at position 2.
///
/// The synonyms [`Tuple0`](crate::Tuple0) .. [`Tuple16`](crate::Tuple16) name each arity.
///
/// Elements are stored type-erased (see [`Elements`]); the facade re-asserts their types, so the
/// positional accessors `value1()` .. `valueN()` never fail. Structural operations compute the type
/// of their result at compile time from the type-level list operations in [`list`](crate::list),
/// and take positions and rotation counts as [`unary`](crate::unary) numbers: an out-of-range
/// position, or a result deeper than [`MAX_DEPTH`](crate::MAX_DEPTH), does not compile. For
/// runtime positions and depths, use a [`DynTuple`].
///
/// Every operation returns a new tuple; none mutates its receiver, and cloning shares storage.
///
/// # Examples
///
/// ```
/// use tupelo::Tuple;
/// use tupelo::unary::types::*;
///
/// let t = Tuple::new((1, "two", 3.0));
/// assert_eq!(*t.value2(), "two");
///
/// let (head, tail) = t.splice::<_2>();
/// assert_eq!(head, Tuple::new((1,)));
/// assert_eq!(tail, Tuple::new(("two", 3.0)));
/// assert_eq!(head.join(&tail), t);
///
/// let u = t.transform::<_1, _, _>(|n: &i32| n.to_string());
/// assert_eq!(u.value1(), "1");
/// assert_eq!(t.rotate_left::<_1>(), Tuple::new(("two", 3.0, 1)));
/// ```
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct Tuple<Types> {
    elements: Elements,
    types: PhantomData<fn() -> Types>,
}

impl<Types> Tuple<Types> {
    pub(crate) fn from_elements(elements: Elements) -> Self {
        Tuple {
            elements,
            types: PhantomData,
        }
    }

    /// The element at a zero-based `index`, which the type parameter guarantees is a `T`.
    pub(crate) fn typed<T: Element>(&self, index: usize) -> &T {
        match self
            .elements
            .as_slice()
            .get(index)
            .and_then(Value::downcast_ref::<T>)
        {
            Some(value) => value,
            None => unreachable!(
                "element {} of a typed tuple is not a `{}`",
                index + 1,
                any::type_name::<T>()
            ),
        }
    }

    /// Build a tuple from a native Rust tuple of the same element types.
    pub fn new(values: Types) -> Self
    where
        Types: IntoElements,
    {
        Tuple::from_elements(values.into_elements())
    }

    /// The number of elements.
    pub fn depth(&self) -> usize {
        self.elements.depth()
    }

    /// Whether this is the empty tuple.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The type-erased element at a one-based `position`, checked at runtime. Prefer the typed
    /// accessors `value1()` .. `valueN()` or [`get`](Tuple::get) when the position is static.
    pub fn value(&self, position: usize) -> Result<&Value, Error> {
        if position == 0 || position > self.depth() {
            return Err(Error::InvalidPosition {
                position,
                depth: self.depth(),
            });
        }
        self.elements.get(position - 1)
    }

    /// The one-based position of the first element which is a `T` equal to `value`, or `0` if there
    /// is none.
    pub fn position_of<T: Element + PartialEq>(&self, value: &T) -> usize {
        self.elements.index_of_element(value).map_or(0, |i| i + 1)
    }

    /// Whether any element is a `T` equal to `value`.
    pub fn contains<T: Element + PartialEq>(&self, value: &T) -> bool {
        self.position_of(value) != 0
    }

    /// Iterate over the type-erased elements in order.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.elements.iter()
    }

    /// The type-erased elements, in order.
    pub fn to_values(&self) -> Vec<Value> {
        self.elements.iter().cloned().collect()
    }

    /// The type-erased elements, keyed by the result of applying `key` to each zero-based index.
    pub fn to_map<K, F>(&self, mut key: F) -> HashMap<K, Value>
    where
        K: Eq + Hash,
        F: FnMut(usize) -> K,
    {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, v)| (key(i), v.clone()))
            .collect()
    }

    /// Forget the element types of this tuple.
    pub fn erase(&self) -> DynTuple {
        DynTuple::from_elements(self.elements.clone())
    }
}

impl<Types: Flat> Tuple<Types> {
    /// Build a tuple from `source`, skipping `offset` values and then taking exactly as many as
    /// this tuple type is deep.
    ///
    /// Returns `Ok(None)` if `source` runs out first, and an [`Error::TypeMismatch`] if a value
    /// taken is not of the type required at its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use tupelo::{Tuple3, Value};
    ///
    /// let source = || (1..=4).map(Value::new);
    /// let t = Tuple3::<i32, i32, i32>::from_iter_at(source(), 1)?.unwrap();
    /// assert_eq!(t.to_tuple(), (2, 3, 4));
    /// assert!(Tuple3::<i32, i32, i32>::from_iter_at(source(), 2)?.is_none());
    /// # Ok::<(), tupelo::Error>(())
    /// ```
    pub fn from_iter_at<I>(source: I, offset: usize) -> Result<Option<Self>, Error>
    where
        I: IntoIterator<Item = Value>,
        ListOf<Types>: EachElement + HasLength,
    {
        let depth = <DepthOf<Types> as Unary>::VALUE;
        match DynTuple::from_iter_at(source, offset, depth)? {
            Some(tuple) => tuple.downcast().map(Some),
            None => Ok(None),
        }
    }

    /// Whether `matcher` matches this tuple, under the matcher's strategy.
    ///
    /// Unlike [`DynTuple::matches`], this cannot fail: the empty tuple has no `matches` at all.
    ///
    /// ```compile_fail
    /// use tupelo::{Matcher, Tuple0};
    ///
    /// Tuple0::default().matches(&Matcher::any((1,)).unwrap());
    /// ```
    pub fn matches<M>(&self, matcher: &Matcher<M>) -> bool
    where
        ListOf<Types>: NonEmpty,
    {
        matcher.strategy().evaluate(matcher, self)
    }

    /// The element at the one-based position `P`.
    ///
    /// ```
    /// use tupelo::Tuple;
    /// use tupelo::unary::types::*;
    ///
    /// let t = Tuple::new(('a', 2u64));
    /// assert_eq!(*t.get::<_2>(), 2u64);
    /// ```
    pub fn get<P>(&self) -> &At<Types, P>
    where
        P: Position,
        ListOf<Types>: ElementAt<P::Index>,
        At<Types, P>: Element,
    {
        self.typed(<P::Index as Unary>::VALUE)
    }

    /// This tuple's elements followed by `other`'s. Joining with the empty tuple is the identity.
    pub fn join<Other>(&self, other: &Tuple<Other>) -> Tuple<Joined<Types, Other>>
    where
        Other: Flat,
        ListOf<Types>: Append<ListOf<Other>>,
        <ListOf<Types> as Append<ListOf<Other>>>::Output: List,
    {
        Tuple::from_elements(self.elements.concat(&other.elements))
    }

    /// Insert `value` immediately before the element at the one-based position `P`.
    pub fn add<P, V>(&self, value: V) -> Tuple<Inserted<Types, P, V>>
    where
        P: Position,
        V: Element,
        ListOf<Types>: ElementAt<P::Index> + InsertAt<P::Index, V>,
        <ListOf<Types> as InsertAt<P::Index, V>>::Output: List,
    {
        let index = <P::Index as Unary>::VALUE;
        Tuple::from_elements(self.elements.insert(index, Value::new(value)))
    }

    /// Decompose this tuple into the elements before the one-based position `P` and the elements
    /// from `P` onward. `P` must lie in `[1, depth - 1]`.
    pub fn splice<P>(&self) -> (Tuple<Head<Types, P>>, Tuple<Tail<Types, P>>)
    where
        P: Position,
        ListOf<Types>: SplitAt<P::Index>,
        <ListOf<Types> as SplitAt<P::Index>>::Head: List,
        <ListOf<Types> as SplitAt<P::Index>>::Tail: List + Plural,
    {
        let index = <P::Index as Unary>::VALUE;
        (
            Tuple::from_elements(self.elements.slice(0..index)),
            Tuple::from_elements(self.elements.slice(index..self.depth())),
        )
    }

    /// Keep the elements before the one-based position `P`, discarding the rest.
    pub fn truncate<P>(&self) -> Tuple<Head<Types, P>>
    where
        P: Position,
        ListOf<Types>: SplitAt<P::Index>,
        <ListOf<Types> as SplitAt<P::Index>>::Head: List,
        <ListOf<Types> as SplitAt<P::Index>>::Tail: NonEmpty,
    {
        let index = <P::Index as Unary>::VALUE;
        Tuple::from_elements(self.elements.slice(0..index))
    }

    /// Keep the elements from the one-based position `P` onward, discarding the prefix.
    pub fn hop<P>(&self) -> Tuple<Tail<Types, P>>
    where
        P: Position,
        ListOf<Types>: SplitAt<P::Index>,
        <ListOf<Types> as SplitAt<P::Index>>::Tail: List + NonEmpty,
    {
        let index = <P::Index as Unary>::VALUE;
        Tuple::from_elements(self.elements.slice(index..self.depth()))
    }

    /// Excise the element at the one-based position `P`.
    pub fn remove<P>(&self) -> Tuple<Removed<Types, P>>
    where
        P: Position,
        ListOf<Types>: RemoveAt<P::Index>,
        <ListOf<Types> as RemoveAt<P::Index>>::Output: List,
    {
        Tuple::from_elements(self.elements.without(<P::Index as Unary>::VALUE))
    }

    /// Cyclically shift elements `N` places toward the front.
    pub fn rotate_left<N>(&self) -> Tuple<RotatedLeft<Types, N>>
    where
        N: Unary,
        ListOf<Types>: RotateLeft<N>,
        <ListOf<Types> as RotateLeft<N>>::Output: List,
    {
        Tuple::from_elements(self.elements.rotate_left(N::VALUE))
    }

    /// Cyclically shift elements `N` places toward the back.
    pub fn rotate_right<N>(&self) -> Tuple<RotatedRight<Types, N>>
    where
        N: Unary,
        ListOf<Types>: RotateRight<N>,
        <ListOf<Types> as RotateRight<N>>::Output: List,
    {
        Tuple::from_elements(self.elements.rotate_right(N::VALUE))
    }

    /// Replace the element at the one-based position `P` with the result of applying `f` to it.
    /// The new element's type is whatever `f` returns; every other element is unchanged.
    pub fn transform<P, U, F>(&self, f: F) -> Tuple<Replaced<Types, P, U>>
    where
        P: Position,
        U: Element,
        F: FnOnce(&At<Types, P>) -> U,
        ListOf<Types>: ElementAt<P::Index> + ReplaceAt<P::Index, U>,
        At<Types, P>: Element,
        <ListOf<Types> as ReplaceAt<P::Index, U>>::Output: List,
    {
        let index = <P::Index as Unary>::VALUE;
        let replacement = f(self.typed(index));
        Tuple::from_elements(self.elements.replace(index, Value::new(replacement)))
    }
}

impl Default for Tuple<()> {
    fn default() -> Self {
        Tuple::new(())
    }
}

impl<Types> Debug for Tuple<Types> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("Tuple");
        for value in self.elements.iter() {
            let _ = tuple.field(value);
        }
        tuple.finish()
    }
}

impl<Types> PartialEq for Tuple<Types> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<Types> PartialEq<DynTuple> for Tuple<Types> {
    fn eq(&self, other: &DynTuple) -> bool {
        &self.elements == other.elements()
    }
}

impl<Types> PartialEq<Tuple<Types>> for DynTuple {
    fn eq(&self, other: &Tuple<Types>) -> bool {
        self.elements() == &other.elements
    }
}

impl<Types> Eq for Tuple<Types>
where
    Types: Flat,
    ListOf<Types>: EachEq,
{
}

impl<Types> Hash for Tuple<Types>
where
    Types: Flat,
    ListOf<Types>: EachHash,
{
    fn hash<St: Hasher>(&self, state: &mut St) {
        self.depth().hash(state);
        <ListOf<Types> as EachHash>::hash_each(self.elements.as_slice(), 0, state);
    }
}

impl<Types> PartialOrd for Tuple<Types> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.elements.try_cmp(&other.elements).ok()
    }
}

impl<Types> Ord for Tuple<Types>
where
    Types: Flat,
    ListOf<Types>: EachOrd,
{
    fn cmp(&self, other: &Self) -> Ordering {
        <ListOf<Types> as EachOrd>::cmp_each(self.elements.as_slice(), other.elements.as_slice(), 0)
    }
}

impl<Types> AsElements for Tuple<Types> {
    fn elements(&self) -> &Elements {
        &self.elements
    }
}

impl<'a, Types> IntoIterator for &'a Tuple<Types> {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<Types> TryFrom<DynTuple> for Tuple<Types>
where
    Types: Flat,
    ListOf<Types>: EachElement + HasLength,
{
    type Error = Error;

    fn try_from(tuple: DynTuple) -> Result<Self, Error> {
        tuple.downcast()
    }
}

tupelo_macro::impl_accessors!(16);

// With the serde feature, a typed tuple is serialized as a fixed-length sequence of its elements,
// in order, the way serde serializes native tuples.
#[cfg(feature = "serde")]
mod serialization {
    use super::*;

    use serde::{
        de::{SeqAccess, Visitor},
        ser::SerializeTuple,
        Deserialize, Deserializer, Serialize, Serializer,
    };

    use crate::factory;

    impl<Types> Serialize for Tuple<Types>
    where
        Types: Flat,
        ListOf<Types>: EachSerialize,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_tuple(self.depth())?;
            <ListOf<Types> as EachSerialize>::serialize_each(self.elements.as_slice(), 0, &mut seq)?;
            seq.end()
        }
    }

    #[derive(Derivative)]
    #[derivative(Debug(bound = ""), Default(bound = ""))]
    struct TupleVisitor<Types>(PhantomData<fn() -> Types>);

    impl<'de, Types> Visitor<'de> for TupleVisitor<Types>
    where
        Types: Flat,
        ListOf<Types>: EachDeserialize<'de> + HasLength,
    {
        type Value = Tuple<Types>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a tuple of depth {}", <DepthOf<Types> as Unary>::VALUE)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut values = Vec::with_capacity(<DepthOf<Types> as Unary>::VALUE);
            <ListOf<Types> as EachDeserialize<'de>>::deserialize_each(&mut seq, &mut values)?;
            Ok(Tuple::from_elements(factory::rebuild(values)))
        }
    }

    impl<'de, Types> Deserialize<'de> for Tuple<Types>
    where
        Types: Flat,
        ListOf<Types>: EachDeserialize<'de> + HasLength,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let visitor: TupleVisitor<Types> = TupleVisitor::default();
            deserializer.deserialize_tuple(<DepthOf<Types> as Unary>::VALUE, visitor)
        }
    }
}
