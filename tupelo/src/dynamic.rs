//! Tuples whose depth is known only at runtime.

use std::{cmp::Ordering, collections::HashMap, hash::Hash, slice};

use crate::factory;
use crate::list::{EachElement, Flat, HasLength, ListOf};
use crate::unary::Unary;
use crate::{AsElements, Element, Elements, Error, Matcher, Tuple, Value, MAX_DEPTH};

/// An immutable tuple of type-erased [`Value`]s whose depth is known only at runtime.
///
/// Every structural operation checks its positions (one-based, as throughout this crate) and the
/// [`MAX_DEPTH`] ceiling, returning an [`Error`] rather than panicking. Every operation returns a
/// new tuple; none mutates its receiver.
///
/// Equal tuples hash alike, so a `DynTuple` can be hashed without knowing its element types; the
/// hash covers each element's type, and the text of textual elements.
///
/// To recover a statically typed view of a `DynTuple`, use [`downcast`](DynTuple::downcast); to go
/// the other way, use [`Tuple::erase`].
///
/// # Examples
///
/// ```
/// use tupelo::{DynTuple, Value};
///
/// let t = DynTuple::from_values(vec![Value::new(1), Value::new("two"), Value::new(3.0)])?;
/// let (head, tail) = t.splice(2)?;
/// assert_eq!(head.depth(), 1);
/// assert_eq!(tail.depth(), 2);
/// assert_eq!(head.join(&tail)?, t);
/// # Ok::<(), tupelo::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct DynTuple {
    elements: Elements,
}

impl DynTuple {
    pub(crate) fn from_elements(elements: Elements) -> Self {
        DynTuple { elements }
    }

    /// The empty tuple.
    pub fn empty() -> Self {
        DynTuple::from_elements(Elements::empty())
    }

    /// Build a tuple from a sequence of values, failing if there are more than [`MAX_DEPTH`].
    pub fn from_values<I>(values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        Ok(DynTuple::from_elements(Elements::try_from_values(values)?))
    }

    /// Build a tuple of exactly `depth` elements from `source`, after skipping `offset` of them.
    ///
    /// Returns `Ok(None)` if `source` runs out before `depth` elements have been taken, and an
    /// [`Error::Overflow`] if `depth` exceeds [`MAX_DEPTH`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tupelo::{DynTuple, Value};
    ///
    /// let source = || (1..=5).map(Value::new);
    /// assert_eq!(DynTuple::from_iter_at(source(), 1, 3)?.unwrap().depth(), 3);
    /// assert!(DynTuple::from_iter_at(source(), 3, 3)?.is_none());
    /// # Ok::<(), tupelo::Error>(())
    /// ```
    pub fn from_iter_at<I>(source: I, offset: usize, depth: usize) -> Result<Option<Self>, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        Ok(factory::assemble(source, offset, depth)?.map(DynTuple::from_elements))
    }

    /// The number of elements.
    pub fn depth(&self) -> usize {
        self.elements.depth()
    }

    /// Whether this is the empty tuple.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element at a one-based `position`.
    pub fn value(&self, position: usize) -> Result<&Value, Error> {
        self.check_position(position)?;
        self.elements.get(position - 1)
    }

    /// The one-based position of the first element which is a `T` equal to `value`, or `0` if there
    /// is none.
    pub fn position_of<T: Element + PartialEq>(&self, value: &T) -> usize {
        self.elements.index_of_element(value).map_or(0, |i| i + 1)
    }

    /// The one-based position of the first element equal to `value`, or `0` if there is none.
    pub fn position_of_value(&self, value: &Value) -> usize {
        self.elements.index_of(value).map_or(0, |i| i + 1)
    }

    /// Whether any element is a `T` equal to `value`.
    pub fn contains<T: Element + PartialEq>(&self, value: &T) -> bool {
        self.position_of(value) != 0
    }

    /// This tuple's elements followed by `other`'s.
    ///
    /// Joining with the empty tuple is the identity. Fails with [`Error::Overflow`] if the combined
    /// depth exceeds [`MAX_DEPTH`].
    pub fn join(&self, other: &DynTuple) -> Result<DynTuple, Error> {
        let depth = self.depth() + other.depth();
        if depth > MAX_DEPTH {
            return Err(Error::Overflow { depth });
        }
        Ok(DynTuple::from_elements(self.elements.concat(&other.elements)))
    }

    /// Insert `value` immediately before the element at one-based `position`.
    ///
    /// This is the join of `truncate(position)`, the new value, and `hop(position)`. Fails with
    /// [`Error::Overflow`] if this tuple is already [`MAX_DEPTH`] deep.
    pub fn add(&self, position: usize, value: Value) -> Result<DynTuple, Error> {
        self.check_non_empty("add")?;
        self.check_position(position)?;
        if self.depth() == MAX_DEPTH {
            return Err(Error::Overflow {
                depth: MAX_DEPTH + 1,
            });
        }
        Ok(DynTuple::from_elements(
            self.elements.insert(position - 1, value),
        ))
    }

    /// Decompose this tuple into the elements before `position` and the elements from `position`
    /// onward. `position` must lie in `[1, depth - 1]`.
    pub fn splice(&self, position: usize) -> Result<(DynTuple, DynTuple), Error> {
        self.check_non_empty("splice")?;
        if position == 0 || position >= self.depth() {
            return Err(self.invalid(position));
        }
        let index = position - 1;
        Ok((
            DynTuple::from_elements(self.elements.slice(0..index)),
            DynTuple::from_elements(self.elements.slice(index..self.depth())),
        ))
    }

    /// Keep the elements before `position`, discarding the rest. `position` must lie in
    /// `[1, depth]`; `truncate(1)` is the empty tuple.
    pub fn truncate(&self, position: usize) -> Result<DynTuple, Error> {
        self.check_non_empty("truncate")?;
        self.check_position(position)?;
        Ok(DynTuple::from_elements(self.elements.slice(0..position - 1)))
    }

    /// Keep the elements from `position` onward, discarding the prefix. `position` must lie in
    /// `[1, depth]`.
    pub fn hop(&self, position: usize) -> Result<DynTuple, Error> {
        self.check_non_empty("hop")?;
        self.check_position(position)?;
        Ok(DynTuple::from_elements(
            self.elements.slice(position - 1..self.depth()),
        ))
    }

    /// Excise the element at `position`.
    ///
    /// To remove an element by value, find its position first with
    /// [`position_of`](DynTuple::position_of).
    pub fn remove(&self, position: usize) -> Result<DynTuple, Error> {
        self.check_non_empty("remove")?;
        self.check_position(position)?;
        Ok(DynTuple::from_elements(self.elements.without(position - 1)))
    }

    /// Cyclically shift elements `n` places toward the front; `n` is taken modulo the depth.
    pub fn rotate_left(&self, n: usize) -> DynTuple {
        DynTuple::from_elements(self.elements.rotate_left(n))
    }

    /// Cyclically shift elements `n` places toward the back; `n` is taken modulo the depth.
    pub fn rotate_right(&self, n: usize) -> DynTuple {
        DynTuple::from_elements(self.elements.rotate_right(n))
    }

    /// Replace the element at `position` with the result of applying `f` to it.
    pub fn transform<F>(&self, position: usize, f: F) -> Result<DynTuple, Error>
    where
        F: FnOnce(&Value) -> Value,
    {
        self.check_non_empty("transform")?;
        let replacement = f(self.value(position)?);
        Ok(DynTuple::from_elements(
            self.elements.replace(position - 1, replacement),
        ))
    }

    /// Whether `matcher` matches this tuple, under the matcher's strategy.
    ///
    /// Fails with [`Error::UnsupportedOnEmpty`] on the empty tuple.
    pub fn matches<M>(&self, matcher: &Matcher<M>) -> Result<bool, Error> {
        matcher.matches(self)
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.elements.iter()
    }

    /// The elements, in order.
    pub fn to_values(&self) -> Vec<Value> {
        self.elements.iter().cloned().collect()
    }

    /// The elements, keyed by the result of applying `key` to each zero-based index.
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

    /// Order this tuple relative to `other`: shallower tuples first, then lexicographically by
    /// element.
    ///
    /// Fails with [`Error::NotComparable`] if, at the first position where the tuples are not
    /// equal, the elements are of different types or their type does not order them.
    pub fn try_cmp(&self, other: &DynTuple) -> Result<Ordering, Error> {
        self.elements.try_cmp(&other.elements)
    }

    /// View this tuple as a typed [`Tuple`], if its depth and element types are exactly `Types`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tupelo::{DynTuple, Error, Tuple, Value};
    ///
    /// let t = DynTuple::from_values(vec![Value::new(1u8), Value::new('x')])?;
    /// let typed: Tuple<(u8, char)> = t.downcast()?;
    /// assert_eq!(*typed.value2(), 'x');
    /// assert!(matches!(t.downcast::<(u8, u8)>(), Err(Error::TypeMismatch { position: 2, .. })));
    /// # Ok::<(), tupelo::Error>(())
    /// ```
    pub fn downcast<Types>(&self) -> Result<Tuple<Types>, Error>
    where
        Types: Flat,
        ListOf<Types>: EachElement + HasLength,
    {
        let expected = <<ListOf<Types> as HasLength>::Length as Unary>::VALUE;
        if self.depth() != expected {
            return Err(Error::DepthMismatch {
                expected,
                found: self.depth(),
            });
        }
        <ListOf<Types> as EachElement>::type_check(self.elements.as_slice(), 0)?;
        Ok(Tuple::from_elements(self.elements.clone()))
    }

    fn check_non_empty(&self, operation: &'static str) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::UnsupportedOnEmpty { operation });
        }
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), Error> {
        if position == 0 || position > self.depth() {
            return Err(self.invalid(position));
        }
        Ok(())
    }

    fn invalid(&self, position: usize) -> Error {
        Error::InvalidPosition {
            position,
            depth: self.depth(),
        }
    }
}

impl Default for DynTuple {
    fn default() -> Self {
        DynTuple::empty()
    }
}

impl PartialOrd for DynTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl AsElements for DynTuple {
    fn elements(&self) -> &Elements {
        &self.elements
    }
}

impl<'a> IntoIterator for &'a DynTuple {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<Types> From<Tuple<Types>> for DynTuple {
    fn from(tuple: Tuple<Types>) -> Self {
        tuple.erase()
    }
}
