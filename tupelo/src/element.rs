//! The type-erased element store which backs every tuple and matcher.
//!
//! Every element is stored as a [`Value`]: a shared, immutable, type-erased [`Element`]. A sequence
//! of them, frozen once built, is an [`Elements`] store. Typed tuples re-assert the static type of
//! each position on access; dynamic tuples expose the [`Value`]s directly.

use std::{
    any::{self, Any},
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    ops::Range,
    slice,
    sync::Arc,
};

use crate::{factory, Error};

/// Anything which can be stored in a tuple.
///
/// This trait is implemented for every `'static` type which is [`Debug`], [`PartialEq`],
/// [`PartialOrd`], [`Send`], and [`Sync`]; it cannot be implemented by hand. It supplies the
/// dynamically-typed equality, ordering, and textual view that the element store, the matching
/// strategies, and dynamic tuple comparison are built on.
///
/// Strings ([`String`] and `&'static str`) are *textual*: a [`Matcher`](crate::Matcher) compiles
/// textual elements into regular expressions, and compares textual candidate elements against
/// those rather than by equality.
pub trait Element: Any + Debug + Send + Sync {
    /// View this element as [`Any`], for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Equality with an element of unknown type. Elements of different types are never equal.
    fn dyn_eq(&self, other: &dyn Element) -> bool;

    /// Ordering with an element of unknown type. Elements of different types are not ordered.
    fn dyn_partial_cmp(&self, other: &dyn Element) -> Option<Ordering>;

    /// The text of this element, if it is textual.
    fn as_text(&self) -> Option<&str>;

    /// The name of this element's concrete type.
    fn type_name(&self) -> &'static str;
}

impl<T> Element for T
where
    T: Any + Debug + PartialEq + PartialOrd + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Element) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self == other,
            None => false,
        }
    }

    fn dyn_partial_cmp(&self, other: &dyn Element) -> Option<Ordering> {
        other
            .as_any()
            .downcast_ref::<T>()
            .and_then(|other| self.partial_cmp(other))
    }

    fn as_text(&self) -> Option<&str> {
        let this: &dyn Any = self;
        if let Some(text) = this.downcast_ref::<String>() {
            Some(text.as_str())
        } else if let Some(text) = this.downcast_ref::<&'static str>() {
            Some(*text)
        } else {
            None
        }
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// A single type-erased, immutable, cheaply clonable element.
///
/// # Examples
///
/// ```
/// use tupelo::Value;
///
/// let v = Value::new(42u8);
/// assert_eq!(v.downcast_ref::<u8>(), Some(&42));
/// assert_eq!(v.downcast_ref::<i32>(), None);
/// assert_eq!(v, Value::new(42u8));
/// assert_ne!(v, Value::new(42i32));
/// ```
#[derive(Clone)]
pub struct Value(Arc<dyn Element>);

impl Value {
    /// Erase the type of an element.
    pub fn new<T: Element>(value: T) -> Self {
        Value(Arc::new(value))
    }

    /// The underlying element.
    pub fn element(&self) -> &dyn Element {
        &*self.0
    }

    /// Borrow the element as a `T`, if that is its type.
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.element().as_any().downcast_ref::<T>()
    }

    /// Whether the element is a `T`.
    pub fn is<T: Element>(&self) -> bool {
        self.element().as_any().is::<T>()
    }

    /// The text of the element, if it is textual.
    pub fn as_text(&self) -> Option<&str> {
        self.element().as_text()
    }

    /// The name of the element's concrete type.
    pub fn type_name(&self) -> &'static str {
        self.element().type_name()
    }

    /// Compare with another value, if both are of the same type and that type orders them.
    pub fn try_cmp(&self, other: &Value) -> Option<Ordering> {
        self.element().dyn_partial_cmp(other.element())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.element().dyn_eq(other.element())
    }
}

// Equal values share a concrete type, and textual ones share their text, so this agrees with
// `PartialEq` without requiring every element type to be `Hash`.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Any::type_id(self.element().as_any()).hash(state);
        if let Some(text) = self.as_text() {
            text.hash(state);
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.element(), f)
    }
}

/// An immutable, ordered, positionally-addressable sequence of at most
/// [`MAX_DEPTH`](crate::MAX_DEPTH) [`Value`]s.
///
/// The store is assembled once, by the tuple factory, and never mutated afterward;
/// cloning it is cheap, since clones share their backing storage. Two stores are equal when they
/// have the same depth and are equal element-wise, and equal stores hash alike.
#[derive(Clone, PartialEq, Hash)]
pub struct Elements {
    values: Arc<[Value]>,
}

impl Elements {
    pub(crate) fn freeze(values: Vec<Value>) -> Self {
        Elements {
            values: values.into(),
        }
    }

    /// The empty store.
    pub fn empty() -> Self {
        Elements::freeze(Vec::new())
    }

    /// Build a store from a sequence of values, failing if there are more than
    /// [`MAX_DEPTH`](crate::MAX_DEPTH) of them.
    pub fn try_from_values<I>(values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        factory::checked(values)
    }

    /// The number of elements.
    pub fn depth(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The element at a zero-based index.
    pub fn get(&self, index: usize) -> Result<&Value, Error> {
        self.values.get(index).ok_or(Error::IndexOutOfRange {
            index,
            depth: self.depth(),
        })
    }

    /// The zero-based index of the first element equal to `value`, if there is one.
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// The zero-based index of the first element which is a `T` equal to `value`, if there is one.
    pub fn index_of_element<T: Element + PartialEq>(&self, value: &T) -> Option<usize> {
        self.values
            .iter()
            .position(|v| v.downcast_ref::<T>() == Some(value))
    }

    /// Iterate over the elements in order. Each call starts afresh.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn concat(&self, other: &Elements) -> Elements {
        factory::rebuild(self.iter().chain(other.iter()).cloned())
    }

    pub(crate) fn slice(&self, range: Range<usize>) -> Elements {
        factory::rebuild(self.values[range].iter().cloned())
    }

    pub(crate) fn insert(&self, index: usize, value: Value) -> Elements {
        let (head, tail) = self.values.split_at(index);
        factory::rebuild(
            head.iter()
                .cloned()
                .chain(Some(value))
                .chain(tail.iter().cloned()),
        )
    }

    pub(crate) fn without(&self, index: usize) -> Elements {
        factory::rebuild(
            self.iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, v)| v.clone()),
        )
    }

    pub(crate) fn replace(&self, index: usize, value: Value) -> Elements {
        let mut value = Some(value);
        factory::rebuild(self.iter().enumerate().map(|(i, v)| {
            if i == index {
                value.take().unwrap_or_else(|| v.clone())
            } else {
                v.clone()
            }
        }))
    }

    /// Shallower stores first, then lexicographically by element.
    pub(crate) fn try_cmp(&self, other: &Elements) -> Result<Ordering, Error> {
        match self.depth().cmp(&other.depth()) {
            Ordering::Equal => {}
            unequal => return Ok(unequal),
        }
        for (i, (l, r)) in self.iter().zip(other.iter()).enumerate() {
            match l.try_cmp(r) {
                Some(Ordering::Equal) => {}
                Some(ordering) => return Ok(ordering),
                None => {
                    return Err(Error::NotComparable {
                        position: i + 1,
                        left: l.type_name(),
                        right: r.type_name(),
                    })
                }
            }
        }
        Ok(Ordering::Equal)
    }

    pub(crate) fn rotate_left(&self, n: usize) -> Elements {
        if self.is_empty() {
            return self.clone();
        }
        let n = n % self.depth();
        factory::rebuild(self.values[n..].iter().chain(&self.values[..n]).cloned())
    }

    pub(crate) fn rotate_right(&self, n: usize) -> Elements {
        if self.is_empty() {
            return self.clone();
        }
        let n = n % self.depth();
        self.rotate_left(self.depth() - n)
    }
}

impl Debug for Elements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Elements {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Convert a native Rust tuple of [`Element`]s into an element store. This is implemented for
/// every native tuple of depth at most [`MAX_DEPTH`](crate::MAX_DEPTH).
pub trait IntoElements {
    /// Erase the types of this tuple's elements.
    fn into_elements(self) -> Elements;
}

/// Anything backed by an element store: tuples, dynamic tuples, matchers, and stores themselves.
pub trait AsElements {
    /// The backing store.
    fn elements(&self) -> &Elements;
}

impl AsElements for Elements {
    fn elements(&self) -> &Elements {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Elements {
        Elements::try_from_values(vec![Value::new(1), Value::new("two"), Value::new(3.0)]).unwrap()
    }

    #[test]
    fn get_is_zero_based_and_bounded() {
        let s = store();
        assert_eq!(s.get(0).unwrap().downcast_ref::<i32>(), Some(&1));
        assert!(matches!(
            s.get(3),
            Err(Error::IndexOutOfRange { index: 3, depth: 3 })
        ));
    }

    #[test]
    fn index_of_uses_value_equality() {
        let s = store();
        assert_eq!(s.index_of(&Value::new("two")), Some(1));
        assert_eq!(s.index_of(&Value::new(String::from("two"))), None);
        assert_eq!(s.index_of_element(&3.0), Some(2));
        assert_eq!(s.index_of_element(&4.0), None);
    }

    #[test]
    fn iteration_is_restartable() {
        let s = store();
        assert_eq!(s.iter().count(), 3);
        assert_eq!(s.iter().count(), 3);
    }

    #[test]
    fn structural_equality() {
        assert_eq!(store(), store());
        assert_ne!(store(), store().without(2));
        assert_eq!(Elements::empty(), Elements::empty());
    }

    #[test]
    fn equal_stores_hash_alike() {
        let state = std::collections::hash_map::RandomState::new();
        let hash = |s: &Elements| {
            let mut hasher = std::hash::BuildHasher::build_hasher(&state);
            s.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&store()), hash(&store()));
        assert_eq!(hash(&store().rotate_left(3)), hash(&store()));
        assert_ne!(hash(&store()), hash(&store().without(2)));
        assert_ne!(
            hash(&Elements::try_from_values(vec![Value::new("a")]).unwrap()),
            hash(&Elements::try_from_values(vec![Value::new("b")]).unwrap())
        );
    }

    #[test]
    fn textual_elements() {
        assert_eq!(Value::new("x").as_text(), Some("x"));
        assert_eq!(Value::new(String::from("y")).as_text(), Some("y"));
        assert_eq!(Value::new('z').as_text(), None);
    }

    #[test]
    fn rotation_wraps() {
        let s = store();
        assert_eq!(s.rotate_left(1), s.rotate_left(4));
        assert_eq!(s.rotate_right(1), s.rotate_left(2));
        assert_eq!(Elements::empty().rotate_left(5), Elements::empty());
    }

    #[test]
    fn ordering_is_depth_first() {
        let short = Elements::try_from_values(vec![Value::new(9)]).unwrap();
        let long = Elements::try_from_values(vec![Value::new(1), Value::new(1)]).unwrap();
        assert_eq!(short.try_cmp(&long).unwrap(), Ordering::Less);
        assert!(matches!(
            store().try_cmp(&store().rotate_left(1)),
            Err(Error::NotComparable { position: 1, .. })
        ));
    }

    #[test]
    fn too_many_values_overflow() {
        let result = Elements::try_from_values((0..17).map(Value::new));
        assert!(matches!(result, Err(Error::Overflow { depth: 17 })));
    }
}
