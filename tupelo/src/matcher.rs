//! Immutable pattern tuples, tested against candidate tuples under a [`Strategy`].

use std::{
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use regex::Regex;
use tracing::trace;

use crate::list::{EachEq, EachHash, Flat, ListOf, NonEmpty};
use crate::{AsElements, Elements, Error, IntoElements, Strategy};

/// An immutable pattern of literal values and regular expressions, with the [`Strategy`] by which
/// it is tested against candidate tuples.
///
/// Textual elements (`String` and `&'static str`) are compiled into [`Regex`]es when the matcher is
/// built; every other element is compared literally. Patterns are searched for anywhere in a
/// candidate element, so write anchors explicitly to match the whole of it. See [`Strategy`] for
/// how matcher and candidate elements are paired.
///
/// The synonyms [`Matcher1`](crate::Matcher1) .. [`Matcher16`](crate::Matcher16) name each
/// arity. Two matchers are equal when their elements are, regardless of strategy.
///
/// # Examples
///
/// ```
/// use tupelo::{Matcher, Tuple};
///
/// let matcher = Matcher::set((1, 2, 3))?;
/// assert!(Tuple::new((3, 2, 1)).matches(&matcher));
/// assert!(!Tuple::new((3, 2)).matches(&matcher));
///
/// let names = Matcher::all(("^[A-Z]", "^[A-Z]"))?;
/// let mut seen = Vec::new();
/// Tuple::new(("Ada", "Lovelace"))
///     .on_match(&names, |first, last| seen.push(format!("{} {}", first, last)))
///     .on_match(&Matcher::all(("^B",))?, |_, _| unreachable!());
/// assert_eq!(seen, ["Ada Lovelace"]);
/// # Ok::<(), tupelo::Error>(())
/// ```
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), PartialEq(bound = ""))]
pub struct Matcher<Types> {
    elements: Elements,
    #[derivative(PartialEq = "ignore")]
    patterns: Box<[Option<Regex>]>,
    #[derivative(PartialEq = "ignore")]
    strategy: Strategy,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    types: PhantomData<fn() -> Types>,
}

impl<Types> Matcher<Types>
where
    Types: IntoElements + Flat,
    ListOf<Types>: NonEmpty,
{
    /// Build a matcher from a native Rust tuple of literal values and patterns.
    ///
    /// Fails with [`Error::Pattern`] if a textual element is not a valid regular expression.
    pub fn new(values: Types, strategy: Strategy) -> Result<Self, Error> {
        Matcher::compile(values.into_elements(), strategy)
    }

    /// Build a matcher using [`Strategy::All`].
    pub fn all(values: Types) -> Result<Self, Error> {
        Matcher::new(values, Strategy::All)
    }

    /// Build a matcher using [`Strategy::Any`].
    pub fn any(values: Types) -> Result<Self, Error> {
        Matcher::new(values, Strategy::Any)
    }

    /// Build a matcher using [`Strategy::Set`].
    pub fn set(values: Types) -> Result<Self, Error> {
        Matcher::new(values, Strategy::Set)
    }
}

impl<Types> Matcher<Types> {
    fn compile(elements: Elements, strategy: Strategy) -> Result<Self, Error> {
        let patterns = elements
            .iter()
            .enumerate()
            .map(|(index, value)| match value.as_text() {
                Some(text) => {
                    trace!(position = index + 1, pattern = text, "compiling matcher pattern");
                    Regex::new(text).map(Some).map_err(|source| Error::Pattern {
                        position: index + 1,
                        source,
                    })
                }
                None => Ok(None),
            })
            .collect::<Result<Box<[_]>, Error>>()?;

        Ok(Matcher {
            elements,
            patterns,
            strategy,
            types: PhantomData,
        })
    }

    pub(crate) fn patterns(&self) -> &[Option<Regex>] {
        &self.patterns
    }

    /// The number of elements.
    pub fn depth(&self) -> usize {
        self.elements.depth()
    }

    /// The strategy this matcher was built with.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The compiled pattern at a one-based `position`, or `None` if the element there is not
    /// textual.
    ///
    /// ```
    /// use tupelo::Matcher;
    ///
    /// let m = Matcher::all(("^a+$", 7))?;
    /// assert!(m.pattern(1)?.unwrap().is_match("aaa"));
    /// assert!(m.pattern(2)?.is_none());
    /// assert!(m.pattern(3).is_err());
    /// # Ok::<(), tupelo::Error>(())
    /// ```
    pub fn pattern(&self, position: usize) -> Result<Option<&Regex>, Error> {
        if position == 0 || position > self.depth() {
            return Err(Error::InvalidPosition {
                position,
                depth: self.depth(),
            });
        }
        Ok(self.patterns[position - 1].as_ref())
    }

    /// Whether `candidate` matches this matcher, under its strategy.
    ///
    /// Fails with [`Error::UnsupportedOnEmpty`] if `candidate` has no elements: there is nothing to
    /// match, and an empty candidate is not a mismatch.
    ///
    /// ```
    /// use tupelo::{DynTuple, Error, Matcher, Tuple};
    ///
    /// let m = Matcher::any((1, 2))?;
    /// assert!(m.matches(&Tuple::new((0, 2)))?);
    /// assert!(matches!(
    ///     m.matches(&DynTuple::empty()),
    ///     Err(Error::UnsupportedOnEmpty { operation: "matches" })
    /// ));
    /// # Ok::<(), tupelo::Error>(())
    /// ```
    pub fn matches<C>(&self, candidate: &C) -> Result<bool, Error>
    where
        C: AsElements + ?Sized,
    {
        if candidate.elements().is_empty() {
            return Err(Error::UnsupportedOnEmpty {
                operation: "matches",
            });
        }
        Ok(self.strategy.evaluate(self, candidate))
    }
}

impl<Types> Eq for Matcher<Types>
where
    Types: Flat,
    ListOf<Types>: EachEq,
{
}

impl<Types> Hash for Matcher<Types>
where
    Types: Flat,
    ListOf<Types>: EachHash,
{
    fn hash<St: Hasher>(&self, state: &mut St) {
        self.depth().hash(state);
        <ListOf<Types> as EachHash>::hash_each(self.elements.as_slice(), 0, state);
    }
}

impl<Types> AsElements for Matcher<Types> {
    fn elements(&self) -> &Elements {
        &self.elements
    }
}
