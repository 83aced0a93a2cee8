//! Reducers: stateful accumulators folded over a stream, one item at a time.

use std::fmt::{self, Debug, Display, Write as _};

use tupelo::{DynTuple, Element, Error, Tuple, Value, MAX_DEPTH};

/// An accumulator which accepts a stream of `T`s, one at a time, and then produces a summary of
/// them.
///
/// Every reducer in this crate starts out empty, as its [`Default`] or `new` constructor, and is
/// consumed by [`finish`](Reducer::finish).
pub trait Reducer<T> {
    /// The summary of the stream.
    type Output;

    /// Accept the next item of the stream.
    fn accept(&mut self, item: T);

    /// Consume the reducer, producing the summary of every item it accepted.
    fn finish(self) -> Self::Output;
}

/// Fold any iterator into a [`Reducer`].
///
/// # Examples
///
/// ```
/// use tupelo_stats::{Counting, Joining, ReduceExt};
///
/// assert_eq!((0..10).filter(|n| n % 3 == 0).reduce_with(Counting::new()), 4);
/// assert_eq!([1, 2, 3].iter().reduce_with(Joining::with_affixes(", ", "[", "]")), "[1, 2, 3]");
/// ```
pub trait ReduceExt: Iterator + Sized {
    /// Feed every item of this iterator to `reducer`, then finish it.
    fn reduce_with<R>(self, mut reducer: R) -> R::Output
    where
        R: Reducer<Self::Item>,
    {
        for item in self {
            reducer.accept(item);
        }
        reducer.finish()
    }
}

impl<I: Iterator> ReduceExt for I {}

/// Count the items of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counting {
    count: usize,
}

impl Counting {
    /// A counter which has seen nothing.
    pub fn new() -> Self {
        Counting::default()
    }
}

impl<T> Reducer<T> for Counting {
    type Output = usize;

    fn accept(&mut self, _: T) {
        self.count += 1;
    }

    fn finish(self) -> usize {
        self.count
    }
}

/// Concatenate the [`Display`] forms of the items of a stream, separated by a separator and
/// surrounded by a prefix and a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Joining {
    separator: String,
    suffix: String,
    joined: String,
    started: bool,
}

impl Joining {
    /// Join items with `separator` between each pair.
    pub fn new(separator: impl Into<String>) -> Self {
        Joining::with_affixes(separator, "", "")
    }

    /// Join items with `separator` between each pair, `prefix` before the first, and `suffix`
    /// after the last. An empty stream produces just `prefix` followed by `suffix`.
    pub fn with_affixes(
        separator: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Joining {
            separator: separator.into(),
            suffix: suffix.into(),
            joined: prefix.into(),
            started: false,
        }
    }
}

impl<T: Display> Reducer<T> for Joining {
    type Output = String;

    fn accept(&mut self, item: T) {
        if self.started {
            self.joined.push_str(&self.separator);
        }
        self.started = true;
        // Writing to a `String` never fails.
        let _ = write!(self.joined, "{}", item);
    }

    fn finish(mut self) -> String {
        self.joined.push_str(&self.suffix);
        self.joined
    }
}

/// Split the items of a stream by a predicate, into those which satisfy it and those which do
/// not, each in stream order.
pub struct PartitioningBy<T, P> {
    predicate: P,
    matched: Vec<T>,
    unmatched: Vec<T>,
}

impl<T, P> PartitioningBy<T, P>
where
    P: FnMut(&T) -> bool,
{
    /// Partition by `predicate`.
    pub fn new(predicate: P) -> Self {
        PartitioningBy {
            predicate,
            matched: Vec::new(),
            unmatched: Vec::new(),
        }
    }
}

impl<T, P> Reducer<T> for PartitioningBy<T, P>
where
    P: FnMut(&T) -> bool,
{
    type Output = (Vec<T>, Vec<T>);

    fn accept(&mut self, item: T) {
        if (self.predicate)(&item) {
            self.matched.push(item);
        } else {
            self.unmatched.push(item);
        }
    }

    fn finish(self) -> (Vec<T>, Vec<T>) {
        (self.matched, self.unmatched)
    }
}

impl<T: Debug, P> Debug for PartitioningBy<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitioningBy")
            .field("matched", &self.matched)
            .field("unmatched", &self.unmatched)
            .finish()
    }
}

/// Feed every item of a stream to two reducers at once, producing both of their summaries as a
/// typed pair.
///
/// # Examples
///
/// ```
/// use tupelo_stats::{Counting, Mean, ReduceExt, Teeing};
///
/// let summary = [1.0, 2.0, 6.0].into_iter().reduce_with(Teeing::new(Counting::new(), Mean::new()));
/// assert_eq!(summary.to_tuple(), (3, Some(3.0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Teeing<A, B> {
    left: A,
    right: B,
}

impl<A, B> Teeing<A, B> {
    /// Feed items to both `left` and `right`.
    pub fn new(left: A, right: B) -> Self {
        Teeing { left, right }
    }
}

impl<T, A, B> Reducer<T> for Teeing<A, B>
where
    T: Clone,
    A: Reducer<T>,
    B: Reducer<T>,
    A::Output: Element,
    B::Output: Element,
{
    type Output = Tuple<(A::Output, B::Output)>;

    fn accept(&mut self, item: T) {
        self.left.accept(item.clone());
        self.right.accept(item);
    }

    fn finish(self) -> Self::Output {
        Tuple::new((self.left.finish(), self.right.finish()))
    }
}

/// Gather a stream of [`Value`]s into a [`DynTuple`] of a fixed depth, after skipping a number of
/// them.
///
/// Produces `None` if the stream is too short, like [`DynTuple::from_iter_at`]; any values beyond
/// the requested depth are ignored.
///
/// # Examples
///
/// ```
/// use tupelo::Value;
/// use tupelo_stats::{ReduceExt, ToTuple};
///
/// let t = (1..=5).map(Value::new).reduce_with(ToTuple::at(1, 3)?).unwrap();
/// assert_eq!(t.value(1)?, &Value::new(2));
/// assert!((1..=3).map(Value::new).reduce_with(ToTuple::at(1, 3)?).is_none());
/// # Ok::<(), tupelo::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToTuple {
    offset: usize,
    depth: usize,
    skipped: usize,
    values: Vec<Value>,
}

impl ToTuple {
    /// Gather the first `depth` values of the stream.
    ///
    /// Fails with [`Error::Overflow`] if `depth` exceeds [`MAX_DEPTH`].
    pub fn new(depth: usize) -> Result<Self, Error> {
        ToTuple::at(0, depth)
    }

    /// Skip `offset` values of the stream, then gather the next `depth`.
    ///
    /// Fails with [`Error::Overflow`] if `depth` exceeds [`MAX_DEPTH`].
    pub fn at(offset: usize, depth: usize) -> Result<Self, Error> {
        if depth > MAX_DEPTH {
            return Err(Error::Overflow { depth });
        }
        Ok(ToTuple {
            offset,
            depth,
            skipped: 0,
            values: Vec::with_capacity(depth),
        })
    }
}

impl Reducer<Value> for ToTuple {
    type Output = Option<DynTuple>;

    fn accept(&mut self, item: Value) {
        if self.skipped < self.offset {
            self.skipped += 1;
        } else if self.values.len() < self.depth {
            self.values.push(item);
        }
    }

    fn finish(self) -> Option<DynTuple> {
        // The depth is within bounds, so the factory can only report a short stream.
        DynTuple::from_iter_at(self.values, 0, self.depth)
            .ok()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting() {
        assert_eq!("hello".chars().reduce_with(Counting::new()), 5);
        assert_eq!(std::iter::empty::<()>().reduce_with(Counting::new()), 0);
    }

    #[test]
    fn joining() {
        assert_eq!(["a", "b", "c"].iter().reduce_with(Joining::new("-")), "a-b-c");
        assert_eq!(
            std::iter::empty::<u8>().reduce_with(Joining::with_affixes(",", "<", ">")),
            "<>"
        );
        assert_eq!(Some(7).into_iter().reduce_with(Joining::with_affixes(",", "<", ">")), "<7>");
    }

    #[test]
    fn partitioning_keeps_stream_order() {
        let (even, odd) = (1..=7).reduce_with(PartitioningBy::new(|n: &i32| n % 2 == 0));
        assert_eq!(even, [2, 4, 6]);
        assert_eq!(odd, [1, 3, 5, 7]);
    }

    #[test]
    fn teeing_produces_a_typed_pair() {
        let pair = ["x", "yy"]
            .into_iter()
            .reduce_with(Teeing::new(Counting::new(), Joining::new("")));
        assert_eq!(*pair.value1(), 2);
        assert_eq!(pair.value2(), "xyy");
    }

    #[test]
    fn to_tuple_rejects_overdeep_requests() {
        assert!(matches!(ToTuple::new(17), Err(Error::Overflow { depth: 17 })));
    }

    #[test]
    fn to_tuple_ignores_excess_values() {
        let t = (0..100).map(Value::new).reduce_with(ToTuple::new(2).unwrap());
        assert_eq!(t.map(|t| t.depth()), Some(2));
        let empty = std::iter::empty::<Value>().reduce_with(ToTuple::new(0).unwrap());
        assert_eq!(empty, Some(DynTuple::empty()));
    }
}
