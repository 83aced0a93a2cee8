//! The tuple factory: the single path by which element stores are assembled.
//!
//! Every structural operation flattens the elements it keeps into a plain sequence and hands it
//! here to be frozen into a new store; nothing else constructs an [`Elements`].

use tracing::trace;

use crate::{Elements, Error, Value, MAX_DEPTH};

/// Freeze a sequence already known to be no deeper than [`MAX_DEPTH`].
pub(crate) fn rebuild<I>(values: I) -> Elements
where
    I: IntoIterator<Item = Value>,
{
    let values: Vec<Value> = values.into_iter().collect();
    debug_assert!(values.len() <= MAX_DEPTH, "rebuilt an overdeep tuple");
    Elements::freeze(values)
}

/// Freeze a sequence, failing if it is deeper than [`MAX_DEPTH`].
///
/// At most one value past [`MAX_DEPTH`] is drawn from the sequence, so an overflow reports
/// `MAX_DEPTH + 1` whatever the sequence's true length, and an unbounded sequence still fails.
pub(crate) fn checked<I>(values: I) -> Result<Elements, Error>
where
    I: IntoIterator<Item = Value>,
{
    let frozen: Vec<Value> = values.into_iter().take(MAX_DEPTH + 1).collect();
    if frozen.len() > MAX_DEPTH {
        return Err(Error::Overflow {
            depth: frozen.len(),
        });
    }
    Ok(Elements::freeze(frozen))
}

/// Skip `offset` values of `source`, then take exactly `depth` more.
///
/// Returns `Ok(None)` if the source runs dry first, and an [`Error::Overflow`] if `depth` is
/// greater than [`MAX_DEPTH`].
pub(crate) fn assemble<I>(source: I, offset: usize, depth: usize) -> Result<Option<Elements>, Error>
where
    I: IntoIterator<Item = Value>,
{
    if depth > MAX_DEPTH {
        return Err(Error::Overflow { depth });
    }

    let values: Vec<Value> = source.into_iter().skip(offset).take(depth).collect();
    if values.len() < depth {
        trace!(
            offset,
            depth,
            available = values.len(),
            "source exhausted before the requested depth"
        );
        return Ok(None);
    }
    Ok(Some(Elements::freeze(values)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(n: i32) -> impl Iterator<Item = Value> {
        (1..=n).map(Value::new)
    }

    #[test]
    fn assemble_skips_then_takes() {
        let elements = assemble(source(10), 2, 3).unwrap().unwrap();
        let got: Vec<i32> = elements
            .iter()
            .map(|v| *v.downcast_ref::<i32>().unwrap())
            .collect();
        assert_eq!(got, vec![3, 4, 5]);
    }

    #[test]
    fn assemble_reports_insufficient_source_as_none() {
        assert!(assemble(source(4), 2, 3).unwrap().is_none());
        assert!(assemble(source(5), 2, 3).unwrap().is_some());
    }

    #[test]
    fn assemble_depth_zero_is_empty() {
        assert_eq!(assemble(source(0), 0, 0).unwrap(), Some(Elements::empty()));
    }

    #[test]
    fn assemble_rejects_overdeep_requests() {
        assert!(matches!(
            assemble(source(20), 0, 17),
            Err(Error::Overflow { depth: 17 })
        ));
    }

    #[test]
    fn checked_allows_exactly_max_depth() {
        assert_eq!(checked(source(16)).unwrap().depth(), 16);
        assert!(matches!(
            checked(source(17)),
            Err(Error::Overflow { depth: 17 })
        ));
        assert!(matches!(
            checked(source(40)),
            Err(Error::Overflow { depth: 17 })
        ));
    }

    #[test]
    fn checked_stops_reading_an_unbounded_source() {
        let mut drawn = 0;
        let unbounded = std::iter::repeat_with(|| {
            drawn += 1;
            Value::new(drawn)
        });
        assert!(matches!(
            checked(unbounded),
            Err(Error::Overflow { depth: 17 })
        ));
        assert_eq!(drawn, MAX_DEPTH + 1);
    }
}
