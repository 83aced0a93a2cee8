//! The algorithms by which a [`Matcher`] is tested against a candidate tuple.

use regex::Regex;

use crate::{AsElements, Matcher, Value};

/// How the elements of a [`Matcher`] are paired with, and tested against, the elements of a
/// candidate tuple.
///
/// Whatever the strategy, a single matcher element is tested against a single candidate element
/// the same way. If the candidate element is textual, it matches when the matcher's compiled
/// pattern at that position finds a match in it; a textual candidate never matches a position
/// with no pattern, even if the two are equal. Otherwise, the candidate matches when it is equal to
/// the matcher's element.
///
/// # Examples
///
/// ```
/// use tupelo::{Matcher, Strategy, Tuple};
///
/// let matcher = Matcher::new(("^Jo.n$", 43), Strategy::All)?;
/// assert!(Tuple::new(("John", 43)).matches(&matcher));
/// assert!(!Tuple::new(("John", 44)).matches(&matcher));
///
/// let matcher = Matcher::new(("^Jo.n$", 43), Strategy::Any)?;
/// assert!(Tuple::new(("John", 44)).matches(&matcher));
/// # Ok::<(), tupelo::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Every matcher position matches the candidate's element at the same position. A candidate
    /// shallower than the matcher never matches; any candidate elements beyond the matcher's
    /// depth are ignored.
    #[default]
    All,
    /// At least one matcher position matches the candidate's element at the same position.
    /// Positions beyond the shallower of the two are never tested.
    Any,
    /// Every matcher element matches some element anywhere in the candidate. One candidate element
    /// may satisfy several matcher elements. A candidate shallower than the matcher never matches.
    Set,
}

impl Strategy {
    /// Test `candidate` against `matcher` under this strategy.
    pub fn evaluate<M, C>(self, matcher: &Matcher<M>, candidate: &C) -> bool
    where
        C: AsElements + ?Sized,
    {
        let expected = matcher.elements().as_slice();
        let patterns = matcher.patterns();
        let found = candidate.elements().as_slice();

        let pairs = || {
            expected
                .iter()
                .zip(patterns)
                .zip(found)
                .map(|((e, p), f)| admits(p.as_ref(), e, f))
        };

        match self {
            Strategy::All => found.len() >= expected.len() && pairs().all(|ok| ok),
            Strategy::Any => pairs().any(|ok| ok),
            Strategy::Set => {
                found.len() >= expected.len()
                    && expected
                        .iter()
                        .zip(patterns)
                        .all(|(e, p)| found.iter().any(|f| admits(p.as_ref(), e, f)))
            }
        }
    }
}

fn admits(pattern: Option<&Regex>, expected: &Value, found: &Value) -> bool {
    match found.as_text() {
        Some(text) => pattern.map_or(false, |pattern| pattern.is_match(text)),
        None => found == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DynTuple, Tuple};

    #[test]
    fn all_requires_every_position() {
        let m = Matcher::all((1, 2, 3)).unwrap();
        assert!(Strategy::All.evaluate(&m, &Tuple::new((1, 2, 3))));
        assert!(!Strategy::All.evaluate(&m, &Tuple::new((3, 2, 1))));
    }

    #[test]
    fn all_ignores_excess_candidate_elements() {
        let m = Matcher::all((1, 2)).unwrap();
        assert!(Strategy::All.evaluate(&m, &Tuple::new((1, 2, "anything"))));
        assert!(!Strategy::All.evaluate(&m, &Tuple::new((1,))));
    }

    #[test]
    fn any_caps_scan_at_shallower_depth() {
        let m = Matcher::any((9, 9, 3)).unwrap();
        assert!(!Strategy::Any.evaluate(&m, &Tuple::new((1, 2))));
        assert!(Strategy::Any.evaluate(&m, &Tuple::new((1, 2, 3))));
        assert!(!Strategy::Any.evaluate(&m, &DynTuple::empty()));
    }

    #[test]
    fn set_is_order_independent_membership() {
        let m = Matcher::set((1, 2, 3)).unwrap();
        assert!(Strategy::Set.evaluate(&m, &Tuple::new((3, 2, 1))));
        assert!(!Strategy::Set.evaluate(&m, &Tuple::new((3, 2, 2))));
        assert!(!Strategy::Set.evaluate(&m, &Tuple::new((1, 2))));
    }

    #[test]
    fn set_reuses_candidate_elements() {
        let m = Matcher::set((7, 7)).unwrap();
        assert!(Strategy::Set.evaluate(&m, &Tuple::new((7, 0))));
    }

    #[test]
    fn textual_candidates_only_match_patterns() {
        // A non-textual matcher element has no pattern, so a textual candidate never matches it.
        let m = Matcher::all((1,)).unwrap();
        assert!(!Strategy::All.evaluate(&m, &Tuple::new(("1",))));

        let m = Matcher::all(("b",)).unwrap();
        assert!(Strategy::All.evaluate(&m, &Tuple::new(("abc",))));
        assert!(Strategy::All.evaluate(&m, &Tuple::new((String::from("abc"),))));
        assert!(!Strategy::All.evaluate(&m, &Tuple::new(('b',))));
    }

    #[test]
    fn literals_compare_by_type_and_value() {
        let m = Matcher::all((Some(1u8), 2.5)).unwrap();
        assert!(Strategy::All.evaluate(&m, &Tuple::new((Some(1u8), 2.5))));
        assert!(!Strategy::All.evaluate(&m, &Tuple::new((Some(1u16), 2.5))));
        assert!(!Strategy::All.evaluate(&m, &Tuple::new((None::<u8>, 2.5))));
    }
}
