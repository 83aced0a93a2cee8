//! Streaming statistics over numeric and hashable streams.
//!
//! Each accumulator is a [`Reducer`], and can also be built directly from an iterator with
//! [`FromIterator`] or grown with [`Extend`]; its current summary is available at any time from
//! `value()`. The summary of an empty stream is `None`.

use std::{collections::HashMap, hash::Hash};

use crate::Reducer;

/// The arithmetic mean of a stream of numbers.
///
/// ```
/// use tupelo_stats::Mean;
///
/// let mean: Mean = [2u8, 4, 9].into_iter().collect();
/// assert_eq!(mean.value(), Some(5.0));
/// assert_eq!(Mean::new().value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mean {
    count: u64,
    mean: f64,
}

impl Mean {
    /// The mean of nothing.
    pub fn new() -> Self {
        Mean::default()
    }

    /// The number of items seen.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The mean so far, if any items have been seen.
    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean)
        }
    }

    fn push(&mut self, x: f64) {
        self.count += 1;
        self.mean += (x - self.mean) / self.count as f64;
    }
}

/// The variance of a stream of numbers, accumulated with Welford's online algorithm.
///
/// By default this is the population variance; [`sample`](Variance::sample) gives the unbiased
/// sample variance instead, which is `None` for fewer than two items.
///
/// ```
/// use tupelo_stats::Variance;
///
/// let population: Variance = [2, 4, 4, 4, 5, 5, 7, 9].into_iter().collect();
/// assert!((population.value().unwrap() - 4.0).abs() < 1e-12);
///
/// let mut sample = Variance::sample();
/// sample.extend([1, 2, 3, 4]);
/// assert!((sample.value().unwrap() - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Variance {
    mean: Mean,
    m2: f64,
    sample: bool,
}

impl Variance {
    /// The population variance of nothing.
    pub fn new() -> Self {
        Variance::default()
    }

    /// The sample variance of nothing.
    pub fn sample() -> Self {
        Variance {
            sample: true,
            ..Variance::default()
        }
    }

    /// The number of items seen.
    pub fn count(&self) -> u64 {
        self.mean.count()
    }

    /// The mean so far, if any items have been seen.
    pub fn mean(&self) -> Option<f64> {
        self.mean.value()
    }

    /// The variance so far, if enough items have been seen.
    pub fn value(&self) -> Option<f64> {
        let n = self.count();
        match (self.sample, n) {
            (_, 0) | (true, 1) => None,
            (false, n) => Some(self.m2 / n as f64),
            (true, n) => Some(self.m2 / (n - 1) as f64),
        }
    }

    fn push(&mut self, x: f64) {
        let before = self.mean.value().unwrap_or(0.0);
        self.mean.push(x);
        let after = self.mean.value().unwrap_or(x);
        self.m2 += (x - before) * (x - after);
    }
}

/// The standard deviation of a stream of numbers: the square root of its [`Variance`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StdDev {
    variance: Variance,
}

impl StdDev {
    /// The population standard deviation of nothing.
    pub fn new() -> Self {
        StdDev::default()
    }

    /// The sample standard deviation of nothing.
    pub fn sample() -> Self {
        StdDev {
            variance: Variance::sample(),
        }
    }

    /// The standard deviation so far, if enough items have been seen.
    pub fn value(&self) -> Option<f64> {
        self.variance.value().map(f64::sqrt)
    }
}

/// The most frequent item of a stream. Ties go to whichever of the tied items appeared first.
///
/// ```
/// use tupelo_stats::Mode;
///
/// let mode: Mode<char> = "abracadabra".chars().collect();
/// assert_eq!(mode.value(), Some(&'a'));
///
/// let tied: Mode<u8> = [3, 1, 1, 3].into_iter().collect();
/// assert_eq!(tied.value(), Some(&3));
/// ```
#[derive(Debug, Clone)]
pub struct Mode<T> {
    // Item to (occurrences, index of first occurrence).
    counts: HashMap<T, (usize, usize)>,
    seen: usize,
}

impl<T: Eq + Hash> Mode<T> {
    /// The mode of nothing.
    pub fn new() -> Self {
        Mode {
            counts: HashMap::new(),
            seen: 0,
        }
    }

    /// The mode so far, if any items have been seen.
    pub fn value(&self) -> Option<&T> {
        self.counts
            .iter()
            .max_by(|(_, (a, first_a)), (_, (b, first_b))| {
                a.cmp(b).then_with(|| first_b.cmp(first_a))
            })
            .map(|(item, _)| item)
    }

    fn push(&mut self, item: T) {
        let seen = self.seen;
        let entry = self.counts.entry(item).or_insert((0, seen));
        entry.0 += 1;
        self.seen += 1;
    }
}

impl<T: Eq + Hash> Default for Mode<T> {
    fn default() -> Self {
        Mode::new()
    }
}

macro_rules! numeric_accumulator {
    ($name:ident) => {
        impl<T: Into<f64>> Reducer<T> for $name {
            type Output = Option<f64>;

            fn accept(&mut self, item: T) {
                self.extend(Some(item));
            }

            fn finish(self) -> Option<f64> {
                self.value()
            }
        }

        impl<T: Into<f64>> FromIterator<T> for $name {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut accumulator = $name::default();
                accumulator.extend(iter);
                accumulator
            }
        }
    };
}

numeric_accumulator!(Mean);
numeric_accumulator!(Variance);
numeric_accumulator!(StdDev);

impl<T: Into<f64>> Extend<T> for Mean {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|x| self.push(x.into()));
    }
}

impl<T: Into<f64>> Extend<T> for Variance {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|x| self.push(x.into()));
    }
}

impl<T: Into<f64>> Extend<T> for StdDev {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.variance.extend(iter);
    }
}

impl<T: Eq + Hash + Clone> Reducer<T> for Mode<T> {
    type Output = Option<T>;

    fn accept(&mut self, item: T) {
        self.push(item);
    }

    fn finish(self) -> Option<T> {
        self.value().cloned()
    }
}

impl<T: Eq + Hash> FromIterator<T> for Mode<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut mode = Mode::new();
        mode.extend(iter);
        mode
    }
}

impl<T: Eq + Hash> Extend<T> for Mode<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push(item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReduceExt;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map_or(false, |a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn empty_streams_have_no_summary() {
        assert_eq!(Mean::new().value(), None);
        assert_eq!(Variance::new().value(), None);
        assert_eq!(StdDev::sample().value(), None);
        assert_eq!(Mode::<u8>::new().value(), None);
        assert_eq!(std::iter::empty::<f32>().reduce_with(Mean::new()), None);
    }

    #[test]
    fn single_item_variance() {
        let population: Variance = Some(3.0).into_iter().collect();
        assert_eq!(population.value(), Some(0.0));
        let mut sample = Variance::sample();
        sample.extend(Some(3.0));
        assert_eq!(sample.value(), None);
    }

    #[test]
    fn std_dev_is_root_of_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(close(values.into_iter().reduce_with(StdDev::new()), 2.0));
        let variance: Variance = values.into_iter().collect();
        assert!(close(variance.mean(), 5.0));
        assert_eq!(variance.count(), 8);
    }

    #[test]
    fn mixed_numeric_types_convert() {
        assert!(close([1u8, 2].into_iter().reduce_with(Mean::new()), 1.5));
        assert!(close([1.5f32, 2.5].into_iter().reduce_with(Mean::new()), 2.0));
        assert!(close([-4i32, 4].into_iter().reduce_with(Mean::new()), 0.0));
    }

    #[test]
    fn mode_prefers_first_occurrence_on_ties() {
        assert_eq!(["b", "a", "a", "b"].into_iter().reduce_with(Mode::new()), Some("b"));
        assert_eq!(["b", "a", "a"].into_iter().reduce_with(Mode::new()), Some("a"));
    }
}
