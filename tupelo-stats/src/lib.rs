//! Stream reducers and statistical accumulators which produce [`tupelo`] tuples.
//!
//! A [`Reducer`] folds a stream into a summary one item at a time, and [`ReduceExt::reduce_with`]
//! drives any iterator through one. The [`reduce`](crate::reduce) reducers count, join, partition,
//! and gather streams, or feed one stream to two reducers at once via [`Teeing`], which pairs their
//! results in a typed [`Tuple2`](tupelo::Tuple2). The [`stats`](crate::stats) accumulators compute
//! the mean, variance, standard deviation, and mode of a stream.
//!
//! ```
//! use tupelo_stats::{Counting, Mode, ReduceExt, Teeing};
//!
//! let rolls = [3u8, 6, 2, 6, 5, 6, 1];
//! let summary = rolls
//!     .iter()
//!     .copied()
//!     .reduce_with(Teeing::new(Counting::new(), Mode::new()));
//! assert_eq!(summary.to_tuple(), (7, Some(6)));
//! ```

#![warn(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations)]
#![warn(unused_qualifications, unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod reduce;
pub mod stats;

pub use reduce::{Counting, Joining, PartitioningBy, ReduceExt, Reducer, Teeing, ToTuple};
pub use stats::{Mean, Mode, StdDev, Variance};
