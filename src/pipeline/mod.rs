//! Concurrent map/reduce pipeline
//!
//! - `map` turns a sequence into a [`ResultStream`] through one producer task
//! - `filter` holds the synchronous counting helpers
//! - `reduce` folds a stream with an associative, commutative combiner
//! - `fanout` runs one map/reduce per group concurrently and averages them

pub mod fanout;
pub mod filter;
pub mod map;
pub mod reduce;
pub mod semigroup;
pub mod stream;


pub use fanout::{
    fan_out, group_sum, run_classifier, run_classifier_fraction, run_with_table, summarize,
};
pub use filter::{any_sat, count_sat, filter};
pub use map::{map, map_labelled, map_sat};
pub use reduce::{reduce, reduce_monoid, reduce_sum};
pub use semigroup::{GroupOutcome, GroupTally};
pub use stillwater::monoid::Sum;
pub use stillwater::{Monoid, Semigroup};
pub use stream::ResultStream;
