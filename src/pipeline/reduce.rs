//! Aggregation stage
//!
//! Folds a [`ResultStream`] into one accumulator in receipt order. Receipt
//! order is not input order once several producers share a channel, so every
//! combining function used here has to be associative and commutative.

use super::stream::ResultStream;
use crate::error::Result;
use std::ops::Add;
use stillwater::Monoid;
use tracing::debug;

/// Fold every value of `stream` into `initial` with `combine(acc, value)`.
///
/// Returns only after the channel is closed and drained and the producer has
/// been settled; a producer failure or a cardinality mismatch is an error.
pub async fn reduce<T, A, F>(mut stream: ResultStream<T>, initial: A, mut combine: F) -> Result<A>
where
    F: FnMut(A, T) -> A,
{
    let mut acc = initial;
    while let Some(value) = stream.recv().await? {
        acc = combine(acc, value);
    }

    debug!(
        stage = stream.stage(),
        received = stream.received(),
        "reduce drained channel"
    );
    stream.finish().await?;
    Ok(acc)
}

/// Sum every value of the stream, starting from `T::default()`
pub async fn reduce_sum<T>(stream: ResultStream<T>) -> Result<T>
where
    T: Add<Output = T> + Default,
{
    reduce(stream, T::default(), |acc, value| acc + value).await
}

/// Fold the stream with the monoid's identity and combine
pub async fn reduce_monoid<M: Monoid>(stream: ResultStream<M>) -> Result<M> {
    reduce(stream, M::empty(), M::combine).await
}
