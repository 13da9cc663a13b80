//! Transform stage
//!
//! One producer task walks the input in order, applies the transform inline,
//! and sends each output into a channel sized to the input. The channel closes
//! when the producer drops its sender right after the last send.

use super::stream::{runtime_handle, ResultStream};
use crate::error::{MapSatError, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Apply `transform` to every element of `items`, one output per input.
///
/// Fails with `NoRuntime` outside a tokio runtime. If `transform` panics, the
/// stream closes early and the failure surfaces when the stream is reduced.
pub fn map<I, O, F>(items: Arc<[I]>, transform: F) -> Result<ResultStream<O>>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
    F: Fn(&I) -> O + Send + Sync + 'static,
{
    map_labelled("map", items, transform)
}

/// Same as [`map`], with a stage label used in logs and errors
pub fn map_labelled<I, O, F>(label: &str, items: Arc<[I]>, transform: F) -> Result<ResultStream<O>>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
    F: Fn(&I) -> O + Send + Sync + 'static,
{
    let runtime = runtime_handle(label)?;
    let expected = items.len();
    let (tx, rx) = mpsc::channel(expected.max(1));
    let stage = label.to_string();

    let producer = runtime.spawn(async move {
        for (index, item) in items.iter().enumerate() {
            let output = transform(item);
            if tx.send(output).await.is_err() {
                return Err(MapSatError::ChannelClosed { stage });
            }
            trace!(stage = %stage, index, "sent transform output");
        }
        debug!(stage = %stage, count = items.len(), "transform stage complete");
        Ok(())
    });

    Ok(ResultStream::new(label, rx, producer, expected))
}

/// Map a predicate into a stream of 0/1 indicators
pub fn map_sat<I, P>(items: Arc<[I]>, predicate: P) -> Result<ResultStream<usize>>
where
    I: Send + Sync + 'static,
    P: Fn(&I) -> bool + Send + Sync + 'static,
{
    map_sat_labelled("map_sat", items, predicate)
}

/// Same as [`map_sat`], with a stage label used in logs and errors
pub fn map_sat_labelled<I, P>(
    label: &str,
    items: Arc<[I]>,
    predicate: P,
) -> Result<ResultStream<usize>>
where
    I: Send + Sync + 'static,
    P: Fn(&I) -> bool + Send + Sync + 'static,
{
    map_labelled(label, items, move |item| usize::from(predicate(item)))
}
