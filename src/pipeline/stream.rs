//! Result channel shared by the map and fan-out stages
//!
//! A `ResultStream` is the consuming half of a bounded mpsc channel together
//! with the handle of the task producing into it. The stream knows how many
//! values the producer announced, so the consumer can detect both a producer
//! that stopped early and one that sent too much.

use crate::error::{MapSatError, Result};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle of the runtime the caller is running on, needed to spawn a producer
pub(crate) fn runtime_handle(stage: &str) -> Result<Handle> {
    Handle::try_current().map_err(|_| MapSatError::NoRuntime {
        stage: stage.to_string(),
    })
}

/// Receiving end of a pipeline stage
#[derive(Debug)]
pub struct ResultStream<T> {
    stage: String,
    rx: mpsc::Receiver<T>,
    producer: Option<JoinHandle<Result<()>>>,
    expected: usize,
    received: usize,
}

impl<T> ResultStream<T> {
    pub(crate) fn new(
        stage: impl Into<String>,
        rx: mpsc::Receiver<T>,
        producer: JoinHandle<Result<()>>,
        expected: usize,
    ) -> Self {
        Self {
            stage: stage.into(),
            rx,
            producer: Some(producer),
            expected,
            received: 0,
        }
    }

    /// Name of the stage feeding this stream
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Number of values the producer will send before closing
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of values received so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// Receive the next value, or `None` once the channel is closed and drained.
    ///
    /// Suspends while the channel is open and empty.
    pub async fn recv(&mut self) -> Result<Option<T>> {
        match self.rx.recv().await {
            Some(value) => {
                self.received += 1;
                if self.received > self.expected {
                    return Err(self.protocol_error());
                }
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Settle the stream after it has been drained.
    ///
    /// Waits for the producer, surfaces its failure if it had one, then checks
    /// that exactly `expected` values went through the channel.
    pub async fn finish(mut self) -> Result<()> {
        if let Some(producer) = self.producer.take() {
            match producer.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => return Err(err),
                Err(join_err) => return Err(MapSatError::from_join(self.stage.clone(), join_err)),
            }
        }

        if self.received != self.expected {
            return Err(self.protocol_error());
        }
        Ok(())
    }

    fn protocol_error(&self) -> MapSatError {
        MapSatError::ChannelProtocol {
            stage: self.stage.clone(),
            expected: self.expected,
            received: self.received,
        }
    }
}
