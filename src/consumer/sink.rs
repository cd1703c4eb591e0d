//! Terminal consumers.
//!
//! [`SinkConsumer`] keeps every batch in memory, [`NopConsumer`] discards
//! them, [`ErrConsumer`] rejects them. Useful as the last link of a chain
//! and as stand-ins when testing stages.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::traits::MetricsConsumer;
use crate::types::{Context, Metrics};
use crate::{HeimdallError, Result};

/// Collects every batch it accepts.
///
/// Batches are refused with the context's error once the context is
/// cancelled or past its deadline; refused batches are not stored but
/// still counted as calls.
#[derive(Debug, Default)]
pub struct SinkConsumer {
    batches: Mutex<Vec<Metrics>>,
    calls: AtomicUsize,
}

impl SinkConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the batches accepted so far, in arrival order.
    pub fn batches(&self) -> Vec<Metrics> {
        self.lock().clone()
    }

    /// Metrics accepted across all batches.
    pub fn metric_count(&self) -> usize {
        self.lock().iter().map(Metrics::metric_count).sum()
    }

    /// Number of `consume_metrics` calls, accepted or not.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Forget everything received so far.
    pub fn reset(&self) {
        self.lock().clear();
        self.calls.store(0, Ordering::Relaxed);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Metrics>> {
        self.batches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MetricsConsumer for SinkConsumer {
    async fn consume_metrics(&self, ctx: &Context, metrics: Metrics) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = ctx.err() {
            return Err(err);
        }
        self.lock().push(metrics);
        Ok(())
    }
}

/// Accepts and drops every batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopConsumer;

#[async_trait]
impl MetricsConsumer for NopConsumer {
    async fn consume_metrics(&self, _ctx: &Context, _metrics: Metrics) -> Result<()> {
        Ok(())
    }
}

/// Rejects every batch with [`HeimdallError::Consumer`].
#[derive(Debug, Clone)]
pub struct ErrConsumer {
    message: String,
}

impl ErrConsumer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl MetricsConsumer for ErrConsumer {
    async fn consume_metrics(&self, _ctx: &Context, _metrics: Metrics) -> Result<()> {
        Err(HeimdallError::Consumer(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sink_collects_and_resets() {
        let sink = SinkConsumer::new();
        let ctx = Context::background();
        sink.consume_metrics(&ctx, Metrics::default()).await.unwrap();
        sink.consume_metrics(&ctx, Metrics::default()).await.unwrap();
        assert_eq!(sink.call_count(), 2);
        assert_eq!(sink.batches().len(), 2);

        sink.reset();
        assert_eq!(sink.call_count(), 0);
        assert!(sink.batches().is_empty());
    }

    #[tokio::test]
    async fn sink_refuses_cancelled_context() {
        let sink = SinkConsumer::new();
        let ctx = Context::background();
        ctx.cancel();

        let err = sink
            .consume_metrics(&ctx, Metrics::default())
            .await
            .unwrap_err();

        assert!(matches!(err, HeimdallError::Cancelled));
        assert_eq!(sink.call_count(), 1);
        assert!(sink.batches().is_empty());
    }

    #[tokio::test]
    async fn err_consumer_always_fails() {
        let consumer = ErrConsumer::new("disk full");
        let err = consumer
            .consume_metrics(&Context::background(), Metrics::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "consumer error: disk full");
    }
}
