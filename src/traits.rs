//! The consumer capability shared by every pipeline stage.
//!
//! Stages implement [`MetricsConsumer`] on both sides: a stage exposes it
//! to its upstream caller and requires it from its downstream target.
//! That symmetry is what lets stages be chained in any order.
//!
//! # Example
//!
//! ```rust
//! use heimdall::{Context, Metrics, MetricsConsumer, Result};
//!
//! struct CountingStage;
//!
//! #[async_trait::async_trait]
//! impl MetricsConsumer for CountingStage {
//!     async fn consume_metrics(&self, _ctx: &Context, metrics: Metrics) -> Result<()> {
//!         println!("received {} metrics", metrics.metric_count());
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::types::{Context, Metrics};

/// Consumes metrics batches within a cancellable request context.
#[async_trait]
pub trait MetricsConsumer: Send + Sync {
    /// Consume one batch.
    ///
    /// Implementations that forward to another stage pass `ctx` through
    /// unchanged.
    async fn consume_metrics(&self, ctx: &Context, metrics: Metrics) -> Result<()>;
}

#[async_trait]
impl<T: MetricsConsumer + ?Sized> MetricsConsumer for Arc<T> {
    async fn consume_metrics(&self, ctx: &Context, metrics: Metrics) -> Result<()> {
        (**self).consume_metrics(ctx, metrics).await
    }
}

#[async_trait]
impl<T: MetricsConsumer + ?Sized> MetricsConsumer for Box<T> {
    async fn consume_metrics(&self, ctx: &Context, metrics: Metrics) -> Result<()> {
        (**self).consume_metrics(ctx, metrics).await
    }
}
