//! Filtering decorator for [`MetricsConsumer`] stages.

use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use crate::filter::{MetricFilters, MetricsFilter, MetricsFilterer};
use crate::telemetry;
use crate::traits::MetricsConsumer;
use crate::types::{Context, Metrics};
use crate::{HeimdallError, Result};

/// Decorator that filters every batch before handing it to the next stage.
///
/// Each call runs the filter exactly once. If filtering fails the error is
/// returned as-is and the next stage is not called. Otherwise the filtered
/// batch is forwarded with the caller's context and the next stage's
/// result is returned as-is.
///
/// The stage holds no mutable state and can be shared across tasks.
/// Per-batch outcomes and received/dropped metric counts are reported
/// through the process-global `metrics` recorder (see [`telemetry`]);
/// without a recorder installed these calls are no-ops.
#[derive(Debug)]
pub struct FilteringConsumer<C, F = MetricsFilterer> {
    filter: F,
    next: C,
}

impl<C: MetricsConsumer> FilteringConsumer<C> {
    /// Compile `filters` and wrap `next` with the resulting filter.
    ///
    /// Fails with [`HeimdallError::FilterConstruction`] when a pattern does
    /// not compile.
    pub fn new(next: C, filters: &MetricFilters) -> Result<Self> {
        let filter =
            MetricsFilterer::from_filters(filters).map_err(HeimdallError::FilterConstruction)?;
        debug!(?filters, "filtering consumer created");
        Ok(Self { filter, next })
    }
}

impl<C, F> FilteringConsumer<C, F>
where
    C: MetricsConsumer,
    F: MetricsFilter,
{
    /// Wrap `next` with an already-built filter.
    pub fn with_filter(next: C, filter: F) -> Self {
        Self { filter, next }
    }

    /// The filter applied to each batch.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// The stage receiving filtered batches.
    pub fn next(&self) -> &C {
        &self.next
    }
}

/// Wrap `next` so that every batch passes through `filters` first.
///
/// Shorthand for [`FilteringConsumer::new`].
pub fn consumer_with_filter<C: MetricsConsumer>(
    next: C,
    filters: &MetricFilters,
) -> Result<FilteringConsumer<C>> {
    FilteringConsumer::new(next, filters)
}

#[async_trait]
impl<C, F> MetricsConsumer for FilteringConsumer<C, F>
where
    C: MetricsConsumer,
    F: MetricsFilter,
{
    #[instrument(name = "heimdall.filter", skip_all, fields(metrics = batch.metric_count()))]
    async fn consume_metrics(&self, ctx: &Context, batch: Metrics) -> Result<()> {
        let filtered = match self.filter.filter_metrics(&batch) {
            Ok(filtered) => filtered,
            Err(e) => {
                metrics::counter!(telemetry::BATCHES_TOTAL, "status" => "filter_error")
                    .increment(1);
                trace!(error = %e, "filtering failed, batch not forwarded");
                return Err(e);
            }
        };

        let received = batch.metric_count();
        let kept = filtered.metric_count();
        metrics::counter!(telemetry::METRICS_RECEIVED_TOTAL).increment(received as u64);
        metrics::counter!(telemetry::METRICS_DROPPED_TOTAL)
            .increment(received.saturating_sub(kept) as u64);
        trace!(received, kept, "forwarding filtered batch");

        let result = self.next.consume_metrics(ctx, filtered).await;
        let status = if result.is_ok() { "ok" } else { "consumer_error" };
        metrics::counter!(telemetry::BATCHES_TOTAL, "status" => status).increment(1);
        result
    }
}
