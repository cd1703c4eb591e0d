//! Heimdall - include/exclude filtering stage for metrics pipelines
//!
//! This crate provides [`FilteringConsumer`], a pipeline stage that sits
//! between an upstream producer of metrics batches and a downstream
//! [`MetricsConsumer`]. Every batch is passed through a name filter and
//! only the surviving metrics are forwarded.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use heimdall::{
//!     Context, FilteringConsumer, MatchProperties, Metric, MetricFilters, Metrics,
//!     MetricsConsumer, NumberDataPoint, ResourceMetrics, ScopeMetrics, SinkConsumer,
//! };
//!
//! #[tokio::main]
//! async fn main() -> heimdall::Result<()> {
//!     let sink = Arc::new(SinkConsumer::new());
//!     let filters = MetricFilters::new()
//!         .include(MatchProperties::regexp(["^http\\."]))
//!         .exclude(MatchProperties::strict(["http.server.duration"]));
//!     let stage = FilteringConsumer::new(sink.clone(), &filters)?;
//!
//!     let batch = Metrics::new(vec![ResourceMetrics::new(vec![ScopeMetrics::new(
//!         "http",
//!         vec![
//!             Metric::gauge("http.server.duration", vec![NumberDataPoint::new(12.5)]),
//!             Metric::gauge("http.client.duration", vec![NumberDataPoint::new(3.0)]),
//!         ],
//!     )])]);
//!
//!     stage.consume_metrics(&Context::background(), batch).await?;
//!
//!     assert_eq!(sink.batches()[0].metric_names(), vec!["http.client.duration"]);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod consumer;
pub mod error;
pub mod filter;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export main types at crate root
pub use config::Config;
pub use consumer::{ErrConsumer, FilteringConsumer, NopConsumer, SinkConsumer, consumer_with_filter};
pub use error::{HeimdallError, PatternError, Result};
pub use filter::{MatchProperties, MatchType, MetricFilters, MetricsFilter, MetricsFilterer};
pub use traits::MetricsConsumer;

// Re-export all types
pub use types::{
    Context, HistogramDataPoint, InstrumentationScope, Metric, MetricData, Metrics,
    NumberDataPoint, NumberValue, Resource, ResourceMetrics, ScopeMetrics,
};
