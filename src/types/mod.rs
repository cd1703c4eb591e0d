//! Public types for the Heimdall API.

mod context;
mod metrics;

pub use context::Context;
pub use metrics::{
    HistogramDataPoint, InstrumentationScope, Metric, MetricData, Metrics, NumberDataPoint,
    NumberValue, Resource, ResourceMetrics, ScopeMetrics,
};
