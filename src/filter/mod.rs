//! Metric name filtering.
//!
//! - [`MetricFilters`] / [`MatchProperties`] — include/exclude rule sets
//! - [`FilterSet`] — compiled name matchers (`strict`, `regexp`)
//! - [`MetricsFilter`] / [`MetricsFilterer`] — the engine that turns a batch
//!   into its filtered copy

mod config;
mod filterer;
mod filterset;

pub use config::{MatchProperties, MatchType, MetricFilters, RegexpConfig};
pub use filterer::{MetricsFilter, MetricsFilterer};
pub use filterset::{FilterSet, RegexpFilterSet, StrictFilterSet, new_filter_set};
