//! Telemetry metric name constants.
//!
//! Centralised metric names for heimdall's own operation. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `heimdall_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `status` — outcome: "ok", "filter_error" or "consumer_error"

/// Total batches handled by filtering stages.
///
/// Labels: `status` ("ok" | "filter_error" | "consumer_error").
pub const BATCHES_TOTAL: &str = "heimdall_batches_total";

/// Total metrics seen before filtering.
pub const METRICS_RECEIVED_TOTAL: &str = "heimdall_metrics_received_total";

/// Total metrics removed by filtering.
pub const METRICS_DROPPED_TOTAL: &str = "heimdall_metrics_dropped_total";

/// Total regexp match results served from the match cache.
pub const REGEXP_CACHE_HITS_TOTAL: &str = "heimdall_regexp_cache_hits_total";

/// Total regexp match results computed because of a cache miss.
pub const REGEXP_CACHE_MISSES_TOTAL: &str = "heimdall_regexp_cache_misses_total";
