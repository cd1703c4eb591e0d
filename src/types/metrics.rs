//! Metrics batch data model.
//!
//! A [`Metrics`] batch follows the OTLP layout: resources own
//! instrumentation scopes, scopes own metrics, metrics own data points.
//! Batches are treated as immutable snapshots. Pipeline stages that need
//! a different batch build a new one instead of editing the input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A snapshot of metric series collected at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub resource_metrics: Vec<ResourceMetrics>,
}

impl Metrics {
    /// Create a batch from its resources.
    pub fn new(resource_metrics: Vec<ResourceMetrics>) -> Self {
        Self { resource_metrics }
    }

    /// Parse a batch from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Total number of metrics across all resources and scopes.
    pub fn metric_count(&self) -> usize {
        self.resource_metrics
            .iter()
            .flat_map(|rm| &rm.scope_metrics)
            .map(|sm| sm.metrics.len())
            .sum()
    }

    /// Total number of data points across all metrics.
    pub fn data_point_count(&self) -> usize {
        self.iter_metrics().map(Metric::data_point_count).sum()
    }

    /// Metric names in batch order. Duplicates are kept.
    pub fn metric_names(&self) -> Vec<&str> {
        self.iter_metrics().map(|m| m.name.as_str()).collect()
    }

    /// Whether the batch carries no metrics at all.
    pub fn is_empty(&self) -> bool {
        self.metric_count() == 0
    }

    fn iter_metrics(&self) -> impl Iterator<Item = &Metric> {
        self.resource_metrics
            .iter()
            .flat_map(|rm| &rm.scope_metrics)
            .flat_map(|sm| &sm.metrics)
    }
}

/// Entity that produced the telemetry (a process, a host, a pod).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Metrics produced by one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetrics {
    #[serde(default)]
    pub resource: Resource,
    #[serde(default)]
    pub scope_metrics: Vec<ScopeMetrics>,
}

impl ResourceMetrics {
    /// Create resource metrics with an attribute-less resource.
    pub fn new(scope_metrics: Vec<ScopeMetrics>) -> Self {
        Self {
            resource: Resource::default(),
            scope_metrics,
        }
    }

    /// Add a resource attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.resource.attributes.insert(key.into(), value.into());
        self
    }
}

/// Instrumentation library that recorded a group of metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentationScope {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Metrics recorded by one instrumentation scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeMetrics {
    #[serde(default)]
    pub scope: InstrumentationScope,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl ScopeMetrics {
    /// Create scope metrics for the named scope.
    pub fn new(scope_name: impl Into<String>, metrics: Vec<Metric>) -> Self {
        Self {
            scope: InstrumentationScope {
                name: scope_name.into(),
                version: None,
            },
            metrics,
        }
    }
}

/// A single metric series: its descriptor plus data points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    pub data: MetricData,
}

impl Metric {
    /// Create a gauge metric.
    pub fn gauge(name: impl Into<String>, points: Vec<NumberDataPoint>) -> Self {
        Self::with_data(name, MetricData::Gauge { points })
    }

    /// Create a sum metric.
    pub fn sum(name: impl Into<String>, monotonic: bool, points: Vec<NumberDataPoint>) -> Self {
        Self::with_data(name, MetricData::Sum { monotonic, points })
    }

    /// Create a histogram metric.
    pub fn histogram(name: impl Into<String>, points: Vec<HistogramDataPoint>) -> Self {
        Self::with_data(name, MetricData::Histogram { points })
    }

    fn with_data(name: impl Into<String>, data: MetricData) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            unit: String::new(),
            data,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Number of data points in this metric.
    pub fn data_point_count(&self) -> usize {
        match &self.data {
            MetricData::Gauge { points } | MetricData::Sum { points, .. } => points.len(),
            MetricData::Histogram { points } => points.len(),
        }
    }
}

/// Metric payload, by instrument kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricData {
    Gauge {
        points: Vec<NumberDataPoint>,
    },
    Sum {
        #[serde(default)]
        monotonic: bool,
        points: Vec<NumberDataPoint>,
    },
    Histogram {
        points: Vec<HistogramDataPoint>,
    },
}

/// Integer or floating point measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Int(i64),
    Double(f64),
}

impl From<i64> for NumberValue {
    fn from(v: i64) -> Self {
        NumberValue::Int(v)
    }
}

impl From<i32> for NumberValue {
    fn from(v: i32) -> Self {
        NumberValue::Int(i64::from(v))
    }
}

impl From<f64> for NumberValue {
    fn from(v: f64) -> Self {
        NumberValue::Double(v)
    }
}

/// A gauge or sum measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberDataPoint {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub time_unix_nano: u64,
    pub value: NumberValue,
}

impl NumberDataPoint {
    /// Create a data point with no attributes and a zero timestamp.
    pub fn new(value: impl Into<NumberValue>) -> Self {
        Self {
            attributes: BTreeMap::new(),
            time_unix_nano: 0,
            value: value.into(),
        }
    }

    /// Add a point attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the observation time.
    pub fn time(mut self, time_unix_nano: u64) -> Self {
        self.time_unix_nano = time_unix_nano;
        self
    }
}

/// A histogram measurement with explicit bucket bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramDataPoint {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub time_unix_nano: u64,
    pub count: u64,
    pub sum: f64,
    #[serde(default)]
    pub bucket_counts: Vec<u64>,
    #[serde(default)]
    pub explicit_bounds: Vec<f64>,
}
