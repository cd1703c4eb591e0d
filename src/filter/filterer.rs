//! The metrics filter engine.

use tracing::debug;

use super::config::{MatchProperties, MetricFilters};
use super::filterset::{FilterSet, new_filter_set};
use crate::error::PatternError;
use crate::types::{Metrics, ResourceMetrics, ScopeMetrics};
use crate::{HeimdallError, Result};

/// Produces a filtered copy of a metrics batch.
///
/// Implementations never modify their input. Errors are returned as
/// [`HeimdallError::FilterTransform`] and describe what made the batch
/// impossible to evaluate.
pub trait MetricsFilter: Send + Sync {
    fn filter_metrics(&self, metrics: &Metrics) -> Result<Metrics>;
}

/// Include/exclude filter over metric names.
///
/// A metric is kept when it matches the include side (or there is no
/// include side) and does not match the exclude side. Exclusion wins when
/// a name matches both. Scopes and resources that lose all their metrics
/// are dropped from the output; containers that arrived empty are kept.
/// Without any rules the output is an exact copy of the input.
#[derive(Debug)]
pub struct MetricsFilterer {
    include: Option<Box<dyn FilterSet>>,
    exclude: Option<Box<dyn FilterSet>>,
}

impl MetricsFilterer {
    /// Compile both sides of a rule set.
    ///
    /// Sides that are absent or list no patterns impose no constraint.
    pub fn new(
        include: Option<&MatchProperties>,
        exclude: Option<&MatchProperties>,
    ) -> std::result::Result<Self, PatternError> {
        let filterer = Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        };
        debug!(
            include = ?include.map(|p| &p.metric_names),
            exclude = ?exclude.map(|p| &p.metric_names),
            "metrics filter created"
        );
        Ok(filterer)
    }

    /// Compile a [`MetricFilters`] rule set.
    pub fn from_filters(filters: &MetricFilters) -> std::result::Result<Self, PatternError> {
        Self::new(filters.include.as_ref(), filters.exclude.as_ref())
    }

    /// Whether a metric with this name survives filtering.
    pub fn should_keep(&self, name: &str) -> bool {
        if self.include.as_ref().is_some_and(|set| !set.matches(name)) {
            return false;
        }
        !self.exclude.as_ref().is_some_and(|set| set.matches(name))
    }
}

fn compile(
    props: Option<&MatchProperties>,
) -> std::result::Result<Option<Box<dyn FilterSet>>, PatternError> {
    props
        .filter(|p| !p.is_empty())
        .map(new_filter_set)
        .transpose()
}

impl MetricsFilter for MetricsFilterer {
    fn filter_metrics(&self, metrics: &Metrics) -> Result<Metrics> {
        if self.include.is_none() && self.exclude.is_none() {
            return Ok(metrics.clone());
        }

        let mut resource_metrics = Vec::with_capacity(metrics.resource_metrics.len());

        for (ri, rm) in metrics.resource_metrics.iter().enumerate() {
            let mut scope_metrics = Vec::with_capacity(rm.scope_metrics.len());

            for (si, sm) in rm.scope_metrics.iter().enumerate() {
                let mut kept = Vec::with_capacity(sm.metrics.len());
                for (mi, metric) in sm.metrics.iter().enumerate() {
                    if metric.name.is_empty() {
                        return Err(HeimdallError::FilterTransform(format!(
                            "metric {mi} in resource {ri}, scope {si} has no name"
                        )));
                    }
                    if self.should_keep(&metric.name) {
                        kept.push(metric.clone());
                    }
                }
                if !kept.is_empty() || sm.metrics.is_empty() {
                    scope_metrics.push(ScopeMetrics {
                        scope: sm.scope.clone(),
                        metrics: kept,
                    });
                }
            }

            if !scope_metrics.is_empty() || rm.scope_metrics.is_empty() {
                resource_metrics.push(ResourceMetrics {
                    resource: rm.resource.clone(),
                    scope_metrics,
                });
            }
        }

        Ok(Metrics { resource_metrics })
    }
}
