use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{columns::MetricKind, ClockTime, MetricsError};

/// Source tag stamped on bundles produced from device exports.
pub const DEFAULT_SOURCE: &str = "rapsodo";

/// Grouping key for rows that carry no pitch label.
pub const UNKNOWN_PITCH_TYPE: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Clock(ClockTime),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(value) => Some(*value),
            MetricValue::Clock(_) => None,
        }
    }

    pub fn as_clock(&self) -> Option<ClockTime> {
        match self {
            MetricValue::Clock(clock) => Some(*clock),
            MetricValue::Number(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub metric_name: String,
    pub metric_value: MetricValue,
    pub unit: String,
}

impl Metric {
    pub fn number(name: &str, value: f64, unit: &str) -> Self {
        Self {
            metric_name: name.to_string(),
            metric_value: MetricValue::Number(value),
            unit: unit.to_string(),
        }
    }

    pub fn clock(name: &str, value: ClockTime, unit: &str) -> Self {
        Self {
            metric_name: name.to_string(),
            metric_value: MetricValue::Clock(value),
            unit: unit.to_string(),
        }
    }
}

/// Per-pitch-type summary of one batch of pitches. Metric names are unique
/// within a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    pub source: String,
    pub pitch_type: String,
    pub metrics: Vec<Metric>,
}

impl MetricBundle {
    pub fn new(source: &str, pitch_type: &str) -> Self {
        Self {
            source: source.to_string(),
            pitch_type: pitch_type.to_string(),
            metrics: Vec::new(),
        }
    }

    /// Appends a metric, replacing any existing metric with the same name.
    pub fn push(&mut self, metric: Metric) {
        match self
            .metrics
            .iter_mut()
            .find(|existing| existing.metric_name == metric.metric_name)
        {
            Some(existing) => *existing = metric,
            None => self.metrics.push(metric),
        }
    }

    pub fn get(&self, metric_name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.metric_name == metric_name)
    }

    /// Checks a bundle received from outside the aggregator: names must be
    /// unique, spin direction must hold a clock reading and every other
    /// metric a number.
    pub fn validate(&self) -> Result<(), MetricsError> {
        let mut seen: HashSet<&str> = HashSet::new();

        for metric in &self.metrics {
            if !seen.insert(metric.metric_name.as_str()) {
                return Err(MetricsError::DuplicateMetric {
                    pitch_type: self.pitch_type.clone(),
                    metric: metric.metric_name.clone(),
                });
            }

            let expects_clock =
                MetricKind::for_metric(&metric.metric_name).is_some_and(|kind| kind.is_clock());
            if expects_clock != metric.metric_value.as_clock().is_some() {
                return Err(MetricsError::MismatchedValue {
                    pitch_type: self.pitch_type.clone(),
                    metric: metric.metric_name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Rounds half away from zero to the given number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
