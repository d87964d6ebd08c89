use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::aggregate::{AggregateStats, SelectionStats};
use crate::metrics::{
    columns::{MetricKind, CLOCK_UNIT},
    higher_is_better, is_max_metric, metric_names, pitch_types, round_to, MetricValue,
};

/// Decimal places of a reported numeric delta.
const DELTA_PRECISION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Favorable,
    Unfavorable,
    Neutral,
}

impl Trend {
    /// Depends only on the sign of the delta and the metric's polarity.
    pub fn classify(delta: f64, higher_is_better: bool) -> Self {
        if delta == 0.0 || delta.is_nan() {
            Trend::Neutral
        } else if (delta > 0.0) == higher_is_better {
            Trend::Favorable
        } else {
            Trend::Unfavorable
        }
    }
}

/// Side B minus side A.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricDelta {
    Value(f64),
    /// Clock difference in minutes around the dial.
    Minutes(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: String,
    pub unit: String,
    pub side_a: Option<MetricValue>,
    pub side_b: Option<MetricValue>,
    pub delta: Option<MetricDelta>,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchComparison {
    pub pitch_type: String,
    pub label: String,
    pub side_a_count: u32,
    pub side_b_count: u32,
    pub rows: Vec<ComparisonRow>,
}

/// Compares two selections pitch type by pitch type. Every pitch type present
/// on either side appears; the missing side compares as an empty aggregate.
pub fn compare_selections(side_a: &SelectionStats, side_b: &SelectionStats) -> Vec<PitchComparison> {
    let empty = AggregateStats::default();
    let pitch_types: BTreeSet<&String> = side_a.keys().chain(side_b.keys()).collect();

    pitch_types
        .into_iter()
        .map(|pitch_type| {
            let a = side_a.get(pitch_type).unwrap_or(&empty);
            let b = side_b.get(pitch_type).unwrap_or(&empty);
            PitchComparison {
                pitch_type: pitch_type.clone(),
                label: pitch_types::abbreviate(pitch_type).to_string(),
                side_a_count: a.count,
                side_b_count: b.count,
                rows: compare_pitch(a, b),
            }
        })
        .collect()
}

/// One row per metric seen on either side, in column order.
pub fn compare_pitch(a: &AggregateStats, b: &AggregateStats) -> Vec<ComparisonRow> {
    let clock_metric = MetricKind::SpinDirection.column();

    metric_order(a, b)
        .into_iter()
        .map(|name| {
            if name == clock_metric {
                clock_row(name, a, b)
            } else {
                numeric_row(name, a, b)
            }
        })
        .collect()
}

fn metric_order(a: &AggregateStats, b: &AggregateStats) -> Vec<String> {
    let mut present: BTreeSet<String> = a.sums.keys().chain(b.sums.keys()).cloned().collect();
    if !a.clock_samples.is_empty() || !b.clock_samples.is_empty() {
        present.insert(MetricKind::SpinDirection.column().to_string());
    }

    let mut ordered: Vec<String> = metric_names()
        .into_iter()
        .filter_map(|name| present.take(name))
        .collect();
    // Names outside the column table keep ascending order after the known ones
    ordered.extend(present);
    ordered
}

fn numeric_row(name: String, a: &AggregateStats, b: &AggregateStats) -> ComparisonRow {
    let kind = MetricKind::for_metric(&name);
    let precision = kind.map(|k| k.precision()).unwrap_or(2);
    let (avg_a, avg_b) = (selection_value(a, &name), selection_value(b, &name));

    let delta = if avg_a == 0.0 || avg_b == 0.0 {
        None
    } else {
        Some(round_to(avg_b - avg_a, DELTA_PRECISION)).filter(|d| *d != 0.0)
    };

    let trend = match (delta, higher_is_better(&name)) {
        (Some(delta), Some(polarity)) => Trend::classify(delta, polarity),
        _ => Trend::Neutral,
    };

    let shown = |stats: &AggregateStats, avg: f64| {
        (stats.count > 0).then(|| MetricValue::Number(round_to(avg, precision)))
    };

    ComparisonRow {
        unit: kind.map(|k| k.unit()).unwrap_or_default().to_string(),
        side_a: shown(a, avg_a),
        side_b: shown(b, avg_b),
        delta: delta.map(MetricDelta::Value),
        trend,
        metric: name,
    }
}

/// Max companions report the highest session max in the selection; every
/// other metric reports the mean across sessions.
fn selection_value(stats: &AggregateStats, name: &str) -> f64 {
    if is_max_metric(name) {
        stats.max_of(name).unwrap_or(0.0)
    } else {
        stats.average(name)
    }
}

fn clock_row(name: String, a: &AggregateStats, b: &AggregateStats) -> ComparisonRow {
    let (clock_a, clock_b) = (a.latest_clock(), b.latest_clock());
    let delta = match (clock_a, clock_b) {
        (Some(a), Some(b)) => Some(MetricDelta::Minutes(
            b.minutes_since_twelve() - a.minutes_since_twelve(),
        )),
        _ => None,
    };

    ComparisonRow {
        metric: name,
        unit: CLOCK_UNIT.to_string(),
        side_a: clock_a.map(MetricValue::Clock),
        side_b: clock_b.map(MetricValue::Clock),
        delta,
        trend: Trend::Neutral,
    }
}
