use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

use crate::metrics::{ClockTime, MetricBundle, MetricKind, MetricValue};
use crate::session::SessionModel;

/// Running totals for one pitch type across a selection of sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    /// Number of bundles folded in, i.e. sessions that recorded the pitch.
    pub count: u32,
    pub sums: HashMap<String, f64>,
    /// Largest per-session value seen for each numeric metric.
    pub max: HashMap<String, f64>,
    /// Clock readings in fold order, oldest session first.
    pub clock_samples: Vec<ClockTime>,
}

impl AggregateStats {
    /// Folds one session's bundle. Only the first metric of each name counts,
    /// clock readings are taken from spin direction alone and values of the
    /// wrong kind for their metric are skipped.
    pub fn fold_bundle(&mut self, bundle: &MetricBundle) {
        self.count += 1;

        let clock_metric = MetricKind::SpinDirection.column();
        let mut folded: HashSet<&str> = HashSet::new();

        for metric in &bundle.metrics {
            let name = metric.metric_name.as_str();
            if !folded.insert(name) {
                warn!(pitch_type = %bundle.pitch_type, metric = name, "Ignoring repeated metric");
                continue;
            }

            match (metric.metric_value, name == clock_metric) {
                (MetricValue::Clock(clock), true) => self.clock_samples.push(clock),
                (MetricValue::Number(value), false) => {
                    *self.sums.entry(name.to_string()).or_insert(0.0) += value;
                    self.max
                        .entry(name.to_string())
                        .and_modify(|max| *max = max.max(value))
                        .or_insert(value);
                }
                _ => warn!(
                    pitch_type = %bundle.pitch_type,
                    metric = name,
                    "Ignoring metric with the wrong kind of value"
                ),
            }
        }
    }

    /// `sum / count`, or zero when nothing was folded in.
    pub fn average(&self, metric_name: &str) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sums.get(metric_name).copied().unwrap_or(0.0) / f64::from(self.count)
    }

    pub fn max_of(&self, metric_name: &str) -> Option<f64> {
        self.max.get(metric_name).copied()
    }

    /// The spin direction reported for a selection: the reading from the most
    /// recent session, so the comparison reflects current form.
    pub fn latest_clock(&self) -> Option<ClockTime> {
        self.clock_samples.last().copied()
    }
}

/// Aggregated stats for a selection, keyed by pitch type exactly as stored.
pub type SelectionStats = BTreeMap<String, AggregateStats>;

/// Folds the stored bundles of `sessions` into per-pitch-type stats.
///
/// Sessions are folded oldest first regardless of input order, so the last
/// clock sample of each pitch type comes from the newest session. A session
/// contributes at most one bundle per pitch type.
pub fn aggregate_sessions(sessions: &[&SessionModel]) -> SelectionStats {
    let mut ordered = sessions.to_vec();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut stats = SelectionStats::new();
    for session in ordered {
        let mut seen: HashSet<&str> = HashSet::new();
        for bundle in &session.metrics {
            if !seen.insert(bundle.pitch_type.as_str()) {
                warn!(
                    session_id = session.id,
                    pitch_type = %bundle.pitch_type,
                    "Ignoring duplicate pitch type bundle"
                );
                continue;
            }
            stats
                .entry(bundle.pitch_type.clone())
                .or_default()
                .fold_bundle(bundle);
        }
    }

    debug!(
        sessions = sessions.len(),
        pitch_types = stats.len(),
        "Aggregated session metrics"
    );
    stats
}
