//! Comparison of two selections of a player's session history.
//!
//! A [`SelectionCriterion`] resolves to concrete sessions, their stored
//! bundles are folded into per-pitch-type [`AggregateStats`], and the two
//! sides are compared metric by metric.

pub mod aggregate;
pub mod compare;
pub mod selection;
pub mod service;

mod handlers;

pub use aggregate::{aggregate_sessions, AggregateStats, SelectionStats};
pub use compare::{
    compare_pitch, compare_selections, ComparisonRow, MetricDelta, PitchComparison, Trend,
};
pub use handlers::compare_sessions;
pub use selection::SelectionCriterion;
pub use service::{AnalyticsService, ComparisonReport, ComparisonRequest};
