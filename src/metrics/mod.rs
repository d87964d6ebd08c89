//! Pitch-tracking export ingestion: parsing, per-pitch-type reduction and the
//! clock math used for spin direction. Everything here is synchronous and
//! side-effect free.

pub mod aggregator;
pub mod clock;
pub mod columns;
pub mod parser;
pub mod pitch_types;

mod errors;
mod models;

pub use aggregator::aggregate_rows;
pub use clock::{circular_mean_clock, ClockTime};
pub use columns::{higher_is_better, is_max_metric, metric_names, MetricKind};
pub use errors::MetricsError;
pub use models::*;
pub use parser::{parse_export, ParsedExport, RawRow};

/// Parses a raw export and reduces it to one bundle per pitch type.
pub fn ingest_export(text: &str, source: &str) -> Result<Vec<MetricBundle>, MetricsError> {
    let parsed = parse_export(text)?;
    Ok(aggregate_rows(&parsed.rows, source))
}
