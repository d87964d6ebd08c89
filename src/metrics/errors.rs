use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Export needs a header and at least one data row, found {found} non-empty line(s)")]
    NotEnoughLines { found: usize },

    #[error("Malformed export: {0}")]
    Malformed(#[from] csv::Error),

    #[error("Invalid clock value: {0}")]
    InvalidClock(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Metric {metric} appears more than once in the {pitch_type} bundle")]
    DuplicateMetric { pitch_type: String, metric: String },

    #[error("Metric {metric} in the {pitch_type} bundle has the wrong kind of value")]
    MismatchedValue { pitch_type: String, metric: String },
}
