use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::metrics::{MetricBundle, MetricsError};

/// Request payload for creating a session
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub player_id: String,
    pub date: Option<String>, // YYYY-MM-DD, defaults to now
    pub session_type: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub metrics: Vec<MetricBundle>,
}

/// Request payload for editing a session; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSessionRequest {
    pub date: Option<String>,
    pub session_type: Option<String>,
    pub notes: Option<String>,
    pub metrics: Option<Vec<MetricBundle>>, // Replaces the whole list when present
}

/// Parses a `YYYY-MM-DD` session date as midnight UTC. A missing date means now.
pub fn parse_session_date(date: Option<&str>) -> Result<DateTime<Utc>, MetricsError> {
    let Some(raw) = date else {
        return Ok(Utc::now());
    };

    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|day| day.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| MetricsError::InvalidDate(format!("{} (expected YYYY-MM-DD)", raw)))
}
