use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::MetricBundle;

/// A training session and the pitch metrics recorded for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionModel {
    pub id: i64, // Assigned by the repository on create
    pub player_id: String,
    pub date: DateTime<Utc>,
    pub session_type: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub metrics: Vec<MetricBundle>, // At most one bundle per pitch type
}

impl SessionModel {
    /// Creates an unsaved session with no metrics
    pub fn new(
        player_id: String,
        date: DateTime<Utc>,
        session_type: String,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            player_id,
            date,
            session_type,
            notes,
            metrics: Vec::new(),
        }
    }

    /// Calendar day of the session, ignoring time of day
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Replaces the whole metric list
    pub fn replace_metrics(&mut self, metrics: Vec<MetricBundle>) {
        self.metrics = metrics;
    }
}
