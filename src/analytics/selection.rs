use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::SessionModel;

/// Which of a player's sessions one side of a comparison covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionCriterion {
    /// Career: every session.
    All,
    /// The most recent session.
    Latest,
    #[serde(rename = "session")]
    BySessionId { session_id: i64 },
    /// Inclusive `YYYY-MM-DD` bounds, compared on the calendar day only.
    DateRange {
        #[serde(default)]
        start: Option<String>,
        #[serde(default)]
        end: Option<String>,
    },
}

impl SelectionCriterion {
    /// Picks the sessions this criterion covers.
    ///
    /// `sessions` must already be sorted newest first. Criteria that match
    /// nothing, including date ranges with missing or malformed bounds,
    /// resolve to an empty list.
    pub fn resolve<'a>(&self, sessions: &'a [SessionModel]) -> Vec<&'a SessionModel> {
        let selected: Vec<&SessionModel> = match self {
            SelectionCriterion::All => sessions.iter().collect(),
            SelectionCriterion::Latest => sessions.first().into_iter().collect(),
            SelectionCriterion::BySessionId { session_id } => sessions
                .iter()
                .filter(|s| s.id == *session_id)
                .take(1)
                .collect(),
            SelectionCriterion::DateRange { start, end } => {
                match (parse_bound(start.as_deref()), parse_bound(end.as_deref())) {
                    (Some(start), Some(end)) => sessions
                        .iter()
                        .filter(|s| (start..=end).contains(&s.day()))
                        .collect(),
                    _ => Vec::new(),
                }
            }
        };

        debug!(
            criterion = ?self,
            available = sessions.len(),
            selected = selected.len(),
            "Resolved session selection"
        );
        selected
    }
}

fn parse_bound(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    // Accept full timestamps too; only the date portion counts
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
