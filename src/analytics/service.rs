use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    aggregate::aggregate_sessions,
    compare::{compare_selections, PitchComparison},
    selection::SelectionCriterion,
};
use crate::session::repository::SessionRepository;
use crate::shared::AppError;

/// Request payload for comparing two slices of a player's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub side_a: SelectionCriterion,
    pub side_b: SelectionCriterion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub criterion: SelectionCriterion,
    pub session_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub player_id: String,
    pub side_a: SelectionSummary,
    pub side_b: SelectionSummary,
    pub pitches: Vec<PitchComparison>,
}

/// Loads a player's sessions and runs them through the comparison engine
pub struct AnalyticsService {
    repository: Arc<dyn SessionRepository + Send + Sync>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn SessionRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, request))]
    pub async fn compare(
        &self,
        player_id: &str,
        request: &ComparisonRequest,
    ) -> Result<ComparisonReport, AppError> {
        let sessions = self.repository.list_sessions_for_player(player_id).await?;

        let selected_a = request.side_a.resolve(&sessions);
        let selected_b = request.side_b.resolve(&sessions);

        let pitches = compare_selections(
            &aggregate_sessions(&selected_a),
            &aggregate_sessions(&selected_b),
        );

        info!(
            total_sessions = sessions.len(),
            side_a_sessions = selected_a.len(),
            side_b_sessions = selected_b.len(),
            pitch_types = pitches.len(),
            "Compared session selections"
        );

        Ok(ComparisonReport {
            player_id: player_id.to_string(),
            side_a: SelectionSummary {
                criterion: request.side_a.clone(),
                session_ids: selected_a.iter().map(|s| s.id).collect(),
            },
            side_b: SelectionSummary {
                criterion: request.side_b.clone(),
                session_ids: selected_b.iter().map(|s| s.id).collect(),
            },
            pitches,
        })
    }
}
