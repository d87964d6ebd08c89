use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::{AnalyticsService, ComparisonReport, ComparisonRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for comparing two selections of a player's sessions
///
/// POST /players/:player_id/analytics/compare
#[instrument(name = "compare_sessions", skip(state, request))]
pub async fn compare_sessions(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<ComparisonRequest>,
) -> Result<Json<ComparisonReport>, AppError> {
    info!(side_a = ?request.side_a, side_b = ?request.side_b, "Comparing session selections");

    let service = AnalyticsService::new(Arc::clone(&state.session_repository));
    let report = service.compare(&player_id, &request).await?;

    Ok(Json(report))
}
