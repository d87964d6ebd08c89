use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::SessionModel,
    service::SessionService,
    types::{CreateSessionRequest, UpdateSessionRequest},
};
use crate::metrics::MetricBundle;
use crate::shared::{AppError, AppState};

fn session_service(state: &AppState) -> SessionService {
    SessionService::new(Arc::clone(&state.session_repository), &state.source)
}

/// POST /sessions
#[instrument(name = "create_session", skip(state, request))]
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionModel>), AppError> {
    let session = session_service(&state).create_session(request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /sessions/:session_id
#[instrument(name = "get_session", skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> Result<Json<SessionModel>, AppError> {
    let session = session_service(&state).get_session(session_id).await?;
    Ok(Json(session))
}

/// PUT /sessions/:session_id
#[instrument(name = "update_session", skip(state, request))]
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(request): Json<UpdateSessionRequest>,
) -> Result<Json<SessionModel>, AppError> {
    let session = session_service(&state)
        .update_session(session_id, request)
        .await?;
    Ok(Json(session))
}

/// DELETE /sessions/:session_id
#[instrument(name = "delete_session", skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    session_service(&state).delete_session(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /players/:player_id/sessions
///
/// Returns the player's sessions newest first
#[instrument(name = "list_player_sessions", skip(state))]
pub async fn list_player_sessions(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Vec<SessionModel>>, AppError> {
    let sessions = session_service(&state)
        .list_sessions_for_player(&player_id)
        .await?;
    info!(session_count = sessions.len(), "Listed player sessions");
    Ok(Json(sessions))
}

/// PUT /sessions/:session_id/upload
///
/// Body is the raw export text. The session's metrics are replaced by the
/// per-pitch-type summary of the export.
#[instrument(name = "upload_export", skip(state, body))]
pub async fn upload_export(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    body: String,
) -> Result<Json<SessionModel>, AppError> {
    let session = session_service(&state)
        .ingest_export(session_id, &body)
        .await?;
    Ok(Json(session))
}

/// POST /ingest/preview
///
/// Summarizes a raw export without storing it
#[instrument(name = "preview_export", skip(state, body))]
pub async fn preview_export(
    State(state): State<AppState>,
    body: String,
) -> Json<Vec<MetricBundle>> {
    Json(session_service(&state).preview_export(&body))
}
