use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::SessionModel,
    repository::SessionRepository,
    types::{parse_session_date, CreateSessionRequest, UpdateSessionRequest},
};
use crate::metrics::{self, MetricBundle};
use crate::shared::AppError;

/// Service for session bookkeeping and export ingestion
pub struct SessionService {
    repository: Arc<dyn SessionRepository + Send + Sync>,
    source: String,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository + Send + Sync>, source: &str) -> Self {
        Self {
            repository,
            source: source.to_string(),
        }
    }

    #[instrument(skip(self, request), fields(player_id = %request.player_id))]
    pub async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<SessionModel, AppError> {
        let date = parse_session_date(request.date.as_deref())?;
        validate_bundles(&request.metrics)?;
        let mut session =
            SessionModel::new(request.player_id, date, request.session_type, request.notes);
        session.replace_metrics(request.metrics);

        let session = self.repository.create_session(session).await?;
        info!(session_id = session.id, "Session created");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn get_session(&self, session_id: i64) -> Result<SessionModel, AppError> {
        self.repository
            .get_session(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_sessions_for_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<SessionModel>, AppError> {
        self.repository.list_sessions_for_player(player_id).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_session(
        &self,
        session_id: i64,
        request: UpdateSessionRequest,
    ) -> Result<SessionModel, AppError> {
        let mut session = self.get_session(session_id).await?;

        if let Some(date) = request.date.as_deref() {
            session.date = parse_session_date(Some(date))?;
        }
        if let Some(session_type) = request.session_type {
            session.session_type = session_type;
        }
        if let Some(notes) = request.notes {
            session.notes = Some(notes);
        }
        if let Some(metrics) = request.metrics {
            validate_bundles(&metrics)?;
            session.replace_metrics(metrics);
        }

        self.repository.update_session(&session).await?;
        info!(session_id, "Session updated");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn delete_session(&self, session_id: i64) -> Result<(), AppError> {
        self.repository.delete_session(session_id).await?;
        info!(session_id, "Session deleted");
        Ok(())
    }

    /// Runs an export through the parser and aggregator. Exports that cannot be
    /// read produce no bundles rather than an error.
    pub fn preview_export(&self, text: &str) -> Vec<MetricBundle> {
        match metrics::ingest_export(text, &self.source) {
            Ok(bundles) => bundles,
            Err(err) => {
                warn!(%err, "No metrics ingested from export");
                Vec::new()
            }
        }
    }

    /// Replaces a session's metrics with the summary of a raw export
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub async fn ingest_export(
        &self,
        session_id: i64,
        text: &str,
    ) -> Result<SessionModel, AppError> {
        let mut session = self.get_session(session_id).await?;
        let bundles = self.preview_export(text);

        info!(
            session_id,
            pitch_types = bundles.len(),
            "Storing ingested metrics"
        );
        session.replace_metrics(bundles);
        self.repository.update_session(&session).await?;
        Ok(session)
    }
}

/// Client-supplied bundles must look like aggregator output before they are stored
fn validate_bundles(bundles: &[MetricBundle]) -> Result<(), AppError> {
    bundles.iter().try_for_each(MetricBundle::validate)?;
    Ok(())
}
