use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::SessionModel;
use crate::shared::AppError;

/// Trait for session repository operations
#[async_trait]
pub trait SessionRepository {
    /// Stores a new session and returns it with its assigned id
    async fn create_session(&self, session: SessionModel) -> Result<SessionModel, AppError>;
    async fn get_session(&self, session_id: i64) -> Result<Option<SessionModel>, AppError>;
    /// All sessions of a player, newest first
    async fn list_sessions_for_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<SessionModel>, AppError>;
    async fn update_session(&self, session: &SessionModel) -> Result<(), AppError>;
    async fn delete_session(&self, session_id: i64) -> Result<(), AppError>;
}

/// In-memory implementation of SessionRepository for development and testing
///
/// Data is stored in memory and will be lost when the application restarts.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<i64, SessionModel>>,
    next_id: AtomicI64,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates an in-memory repository with pre-populated sessions, keeping their ids
    pub fn with_sessions(sessions: Vec<SessionModel>) -> Self {
        let next_id = sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let session_map = sessions.into_iter().map(|s| (s.id, s)).collect();

        Self {
            sessions: RwLock::new(session_map),
            next_id: AtomicI64::new(next_id),
        }
    }

    /// Returns the current number of sessions in the repository
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session))]
    async fn create_session(&self, mut session: SessionModel) -> Result<SessionModel, AppError> {
        session.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        debug!(session_id = session.id, player_id = %session.player_id, "Creating session in memory");

        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());

        debug!(session_id = session.id, "Session created successfully in memory");
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn get_session(&self, session_id: i64) -> Result<Option<SessionModel>, AppError> {
        debug!(session_id, "Fetching session from memory");

        let sessions = self.sessions.read().await;
        let session = sessions.get(&session_id).cloned();

        match &session {
            Some(s) => debug!(session_id, player_id = %s.player_id, "Session found in memory"),
            None => debug!(session_id, "Session not found in memory"),
        }

        Ok(session)
    }

    #[instrument(skip(self))]
    async fn list_sessions_for_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<SessionModel>, AppError> {
        let sessions = self.sessions.read().await;
        let mut player_sessions: Vec<SessionModel> = sessions
            .values()
            .filter(|s| s.player_id == player_id)
            .cloned()
            .collect();

        player_sessions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        debug!(
            player_id = %player_id,
            session_count = player_sessions.len(),
            "Listed player sessions from memory"
        );
        Ok(player_sessions)
    }

    #[instrument(skip(self, session))]
    async fn update_session(&self, session: &SessionModel) -> Result<(), AppError> {
        debug!(session_id = session.id, "Updating session in memory");

        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.id) {
            Some(existing) => *existing = session.clone(),
            None => {
                warn!(session_id = session.id, "Session not found for update in memory");
                return Err(AppError::NotFound("Session not found".to_string()));
            }
        }

        debug!(session_id = session.id, "Session updated successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, session_id: i64) -> Result<(), AppError> {
        debug!(session_id, "Deleting session from memory");

        let mut sessions = self.sessions.write().await;
        if sessions.remove(&session_id).is_none() {
            warn!(session_id, "Session not found for deletion in memory");
            return Err(AppError::NotFound("Session not found".to_string()));
        }

        debug!(session_id, "Session deleted successfully from memory");
        Ok(())
    }
}
