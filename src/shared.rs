use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::metrics::MetricsError;
use crate::session::repository::SessionRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_repository: Arc<dyn SessionRepository + Send + Sync>,
    /// Source tag stamped on ingested bundles
    pub source: Arc<str>,
}

impl AppState {
    pub fn new(session_repository: Arc<dyn SessionRepository + Send + Sync>, source: &str) -> Self {
        Self {
            session_repository,
            source: Arc::from(source),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<MetricsError> for AppError {
    fn from(err: MetricsError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::metrics::DEFAULT_SOURCE;
    use crate::session::repository::InMemorySessionRepository;

    /// Builder for creating AppState backed by a fresh in-memory repository
    pub struct AppStateBuilder {
        source: String,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                source: DEFAULT_SOURCE.to_string(),
            }
        }

        pub fn with_source(mut self, source: &str) -> Self {
            self.source = source.to_string();
            self
        }

        pub fn build(self) -> AppState {
            AppState::new(Arc::new(InMemorySessionRepository::new()), &self.source)
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
