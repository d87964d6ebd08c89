// Library crate for the pitch metrics server
// This file exposes the public API for integration tests

pub mod analytics;
pub mod config;
pub mod metrics;
pub mod session;
pub mod shared;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

// Re-export commonly used types for easier access in tests
pub use analytics::{AnalyticsService, ComparisonReport, ComparisonRequest, SelectionCriterion};
pub use config::Config;
pub use metrics::{ingest_export, ClockTime, MetricBundle, MetricValue};
pub use session::{repository::InMemorySessionRepository, SessionModel, SessionService};
pub use shared::{AppError, AppState};

/// Builds the HTTP router over the given application state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/sessions", post(session::create_session))
        .route(
            "/sessions/:session_id",
            get(session::get_session)
                .put(session::update_session)
                .delete(session::delete_session),
        )
        .route("/sessions/:session_id/upload", put(session::upload_export))
        .route(
            "/players/:player_id/sessions",
            get(session::list_player_sessions),
        )
        .route(
            "/players/:player_id/analytics/compare",
            post(analytics::compare_sessions),
        )
        .route("/ingest/preview", post(session::preview_export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
