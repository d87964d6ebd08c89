use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use pitchlab::{router, AppState, InMemorySessionRepository, SessionModel};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub repository: Arc<InMemorySessionRepository>,
    pub player_id: String,
}

pub struct TestSetupBuilder {
    player_id: String,
    source: String,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            player_id: "player-1".to_string(),
            source: pitchlab::metrics::DEFAULT_SOURCE.to_string(),
        }
    }

    pub fn with_player(mut self, player_id: &str) -> Self {
        self.player_id = player_id.to_string();
        self
    }

    pub fn build(self) -> TestSetup {
        let repository = Arc::new(InMemorySessionRepository::new());
        let state = AppState::new(repository.clone(), &self.source);

        TestSetup {
            app: router(state),
            repository,
            player_id: self.player_id,
        }
    }
}

impl TestSetup {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    /// Creates a session on `date` and uploads `export` into it
    pub async fn session_with_export(&self, date: &str, export: &str) -> SessionModel {
        let create = Request::builder()
            .method("POST")
            .uri("/sessions")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "player_id": self.player_id,
                    "date": date,
                    "session_type": "bullpen",
                })
                .to_string(),
            ))
            .unwrap();
        let (status, created) = self.send(create).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", created);

        let upload = Request::builder()
            .method("PUT")
            .uri(format!("/sessions/{}/upload", created["id"]))
            .body(Body::from(export.to_string()))
            .unwrap();
        let (status, session) = self.send(upload).await;
        assert_eq!(status, StatusCode::OK, "upload failed: {}", session);

        serde_json::from_value(session).unwrap()
    }

    pub async fn compare(
        &self,
        side_a: serde_json::Value,
        side_b: serde_json::Value,
    ) -> serde_json::Value {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/players/{}/analytics/compare", self.player_id))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "side_a": side_a, "side_b": side_b }).to_string(),
            ))
            .unwrap();
        let (status, report) = self.send(request).await;
        assert_eq!(status, StatusCode::OK, "compare failed: {}", report);
        report
    }
}
