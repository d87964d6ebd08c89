use pitchlab::{router, AppState, Config, InMemorySessionRepository};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitchlab=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(bind_addr = %config.bind_addr, source = %config.source, "Starting pitch metrics server");

    let session_repository = Arc::new(InMemorySessionRepository::new());
    let app_state = AppState::new(session_repository, &config.source);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, router(app_state)).await?;

    Ok(())
}
