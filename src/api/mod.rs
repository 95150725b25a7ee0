pub mod handlers;
pub mod types;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::pipeline::ScreeningPipeline;

pub struct AppState {
    pub pipeline: Arc<ScreeningPipeline>,
    pub scoring_timeout: Duration,
}

pub fn router(pipeline: Arc<ScreeningPipeline>, config: &Config) -> Router {
    let state = Arc::new(AppState {
        pipeline,
        scoring_timeout: Duration::from_millis(config.scoring.timeout_ms),
    });

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/schema", get(handlers::schema))
        .route("/api/v1/score/csv", post(handlers::score_csv))
        .route("/api/v1/score/manual", post(handlers::score_manual))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(
    pipeline: Arc<ScreeningPipeline>,
    config: &Config,
    shutdown: CancellationToken,
) -> eyre::Result<()> {
    let app = router(pipeline, config);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
