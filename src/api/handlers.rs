use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::ingest::{manual, upload};
use crate::pipeline::ScreeningError;
use crate::schema::{TransactionTable, FEATURE_COUNT};

use super::types::*;
use super::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: msg.into(),
        }),
    )
}

fn screening_error(e: ScreeningError) -> ApiError {
    if e.is_input_error() {
        return api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
    }
    tracing::error!(error = %e, "Screening failed");
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Prediction failed for this table, no results were produced",
    )
}

/// Run the pipeline on the blocking pool, bounded by the configured timeout.
async fn screen(state: &AppState, table: TransactionTable) -> ApiResult<ScoreResponse> {
    let pipeline = state.pipeline.clone();
    let task = tokio::task::spawn_blocking(move || pipeline.screen(&table));

    let report = match tokio::time::timeout(state.scoring_timeout, task).await {
        Err(_) => {
            tracing::error!(timeout = ?state.scoring_timeout, "Scoring timed out");
            return Err(api_error(StatusCode::GATEWAY_TIMEOUT, "Scoring timed out"));
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Scoring task panicked");
            return Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Prediction failed for this table, no results were produced",
            ));
        }
        Ok(Ok(result)) => result.map_err(screening_error)?,
    };

    Ok(Json(ScoreResponse::from_report(
        &report,
        state.pipeline.engine.model_name(),
    )))
}

// ============================================================
// Health & Schema
// ============================================================

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.pipeline.engine.model_name().to_string(),
        feature_count: FEATURE_COUNT,
    })
}

pub async fn schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let schema = state.pipeline.validator.schema();
    Json(SchemaResponse {
        feature_count: schema.len(),
        features: schema.names().to_vec(),
    })
}

// ============================================================
// Scoring
// ============================================================

pub async fn score_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<ScoreResponse> {
    let table = upload::parse_csv(body.as_bytes())
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    screen(&state, table).await
}

pub async fn score_manual(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ManualScoreRequest>,
) -> ApiResult<ScoreResponse> {
    let table = manual::from_entries(request.transactions)
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    screen(&state, table).await
}
