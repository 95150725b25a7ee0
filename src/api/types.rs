use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{FraudReport, RowVerdict};

// ============================================================
// Requests
// ============================================================

#[derive(Debug, Deserialize)]
pub struct ManualScoreRequest {
    pub transactions: Vec<Vec<f64>>,
}

// ============================================================
// Response types
// ============================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub feature_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub feature_count: usize,
    pub features: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub scored_at: DateTime<Utc>,
    pub model: String,
    pub total: usize,
    pub predictions: Vec<RowVerdict>,
    pub fraudulent_indices: Vec<usize>,
    pub summary: String,
}

impl ScoreResponse {
    pub fn from_report(report: &FraudReport, model: &str) -> Self {
        Self {
            scored_at: Utc::now(),
            model: model.to_string(),
            total: report.len(),
            predictions: report.predictions().to_vec(),
            fraudulent_indices: report.fraudulent_indices().to_vec(),
            summary: report.summary(),
        }
    }
}
