use std::sync::Arc;

use crate::config::ScoringConfig;
use crate::schema::ValidatedTable;

use super::classifier::{BoxError, Classifier};
use super::types::{FraudReport, Label};

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("model inference failed: {0}")]
    InferenceFailure(#[source] BoxError),
    #[error("model returned {actual} predictions for {expected} rows")]
    PredictionCountMismatch { expected: usize, actual: usize },
    #[error("model returned label {value} for row {row}, expected 0 or 1")]
    UnexpectedLabel { row: usize, value: i64 },
}

/// Runs a classifier over a validated table and turns its raw output into a
/// [`FraudReport`]. Holds no per-call state, so one engine serves any number
/// of concurrent callers.
#[derive(Clone)]
pub struct ScoringEngine {
    classifier: Arc<dyn Classifier>,
    strict_labels: bool,
}

impl ScoringEngine {
    pub fn new(classifier: Arc<dyn Classifier>, config: &ScoringConfig) -> Self {
        Self {
            classifier,
            strict_labels: config.strict_labels,
        }
    }

    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    /// Score every row with a single batch call to the classifier.
    /// Classifier errors are returned as-is; there is no retry and no partial report.
    pub fn score(&self, table: &ValidatedTable) -> Result<FraudReport, ScoringError> {
        let raw = self
            .classifier
            .predict(table)
            .map_err(ScoringError::InferenceFailure)?;

        if raw.len() != table.len() {
            return Err(ScoringError::PredictionCountMismatch {
                expected: table.len(),
                actual: raw.len(),
            });
        }

        let labels = if self.strict_labels {
            raw.iter()
                .enumerate()
                .map(|(i, &value)| {
                    Label::try_from_raw(value)
                        .ok_or(ScoringError::UnexpectedLabel { row: i + 1, value })
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            raw.iter().map(|&value| Label::from_raw(value)).collect()
        };

        let report = FraudReport::from_labels(labels);
        tracing::info!(
            model = self.classifier.name(),
            rows = report.len(),
            fraudulent = report.fraudulent_indices().len(),
            "Batch scored"
        );
        Ok(report)
    }
}
