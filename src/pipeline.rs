use std::sync::Arc;

use crate::config::Config;
use crate::schema::{SchemaError, SchemaValidator, TableError, TransactionTable};
use crate::scoring::{Classifier, FraudReport, ScoringEngine, ScoringError};

#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl ScreeningError {
    /// Whether the caller can fix this by correcting the input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Table(_) | Self::Schema(_))
    }
}

/// Validation followed by scoring:
/// 1. Schema check (column count, canonical names)
/// 2. Batch inference
/// 3. Fraud report
///
/// A table that fails step 1 never reaches the classifier.
#[derive(Clone)]
pub struct ScreeningPipeline {
    pub validator: SchemaValidator,
    pub engine: ScoringEngine,
}

impl ScreeningPipeline {
    pub fn new(config: &Config, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            validator: SchemaValidator::new(&config.validation),
            engine: ScoringEngine::new(classifier, &config.scoring),
        }
    }

    pub fn screen(&self, table: &TransactionTable) -> Result<FraudReport, ScreeningError> {
        let validated = self.validator.validate(table).map_err(|e| {
            tracing::info!(error = %e, "Table rejected by schema validation");
            e
        })?;

        let report = self.engine.score(&validated).map_err(|e| {
            tracing::error!(error = %e, "Scoring failed");
            e
        })?;

        for index in report.fraudulent_indices() {
            tracing::warn!(
                transaction = index,
                model = self.engine.model_name(),
                "FRAUD DETECTED"
            );
        }

        Ok(report)
    }
}
