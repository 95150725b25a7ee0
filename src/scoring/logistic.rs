use crate::config::ModelConfig;
use crate::schema::{ValidatedTable, FEATURE_COUNT};

use super::classifier::{BoxError, Classifier};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("row {row}, feature {feature}: value {value} is not finite")]
    NonFiniteFeature { row: usize, feature: usize, value: f64 },
}

/// Logistic regression over the 30 features:
/// `sigmoid(w . x + b) >= threshold` predicts fraud.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    name: String,
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
    threshold: f64,
}

impl LogisticClassifier {
    pub fn from_config(config: &ModelConfig) -> eyre::Result<Self> {
        let weights: [f64; FEATURE_COUNT] = config.weights.as_slice().try_into().map_err(|_| {
            eyre::eyre!(
                "Model '{}' needs {} weights, got {}",
                config.name,
                FEATURE_COUNT,
                config.weights.len()
            )
        })?;

        tracing::info!(
            model = %config.name,
            threshold = config.threshold,
            "Logistic classifier loaded"
        );

        Ok(Self {
            name: config.name.clone(),
            weights,
            intercept: config.intercept,
            threshold: config.threshold,
        })
    }

    /// Fraud probability for one row.
    pub fn probability(&self, row: &[f64]) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &ValidatedTable) -> Result<Vec<i64>, BoxError> {
        rows.rows()
            .iter()
            .enumerate()
            .map(|(r, row)| -> Result<i64, BoxError> {
                if let Some((f, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                    return Err(ModelError::NonFiniteFeature {
                        row: r + 1,
                        feature: f + 1,
                        value,
                    }
                    .into());
                }
                Ok(i64::from(self.probability(row) >= self.threshold))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureSchema;

    fn config(weights: Vec<f64>, intercept: f64) -> ModelConfig {
        ModelConfig {
            name: "unit".to_string(),
            weights,
            intercept,
            threshold: 0.5,
        }
    }

    fn table(rows: Vec<Vec<f64>>) -> ValidatedTable {
        ValidatedTable::with_canonical_names(&FeatureSchema::canonical(), rows)
    }

    #[test]
    fn test_rejects_wrong_weight_count() {
        assert!(LogisticClassifier::from_config(&config(vec![1.0; 3], 0.0)).is_err());
    }

    #[test]
    fn test_probability_at_zero_is_half() {
        let model = LogisticClassifier::from_config(&config(vec![0.0; FEATURE_COUNT], 0.0)).unwrap();
        let p = model.probability(&[0.0; FEATURE_COUNT]);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_predicts_by_threshold() {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[0] = 4.0;
        let model = LogisticClassifier::from_config(&config(weights, -2.0)).unwrap();

        let mut fraud = vec![0.0; FEATURE_COUNT];
        fraud[0] = 2.0;
        let legit = vec![0.0; FEATURE_COUNT];

        let predictions = model.predict(&table(vec![legit, fraud])).unwrap();
        assert_eq!(predictions, vec![0, 1]);
    }

    #[test]
    fn test_non_finite_feature_fails_batch() {
        let model = LogisticClassifier::from_config(&config(vec![0.1; FEATURE_COUNT], 0.0)).unwrap();
        let mut bad = vec![0.0; FEATURE_COUNT];
        bad[4] = f64::NAN;

        let err = model
            .predict(&table(vec![vec![0.0; FEATURE_COUNT], bad]))
            .unwrap_err();
        assert!(err.to_string().contains("row 2, feature 5"));
    }

    #[test]
    fn test_empty_table() {
        let model = LogisticClassifier::from_config(&config(vec![0.1; FEATURE_COUNT], 0.0)).unwrap();
        assert!(model.predict(&table(vec![])).unwrap().is_empty());
    }
}
