use serde::Deserialize;

use crate::schema::FEATURE_COUNT;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub model: ModelConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

// ============================================================
// Model Config
// ============================================================

/// Parameters of the logistic-regression classifier shipped with the binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_model_name() -> String {
    "logistic".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

// ============================================================
// Validation / Scoring Config
// ============================================================

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ValidationConfig {
    /// Reject 30-column tables whose header differs from the feature schema
    /// instead of renaming the columns by position.
    #[serde(default)]
    pub strict_column_names: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    /// Reject predictions outside {0, 1} instead of treating them as legitimate.
    #[serde(default)]
    pub strict_labels: bool,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strict_labels: false,
            timeout_ms: 30_000,
        }
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

// ============================================================
// Server Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 3000,
            host: "0.0.0.0".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        if self.model.weights.len() != FEATURE_COUNT {
            return Err(eyre::eyre!(
                "Model '{}' has {} weights, expected one per feature ({})",
                self.model.name,
                self.model.weights.len(),
                FEATURE_COUNT
            ));
        }
        if let Some(pos) = self.model.weights.iter().position(|w| !w.is_finite()) {
            return Err(eyre::eyre!(
                "Model '{}' weight {} is not a finite number",
                self.model.name,
                pos + 1
            ));
        }
        if !self.model.intercept.is_finite() {
            return Err(eyre::eyre!(
                "Model '{}' intercept is not a finite number",
                self.model.name
            ));
        }
        if !(self.model.threshold > 0.0 && self.model.threshold < 1.0) {
            return Err(eyre::eyre!(
                "Model threshold must be between 0 and 1, got {}",
                self.model.threshold
            ));
        }
        if self.scoring.timeout_ms == 0 {
            return Err(eyre::eyre!("Scoring timeout must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(weights: usize, threshold: f64) -> ModelConfig {
        ModelConfig {
            name: "test".to_string(),
            weights: vec![0.1; weights],
            intercept: -1.0,
            threshold,
        }
    }

    fn config_with(model: ModelConfig) -> Config {
        Config {
            model,
            validation: ValidationConfig::default(),
            scoring: ScoringConfig::default(),
            server: ServerConfig::default(),
        }
    }

    #[test]
    fn test_parse_config() {
        let weights = vec!["0.5"; FEATURE_COUNT].join(", ");
        let toml_str = format!(
            r#"
[model]
name = "rf-eu-cards"
weights = [{weights}]
intercept = -3.2

[scoring]
strict_labels = true

[server]
port = 8080
"#
        );

        let config: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.model.name, "rf-eu-cards");
        assert_eq!(config.model.weights.len(), FEATURE_COUNT);
        assert_eq!(config.model.threshold, 0.5); // default
        assert!(config.scoring.strict_labels);
        assert_eq!(config.scoring.timeout_ms, 30_000); // default
        assert!(!config.validation.strict_column_names); // default
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0"); // default
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_weight_count() {
        assert!(config_with(model(29, 0.5)).validate().is_err());
        assert!(config_with(model(31, 0.5)).validate().is_err());
        assert!(config_with(model(FEATURE_COUNT, 0.5)).validate().is_ok());
    }

    #[test]
    fn test_validate_threshold_range() {
        assert!(config_with(model(FEATURE_COUNT, 0.0)).validate().is_err());
        assert!(config_with(model(FEATURE_COUNT, 1.0)).validate().is_err());
        assert!(config_with(model(FEATURE_COUNT, 0.61)).validate().is_ok());
    }

    #[test]
    fn test_validate_non_finite_weight() {
        let mut m = model(FEATURE_COUNT, 0.5);
        m.weights[7] = f64::NAN;
        let err = config_with(m).validate().unwrap_err();
        assert!(err.to_string().contains("weight 8"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/cardguard.toml").is_err());
    }
}
