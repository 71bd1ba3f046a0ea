//! Service Configuration
//!
//! Layered: built-in defaults, then an optional config file (`attrition.toml`
//! or the path in `ATTRITION_CONFIG`), then `ATTRITION__*` environment
//! variables (`ATTRITION__ARTIFACTS__DIR`, `ATTRITION__LOGGING__JSON`, ...).
//! The `artifacts` and `validation` sections are the same ones the batch
//! scorer reads.

use crate::rate_limit::RateLimitConfig;
use config::ConfigError;
use inference_engine::{config_path, load_layered, ArtifactConfig, PredictorConfig};
use record_schema::ValidationConfig;
use serde::{Deserialize, Serialize};

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address
    pub bind_addr: String,
    pub artifacts: ArtifactConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub validation: ValidationConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            artifacts: ArtifactConfig::default(),
            logging: LoggingConfig::default(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ServiceConfig {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    /// Load from a specific config file (extension optional) and the environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        load_layered(path)
    }

    /// The predictor-facing part of the config
    pub fn predictor(&self) -> PredictorConfig {
        PredictorConfig {
            artifacts: self.artifacts.clone(),
            validation: self.validation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.artifacts.files.model, "model.json");
        assert!(!config.rate_limit.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = ServiceConfig::load_from("/nonexistent/attrition-config").unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.artifacts.dir, "artifacts");
        assert_eq!(config.validation.age_range, (0.0, 120.0));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        std::fs::write(
            &path,
            r#"
bind_addr = "0.0.0.0:9000"

[artifacts]
dir = "/srv/models/attrition"
model = "final_logistic_model.json"

[logging]
json = true

[rate_limit]
enabled = true
burst_size = 20

[validation]
age_range = [18.0, 65.0]
"#,
        )
        .unwrap();

        let config = ServiceConfig::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.artifacts.dir, "/srv/models/attrition");
        assert_eq!(config.artifacts.files.model, "final_logistic_model.json");
        assert_eq!(config.artifacts.files.encoder, "encoder.json");
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.burst_size, 20);

        let predictor = config.predictor();
        assert_eq!(predictor.artifacts.dir, "/srv/models/attrition");
        assert_eq!(predictor.validation.age_range, (18.0, 65.0));
    }
}
