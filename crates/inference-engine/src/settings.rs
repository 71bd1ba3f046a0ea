//! Predictor Settings
//!
//! Artifact location and validation bounds, shared by every binary that
//! builds a predictor. Settings are layered: built-in defaults, then an
//! optional config file (`attrition.toml`, or the path in `ATTRITION_CONFIG`),
//! then `ATTRITION__*` environment variables.

use crate::artifacts::ArtifactPaths;
use crate::engine::AttritionPredictor;
use crate::InferenceError;
use config::{Config, ConfigError, Environment, File};
use record_schema::ValidationConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "ATTRITION_CONFIG";

/// Config file used when `ATTRITION_CONFIG` is unset (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "attrition";

/// Where the trained artifacts live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub dir: String,
    #[serde(flatten)]
    pub files: ArtifactPaths,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: "artifacts".to_string(),
            files: ArtifactPaths::default(),
        }
    }
}

/// Everything needed to build an [`AttritionPredictor`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub artifacts: ArtifactConfig,
    pub validation: ValidationConfig,
}

impl PredictorConfig {
    /// Load every artifact; any failure is fatal
    pub fn load_predictor(&self) -> Result<AttritionPredictor, InferenceError> {
        AttritionPredictor::load(
            &self.artifacts.dir,
            &self.artifacts.files,
            self.validation.clone(),
        )
    }
}

/// Config file path from `ATTRITION_CONFIG`, or the default
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Layer `T`'s defaults, the file at `path` (if present) and the environment.
///
/// Keys `T` does not know are ignored, so binaries with different settings
/// can read one shared file.
pub fn load_layered<T>(path: &str) -> Result<T, ConfigError>
where
    T: Default + Serialize + DeserializeOwned,
{
    Config::builder()
        .add_source(Config::try_from(&T::default())?)
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix("ATTRITION")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
