//! Artifact Store
//!
//! Loads the five frozen training artifacts from one directory. Loading is
//! all-or-nothing: a missing or malformed artifact fails the whole load.

use crate::model::{LogisticModel, ModelSpec};
use crate::InferenceError;
use feature_engine::{ContinuousScaler, EncoderSpec, FeaturePipeline, OneHotEncoder, ScalerSpec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// File names of the artifacts inside the artifact directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub model: String,
    pub encoder: String,
    pub scaler: String,
    pub selected_features: String,
    pub continuous_cols: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: "model.json".to_string(),
            encoder: "encoder.json".to_string(),
            scaler: "scaler.json".to_string(),
            selected_features: "selected_features.json".to_string(),
            continuous_cols: "continuous_cols.json".to_string(),
        }
    }
}

/// The loaded, mutually consistent artifact set
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub pipeline: FeaturePipeline,
    pub model: LogisticModel,
}

impl ArtifactStore {
    /// Load every artifact from `dir`
    pub fn load(dir: impl AsRef<Path>, paths: &ArtifactPaths) -> Result<Self, InferenceError> {
        let dir = dir.as_ref();
        info!("Loading artifacts from {}", dir.display());

        let model_spec: ModelSpec = read_json("model", &dir.join(&paths.model))?;
        let encoder_spec: EncoderSpec = read_json("encoder", &dir.join(&paths.encoder))?;
        let scaler_spec: ScalerSpec = read_json("scaler", &dir.join(&paths.scaler))?;
        let selected: Vec<String> =
            read_json("selected_features", &dir.join(&paths.selected_features))?;
        let continuous: Vec<String> =
            read_json("continuous_cols", &dir.join(&paths.continuous_cols))?;

        let model = LogisticModel::new(model_spec)
            .map_err(|e| load_error("model", &dir.join(&paths.model), e.to_string()))?;
        let encoder = OneHotEncoder::new(encoder_spec)
            .map_err(|e| load_error("encoder", &dir.join(&paths.encoder), e.to_string()))?;
        let scaler = ContinuousScaler::new(scaler_spec)
            .map_err(|e| load_error("scaler", &dir.join(&paths.scaler), e.to_string()))?;

        Self::assemble(encoder, scaler, selected, continuous, model)
            .map_err(|e| match e {
                InferenceError::ArtifactLoad { artifact, reason, .. } => InferenceError::ArtifactLoad {
                    artifact,
                    path: dir.display().to_string(),
                    reason,
                },
                other => other,
            })
    }

    /// Wire already-built artifacts together, checking they fit each other
    pub fn assemble(
        encoder: OneHotEncoder,
        scaler: ContinuousScaler,
        selected_features: Vec<String>,
        continuous_cols: Vec<String>,
        model: LogisticModel,
    ) -> Result<Self, InferenceError> {
        if selected_features.is_empty() {
            return Err(InferenceError::ArtifactLoad {
                artifact: "selected_features",
                path: String::new(),
                reason: "selected feature list is empty".to_string(),
            });
        }
        if model.n_features() != selected_features.len() {
            return Err(InferenceError::ArtifactLoad {
                artifact: "model",
                path: String::new(),
                reason: format!(
                    "model expects {} features but {} are selected",
                    model.n_features(),
                    selected_features.len()
                ),
            });
        }

        let pipeline = FeaturePipeline::new(encoder, scaler, selected_features, continuous_cols)
            .map_err(|e| InferenceError::ArtifactLoad {
                artifact: "feature_pipeline",
                path: String::new(),
                reason: e.to_string(),
            })?;

        debug!("Scaled columns: {:?}", pipeline.scaled_columns());

        info!(
            "Artifacts ready: model version {}, {} selected features, {} scaled",
            model.version().unwrap_or("unversioned"),
            pipeline.selected_features().len(),
            pipeline.scaled_columns().len()
        );

        Ok(Self { pipeline, model })
    }
}

fn read_json<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> Result<T, InferenceError> {
    let text = std::fs::read_to_string(path).map_err(|e| load_error(artifact, path, e.to_string()))?;
    let value = serde_json::from_str(&text).map_err(|e| load_error(artifact, path, e.to_string()))?;
    debug!("Loaded {} artifact from {}", artifact, path.display());
    Ok(value)
}

fn load_error(artifact: &'static str, path: &Path, reason: String) -> InferenceError {
    InferenceError::ArtifactLoad {
        artifact,
        path: path.display().to_string(),
        reason,
    }
}
