//! Attrition Prediction API Server
//!
//! Serves the frozen attrition model over HTTP. Artifacts are loaded once at
//! startup; the predictor is then shared read-only by every request.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use inference_engine::{AttritionPredictor, InferenceError};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;

pub use config::{LoggingConfig, ServiceConfig};
pub use error::ApiError;
pub use rate_limit::{create_governor_config, DefaultGovernorConfig, RateLimitConfig};

/// Application state shared across handlers
pub struct AppState {
    pub predictor: AttritionPredictor,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus render handle, if a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(predictor: AttritionPredictor, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            predictor,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        }
    }

    /// Load every artifact named in the config; any failure aborts startup
    pub fn from_config(
        config: &ServiceConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, InferenceError> {
        let predictor = config.predictor().load_predictor()?;
        Ok(Self::new(predictor, metrics))
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub version: Option<String>,
    pub selected_features: usize,
    pub scaled_features: usize,
    pub zero_filled_features: usize,
}

/// Create the application router
pub fn create_router(
    state: Arc<AppState>,
    governor: Option<Arc<DefaultGovernorConfig>>,
) -> Router {
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(routes::predictions::predict))
        .route("/metrics", get(metrics_handler));

    let router = match governor {
        Some(config) => router.layer(GovernorLayer { config }),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Liveness message
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "HR Attrition Prediction API is running" }))
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pipeline = state.predictor.pipeline();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            version: state.predictor.model().version().map(str::to_string),
            selected_features: pipeline.selected_features().len(),
            scaled_features: pipeline.scaled_columns().len(),
            zero_filled_features: pipeline.zero_filled_columns().len(),
        },
    })
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid log level '{}'", config.level))?;

    if config.json {
        let subscriber = FmtSubscriber::builder()
            .json()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

/// Run the server
pub async fn run_server(config: ServiceConfig) -> anyhow::Result<()> {
    let metrics = PrometheusBuilder::new().install_recorder()?;

    info!("Loading artifacts from {}", config.artifacts.dir);
    let state = Arc::new(AppState::from_config(&config, Some(metrics))?);

    let governor = if config.rate_limit.enabled {
        let governor = create_governor_config(&config.rate_limit)
            .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?;
        info!(
            "Rate limiting enabled: burst {}, one request per {}s",
            config.rate_limit.burst_size, config.rate_limit.per_second
        );
        Some(governor)
    } else {
        None
    };

    let app = create_router(state, governor);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
