//! Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use inference_engine::Prediction;
use metrics::{counter, histogram};
use record_schema::EmployeeRecord;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

const PREDICTIONS_TOTAL: &str = "attrition_predictions_total";
const PREDICTION_LATENCY: &str = "attrition_prediction_latency_seconds";

/// Score one employee record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EmployeeRecord>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(record) = payload.map_err(|rejection| {
        counter!(PREDICTIONS_TOTAL, "outcome" => "rejected").increment(1);
        warn!(%request_id, "Rejected request body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let start = Instant::now();
    let result = state.predictor.predict(&record);
    histogram!(PREDICTION_LATENCY).record(start.elapsed().as_secs_f64());

    match result {
        Ok(prediction) => {
            counter!(PREDICTIONS_TOTAL, "outcome" => "success").increment(1);
            info!(
                %request_id,
                probability = prediction.attrition_probability,
                risk = prediction.risk_level.as_str(),
                "Prediction served"
            );
            Ok(Json(prediction))
        }
        Err(e) if e.is_invalid_input() => {
            counter!(PREDICTIONS_TOTAL, "outcome" => "invalid_input").increment(1);
            warn!(%request_id, "Invalid input: {}", e);
            Err(ApiError::InvalidInput(e.to_string()))
        }
        Err(e) => {
            counter!(PREDICTIONS_TOTAL, "outcome" => "error").increment(1);
            error!(%request_id, "Prediction failed: {}", e);
            Err(ApiError::Internal { request_id })
        }
    }
}
