//! Batch Scoring of Employee Tables
//!
//! Reads a CSV of employee records, scores every row with the same
//! predictor the API uses and writes probabilities and labels back out.

use inference_engine::{load_layered, AttritionPredictor, BatchScores, InferenceError, PredictorConfig};
use record_schema::EmployeeRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors while reading, scoring or writing a batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to load configuration from {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: config::ConfigError,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Row {row} of {path} is not a valid employee record: {source}")]
    Record {
        row: usize,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Scoring(#[from] InferenceError),
}

/// Build the predictor from the same layered settings the API reads.
///
/// `artifacts_dir`, when given, replaces the configured artifact directory.
pub fn load_predictor(
    config_path: &str,
    artifacts_dir: Option<&Path>,
) -> Result<AttritionPredictor, BatchError> {
    let mut config: PredictorConfig =
        load_layered(config_path).map_err(|source| BatchError::Config {
            path: config_path.to_string(),
            source,
        })?;
    if let Some(dir) = artifacts_dir {
        config.artifacts.dir = dir.display().to_string();
    }
    let predictor = config.load_predictor()?;
    info!("Artifacts loaded from {}", config.artifacts.dir);
    Ok(predictor)
}

/// Read every record from a headed CSV file. Headers must match the
/// record's field names exactly.
pub fn read_records(path: &Path) -> Result<Vec<EmployeeRecord>, BatchError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<EmployeeRecord>().enumerate() {
        let record = result.map_err(|source| BatchError::Record {
            row,
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }
    info!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Write `Attrition_Probability,Predicted_Attrition` rows in input order
pub fn write_scores(path: &Path, scores: &BatchScores) -> Result<(), BatchError> {
    let write_error = |source| BatchError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(write_error)?;
    if scores.is_empty() {
        writer
            .write_record(["Attrition_Probability", "Predicted_Attrition"])
            .map_err(write_error)?;
    }
    for row in scores.rows() {
        writer.serialize(row).map_err(write_error)?;
    }
    writer.flush().map_err(|e| write_error(e.into()))?;
    info!("Wrote {} predictions to {}", scores.len(), path.display());
    Ok(())
}

/// Print the first `limit` scored rows as a small table
pub fn print_preview(out: &mut impl Write, scores: &BatchScores, limit: usize) -> std::io::Result<()> {
    writeln!(out, "{:>5}  {:>21}  {:>19}", "", "Attrition_Probability", "Predicted_Attrition")?;
    for (i, row) in scores.rows().take(limit).enumerate() {
        writeln!(
            out,
            "{:>5}  {:>21.6}  {:>19}",
            i, row.attrition_probability, row.predicted_attrition
        )?;
    }
    Ok(())
}

/// Human-readable attrition-rate summary line
pub fn rate_summary(scores: &BatchScores) -> String {
    match scores.attrition_rate() {
        Some(rate) => format!("Predicted Attrition Rate: {:.2}%", rate),
        None => "Predicted Attrition Rate: n/a (no records)".to_string(),
    }
}

/// Read, score and write one table
pub fn score_file(
    predictor: &AttritionPredictor,
    input: &Path,
    output: &Path,
) -> Result<BatchScores, BatchError> {
    let records = read_records(input)?;
    let scores = predictor.score_batch(&records)?;
    write_scores(output, &scores)?;
    Ok(scores)
}
