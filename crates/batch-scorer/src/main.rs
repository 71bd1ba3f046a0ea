//! `attrition-batch` -- score a CSV of employee records offline.

use batch_scorer::{load_predictor, print_preview, rate_summary, score_file};
use clap::Parser;
use inference_engine::config_path;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Score a table of employee records with the frozen attrition model.
#[derive(Parser, Debug)]
#[command(name = "attrition-batch", about = "Batch attrition scoring", version)]
struct Args {
    /// CSV of employee records, one per row.
    #[arg(short, long, default_value = "new_data.csv")]
    input: PathBuf,

    /// Where to write `Attrition_Probability,Predicted_Attrition`.
    #[arg(short, long, default_value = "predictions.csv")]
    output: PathBuf,

    /// Config file shared with the API (defaults to `$ATTRITION_CONFIG`, then `attrition`).
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding the trained artifacts; overrides `artifacts.dir`.
    #[arg(short, long)]
    artifacts: Option<PathBuf>,

    /// Number of scored rows to print.
    #[arg(long, default_value_t = 5)]
    show: usize,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.config.unwrap_or_else(config_path);
    info!("Reading settings from {}", config);
    let predictor = load_predictor(&config, args.artifacts.as_deref())?;

    let scores = score_file(&predictor, &args.input, &args.output)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_preview(&mut out, &scores, args.show)?;
    writeln!(out, "{}", rate_summary(&scores))?;
    Ok(())
}
