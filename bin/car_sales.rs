use car_sales::{analyze_path, AnalysisConfig, AnalysisError};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const INPUT_FILE: &str = "world_car_sales_1m.csv";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let outcome = match analyze_path(Path::new(INPUT_FILE), AnalysisConfig::default()).await {
        Ok(outcome) => outcome,
        Err(AnalysisError::Open { source, .. }) => {
            tracing::debug!(error = %source, "open failed");
            eprintln!("Error: Could not open {INPUT_FILE}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        rows = outcome.stats.rows_read,
        skipped = outcome.stats.rows_skipped,
        "analysis finished"
    );

    let mut out = std::io::stdout().lock();
    write!(out, "{}", outcome.report())?;
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}
