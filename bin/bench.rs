use car_sales::{analyze_path, AnalysisConfig, AnalysisOutcome};
use clap::{Arg, ArgAction, Command};
use crc32fast::Hasher as Crc32;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();

    let matches = Command::new("bench")
        .arg(Arg::new("path").long("path").value_parser(clap::value_parser!(PathBuf)).required(true))
        .arg(Arg::new("verify").long("verify").help("Scan twice and require identical report digests").action(ArgAction::SetTrue))
        .arg(Arg::new("fast-local").long("fast-local").help("Use mmap+parallel fast path for local uncompressed UTF-8 files (feature: fast_local)").action(ArgAction::SetTrue))
        .arg(Arg::new("print").long("print").help("Print the rendered report after the timings").action(ArgAction::SetTrue))
        .get_matches();

    let path = matches
        .get_one::<PathBuf>("path")
        .ok_or_else(|| anyhow::anyhow!("Provide --path <file>"))?;
    let fast = matches.get_flag("fast-local");

    let (outcome, elapsed) = timed_run(path, fast).await?;
    let digest = report_digest(&outcome);
    let rps = (outcome.stats.rows_read as f64) / elapsed;
    println!(
        "source={} rows={} aggregated={} skipped={} report_crc=0x{digest:08x}\nelapsed={:.1}s rows/sec={:.0}",
        path.display(),
        outcome.stats.rows_read,
        outcome.stats.rows_aggregated,
        outcome.stats.rows_skipped,
        elapsed,
        rps
    );

    if matches.get_flag("verify") {
        let (again, _) = timed_run(path, fast).await?;
        let second = report_digest(&again);
        if second != digest {
            anyhow::bail!("report digest changed between runs: 0x{digest:08x} vs 0x{second:08x}");
        }
        println!("verify=ok");
    }

    if matches.get_flag("print") {
        print!("{}", outcome.report());
    }
    Ok(())
}

async fn timed_run(path: &Path, fast: bool) -> anyhow::Result<(AnalysisOutcome, f64)> {
    let start = Instant::now();
    let outcome = if fast {
        run_fast(path)?
    } else {
        analyze_path(path, AnalysisConfig::default()).await?
    };
    Ok((outcome, start.elapsed().as_secs_f64()))
}

#[cfg(feature = "fast_local")]
fn run_fast(path: &Path) -> anyhow::Result<AnalysisOutcome> {
    if path.extension().and_then(|s| s.to_str()) != Some("csv") {
        anyhow::bail!("--fast-local needs an uncompressed .csv file");
    }
    Ok(car_sales::fast_local_analyze(path, AnalysisConfig::default())?)
}

#[cfg(not(feature = "fast_local"))]
fn run_fast(_path: &Path) -> anyhow::Result<AnalysisOutcome> {
    anyhow::bail!("--fast-local requires building with --features fast_local")
}

fn report_digest(outcome: &AnalysisOutcome) -> u32 {
    let mut crc = Crc32::new();
    crc.update(outcome.report().to_string().as_bytes());
    crc.finalize()
}
