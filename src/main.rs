use clap::{Parser, ValueEnum};
use dfbench::config::BenchConfig;
use dfbench::observability::BenchReport;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Clone, ValueEnum, Debug)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "dfbench")]
#[command(version = "0.1.0")]
#[command(
    about = "Time element-wise, vectorized, row-wise and task-parallel DataFrame transforms",
    long_about = None
)]
struct Cli {
    /// Benchmark YAML file (defaults to the built-in 10M x 5 table)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of generated rows
    #[arg(long)]
    rows: Option<usize>,

    /// Seed the table generator
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON summary of the timings after the result table
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (Info -> Debug)
    #[arg(short, long)]
    verbose: bool,

    /// Silence all logs and the progress spinner
    #[arg(short, long)]
    quiet: bool,

    /// Log format (text or json)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // DFBENCH_LOG > CLI args
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("DFBENCH_LOG")
        .from_env_lossy();

    let run_id = Uuid::new_v4();

    // stdout is reserved for the benchmark output
    match cli.log_format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .json()
                .with_span_list(false)
                .with_current_span(false)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }

    let _span = tracing::info_span!("root", run_id = %run_id).entered();

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading benchmark config from {:?}", path);
            BenchConfig::from_path(path)?
        }
        None => BenchConfig::default(),
    };
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = dfbench::runner::run_benchmark(&config, &mut out, !cli.quiet)?;

    if cli.json {
        let report = BenchReport::new(
            run_id,
            outcome.source_shape,
            outcome.result.shape(),
            &outcome.metrics,
        );
        writeln!(out, "{}", report.to_json().into_diagnostic()?).into_diagnostic()?;
    }

    Ok(())
}
