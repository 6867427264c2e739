use crate::config::BenchConfig;
use crate::errors::{BenchError, BenchResult};
use crate::observability::Metrics;
use crate::ops::Operation;
use crate::parallel::{delayed, Parallel};
use crate::table;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// Labels of the reassembled result table, one per batch task.
pub const RESULT_COLUMNS: [&str; 4] = ["A", "B", "C", "D"];

pub const BATCH_LABEL: &str = "Parallel: all";

pub struct BenchOutcome {
    pub source_shape: (usize, usize),
    pub result: DataFrame,
    pub metrics: Metrics,
}

/// Generate the table, time every operation serially, through a
/// single-worker pool, then all together on the batch pool, and print the
/// reassembled results. Everything user-facing goes to `out`.
pub fn run_benchmark<W: Write>(
    config: &BenchConfig,
    out: &mut W,
    show_progress: bool,
) -> BenchResult<BenchOutcome> {
    let pb = if show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| BenchError::Unknown(e.into()))?,
    );

    pb.set_message("Generating table...");
    info!(
        "Generating {} rows x {} columns",
        config.rows,
        config.columns.len()
    );
    let df = table::generate_table(config)?;
    writeln!(out, "{}", df)?;

    let mut metrics = Metrics::new();

    // 1. Direct calls
    for op in Operation::ALL {
        timed(op.label(), out, &mut metrics, &pb, || op.run(&df))?;
    }

    // 2. Each call on its own single-worker pool
    info!(
        "Dispatching operations individually to {} worker(s)",
        config.control_workers
    );
    for op in Operation::ALL {
        let label = format!("Parallel: {}", op.label());
        timed(&label, out, &mut metrics, &pb, || {
            Parallel::new(config.control_workers)?.run(vec![delayed(|| op.run(&df))])
        })?;
    }

    // 3. All calls as one batch
    info!(
        "Dispatching {} operations as one batch to {} worker(s)",
        Operation::ALL.len(),
        config.batch_workers
    );
    let source = &df;
    let results = timed(BATCH_LABEL, out, &mut metrics, &pb, || {
        let tasks = Operation::ALL
            .into_iter()
            .map(|op| delayed(move || op.run(source)))
            .collect();
        Parallel::new(config.batch_workers)?.run(tasks)
    })?;

    let result = assemble_results(results, &RESULT_COLUMNS)?;
    writeln!(out, "{}", result)?;
    out.flush()?;

    pb.finish_and_clear();
    info!(
        "Benchmark finished in {:.3}s",
        metrics.total_duration().as_secs_f64()
    );

    Ok(BenchOutcome {
        source_shape: df.shape(),
        result,
        metrics,
    })
}

fn timed<T, W, F>(
    label: &str,
    out: &mut W,
    metrics: &mut Metrics,
    pb: &ProgressBar,
    f: F,
) -> BenchResult<T>
where
    W: Write,
    F: FnOnce() -> BenchResult<T>,
{
    pb.set_message(label.to_string());
    let start = Instant::now();
    let value = f()?;
    let elapsed = start.elapsed();

    writeln!(out, "{}: {}", label, elapsed.as_secs_f64())?;
    debug!("{} took {:?}", label, elapsed);
    metrics.record_step(label, elapsed);
    Ok(value)
}

/// Build a table whose `i`-th column is `results[i]` renamed to `labels[i]`.
pub fn assemble_results(results: Vec<Series>, labels: &[&str]) -> BenchResult<DataFrame> {
    if results.len() != labels.len() {
        return Err(BenchError::Unknown(anyhow::anyhow!(
            "expected {} results, got {}",
            labels.len(),
            results.len()
        )));
    }

    let columns: Vec<Column> = results
        .into_iter()
        .zip(labels)
        .map(|(s, label)| Column::from(s.with_name((*label).into())))
        .collect();

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: usize) -> BenchConfig {
        BenchConfig {
            rows,
            seed: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_assemble_results_positional() -> BenchResult<()> {
        let results = vec![
            Series::new("x".into(), [1i64, 2]),
            Series::new("".into(), [3i64, 4]),
        ];
        let df = assemble_results(results, &["A", "B"])?;
        assert_eq!(df.get_column_names(), vec!["A", "B"]);
        assert_eq!(df.column("B")?.as_materialized_series().i64()?.get(1), Some(4));
        Ok(())
    }

    #[test]
    fn test_assemble_results_count_mismatch() {
        let results = vec![Series::new("x".into(), [1i64])];
        assert!(assemble_results(results, &RESULT_COLUMNS).is_err());
    }

    #[test]
    fn test_assemble_results_length_mismatch() {
        let results = vec![
            Series::new("x".into(), [1i64, 2]),
            Series::new("y".into(), [1i64]),
        ];
        assert!(matches!(
            assemble_results(results, &["A", "B"]),
            Err(BenchError::PolarsError(_))
        ));
    }

    #[test]
    fn test_run_benchmark_output() -> BenchResult<()> {
        let mut out = Vec::new();
        let outcome = run_benchmark(&config(50), &mut out, false)?;

        assert_eq!(outcome.source_shape, (50, 5));
        assert_eq!(outcome.result.shape(), (50, 4));
        assert_eq!(outcome.metrics.timings.len(), 9);
        assert_eq!(outcome.metrics.labels().last(), Some(&BATCH_LABEL));

        let text = String::from_utf8(out).unwrap();
        for label in outcome.metrics.labels() {
            assert!(
                text.lines().any(|l| l.starts_with(&format!("{label}: "))),
                "missing timing line for {label}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_run_benchmark_single_row() -> BenchResult<()> {
        let mut out = Vec::new();
        let outcome = run_benchmark(&config(1), &mut out, false)?;
        assert_eq!(outcome.result.shape(), (1, 4));
        Ok(())
    }
}
