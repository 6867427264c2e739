use std::fs;
use std::process::Command;
use tempfile::tempdir;

const EXPECTED_LABELS: [&str; 9] = [
    "map_double_val",
    "series_subtract_ten",
    "col_square_val",
    "apply_col_sum",
    "Parallel: map_double_val",
    "Parallel: series_subtract_ten",
    "Parallel: col_square_val",
    "Parallel: apply_col_sum",
    "Parallel: all",
];

/// Labels of stdout lines shaped like `<label>: <seconds>`
fn timing_labels(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.rsplit_once(": "))
        .filter(|(_, secs)| secs.trim().parse::<f64>().is_ok())
        .map(|(label, _)| label.to_string())
        .collect()
}

#[test]
fn test_cli_prints_timings_in_order() {
    let output = Command::new(env!("CARGO_BIN_EXE_dfbench"))
        .args(["--rows", "1000", "--seed", "7", "--quiet"])
        .output()
        .expect("Failed to run dfbench");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(timing_labels(&stdout), EXPECTED_LABELS);
    assert!(stdout.contains("shape: (1_000, 5)"), "stdout: {}", stdout);
    assert!(stdout.contains("shape: (1_000, 4)"), "stdout: {}", stdout);
}

#[test]
fn test_cli_logs_to_stderr() {
    let output = Command::new(env!("CARGO_BIN_EXE_dfbench"))
        .args(["--rows", "10"])
        .env("DFBENCH_LOG", "info")
        .output()
        .expect("Failed to run dfbench");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Benchmark finished"),
        "Should log completion. log: {}",
        stderr
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Benchmark finished"));
}

#[test]
fn test_cli_json_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_dfbench"))
        .args(["--rows", "20", "--json", "--quiet"])
        .output()
        .expect("Failed to run dfbench");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find('{').expect("JSON summary missing");
    let report: serde_json::Value = serde_json::from_str(&stdout[start..]).unwrap();
    assert_eq!(report["result_shape"], serde_json::json!([20, 4]));
    assert_eq!(report["timings"].as_array().unwrap().len(), 9);
}

#[test]
fn test_cli_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bench.yaml");
    fs::write(
        &config_path,
        r#"
rows: 30
seed: 1
batch_workers: 2
"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dfbench"))
        .args(["--config", config_path.to_str().unwrap(), "--quiet"])
        .output()
        .expect("Failed to run dfbench");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shape: (30, 4)"), "stdout: {}", stdout);
}

#[test]
fn test_cli_rejects_bad_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bench.yaml");
    fs::write(&config_path, "columns: [\"A\", \"B\"]\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dfbench"))
        .args(["--config", config_path.to_str().unwrap(), "--quiet"])
        .output()
        .expect("Failed to run dfbench");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
