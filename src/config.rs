use crate::errors::{BenchError, BenchResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Columns every operation depends on.
pub const REQUIRED_COLUMNS: [&str; 3] = ["A", "B", "C"];

/// Shape of the benchmark: table dimensions, value range and pool sizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub rows: usize,
    pub columns: Vec<String>,
    /// Inclusive lower bound of generated values.
    pub low: i64,
    /// Exclusive upper bound of generated values.
    pub high: i64,
    pub seed: Option<u64>,
    /// Pool size for the per-operation dispatch runs.
    pub control_workers: usize,
    /// Pool size for the batch run of all operations.
    pub batch_workers: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rows: 10_000_000,
            columns: ["A", "B", "C", "D", "E"].map(String::from).to_vec(),
            low: 1,
            high: 100,
            seed: None,
            control_workers: 1,
            batch_workers: 4,
        }
    }
}

impl BenchConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> BenchResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| BenchError::ConfigError(e, None))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.rows == 0 {
            return Err(BenchError::InvalidConfig(
                "rows must be at least 1".to_string(),
            ));
        }
        if self.low >= self.high {
            return Err(BenchError::InvalidConfig(format!(
                "low ({}) must be less than high ({})",
                self.low, self.high
            )));
        }
        if self.control_workers == 0 || self.batch_workers == 0 {
            return Err(BenchError::InvalidConfig(
                "worker counts must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.columns {
            if !seen.insert(name.as_str()) {
                return Err(BenchError::InvalidConfig(format!(
                    "duplicate column: {}",
                    name
                )));
            }
        }
        for required in REQUIRED_COLUMNS {
            if !seen.contains(required) {
                return Err(BenchError::ColumnNotFound(required.to_string()));
            }
        }
        Ok(())
    }
}
