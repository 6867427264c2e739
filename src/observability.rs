use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub label: String,
    pub seconds: f64,
}

/// Timings in the order they were recorded.
#[derive(Debug, Serialize)]
pub struct Metrics {
    #[serde(skip)]
    start_time: Instant,
    pub timings: Vec<Timing>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            timings: Vec::new(),
        }
    }

    pub fn record_step(&mut self, label: &str, duration: Duration) {
        self.timings.push(Timing {
            label: label.to_string(),
            seconds: duration.as_secs_f64(),
        });
    }

    pub fn labels(&self) -> Vec<&str> {
        self.timings.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one benchmark run, printed as JSON on request.
#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub source_shape: (usize, usize),
    pub result_shape: (usize, usize),
    pub total_seconds: f64,
    pub timings: Vec<Timing>,
}

impl BenchReport {
    pub fn new(
        run_id: Uuid,
        source_shape: (usize, usize),
        result_shape: (usize, usize),
        metrics: &Metrics,
    ) -> Self {
        Self {
            run_id: run_id.to_string(),
            timestamp: Utc::now(),
            source_shape,
            result_shape,
            total_seconds: metrics.total_duration().as_secs_f64(),
            timings: metrics.timings.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
