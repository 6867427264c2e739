use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code("DFBENCH-001"),
        help("Please check your benchmark YAML syntax and field names.")
    )]
    ConfigError(#[source] serde_yaml::Error, #[label("here")] Option<SourceSpan>),

    #[error("I/O error: {0}")]
    #[diagnostic(code("DFBENCH-002"), help("Check file paths and that stdout is writable."))]
    IoError(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    #[diagnostic(
        code("DFBENCH-003"),
        help("An error occurred within the data processing engine.")
    )]
    PolarsError(#[from] polars::error::PolarsError),

    #[error("Column not found: {0}")]
    #[diagnostic(
        code("DFBENCH-004"),
        help("The generated table must contain every column an operation reads.")
    )]
    ColumnNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code("DFBENCH-005"))]
    InvalidConfig(String),

    #[error("Worker pool error: {0}")]
    #[diagnostic(
        code("DFBENCH-006"),
        help("The thread pool could not be started.")
    )]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    #[diagnostic(code("DFBENCH-000"))]
    Unknown(#[from] anyhow::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;
