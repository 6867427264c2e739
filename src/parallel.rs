//! Deferred tasks and a fixed-size worker pool to run them on.
//!
//! `delayed` packs a call up for later; `Parallel::run` executes a batch of
//! them and hands back the results in the order they were submitted, no
//! matter which worker finishes first.

use crate::errors::{BenchError, BenchResult};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

/// A call prepared for later invocation. Consumed exactly once.
pub struct Task<'a, T> {
    call: Box<dyn FnOnce() -> BenchResult<T> + Send + 'a>,
}

impl<'a, T> Task<'a, T> {
    pub fn call(self) -> BenchResult<T> {
        (self.call)()
    }
}

pub fn delayed<'a, T, F>(f: F) -> Task<'a, T>
where
    F: FnOnce() -> BenchResult<T> + Send + 'a,
{
    Task { call: Box::new(f) }
}

pub struct Parallel {
    pool: ThreadPool,
    n_jobs: usize,
}

impl Parallel {
    pub fn new(n_jobs: usize) -> BenchResult<Self> {
        if n_jobs == 0 {
            return Err(BenchError::InvalidConfig(
                "n_jobs must be at least 1".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_jobs)
            .thread_name(|i| format!("dfbench-worker-{i}"))
            .build()?;
        Ok(Self { pool, n_jobs })
    }

    pub fn n_jobs(&self) -> usize {
        self.n_jobs
    }

    /// Run every task on the pool. Results line up with `tasks` by position;
    /// the first error encountered is returned instead.
    pub fn run<T: Send>(&self, tasks: Vec<Task<'_, T>>) -> BenchResult<Vec<T>> {
        debug!("Dispatching {} task(s) to {} worker(s)", tasks.len(), self.n_jobs);
        self.pool.install(|| {
            tasks
                .into_par_iter()
                .with_max_len(1)
                .map(Task::call)
                .collect::<BenchResult<Vec<T>>>()
        })
    }
}
