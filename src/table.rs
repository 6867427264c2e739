use crate::config::BenchConfig;
use crate::errors::BenchResult;
use polars::prelude::*;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Build the source table: `config.rows` rows of uniform integers in
/// `[low, high)`, one `Int64` column per configured label.
pub fn generate_table(config: &BenchConfig) -> BenchResult<DataFrame> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let dist = Uniform::new(config.low, config.high);

    debug!(
        "Generating {} x {} table (seed: {:?})",
        config.rows,
        config.columns.len(),
        config.seed
    );

    let columns: Vec<Column> = config
        .columns
        .iter()
        .map(|name| {
            let values: Vec<i64> = (&dist).sample_iter(&mut rng).take(config.rows).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}
