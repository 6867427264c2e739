use crate::errors::{BenchError, BenchResult};
use polars::prelude::*;
use std::fmt;

/// Element UDF: double the value.
pub fn map_double_val(x: i64) -> i64 {
    x * 2
}

/// Series UDF: subtract 10 from every value in one vectorized step.
pub fn series_subtract_ten(s: &Series) -> BenchResult<Series> {
    Ok(s - 10)
}

/// Column UDF: square the named column in one vectorized step.
pub fn col_square_val(df: &DataFrame, name: &str) -> BenchResult<Series> {
    let ca = column(df, name)?.i64()?;
    Ok((ca * ca).with_name(ca.name().clone()).into_series())
}

/// Row UDF: sum of columns A, B and C of one row.
pub fn apply_col_sum(row: &Row<'_>) -> BenchResult<Option<i64>> {
    let (a, b, c) = (row.get("A")?, row.get("B")?, row.get("C")?);
    Ok(a.zip(b).zip(c).map(|((a, b), c)| a + b + c))
}

pub fn column<'a>(df: &'a DataFrame, name: &str) -> BenchResult<&'a Series> {
    Ok(df.column(name)?.as_materialized_series())
}

/// Apply `f` to each value of an `Int64` series, one element at a time.
pub fn map_elements<F>(s: &Series, f: F) -> BenchResult<Series>
where
    F: Fn(i64) -> i64,
{
    let mapped: Int64Chunked = s.i64()?.into_iter().map(|v| v.map(&f)).collect();
    Ok(mapped.with_name(s.name().clone()).into_series())
}

/// Read-only view of a single row, addressed by column label.
pub struct Row<'a> {
    columns: &'a [(&'a str, &'a Int64Chunked)],
    idx: usize,
}

impl Row<'_> {
    pub fn index(&self) -> usize {
        self.idx
    }

    pub fn get(&self, label: &str) -> BenchResult<Option<i64>> {
        self.columns
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, ca)| ca.get(self.idx))
            .ok_or_else(|| BenchError::ColumnNotFound(label.to_string()))
    }
}

/// Call `f` once per row and collect the results into a new series.
/// Every column of `df` must be `Int64`.
pub fn apply_rows<F>(df: &DataFrame, f: F) -> BenchResult<Series>
where
    F: Fn(&Row<'_>) -> BenchResult<Option<i64>>,
{
    let columns = df
        .get_columns()
        .iter()
        .map(|c| -> BenchResult<(&str, &Int64Chunked)> {
            Ok((c.name().as_str(), c.as_materialized_series().i64()?))
        })
        .collect::<BenchResult<Vec<_>>>()?;

    let values = (0..df.height())
        .map(|idx| {
            f(&Row {
                columns: &columns,
                idx,
            })
        })
        .collect::<BenchResult<Int64Chunked>>()?;

    Ok(values.into_series())
}

/// The four benchmarked transformations, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    MapDoubleVal,
    SeriesSubtractTen,
    ColSquareVal,
    ApplyColSum,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::MapDoubleVal,
        Operation::SeriesSubtractTen,
        Operation::ColSquareVal,
        Operation::ApplyColSum,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Operation::MapDoubleVal => "map_double_val",
            Operation::SeriesSubtractTen => "series_subtract_ten",
            Operation::ColSquareVal => "col_square_val",
            Operation::ApplyColSum => "apply_col_sum",
        }
    }

    pub fn run(self, df: &DataFrame) -> BenchResult<Series> {
        match self {
            Operation::MapDoubleVal => map_elements(column(df, "A")?, map_double_val),
            Operation::SeriesSubtractTen => series_subtract_ten(column(df, "B")?),
            Operation::ColSquareVal => col_square_val(df, "C"),
            Operation::ApplyColSum => apply_rows(df, apply_col_sum),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
