//! Batch GRIM checking over a table of reported means.
//!
//! The driver walks the table in row order, runs the scalar check per row,
//! and aggregates two index-aligned sequences: one boolean and one optional
//! diagnostic per input row. A malformed row records `false` plus an error
//! diagnostic and the batch continues; only schema-level problems (missing
//! columns, both selectors on one column) fail the whole call.

pub mod adapter;

#[cfg(test)]
pub mod tests;

use crate::checker::grim_scalar_checked;
use crate::config::CheckOptions;
use crate::constants::PAR_ROW_THRESHOLD;
use crate::error::Result;
use crate::models::{ColumnRef, MapResult, RowDiagnostic};
use self::adapter::RowSource;
use polars::prelude::DataFrame;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Run the GRIM check against every row of a table.
///
/// `x_col` selects the reported means, `n_col` the sample sizes; both accept
/// a 0-based position or a column name. Output sequences are exactly
/// `df.height()` long, in table order, for any input including the empty
/// table.
pub fn grim_map(
    df: &DataFrame,
    x_col: impl Into<ColumnRef>,
    n_col: impl Into<ColumnRef>,
    options: &CheckOptions,
) -> Result<MapResult> {
    let x_col = x_col.into();
    let n_col = n_col.into();
    let source = adapter::resolve(df, &x_col, &n_col)?;
    let height = df.height();

    if adapter::dtype_is_numeric(source.means.dtype()) && !options.silence_numeric_warning {
        warn!(
            "column '{}' holds numeric values; trailing zeros in the reported means may \
             already be lost (store means as text to keep their disclosed precision)",
            source.means.name()
        );
    }

    debug!(
        "grim map: {} rows, means={}, sizes={}",
        height,
        source.means.name(),
        source.sizes.name()
    );

    let check = |row_index: usize| check_row(&source, row_index, options);
    let rows: Vec<(bool, Option<RowDiagnostic>)> = if height >= PAR_ROW_THRESHOLD {
        (0..height).into_par_iter().map(check).collect()
    } else {
        (0..height).map(check).collect()
    };

    let mut result = MapResult::with_capacity(height);
    for (consistent, diagnostic) in rows {
        result.consistent.push(consistent);
        result.diagnostics.push(diagnostic);
    }

    info!(
        "grim map complete: {}/{} rows consistent, {} row errors",
        result.consistent_count(),
        result.len(),
        result.error_count()
    );

    Ok(result)
}

/// One row: extract, check, downgrade any failure to `false` plus a
/// diagnostic.
fn check_row(
    source: &RowSource<'_>,
    row_index: usize,
    options: &CheckOptions,
) -> (bool, Option<RowDiagnostic>) {
    let outcome = source
        .extract(row_index)
        .and_then(|(mean, size)| grim_scalar_checked(mean, size, options));

    match outcome {
        Ok(outcome) => (
            outcome.consistent,
            outcome
                .warning
                .map(|warning| RowDiagnostic::from_warning(row_index, warning)),
        ),
        Err(error) => (false, Some(RowDiagnostic::from_error(row_index, &error))),
    }
}
