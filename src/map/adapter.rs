//! Row adapter: column resolution and per-row cell extraction.
//!
//! The batch driver consumes a generic table through this adapter only.
//! Column selectors resolve once per call; positions are 0-based over the
//! table's physical column order, so a leading label column shifts every
//! data column right by one.

use crate::decimal::ReportedValue;
use crate::error::{GrimError, Result};
use crate::models::ColumnRef;
use polars::prelude::*;

/// The two resolved columns a batch call reads from.
#[derive(Debug)]
pub(crate) struct RowSource<'a> {
    pub means: &'a Column,
    pub sizes: &'a Column,
}

impl RowSource<'_> {
    /// Pull the (reported mean, sample size) pair for one row.
    pub fn extract(&self, row_index: usize) -> Result<(ReportedValue, u32)> {
        let mean = extract_reported(self.means, row_index)?;
        let size = extract_sample_size(self.sizes, row_index)?;
        Ok((mean, size))
    }
}

/// Resolve both selectors against the table schema.
///
/// Fails with `MissingColumn` for an unknown name or out-of-range index,
/// and with `ColumnConflict` when both selectors land on the same column,
/// which is almost always a mixed index/name mistake.
pub(crate) fn resolve<'a>(
    df: &'a DataFrame,
    x_col: &ColumnRef,
    n_col: &ColumnRef,
) -> Result<RowSource<'a>> {
    let mean_index = resolve_column_index(df, x_col)?;
    let size_index = resolve_column_index(df, n_col)?;

    if mean_index == size_index {
        return Err(GrimError::ColumnConflict {
            name: df.get_columns()[mean_index].name().to_string(),
        });
    }

    Ok(RowSource {
        means: &df.get_columns()[mean_index],
        sizes: &df.get_columns()[size_index],
    })
}

fn resolve_column_index(df: &DataFrame, column: &ColumnRef) -> Result<usize> {
    match column {
        ColumnRef::Index(index) => {
            if *index < df.width() {
                Ok(*index)
            } else {
                Err(GrimError::missing_column(format!("index {index}")))
            }
        }
        ColumnRef::Name(name) => df
            .get_column_index(name)
            .ok_or_else(|| GrimError::missing_column(name.clone())),
    }
}

/// Whether a column dtype loses trailing fractional zeros.
pub(crate) fn dtype_is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}

fn extract_reported(column: &Column, row_index: usize) -> Result<ReportedValue> {
    let cell = column.get(row_index)?;
    match cell {
        AnyValue::String(text) => Ok(ReportedValue::Text(text.trim().to_string())),
        AnyValue::StringOwned(text) => Ok(ReportedValue::Text(text.trim().to_string())),
        AnyValue::UInt8(v) => Ok(ReportedValue::Number(f64::from(v))),
        AnyValue::UInt16(v) => Ok(ReportedValue::Number(f64::from(v))),
        AnyValue::UInt32(v) => Ok(ReportedValue::Number(f64::from(v))),
        AnyValue::UInt64(v) => Ok(ReportedValue::Number(v as f64)),
        AnyValue::Int8(v) => Ok(ReportedValue::Number(f64::from(v))),
        AnyValue::Int16(v) => Ok(ReportedValue::Number(f64::from(v))),
        AnyValue::Int32(v) => Ok(ReportedValue::Number(f64::from(v))),
        AnyValue::Int64(v) => Ok(ReportedValue::Number(v as f64)),
        AnyValue::Float32(v) => Ok(ReportedValue::Number(f64::from(v))),
        AnyValue::Float64(v) => Ok(ReportedValue::Number(v)),
        AnyValue::Null => Err(GrimError::not_numeric("null", "missing value")),
        other => Err(GrimError::not_numeric(
            format!("{other}"),
            "cell is neither text nor numeric",
        )),
    }
}

fn extract_sample_size(column: &Column, row_index: usize) -> Result<u32> {
    let cell = column.get(row_index)?;
    match cell {
        AnyValue::String(text) => parse_size_text(text),
        AnyValue::StringOwned(ref text) => parse_size_text(text),
        AnyValue::UInt8(v) => validate_size(i128::from(v)),
        AnyValue::UInt16(v) => validate_size(i128::from(v)),
        AnyValue::UInt32(v) => validate_size(i128::from(v)),
        AnyValue::UInt64(v) => validate_size(i128::from(v)),
        AnyValue::Int8(v) => validate_size(i128::from(v)),
        AnyValue::Int16(v) => validate_size(i128::from(v)),
        AnyValue::Int32(v) => validate_size(i128::from(v)),
        AnyValue::Int64(v) => validate_size(i128::from(v)),
        AnyValue::Float32(v) => validate_size_float(f64::from(v)),
        AnyValue::Float64(v) => validate_size_float(v),
        AnyValue::Null => Err(GrimError::invalid_sample_size("null", "missing value")),
        other => Err(GrimError::invalid_sample_size(
            format!("{other}"),
            "cell is neither text nor numeric",
        )),
    }
}

fn parse_size_text(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let value: i128 = trimmed
        .parse()
        .map_err(|_| GrimError::invalid_sample_size(trimmed, "not an integer"))?;
    validate_size(value)
}

fn validate_size_float(value: f64) -> Result<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(GrimError::invalid_sample_size(value, "not an integer"));
    }
    validate_size(value as i128)
}

fn validate_size(value: i128) -> Result<u32> {
    if value < 1 {
        return Err(GrimError::invalid_sample_size(
            value,
            "sample size must be at least 1",
        ));
    }
    u32::try_from(value)
        .map_err(|_| GrimError::invalid_sample_size(value, "sample size too large"))
}
