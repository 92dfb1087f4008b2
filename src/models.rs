//! Core data structures and types for GRIM checking.
//!
//! Defines column selectors, diagnostic records, scalar outcomes, and the
//! batch result container used throughout the library.

use crate::decimal::DecimalNumber;
use serde::{Deserialize, Serialize};

/// Selector for a table column, by 0-based position or by name.
///
/// Positions follow the underlying table's physical column order, so a table
/// whose first column is a row label has its first data column at index 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRef::Index(index) => write!(f, "index {index}"),
            ColumnRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Row-level error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Reported value cannot be read as a decimal number
    NotNumeric,
    /// Sample size is zero, negative, fractional, or unreadable
    InvalidSampleSize,
    /// Requested column does not exist in the table
    MissingColumn,
    /// Explicit decimal-place override conflicts with the literal value
    PrecisionMismatch,
}

/// Non-fatal conditions surfaced alongside a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// The reported value arrived as a numeric type, so trailing fractional
    /// zeros may have been lost before the check ran
    NumericPrecisionLoss,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NumericPrecisionLoss => write!(
                f,
                "reported value is a numeric type; trailing zeros may have been lost, \
                 pass the value as text to preserve its disclosed precision"
            ),
        }
    }
}

/// Severity-tagged content of a row diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Error(ErrorKind),
    Warning(Warning),
}

/// Per-row diagnostic attached to a batch result.
///
/// Created by the row adapter or the scalar checker, owned by the batch
/// output afterwards, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub row_index: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl RowDiagnostic {
    /// Build an error diagnostic from a failed row operation
    pub fn from_error(row_index: usize, error: &crate::error::GrimError) -> Self {
        Self {
            row_index,
            kind: DiagnosticKind::Error(error.kind().unwrap_or(ErrorKind::NotNumeric)),
            message: error.to_string(),
        }
    }

    /// Build a warning diagnostic
    pub fn from_warning(row_index: usize, warning: Warning) -> Self {
        Self {
            row_index,
            kind: DiagnosticKind::Warning(warning),
            message: warning.to_string(),
        }
    }

    /// Whether this diagnostic reports a failed check rather than a caveat
    pub fn is_error(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Error(_))
    }
}

/// Outcome of a single scalar check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether some integer-valued dataset of the stated size reproduces the
    /// reported value at its disclosed precision
    pub consistent: bool,
    /// Non-fatal caveat from decimal parsing, if any
    pub warning: Option<Warning>,
    /// Rounded candidate means, populated when `show_rec` is set
    pub reconstructed: Option<Vec<DecimalNumber>>,
}

/// Batch result: one boolean and one optional diagnostic per input row.
///
/// Both sequences are always exactly as long as the input table, in table
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapResult {
    pub consistent: Vec<bool>,
    pub diagnostics: Vec<Option<RowDiagnostic>>,
}

impl MapResult {
    pub(crate) fn with_capacity(rows: usize) -> Self {
        Self {
            consistent: Vec::with_capacity(rows),
            diagnostics: Vec::with_capacity(rows),
        }
    }

    /// Number of rows covered by this result
    pub fn len(&self) -> usize {
        self.consistent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consistent.is_empty()
    }

    /// Number of rows that passed the check
    pub fn consistent_count(&self) -> usize {
        self.consistent.iter().filter(|&&b| b).count()
    }

    /// Number of rows carrying an error diagnostic
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .flatten()
            .filter(|d| d.is_error())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_ref_conversions() {
        assert_eq!(ColumnRef::from(2), ColumnRef::Index(2));
        assert_eq!(ColumnRef::from("mean"), ColumnRef::Name("mean".to_string()));
        assert_eq!(format!("{}", ColumnRef::Index(3)), "index 3");
        assert_eq!(format!("{}", ColumnRef::from("n")), "n");
    }

    #[test]
    fn test_map_result_counts() {
        let result = MapResult {
            consistent: vec![true, false, true],
            diagnostics: vec![
                None,
                Some(RowDiagnostic {
                    row_index: 1,
                    kind: DiagnosticKind::Error(ErrorKind::NotNumeric),
                    message: "bad".to_string(),
                }),
                Some(RowDiagnostic::from_warning(2, Warning::NumericPrecisionLoss)),
            ],
        };

        assert_eq!(result.len(), 3);
        assert_eq!(result.consistent_count(), 2);
        assert_eq!(result.error_count(), 1);
    }
}
