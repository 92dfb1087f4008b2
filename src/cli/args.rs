//! Command-line argument definitions for the GRIM checker
//!
//! Defines the CLI interface using the clap derive API: a `scalar` command
//! for one-off checks and a `map` command for CSV batch runs.

use crate::constants::{DEFAULT_ITEMS, log_level_for_verbosity};
use crate::error::{GrimError, Result};
use crate::models::ColumnRef;
use crate::rounding::Rounding;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the GRIM consistency checker
///
/// Tests whether reported sample means are mathematically achievable given
/// their sample sizes and disclosed decimal precision.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "grim-checker",
    version,
    about = "Check reported means for GRIM consistency",
    long_about = "Tests whether reported sample means are mathematically achievable given \
                  their sample sizes and the number of decimal places disclosed. A mean over \
                  n integer-valued observations can only take values k/n; values that no k \
                  reproduces at the disclosed precision are flagged as inconsistent."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the GRIM checker
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check a single reported mean against a sample size
    Scalar(ScalarArgs),
    /// Check every row of a CSV file of reported means
    Map(MapArgs),
}

/// Shared check configuration flags
#[derive(Debug, Clone, Parser)]
pub struct CheckFlags {
    /// Treat reported values as percentages on a 0-100 scale
    ///
    /// Values are divided by 100 before reconstruction, and the effective
    /// precision gains two decimal places.
    #[arg(long = "percent", help = "Treat reported values as percentages")]
    pub percent: bool,

    /// Number of scale items averaged into each reported mean
    #[arg(
        long = "items",
        value_name = "COUNT",
        default_value_t = DEFAULT_ITEMS,
        help = "Number of scale items behind each mean"
    )]
    pub items: u32,

    /// Override for the number of disclosed decimal places
    ///
    /// When omitted, precision is taken from the literal input. Rejected if
    /// it would drop significant digits.
    #[arg(
        long = "decimal-places",
        value_name = "COUNT",
        help = "Override the inferred decimal places"
    )]
    pub decimal_places: Option<u32>,

    /// Rounding rule assumed for the reported values
    #[arg(
        long = "rounding",
        value_enum,
        default_value_t = Rounding::Even,
        help = "Rounding rule assumed for reported values"
    )]
    pub rounding: Rounding,

    /// Suppress the trailing-zero warning for numeric input
    #[arg(
        long = "silence-numeric-warning",
        help = "Suppress the numeric-input precision warning"
    )]
    pub silence_numeric_warning: bool,
}

/// Arguments for the scalar command (single check)
#[derive(Debug, Clone, Parser)]
pub struct ScalarArgs {
    /// Reported mean, as printed in the source
    ///
    /// Pass the value as text ("5.20", not 5.2) to preserve trailing zeros.
    #[arg(value_name = "VALUE", help = "Reported mean as printed")]
    pub value: String,

    /// Reported sample size (must be at least 1)
    #[arg(value_name = "N", help = "Reported sample size")]
    pub n: u32,

    #[command(flatten)]
    pub check: CheckFlags,

    /// Show the rounded candidate means next to the verdict
    #[arg(long = "show-rec", help = "Show reconstructed candidate means")]
    pub show_rec: bool,

    /// Fail with an error on malformed input instead of reporting
    /// inconsistent
    #[arg(long = "strict", help = "Treat malformed input as an error")]
    pub strict: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the map command (CSV batch run)
#[derive(Debug, Clone, Parser)]
pub struct MapArgs {
    /// Input CSV file of reported means
    ///
    /// Cells are read as text so that trailing zeros survive; the file needs
    /// a header row when columns are selected by name.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input CSV file"
    )]
    pub input: PathBuf,

    /// Column holding the reported means (0-based index or name)
    #[arg(
        short = 'x',
        long = "x-col",
        value_name = "SEL",
        help = "Means column, 0-based index or name"
    )]
    pub x_col: String,

    /// Column holding the sample sizes (0-based index or name)
    #[arg(
        short = 'n',
        long = "n-col",
        value_name = "SEL",
        help = "Sample-size column, 0-based index or name"
    )]
    pub n_col: String,

    #[command(flatten)]
    pub check: CheckFlags,

    /// Output format for the row report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Human,
    /// JSON for scripting
    Json,
    /// CSV for data analysis
    Csv,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ScalarArgs {
    pub fn get_log_level(&self) -> &'static str {
        log_level_for_verbosity(self.verbose, false)
    }
}

impl MapArgs {
    /// Validate the map command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(GrimError::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        if self.input.is_dir() {
            return Err(GrimError::configuration(format!(
                "Input path is a directory: {}",
                self.input.display()
            )));
        }
        Ok(())
    }

    /// Means column selector: numeric tokens are 0-based positions
    pub fn mean_column(&self) -> ColumnRef {
        parse_column_ref(&self.x_col)
    }

    /// Sample-size column selector: numeric tokens are 0-based positions
    pub fn size_column(&self) -> ColumnRef {
        parse_column_ref(&self.n_col)
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level_for_verbosity(self.verbose, self.quiet)
    }

    pub fn show_report(&self) -> bool {
        !self.quiet || self.format != OutputFormat::Human
    }
}

fn parse_column_ref(selector: &str) -> ColumnRef {
    match selector.trim().parse::<usize>() {
        Ok(index) => ColumnRef::Index(index),
        Err(_) => ColumnRef::Name(selector.trim().to_string()),
    }
}
