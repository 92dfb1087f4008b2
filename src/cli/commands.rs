//! Command implementations for the GRIM checker CLI
//!
//! Contains the command execution logic, CSV loading, and report rendering
//! for the CLI interface. CSV files are read with every column as text so
//! that the trailing zeros of reported means survive loading.

use crate::checker::grim_scalar_checked;
use crate::cli::args::{Args, CheckFlags, Commands, MapArgs, OutputFormat, ScalarArgs};
use crate::config::CheckOptions;
use crate::error::Result;
use crate::map::{adapter, grim_map};
use crate::models::{MapResult, RowDiagnostic};
use colored::Colorize;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Main command runner for the GRIM checker
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Scalar(scalar_args) => run_scalar(scalar_args),
        Commands::Map(map_args) => run_map(map_args),
    }
}

/// Install the tracing subscriber, honoring RUST_LOG when set
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn check_options(flags: &CheckFlags) -> CheckOptions {
    let mut options = CheckOptions::new()
        .with_percent(flags.percent)
        .with_items(flags.items)
        .with_rounding(flags.rounding)
        .with_silence_numeric_warning(flags.silence_numeric_warning);
    options.decimal_places = flags.decimal_places;
    options
}

/// Run a single scalar check and print the verdict
fn run_scalar(args: ScalarArgs) -> Result<()> {
    init_logging(args.get_log_level());

    let options = check_options(&args.check).with_show_rec(args.show_rec);

    let outcome = match grim_scalar_checked(args.value.as_str(), args.n, &options) {
        Ok(outcome) => outcome,
        Err(error) if !args.strict => {
            // fail closed: malformed input reads as inconsistent
            warn!("{error}");
            println!(
                "{} with n = {} -> {}",
                args.value.bold(),
                args.n,
                "INCONSISTENT".bright_red().bold()
            );
            println!("  {}", format!("input not checkable: {error}").dimmed());
            return Ok(());
        }
        Err(error) => return Err(error),
    };

    let verdict = if outcome.consistent {
        "consistent".bright_green().bold()
    } else {
        "INCONSISTENT".bright_red().bold()
    };
    println!("{} with n = {} -> {}", args.value.bold(), args.n, verdict);

    if let Some(warning) = outcome.warning {
        println!("  {}", format!("warning: {warning}").bright_yellow());
    }
    if let Some(candidates) = outcome.reconstructed {
        let rendered: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
        println!(
            "  {} {}",
            "nearest achievable:".bright_cyan(),
            rendered.join(", ")
        );
    }

    Ok(())
}

/// Run the batch check over a CSV file and render the report
fn run_map(args: MapArgs) -> Result<()> {
    args.validate()?;
    init_logging(args.get_log_level());

    let options = check_options(&args.check);
    let df = load_csv(&args.input)?;
    let result = grim_map(&df, args.mean_column(), args.size_column(), &options)?;

    if !args.show_report() {
        return Ok(());
    }

    let report = build_report(&args, &df, &result)?;
    match args.format {
        OutputFormat::Human => render_human(&args, &report),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serialization cannot fail")
        ),
        OutputFormat::Csv => render_csv(&report),
    }

    Ok(())
}

/// Read a CSV with every column as text, so reported means keep their
/// disclosed precision.
fn load_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

#[derive(Debug, Serialize)]
struct MapReport {
    input: String,
    rows: Vec<RowReport>,
    summary: ReportSummary,
}

#[derive(Debug, Serialize)]
struct RowReport {
    row: usize,
    mean: String,
    n: String,
    consistent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<RowDiagnostic>,
}

#[derive(Debug, Serialize)]
struct ReportSummary {
    rows: usize,
    consistent: usize,
    row_errors: usize,
}

fn build_report(args: &MapArgs, df: &DataFrame, result: &MapResult) -> Result<MapReport> {
    let source = adapter::resolve(df, &args.mean_column(), &args.size_column())?;

    let rows = (0..result.len())
        .map(|row| RowReport {
            row,
            mean: cell_text(source.means, row),
            n: cell_text(source.sizes, row),
            consistent: result.consistent[row],
            diagnostic: result.diagnostics[row].clone(),
        })
        .collect();

    Ok(MapReport {
        input: args.input.display().to_string(),
        rows,
        summary: ReportSummary {
            rows: result.len(),
            consistent: result.consistent_count(),
            row_errors: result.error_count(),
        },
    })
}

fn cell_text(column: &Column, row_index: usize) -> String {
    match column.get(row_index) {
        Ok(AnyValue::String(text)) => text.to_string(),
        Ok(AnyValue::StringOwned(text)) => text.to_string(),
        Ok(AnyValue::Null) => String::new(),
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn render_human(args: &MapArgs, report: &MapReport) {
    println!(
        "{} {} ({} rows)",
        "GRIM check:".bright_green().bold(),
        report.input,
        report.summary.rows
    );
    if args.check.percent {
        println!("  {}", "percent mode".bright_cyan());
    }
    println!();
    println!("  {:>5}  {:>12}  {:>8}  result", "row", "mean", "n");

    for row in &report.rows {
        let verdict = if row.consistent {
            "consistent".bright_green()
        } else {
            "INCONSISTENT".bright_red()
        };
        println!(
            "  {:>5}  {:>12}  {:>8}  {}",
            row.row, row.mean, row.n, verdict
        );
        if let Some(diagnostic) = &row.diagnostic {
            println!("         {}", diagnostic.message.bright_yellow());
        }
    }

    println!();
    println!(
        "{} {}/{} consistent, {} row errors",
        "Summary:".bright_cyan().bold(),
        report.summary.consistent,
        report.summary.rows,
        report.summary.row_errors
    );
}

fn render_csv(report: &MapReport) {
    println!("row,mean,n,consistent,diagnostic");
    for row in &report.rows {
        let diagnostic = row
            .diagnostic
            .as_ref()
            .map(|d| d.message.clone())
            .unwrap_or_default();
        println!(
            "{},{},{},{},{}",
            row.row,
            csv_field(&row.mean),
            csv_field(&row.n),
            row.consistent,
            csv_field(&diagnostic)
        );
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
