//! End-to-end tests: CSV fixtures through loading, mapping, and diagnostics

use grim_checker::{CheckOptions, DiagnosticKind, Warning, grim_map, grim_scalar};
use polars::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const PIG_WEIGHTS_CSV: &str = "\
study,n,x
S01,32,7.22
S02,25,4.74
S03,29,5.23
S04,24,2.57
S05,27,6.77
S06,28,2.68
S07,29,7.01
S08,26,7.38
S09,27,3.14
S10,31,6.89
S11,25,5.00
S12,28,0.24
";

const PERCENT_STUDY_CSV: &str = "\
x,n
67.4,150
54.2,150
54.0,150
69.8,150
68.1,150
55.4,150
";

const PIG_WEIGHTS_EXPECTED: [bool; 12] = [
    true, false, false, false, false, true, false, true, false, false, true, false,
];

fn write_fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Read a fixture with every column as text, the precision-preserving path
/// the CLI uses.
fn load_as_text(file: &NamedTempFile) -> DataFrame {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(file.path().to_path_buf()))
        .unwrap()
        .finish()
        .unwrap()
}

/// Read a fixture with dtype inference, the lossy numeric path.
fn load_with_inference(file: &NamedTempFile) -> DataFrame {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(file.path().to_path_buf()))
        .unwrap()
        .finish()
        .unwrap()
}

#[test]
fn pig_weights_csv_by_index() {
    let file = write_fixture(PIG_WEIGHTS_CSV);
    let df = load_as_text(&file);

    // n sits at physical index 1, the means at index 2
    let result = grim_map(&df, 2, 1, &CheckOptions::default()).unwrap();
    assert_eq!(result.consistent, PIG_WEIGHTS_EXPECTED);
    assert!(result.diagnostics.iter().all(Option::is_none));
}

#[test]
fn pig_weights_csv_by_name() {
    let file = write_fixture(PIG_WEIGHTS_CSV);
    let df = load_as_text(&file);

    let result = grim_map(&df, "x", "n", &CheckOptions::default()).unwrap();
    assert_eq!(result.consistent, PIG_WEIGHTS_EXPECTED);
}

#[test]
fn pig_weights_csv_percent_mode_all_fail() {
    let file = write_fixture(PIG_WEIGHTS_CSV);
    let df = load_as_text(&file);

    let result = grim_map(&df, "x", "n", &CheckOptions::default().with_percent(true)).unwrap();
    assert_eq!(result.consistent, vec![false; 12]);
}

#[test]
fn percent_study_csv_both_modes() {
    let file = write_fixture(PERCENT_STUDY_CSV);
    let df = load_as_text(&file);

    let plain = grim_map(&df, "x", "n", &CheckOptions::default()).unwrap();
    assert_eq!(plain.consistent, vec![true; 6]);

    let percent = grim_map(&df, "x", "n", &CheckOptions::default().with_percent(true)).unwrap();
    assert_eq!(
        percent.consistent,
        vec![false, false, true, false, false, false]
    );
}

#[test]
fn inferred_dtypes_warn_but_agree_on_these_values() {
    // none of the fixture means ends in a fractional zero that inference
    // would silently upgrade into a different verdict
    let file = write_fixture(PIG_WEIGHTS_CSV);
    let df = load_with_inference(&file);

    let result = grim_map(&df, "x", "n", &CheckOptions::default()).unwrap();
    assert_eq!(result.consistent, PIG_WEIGHTS_EXPECTED);

    for diagnostic in result.diagnostics.iter().map(|d| d.as_ref().unwrap()) {
        assert_eq!(
            diagnostic.kind,
            DiagnosticKind::Warning(Warning::NumericPrecisionLoss)
        );
    }

    let silenced = grim_map(
        &df,
        "x",
        "n",
        &CheckOptions::default().with_silence_numeric_warning(true),
    )
    .unwrap();
    assert_eq!(silenced.consistent, PIG_WEIGHTS_EXPECTED);
    assert!(silenced.diagnostics.iter().all(Option::is_none));
}

#[test]
fn header_only_csv_yields_empty_outputs() {
    let file = write_fixture("x,n\n");
    let df = load_as_text(&file);

    let result = grim_map(&df, "x", "n", &CheckOptions::default()).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.consistent.len(), 0);
    assert_eq!(result.diagnostics.len(), 0);
}

#[test]
fn mixed_quality_csv_fails_soft() {
    let file = write_fixture(
        "x,n\n\
         7.22,32\n\
         not-a-mean,25\n\
         5.00,zero\n\
         5.19,40\n",
    );
    let df = load_as_text(&file);

    let result = grim_map(&df, "x", "n", &CheckOptions::default()).unwrap();
    assert_eq!(result.consistent, vec![true, false, false, false]);
    assert!(result.diagnostics[1].as_ref().unwrap().is_error());
    assert!(result.diagnostics[2].as_ref().unwrap().is_error());
    assert!(result.diagnostics[3].is_none());
}

#[test]
fn map_matches_scalar_row_by_row() {
    let file = write_fixture(PIG_WEIGHTS_CSV);
    let df = load_as_text(&file);
    let options = CheckOptions::default();

    let result = grim_map(&df, "x", "n", &options).unwrap();
    let means = ["7.22", "4.74", "5.23", "2.57", "6.77", "2.68", "7.01", "7.38", "3.14", "6.89",
        "5.00", "0.24"];
    let sizes = [32, 25, 29, 24, 27, 28, 29, 26, 27, 31, 25, 28];

    for ((mean, n), expected) in means.iter().zip(sizes).zip(&result.consistent) {
        assert_eq!(grim_scalar(*mean, n, &options), *expected);
    }
}

#[test]
fn repeated_csv_runs_are_identical() {
    let file = write_fixture(PERCENT_STUDY_CSV);
    let df = load_as_text(&file);
    let options = CheckOptions::default().with_percent(true);

    let first = grim_map(&df, "x", "n", &options).unwrap();
    let second = grim_map(&df, "x", "n", &options).unwrap();
    assert_eq!(first, second);
}
