//! Tests for the batch driver and the row adapter


use polars::prelude::*;

/// Twelve reported pig-weight means with a leading label column, so the
/// sample sizes sit at index 1 and the means at index 2.
pub fn pig_weights() -> DataFrame {
    df!(
        "study" => [
            "S01", "S02", "S03", "S04", "S05", "S06",
            "S07", "S08", "S09", "S10", "S11", "S12",
        ],
        "n" => [32i64, 25, 29, 24, 27, 28, 29, 26, 27, 31, 25, 28],
        "x" => [
            "7.22", "4.74", "5.23", "2.57", "6.77", "2.68",
            "7.01", "7.38", "3.14", "6.89", "5.00", "0.24",
        ],
    )
    .unwrap()
}

pub const PIG_WEIGHTS_EXPECTED: [bool; 12] = [
    true, false, false, false, false, true, false, true, false, false, true, false,
];

/// Six reported percentages over groups of 150, all consistent when read as
/// raw means.
pub fn percent_study() -> DataFrame {
    df!(
        "x" => ["67.4", "54.2", "54.0", "69.8", "68.1", "55.4"],
        "n" => vec![150i64; 6],
    )
    .unwrap()
}

pub const PERCENT_STUDY_EXPECTED: [bool; 6] = [false, false, true, false, false, false];
