//! GRIM scalar check: is a reported mean achievable at all?
//!
//! A mean over `g` integer-valued observations can only take values `k / g`.
//! The check reconstructs the two integer sums bracketing
//! `reported * g`, rounds each back to the reported precision under the
//! configured rule, and asks whether either lands exactly on the reported
//! value. Everything runs on scaled integers; no step compares binary
//! floats.

use crate::config::CheckOptions;
use crate::constants::PERCENT_SCALE_SHIFT;
use crate::decimal::{DecimalNumber, ReportedValue, pow10};
use crate::error::{GrimError, Result};
use crate::models::CheckOutcome;
use crate::rounding::Rounding;
use tracing::debug;

/// Check a reported mean against a sample size, failing closed.
///
/// Any input error (unparseable value, zero sample size, precision
/// conflict) yields `false` rather than an error. Use
/// [`grim_scalar_checked`] when hard validation is wanted.
pub fn grim_scalar(x: impl Into<ReportedValue>, n: u32, options: &CheckOptions) -> bool {
    match grim_scalar_checked(x, n, options) {
        Ok(outcome) => outcome.consistent,
        Err(error) => {
            debug!("scalar check failed closed: {error}");
            false
        }
    }
}

/// Strict-mode scalar check: input errors surface as `Err`.
pub fn grim_scalar_checked(
    x: impl Into<ReportedValue>,
    n: u32,
    options: &CheckOptions,
) -> Result<CheckOutcome> {
    let reported = x.into();

    if n == 0 {
        return Err(GrimError::invalid_sample_size(
            n,
            "sample size must be at least 1",
        ));
    }
    if options.items == 0 {
        return Err(GrimError::invalid_sample_size(
            options.items,
            "items must be at least 1",
        ));
    }
    let group = n.checked_mul(options.items).ok_or_else(|| {
        GrimError::invalid_sample_size(
            format!("{n} x {}", options.items),
            "group size exceeds the supported range",
        )
    })? as i128;

    let (parsed, warning) = DecimalNumber::parse(&reported, options.decimal_places)?;
    let effective = if options.percent {
        parsed.shifted(PERCENT_SCALE_SHIFT)
    } else {
        parsed
    };

    let (consistent, candidates) = reconstruct(effective, group, options.rounding, &reported)?;

    debug!(
        "grim scalar: value={reported} group={group} scale={} -> {}",
        effective.scale(),
        if consistent { "consistent" } else { "inconsistent" }
    );

    Ok(CheckOutcome {
        consistent,
        warning: if options.silence_numeric_warning {
            None
        } else {
            warning
        },
        reconstructed: options.show_rec.then_some(candidates),
    })
}

/// Granularity test on an exact decimal.
///
/// The candidate sums are `floor(value * group)` and its successor; when the
/// product is already an integer only that single sum is tested.
fn reconstruct(
    reported: DecimalNumber,
    group: i128,
    rounding: Rounding,
    original: &ReportedValue,
) -> Result<(bool, Vec<DecimalNumber>)> {
    let denom = pow10(reported.scale());
    let overflow =
        || GrimError::not_numeric(original.to_string(), "magnitude too large for exact reconstruction");

    let total = reported.mantissa().checked_mul(group).ok_or_else(overflow)?;
    let floor_sum = total.div_euclid(denom);
    let mut sums = vec![floor_sum];
    if total.rem_euclid(denom) != 0 {
        sums.push(floor_sum + 1);
    }

    let mut consistent = false;
    let mut candidates = Vec::with_capacity(sums.len());
    for sum in sums {
        let scaled = sum.checked_mul(denom).ok_or_else(overflow)?;
        let rounded = rounding.div_round(scaled, group);
        if rounded == reported.mantissa() {
            consistent = true;
        }
        candidates.push(DecimalNumber::new(rounded, reported.scale()));
    }

    Ok((consistent, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Warning;

    fn defaults() -> CheckOptions {
        CheckOptions::default()
    }

    #[test]
    fn known_inconsistent_mean() {
        // no sum of 40 integers averages to 5.19 at two decimal places
        assert!(!grim_scalar("5.19", 40, &defaults()));
    }

    #[test]
    fn known_inconsistent_mean_as_float() {
        assert!(!grim_scalar(5.19, 40, &defaults()));
    }

    #[test]
    fn known_consistent_means() {
        // 231 / 32 = 7.21875 rounds to 7.22
        assert!(grim_scalar("7.22", 32, &defaults()));
        // 125 / 25 is exact
        assert!(grim_scalar("5.00", 25, &defaults()));
        assert!(grim_scalar("2.68", 28, &defaults()));
    }

    #[test]
    fn zero_mean_runs_the_full_reconstruction() {
        assert!(grim_scalar("0.00", 17, &defaults()));
        assert!(!grim_scalar("0.10", 3, &defaults()));
    }

    #[test]
    fn negative_means_are_not_coerced() {
        // -7 / 28 = -0.25 exactly
        assert!(grim_scalar("-0.25", 28, &defaults()));
        assert!(!grim_scalar("-0.24", 28, &defaults()));
    }

    #[test]
    fn single_observation_still_requires_integer_data() {
        assert!(grim_scalar("5.0", 1, &defaults()));
        assert!(grim_scalar("5", 1, &defaults()));
        assert!(!grim_scalar("5.19", 1, &defaults()));
    }

    #[test]
    fn tie_behavior_follows_the_rounding_rule() {
        // 207 / 40 = 5.175, an exact tie at two decimal places
        assert!(grim_scalar("5.17", 40, &defaults().with_rounding(Rounding::Down)));
        assert!(!grim_scalar("5.17", 40, &defaults().with_rounding(Rounding::Even)));
        assert!(!grim_scalar("5.17", 40, &defaults().with_rounding(Rounding::Up)));

        assert!(grim_scalar("5.18", 40, &defaults().with_rounding(Rounding::Up)));
        assert!(grim_scalar("5.18", 40, &defaults().with_rounding(Rounding::Even)));
        assert!(!grim_scalar("5.18", 40, &defaults().with_rounding(Rounding::Down)));
    }

    #[test]
    fn percent_mode_matches_the_predivided_value() {
        for (value, predivided) in [("67.4", "0.674"), ("54.0", "0.540"), ("55.4", "0.554")] {
            let percent = grim_scalar(value, 150, &defaults().with_percent(true));
            let plain = grim_scalar(predivided, 150, &defaults());
            assert_eq!(percent, plain, "percent equivalence failed for {value}");
        }
    }

    #[test]
    fn items_refine_the_granularity() {
        // four answers of summed scale items behind each reported mean
        assert!(grim_scalar("2.25", 2, &defaults().with_items(2)));
        assert!(!grim_scalar("2.25", 2, &defaults()));
    }

    #[test]
    fn malformed_input_fails_closed() {
        assert!(!grim_scalar("5.19b", 40, &defaults()));
        assert!(!grim_scalar("", 40, &defaults()));
        assert!(!grim_scalar(f64::NAN, 40, &defaults()));
    }

    #[test]
    fn strict_mode_surfaces_input_errors() {
        assert!(matches!(
            grim_scalar_checked("5.19b", 40, &defaults()),
            Err(GrimError::NotNumeric { .. })
        ));
        assert!(matches!(
            grim_scalar_checked("5.19", 0, &defaults()),
            Err(GrimError::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            grim_scalar_checked("5.19", 40, &defaults().with_items(0)),
            Err(GrimError::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            grim_scalar_checked("5.19", 40, &defaults().with_decimal_places(1)),
            Err(GrimError::PrecisionMismatch { .. })
        ));
    }

    #[test]
    fn numeric_inputs_warn_unless_silenced() {
        let noisy = grim_scalar_checked(5.19, 40, &defaults()).unwrap();
        assert_eq!(noisy.warning, Some(Warning::NumericPrecisionLoss));

        let silenced =
            grim_scalar_checked(5.19, 40, &defaults().with_silence_numeric_warning(true)).unwrap();
        assert_eq!(silenced.warning, None);

        let text = grim_scalar_checked("5.19", 40, &defaults()).unwrap();
        assert_eq!(text.warning, None);
    }

    #[test]
    fn show_rec_exposes_rounded_candidates() {
        let outcome = grim_scalar_checked("5.19", 40, &defaults().with_show_rec(true)).unwrap();
        let candidates = outcome.reconstructed.unwrap();
        let rendered: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["5.18", "5.20"]);

        let silent = grim_scalar_checked("5.19", 40, &defaults()).unwrap();
        assert_eq!(silent.reconstructed, None);
    }

    #[test]
    fn exact_products_test_a_single_sum() {
        let outcome = grim_scalar_checked("5.00", 25, &defaults().with_show_rec(true)).unwrap();
        assert!(outcome.consistent);
        assert_eq!(outcome.reconstructed.unwrap().len(), 1);
    }
}
