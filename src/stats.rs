//! Analytic companions to the consistency check.
//!
//! For a mean disclosed to `d` decimal places over a group of size `g`,
//! only `g` of the `10^d` representable values in each unit interval are
//! achievable. These helpers quantify that gap without enumerating
//! candidates.

use crate::constants::PERCENT_SCALE_SHIFT;
use crate::decimal::DecimalNumber;
use crate::error::Result;

/// Probability that a random mean with this value's precision is
/// GRIM-inconsistent, clamped to zero once the group outgrows the
/// precision.
pub fn grim_probability(x: &str, n: u32, items: u32, percent: bool) -> Result<f64> {
    Ok(grim_ratio(x, n, items, percent)?.max(0.0))
}

/// Proportion of representable values that are unachievable.
///
/// Unlike [`grim_probability`] this goes negative when the group size
/// exceeds the precision, which makes it useful as a granularity measure.
pub fn grim_ratio(x: &str, n: u32, items: u32, percent: bool) -> Result<f64> {
    let parsed = DecimalNumber::parse_text(x)?;
    let digits = if percent {
        parsed.scale() + PERCENT_SCALE_SHIFT
    } else {
        parsed.scale()
    };

    let p10 = 10f64.powi(digits as i32);
    Ok((p10 - f64::from(n) * f64::from(items)) / p10)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn grim_probability_percent() {
        let val = grim_probability("8.2", 6, 1, true).unwrap();
        assert_eq!(val, 0.994)
    }

    #[test]
    pub fn grim_probability_single_digit() {
        let val = grim_probability("6.7", 9, 1, false).unwrap();
        assert_eq!(val, 0.1)
    }

    #[test]
    pub fn grim_probability_with_items() {
        let val = grim_probability("3.333", 3, 3, false).unwrap();
        assert_eq!(val, 0.991)
    }

    #[test]
    pub fn grim_probability_clamps_at_zero() {
        let val = grim_probability("60.7", 9, 7, false).unwrap();
        assert_eq!(val, 0.0)
    }

    #[test]
    pub fn grim_ratio_goes_negative() {
        let val = grim_ratio("60.7", 9, 7, false).unwrap();
        assert_eq!(val, -5.3)
    }

    #[test]
    pub fn grim_ratio_matches_probability_when_positive() {
        let ratio = grim_ratio("8.2", 6, 1, true).unwrap();
        assert_eq!(ratio, 0.994)
    }

    #[test]
    pub fn malformed_value_is_an_error() {
        assert!(grim_probability("abc", 9, 1, false).is_err());
    }
}
