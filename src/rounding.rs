//! Rounding rules for reconstructed candidate means.
//!
//! Rounding happens on scaled integers: a candidate mean is rounded to the
//! reported scale by dividing `sum * 10^scale` by the group size under one of
//! these rules, never by manipulating binary floats. `Up`, `Down`, and `Even`
//! round to nearest and differ only on exact halves; the remaining rules are
//! directed.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    /// Round to nearest, halves away toward positive infinity
    Up,
    /// Round to nearest, halves toward negative infinity
    Down,
    /// Round to nearest, halves to the even neighbor (banker's rounding)
    #[default]
    Even,
    /// Always round toward positive infinity
    Ceiling,
    /// Always round toward negative infinity
    Floor,
    /// Always round toward zero
    Trunc,
    /// Always round away from zero, integral magnitudes included
    AntiTrunc,
}

impl Rounding {
    /// Round `num / den` to an integer under this rule. `den` must be
    /// positive; `num` may be negative.
    pub fn div_round(&self, num: i128, den: i128) -> i128 {
        debug_assert!(den > 0);
        let quotient = num.div_euclid(den);
        let remainder = num.rem_euclid(den);

        if let Rounding::AntiTrunc = self {
            // truncate the magnitude and step outward, even when the
            // division is exact
            let magnitude = num.abs() / den + 1;
            return if num < 0 { -magnitude } else { magnitude };
        }

        if remainder == 0 {
            return quotient;
        }

        match self {
            Rounding::Ceiling => quotient + 1,
            Rounding::Floor => quotient,
            Rounding::Trunc => {
                if num < 0 {
                    quotient + 1
                } else {
                    quotient
                }
            }
            Rounding::Up | Rounding::Down | Rounding::Even => {
                // remainder vs den - remainder avoids doubling the remainder
                let below = den - remainder;
                if remainder < below {
                    quotient
                } else if remainder > below {
                    quotient + 1
                } else {
                    match self {
                        Rounding::Up => quotient + 1,
                        Rounding::Down => quotient,
                        _ => {
                            if quotient.rem_euclid(2) == 0 {
                                quotient
                            } else {
                                quotient + 1
                            }
                        }
                    }
                }
            }
            Rounding::AntiTrunc => unreachable!("handled above"),
        }
    }
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rounding::Up => "up",
            Rounding::Down => "down",
            Rounding::Even => "even",
            Rounding::Ceiling => "ceiling",
            Rounding::Floor => "floor",
            Rounding::Trunc => "trunc",
            Rounding::AntiTrunc => "anti-trunc",
        };
        write!(f, "{name}")
    }
}
