//! Exact decimal representation of reported values.
//!
//! A reported mean like `"5.20"` carries information a binary float cannot:
//! the count of disclosed decimal places. This module parses reported values
//! into an integer mantissa plus scale, so that every later comparison is
//! scaled-integer equality rather than floating-point equality.

use crate::constants::MAX_SCALE;
use crate::error::{GrimError, Result};
use crate::models::Warning;
use regex::Regex;
use std::sync::LazyLock;

/// Plain decimal token: optional sign, digits, at most one separator.
/// Exponent forms and grouping separators are rejected.
static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])?(?:([0-9]+)(?:\.([0-9]*))?|\.([0-9]+))$").expect("valid literal pattern")
});

/// A reported mean as it arrives from the caller.
///
/// Text preserves trailing zeros; a numeric value cannot distinguish `5.2`
/// from `5.20`, which is why the parser attaches a warning to that path.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedValue {
    Text(String),
    Number(f64),
}

impl From<&str> for ReportedValue {
    fn from(text: &str) -> Self {
        ReportedValue::Text(text.to_string())
    }
}

impl From<String> for ReportedValue {
    fn from(text: String) -> Self {
        ReportedValue::Text(text)
    }
}

impl From<f64> for ReportedValue {
    fn from(value: f64) -> Self {
        ReportedValue::Number(value)
    }
}

impl std::fmt::Display for ReportedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportedValue::Text(text) => write!(f, "{text}"),
            ReportedValue::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Exact decimal: `value = mantissa / 10^scale`.
///
/// `scale` is the number of digits after the separator exactly as written,
/// so `"5.20"` is `{ mantissa: 520, scale: 2 }` and compares unequal to
/// `{ mantissa: 52, scale: 1 }` even though both denote 5.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalNumber {
    mantissa: i128,
    scale: u32,
}

impl DecimalNumber {
    pub fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Parse a reported value, applying an optional decimal-place override.
    ///
    /// Returns the exact decimal plus a warning when the input was a numeric
    /// type and its disclosed precision had to be inferred.
    pub fn parse(
        value: &ReportedValue,
        decimal_places: Option<u32>,
    ) -> Result<(Self, Option<Warning>)> {
        let (parsed, warning) = match value {
            ReportedValue::Text(text) => (Self::parse_text(text)?, None),
            ReportedValue::Number(number) => (
                Self::from_f64(*number)?,
                Some(Warning::NumericPrecisionLoss),
            ),
        };

        let parsed = match decimal_places {
            Some(places) => parsed.rescaled(places, &value.to_string())?,
            None => parsed,
        };

        Ok((parsed, warning))
    }

    /// Parse a decimal text token, taking the scale from the literal digits.
    pub fn parse_text(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GrimError::not_numeric(text, "empty value"));
        }

        let captures = DECIMAL_RE.captures(trimmed).ok_or_else(|| {
            GrimError::not_numeric(trimmed, "expected digits with an optional decimal point")
        })?;

        let negative = captures.get(1).is_some_and(|m| m.as_str() == "-");
        let integer = captures.get(2).map_or("", |m| m.as_str());
        let fraction = captures
            .get(3)
            .or_else(|| captures.get(4))
            .map_or("", |m| m.as_str());

        let scale = fraction.len() as u32;
        if scale > MAX_SCALE {
            return Err(GrimError::not_numeric(
                trimmed,
                format!("more than {MAX_SCALE} decimal places cannot be checked exactly"),
            ));
        }

        let digits = format!("{integer}{fraction}");
        let magnitude: i128 = digits.parse().map_err(|_| {
            GrimError::not_numeric(trimmed, "magnitude too large for exact reconstruction")
        })?;

        let mantissa = if negative { -magnitude } else { magnitude };
        Ok(Self { mantissa, scale })
    }

    /// Infer an exact decimal from a float via its shortest decimal
    /// rendering.
    ///
    /// Trailing fractional zeros are unrecoverable here: a source that
    /// disclosed `5.20` arrives as 5.2 and is inferred at scale 1. Callers
    /// surface this through [`Warning::NumericPrecisionLoss`] rather than
    /// silently upgrading precision.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(GrimError::not_numeric(
                value.to_string(),
                "not a finite number",
            ));
        }
        Self::parse_text(&value.to_string())
    }

    /// Re-express this decimal at an explicit scale.
    ///
    /// Widening pads with zeros exactly; narrowing is only allowed when the
    /// dropped digits are zeros.
    pub fn rescaled(self, target_scale: u32, original: &str) -> Result<Self> {
        if target_scale > MAX_SCALE {
            return Err(GrimError::not_numeric(
                original,
                format!("more than {MAX_SCALE} decimal places cannot be checked exactly"),
            ));
        }

        if target_scale >= self.scale {
            let factor = pow10(target_scale - self.scale);
            let mantissa = self.mantissa.checked_mul(factor).ok_or_else(|| {
                GrimError::not_numeric(original, "magnitude too large for exact reconstruction")
            })?;
            return Ok(Self {
                mantissa,
                scale: target_scale,
            });
        }

        let factor = pow10(self.scale - target_scale);
        if self.mantissa % factor != 0 {
            return Err(GrimError::PrecisionMismatch {
                value: original.to_string(),
                requested: target_scale,
                significant: self.significant_fraction_digits(),
            });
        }

        Ok(Self {
            mantissa: self.mantissa / factor,
            scale: target_scale,
        })
    }

    /// Same mantissa read at `extra` additional decimal places, i.e. the
    /// value divided by `10^extra`. Percent mode uses this with a shift of 2.
    pub fn shifted(self, extra: u32) -> Self {
        Self {
            mantissa: self.mantissa,
            scale: self.scale + extra,
        }
    }

    /// Count of fractional digits that are not trailing zeros.
    pub fn significant_fraction_digits(&self) -> u32 {
        let mut magnitude = self.mantissa.unsigned_abs();
        let mut trailing = 0u32;
        while trailing < self.scale && magnitude != 0 && magnitude % 10 == 0 {
            magnitude /= 10;
            trailing += 1;
        }
        if magnitude == 0 {
            0
        } else {
            self.scale - trailing
        }
    }
}

impl std::fmt::Display for DecimalNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();

        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let width = self.scale as usize + 1;
        let padded = if digits.len() < width {
            format!("{}{}", "0".repeat(width - digits.len()), digits)
        } else {
            digits
        };
        let split = padded.len() - self.scale as usize;
        write!(f, "{sign}{}.{}", &padded[..split], &padded[split..])
    }
}

/// 10^scale as i128. Callers keep `scale` within [`MAX_SCALE`] plus the
/// percent shift, so this cannot overflow.
pub(crate) fn pow10(scale: u32) -> i128 {
    10i128.pow(scale)
}
