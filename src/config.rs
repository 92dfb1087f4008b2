//! Configuration for GRIM checks.
//!
//! A single options record covers both the scalar check and the batch
//! driver. All fields have conservative defaults; the builder methods exist
//! so call sites read as a sentence.

use crate::constants::DEFAULT_ITEMS;
use crate::rounding::Rounding;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    /// Interpret the reported value as a percentage on a 0-100 scale.
    ///
    /// The value is divided by 100 before reconstruction and the effective
    /// precision gains two decimal places.
    pub percent: bool,

    /// Number of scale items averaged into each reported mean.
    ///
    /// A mean over `n` respondents answering `items` questions is granular
    /// at `1 / (n * items)`.
    pub items: u32,

    /// Override for the number of disclosed decimal places.
    ///
    /// When absent, precision is taken from the literal input.
    pub decimal_places: Option<u32>,

    /// Rounding rule assumed for the reported value.
    pub rounding: Rounding,

    /// Suppress the trailing-zero warning for numeric (non-text) inputs.
    ///
    /// Never changes the boolean result, only whether the diagnostic is
    /// emitted.
    pub silence_numeric_warning: bool,

    /// Include the rounded candidate means in scalar outcomes.
    pub show_rec: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            percent: false,
            items: DEFAULT_ITEMS,
            decimal_places: None,
            rounding: Rounding::default(),
            silence_numeric_warning: false,
            show_rec: false,
        }
    }
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_percent(mut self, percent: bool) -> Self {
        self.percent = percent;
        self
    }

    pub fn with_items(mut self, items: u32) -> Self {
        self.items = items;
        self
    }

    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = Some(places);
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_silence_numeric_warning(mut self, silence: bool) -> Self {
        self.silence_numeric_warning = silence;
        self
    }

    pub fn with_show_rec(mut self, show_rec: bool) -> Self {
        self.show_rec = show_rec;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let options = CheckOptions::default();
        assert!(!options.percent);
        assert_eq!(options.items, 1);
        assert_eq!(options.decimal_places, None);
        assert_eq!(options.rounding, Rounding::Even);
        assert!(!options.silence_numeric_warning);
        assert!(!options.show_rec);
    }

    #[test]
    fn builders_compose() {
        let options = CheckOptions::new()
            .with_percent(true)
            .with_items(3)
            .with_decimal_places(2)
            .with_rounding(Rounding::Up)
            .with_silence_numeric_warning(true);

        assert!(options.percent);
        assert_eq!(options.items, 3);
        assert_eq!(options.decimal_places, Some(2));
        assert_eq!(options.rounding, Rounding::Up);
        assert!(options.silence_numeric_warning);
    }
}
