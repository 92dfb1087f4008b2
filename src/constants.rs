//! Application constants for the GRIM checker
//!
//! Shared defaults and limits used by the decimal parser, the map driver,
//! and the CLI.

/// Maximum number of decimal places accepted for a reported value.
///
/// All reconstruction arithmetic runs in i128; this bound keeps every
/// intermediate product exactly representable. Published summary statistics
/// rarely disclose more than 4-6 decimal places.
pub const MAX_SCALE: u32 = 16;

/// Extra decimal places implied by percent mode.
///
/// A percentage disclosed to d decimal places pins the underlying proportion
/// to d + 2 places.
pub const PERCENT_SCALE_SHIFT: u32 = 2;

/// Row count at or above which the map driver switches to the rayon
/// parallel per-row loop.
pub const PAR_ROW_THRESHOLD: usize = 4096;

/// Default number of scale items contributing to each reported mean.
pub const DEFAULT_ITEMS: u32 = 1;

// =============================================================================
// CLI defaults
// =============================================================================

pub const LOG_LEVEL_QUIET: &str = "error";
pub const LOG_LEVEL_DEFAULT: &str = "warn";

/// Map `-v` counts and the `-q` flag onto a tracing filter directive
pub fn log_level_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        LOG_LEVEL_QUIET
    } else {
        match verbose {
            0 => LOG_LEVEL_DEFAULT,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ladder() {
        assert_eq!(log_level_for_verbosity(0, false), "warn");
        assert_eq!(log_level_for_verbosity(1, false), "info");
        assert_eq!(log_level_for_verbosity(2, false), "debug");
        assert_eq!(log_level_for_verbosity(5, false), "trace");
        assert_eq!(log_level_for_verbosity(3, true), "error");
    }
}
