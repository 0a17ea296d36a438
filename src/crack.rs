//! Crack-time estimation and formatting
//!
//! Converts adjusted entropy into estimated seconds-to-crack for a given
//! attacker throughput, and renders durations and password-space magnitudes
//! for humans. The effective search space is `2^entropy`, so pattern
//! penalties shrink it the way a pattern-aware attacker would. Arithmetic
//! runs in the log domain: multi-hundred-bit entropies overflow `f64`
//! seconds long before they stop being meaningful.

use num_bigint::BigUint;

use crate::constants::{SECONDS_PER_YEAR, UNCRACKABLE_YEARS};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const CENTURY: f64 = 100.0 * SECONDS_PER_YEAR;

/// Seconds-to-crack plus its human rendering
#[derive(Debug, Clone, PartialEq)]
pub struct CrackEstimate {
    /// Raw seconds, saturating at `f64::MAX` for astronomically large values
    pub seconds: f64,
    pub formatted: String,
}

pub struct CrackTimeEstimator;

impl CrackTimeEstimator {
    pub fn estimate(entropy_bits: f64, guesses_per_second: f64) -> CrackEstimate {
        let log10_seconds =
            entropy_bits * std::f64::consts::LOG10_2 - guesses_per_second.log10();
        let seconds = if log10_seconds > 300.0 {
            f64::MAX
        } else {
            10f64.powf(log10_seconds)
        };
        CrackEstimate {
            seconds,
            formatted: format_duration(seconds),
        }
    }
}

/// Render a duration in its largest sensible unit, one to two significant
/// figures. Beyond [`UNCRACKABLE_YEARS`] the numeral stops carrying meaning
/// and a capped label is reported instead.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.001 {
        "instantly".to_string()
    } else if seconds < 1.0 {
        format!("{:.0} milliseconds", seconds * 1_000.0)
    } else if seconds < MINUTE {
        format!("{seconds:.1} seconds")
    } else if seconds < HOUR {
        format!("{:.1} minutes", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{:.1} hours", seconds / HOUR)
    } else if seconds < SECONDS_PER_YEAR {
        format!("{:.1} days", seconds / DAY)
    } else if seconds < CENTURY {
        format!("{:.1} years", seconds / SECONDS_PER_YEAR)
    } else if seconds < 10_000.0 * CENTURY {
        format!("{:.0} centuries", seconds / CENTURY)
    } else {
        let log10_years = seconds.log10() - SECONDS_PER_YEAR.log10();
        if log10_years >= UNCRACKABLE_YEARS.log10() {
            "effectively uncrackable".to_string()
        } else {
            let exponent = log10_years.floor();
            let mantissa = 10f64.powf(log10_years - exponent);
            format!("{mantissa:.1} × 10^{exponent:.0} years")
        }
    }
}

/// Render an exact password-space count as a magnitude string
/// ("3.2 × 10^15"); small counts come back verbatim.
pub fn format_magnitude(value: &BigUint) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    format!(
        "{}.{} × 10^{}",
        &digits[0..1],
        &digits[1..3],
        digits.len() - 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_entropy_takes_longer() {
        let weak = CrackTimeEstimator::estimate(20.0, 1e9);
        let strong = CrackTimeEstimator::estimate(60.0, 1e9);
        assert!(strong.seconds > weak.seconds);
    }

    #[test]
    fn test_faster_attacker_is_faster() {
        let slow = CrackTimeEstimator::estimate(60.0, 1e2);
        let fast = CrackTimeEstimator::estimate(60.0, 1e11);
        assert!(fast.seconds < slow.seconds);
    }

    #[test]
    fn test_zero_entropy_is_instant() {
        let estimate = CrackTimeEstimator::estimate(0.0, 1e9);
        assert_eq!(estimate.formatted, "instantly");
    }

    #[test]
    fn test_huge_entropy_saturates_not_overflows() {
        let estimate = CrackTimeEstimator::estimate(1_500.0, 1e9);
        assert!(estimate.seconds.is_finite());
        assert_eq!(estimate.formatted, "effectively uncrackable");
    }

    #[test]
    fn test_duration_unit_ladder() {
        assert_eq!(format_duration(0.0000001), "instantly");
        assert_eq!(format_duration(0.25), "250 milliseconds");
        assert_eq!(format_duration(30.0), "30.0 seconds");
        assert_eq!(format_duration(120.0), "2.0 minutes");
        assert_eq!(format_duration(7_200.0), "2.0 hours");
        assert_eq!(format_duration(172_800.0), "2.0 days");
        assert_eq!(format_duration(63_072_000.0), "2.0 years");
        assert_eq!(format_duration(2.0 * CENTURY), "2 centuries");
    }

    #[test]
    fn test_duration_scientific_and_cap() {
        let formatted = format_duration(1e13 * SECONDS_PER_YEAR);
        assert!(formatted.contains("10^13"), "got {formatted}");
        assert!(formatted.ends_with("years"));

        assert_eq!(
            format_duration(1e21 * SECONDS_PER_YEAR),
            "effectively uncrackable"
        );
    }

    #[test]
    fn test_128_bits_offline_is_uncrackable() {
        let estimate = CrackTimeEstimator::estimate(128.0, 1e9);
        assert_eq!(estimate.formatted, "effectively uncrackable");
    }

    #[test]
    fn test_magnitude_formatting() {
        assert_eq!(format_magnitude(&BigUint::from(0u32)), "0");
        assert_eq!(format_magnitude(&BigUint::from(999u32)), "999");
        assert_eq!(format_magnitude(&BigUint::from(1_000u32)), "1.00 × 10^3");
        assert_eq!(
            format_magnitude(&BigUint::from(3_217_845u32)),
            "3.21 × 10^6"
        );
        // Exact at sizes floats cannot hold
        let space = BigUint::from(95u32).pow(64);
        let formatted = format_magnitude(&space);
        assert!(formatted.ends_with(&format!("10^{}", space.to_string().len() - 1)));
    }
}
