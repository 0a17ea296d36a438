//! Entropy estimation
//!
//! Combines the charset profile and the detected pattern penalties into a
//! single adjusted bit-entropy figure, plus the exact combinatorial
//! password-space size. The space is computed as an arbitrary-precision
//! integer, never by exponentiating the float entropy: the formatted
//! magnitude downstream must be exact.

use num_bigint::BigUint;

use crate::charset::CharsetProfile;
use crate::patterns::PatternMatch;

/// Entropy figures for one password
#[derive(Debug, Clone, PartialEq)]
pub struct EntropyEstimate {
    /// `length x log2(alphabet)` before any penalty
    pub baseline_bits: f64,

    /// Total penalty after per-position de-duplication
    pub penalty_bits: f64,

    /// Baseline minus penalty, floored at 0
    pub adjusted_bits: f64,

    /// Exact `alphabet_size ^ length`
    pub password_space: BigUint,
}

pub struct EntropyEstimator;

impl EntropyEstimator {
    pub fn estimate(
        profile: &CharsetProfile,
        length: usize,
        matches: &[PatternMatch],
    ) -> EntropyEstimate {
        let baseline_bits = length as f64 * profile.alphabet_bits();
        let password_space = BigUint::from(profile.alphabet_size).pow(length as u32);
        let penalty_bits = aggregate_penalty(length, matches).min(baseline_bits);
        let adjusted_bits = (baseline_bits - penalty_bits).max(0.0);

        EntropyEstimate {
            baseline_bits,
            penalty_bits,
            adjusted_bits,
            password_space,
        }
    }
}

/// Reduce overlapping match penalties to one scalar. Each match spreads its
/// penalty evenly over its span; every character position keeps only the
/// largest per-character penalty claimed for it, so two patterns flagging
/// the same weak substring never double-penalize it.
fn aggregate_penalty(length: usize, matches: &[PatternMatch]) -> f64 {
    let mut per_position = vec![0.0f64; length];
    for m in matches {
        if m.length == 0 {
            continue;
        }
        let per_char = m.penalty_bits / m.length as f64;
        for position in m.start..m.end().min(length) {
            per_position[position] = per_position[position].max(per_char);
        }
    }
    per_position.iter().sum()
}
