//! Strength classification and recommendations
//!
//! Maps adjusted entropy to a discrete strength level and a 0-100 score,
//! and derives actionable recommendations from the charset profile, the
//! length, and the detected patterns. The thresholds live here and only
//! here, so the analyze and generate paths can never disagree.

use serde::{Deserialize, Serialize};

use crate::charset::CharsetProfile;
use crate::patterns::{PatternKind, PatternMatch};

/// Entropy thresholds, in bits. A level covers `[its threshold, next)`.
const WEAK_BITS: f64 = 28.0;
const MODERATE_BITS: f64 = 36.0;
const STRONG_BITS: f64 = 60.0;
const VERY_STRONG_BITS: f64 = 128.0;

/// Length below which a longer password is always recommended
const RECOMMENDED_MIN_LENGTH: usize = 12;

/// Discrete strength buckets, ordered weakest to strongest. The serialized
/// strings are part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthLevel {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    #[serde(rename = "Weak")]
    Weak,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Strong")]
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl StrengthLevel {
    /// Human-readable name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Moderate => "Moderate",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }

    /// Whether this level is considered acceptable for protecting anything
    /// that matters
    pub fn is_acceptable(&self) -> bool {
        matches!(self, StrengthLevel::Strong | StrengthLevel::VeryStrong)
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct StrengthClassifier;

impl StrengthClassifier {
    /// Bucket adjusted entropy into a strength level
    pub fn level(entropy_bits: f64) -> StrengthLevel {
        if entropy_bits < WEAK_BITS {
            StrengthLevel::VeryWeak
        } else if entropy_bits < MODERATE_BITS {
            StrengthLevel::Weak
        } else if entropy_bits < STRONG_BITS {
            StrengthLevel::Moderate
        } else if entropy_bits < VERY_STRONG_BITS {
            StrengthLevel::Strong
        } else {
            StrengthLevel::VeryStrong
        }
    }

    /// 0-100 score: a saturating linear map that reaches 100 at the
    /// VeryStrong threshold. Monotonic in entropy and independent of
    /// everything else.
    pub fn percentage(entropy_bits: f64) -> u8 {
        let scaled = (entropy_bits / VERY_STRONG_BITS * 100.0).round();
        scaled.clamp(0.0, 100.0) as u8
    }

    /// Ordered, deduplicated recommendations for improving a password
    pub fn recommend(
        profile: &CharsetProfile,
        length: usize,
        entropy_bits: f64,
        matches: &[PatternMatch],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if length < RECOMMENDED_MIN_LENGTH {
            recommendations.push(format!(
                "Use a longer password (at least {RECOMMENDED_MIN_LENGTH} characters)"
            ));
        }
        if !profile.has_lowercase {
            recommendations.push("Include lowercase letters".to_string());
        }
        if !profile.has_uppercase {
            recommendations.push("Include uppercase letters".to_string());
        }
        if !profile.has_digits {
            recommendations.push("Include numbers".to_string());
        }
        if !profile.has_special {
            recommendations.push("Include special characters".to_string());
        }
        if entropy_bits < STRONG_BITS {
            recommendations
                .push("Consider using a passphrase (multiple random words)".to_string());
        }

        // One recommendation per distinct pattern kind, in order of first
        // appearance
        let mut seen_kinds = Vec::new();
        for m in matches {
            if seen_kinds.contains(&m.kind) {
                continue;
            }
            seen_kinds.push(m.kind);
            recommendations.push(kind_recommendation(m.kind).to_string());
        }

        if recommendations.is_empty() {
            recommendations.push("Your password follows good security practices!".to_string());
        }
        recommendations
    }
}

fn kind_recommendation(kind: PatternKind) -> &'static str {
    match kind {
        PatternKind::Sequential => "Avoid sequential characters (abc, 123)",
        PatternKind::Repeated => "Avoid repeating characters or patterns",
        PatternKind::KeyboardWalk => "Avoid keyboard patterns (qwerty, 1qaz)",
        PatternKind::DictionaryWord => "Avoid common words and passwords",
        PatternKind::DateLike => "Avoid dates and years",
        PatternKind::Leetspeak => {
            "Character substitutions like @ for a are easy for attackers to reverse"
        }
    }
}
