//! Result and request models
//!
//! The data structures the three engine operations hand to the presentation
//! and transport layers. Field names and enum strings are part of the wire
//! contract: consumers switch on the exact serialized forms, so renames here
//! are breaking changes.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize, Serializer};

use crate::strength::StrengthLevel;

/// Serialize an exact password-space count as its full decimal string;
/// JSON numbers cannot hold it
fn serialize_biguint<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Everything `analyze` reports about one password
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Password length in characters
    pub length: usize,

    /// Effective alphabet size the password draws from
    pub charset_size: usize,

    /// Exact `charset_size ^ length`
    #[serde(serialize_with = "serialize_biguint")]
    pub password_space: BigUint,

    /// Human-formatted magnitude, e.g. "3.2 × 10^15"
    pub password_space_formatted: String,

    /// Adjusted entropy in bits
    pub entropy: f64,

    /// Discrete strength bucket
    pub strength_level: StrengthLevel,

    /// 0-100 score derived from entropy alone
    pub strength_percentage: u8,

    /// Estimated seconds to crack at the reference throughput
    pub seconds_to_crack: f64,

    /// Human-formatted crack time
    pub time_to_crack_formatted: String,

    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_numbers: bool,
    pub has_special: bool,

    /// Human-readable descriptions of every detected weakness, in position
    /// order; empty when the password is pattern-free
    pub detected_patterns: Vec<String>,

    /// Actionable improvement suggestions, ordered and deduplicated
    pub recommendations: Vec<String>,
}

/// Composition constraints for `generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Requested length in characters, bounded by the engine configuration
    #[serde(default = "default_length")]
    pub length: usize,

    #[serde(default = "default_enabled")]
    pub lowercase: bool,

    #[serde(default = "default_enabled")]
    pub uppercase: bool,

    #[serde(default = "default_enabled")]
    pub numbers: bool,

    #[serde(default = "default_enabled")]
    pub special: bool,
}

fn default_length() -> usize {
    crate::constants::DEFAULT_GENERATED_LENGTH
}

fn default_enabled() -> bool {
    true
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            lowercase: true,
            uppercase: true,
            numbers: true,
            special: true,
        }
    }
}

impl GenerationConfig {
    /// Number of character classes requested
    pub fn selected_classes(&self) -> usize {
        [self.lowercase, self.uppercase, self.numbers, self.special]
            .iter()
            .filter(|&&enabled| enabled)
            .count()
    }
}

/// A freshly generated password with its self-assessment. Patterns and
/// recommendations are deliberately absent: the output is drawn
/// independently of natural-language structure, so it is not dictionary
/// scanned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPassword {
    pub password: String,
    pub length: usize,
    pub charset_size: usize,
    pub entropy: f64,
    pub strength_level: StrengthLevel,
    pub strength_percentage: u8,
    pub seconds_to_crack: f64,
    pub time_to_crack_formatted: String,
}

/// One row of the attack-comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Attack profile name
    #[serde(rename = "type")]
    pub profile: String,

    /// The analyzed password, echoed for display
    pub password: String,

    /// Adjusted entropy, identical for every row of one simulation
    pub entropy: f64,

    /// Raw seconds, kept numeric for log-scale charting
    pub time_to_crack: f64,

    pub time_formatted: String,
}
