//! Engine facade
//!
//! [`PasswordEngine`] ties the profiler, pattern detector, entropy
//! estimator, classifier, crack-time estimator, simulator and generator
//! together behind three stateless operations: `analyze`, `generate` and
//! `simulate`. The engine holds only immutable shared state (configuration,
//! lexicon, attack catalog), so one instance can serve concurrent callers.
//!
//! Submitted passwords are never logged or retained; tracing output carries
//! derived metrics only.

use std::sync::Arc;

use tracing::debug;

use crate::attack::{AttackProfile, AttackSimulator};
use crate::charset::CharsetProfiler;
use crate::constants::{MAX_PASSWORD_LENGTH, REFERENCE_GUESSES_PER_SECOND};
use crate::crack::{format_magnitude, CrackTimeEstimator};
use crate::entropy::EntropyEstimator;
use crate::error::{EngineError, EngineResult};
use crate::generator::PasswordGenerator;
use crate::models::{AnalysisResult, GeneratedPassword, GenerationConfig, SimulationResult};
use crate::patterns::{Lexicon, PatternDetector};
use crate::strength::StrengthClassifier;

/// Engine-wide limits and reference points
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Longest password accepted for analysis, simulation or generation
    pub max_password_length: usize,

    /// Attacker throughput used for the headline crack-time estimate
    pub reference_guesses_per_second: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_password_length: MAX_PASSWORD_LENGTH,
            reference_guesses_per_second: REFERENCE_GUESSES_PER_SECOND,
        }
    }
}

/// Shared, thread-safe entry point for all engine operations
pub struct PasswordEngine {
    config: EngineConfig,
    lexicon: Arc<Lexicon>,
    catalog: Arc<Vec<AttackProfile>>,
}

impl PasswordEngine {
    /// Engine with default limits and the built-in lexicon
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            lexicon: Arc::new(Lexicon::builtin()),
            catalog: Arc::new(AttackProfile::catalog()),
        }
    }

    /// Replace the built-in wordlist, e.g. with a site-specific blocklist
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Arc::new(lexicon);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full strength assessment of one password
    pub fn analyze(&self, password: &str) -> EngineResult<AnalysisResult> {
        let length = password.chars().count();
        self.check_length(length)?;

        let profile = CharsetProfiler::profile(password);
        let matches = PatternDetector::new(&self.lexicon).scan(password, profile.alphabet_bits());
        let estimate = EntropyEstimator::estimate(&profile, length, &matches);

        let entropy = round_bits(estimate.adjusted_bits);
        let level = StrengthClassifier::level(entropy);
        let crack =
            CrackTimeEstimator::estimate(entropy, self.config.reference_guesses_per_second);

        debug!(
            length,
            charset_size = profile.alphabet_size,
            entropy,
            patterns = matches.len(),
            level = %level,
            "password analyzed"
        );

        Ok(AnalysisResult {
            length,
            charset_size: profile.alphabet_size,
            password_space_formatted: format_magnitude(&estimate.password_space),
            password_space: estimate.password_space,
            entropy,
            strength_level: level,
            strength_percentage: StrengthClassifier::percentage(entropy),
            seconds_to_crack: crack.seconds,
            time_to_crack_formatted: crack.formatted,
            has_lowercase: profile.has_lowercase,
            has_uppercase: profile.has_uppercase,
            has_numbers: profile.has_digits,
            has_special: profile.has_special,
            detected_patterns: matches.iter().map(|m| m.describe(password)).collect(),
            recommendations: StrengthClassifier::recommend(&profile, length, entropy, &matches),
        })
    }

    /// Generate a password and score it. Generated output is drawn uniformly
    /// at random, so the pattern scan is skipped and the baseline entropy is
    /// the final entropy.
    pub fn generate(&self, config: &GenerationConfig) -> EngineResult<GeneratedPassword> {
        let password = PasswordGenerator::generate(config, self.config.max_password_length)?;
        let length = password.chars().count();

        let profile = CharsetProfiler::profile(&password);
        let estimate = EntropyEstimator::estimate(&profile, length, &[]);

        let entropy = round_bits(estimate.adjusted_bits);
        let level = StrengthClassifier::level(entropy);
        let crack =
            CrackTimeEstimator::estimate(entropy, self.config.reference_guesses_per_second);

        debug!(
            length,
            charset_size = profile.alphabet_size,
            entropy,
            level = %level,
            "password generated"
        );

        Ok(GeneratedPassword {
            password,
            length,
            charset_size: profile.alphabet_size,
            entropy,
            strength_level: level,
            strength_percentage: StrengthClassifier::percentage(entropy),
            seconds_to_crack: crack.seconds,
            time_to_crack_formatted: crack.formatted,
        })
    }

    /// Crack-time table across the attack catalog, one row per profile, in
    /// catalog order
    pub fn simulate(&self, password: &str) -> EngineResult<Vec<SimulationResult>> {
        let length = password.chars().count();
        self.check_length(length)?;

        let profile = CharsetProfiler::profile(password);
        let matches = PatternDetector::new(&self.lexicon).scan(password, profile.alphabet_bits());
        let estimate = EntropyEstimator::estimate(&profile, length, &matches);
        let entropy = round_bits(estimate.adjusted_bits);

        let simulator = AttackSimulator::new(&self.catalog, self.lexicon.search_cost_bits());
        let results = simulator.run(
            password,
            length,
            profile.alphabet_bits(),
            entropy,
            &matches,
        );

        debug!(length, entropy, rows = results.len(), "attack simulation complete");
        Ok(results)
    }

    fn check_length(&self, length: usize) -> EngineResult<()> {
        if length > self.config.max_password_length {
            return Err(EngineError::InputTooLong {
                length,
                max: self.config.max_password_length,
            });
        }
        Ok(())
    }
}

impl Default for PasswordEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Entropy values are reported to two decimal places
fn round_bits(bits: f64) -> f64 {
    (bits * 100.0).round() / 100.0
}
