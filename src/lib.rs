//! PassGauge Engine Library
//!
//! This crate contains the password strength evaluation engine behind
//! PassGauge. It provides stateless analysis, attack simulation, and secure
//! generation of passwords, designed to be embedded behind any transport or
//! user interface.
//!
//! # Features
//!
//! - **Analysis**: Character set profiling, weak-pattern detection, and
//!   exact plus pattern-adjusted entropy estimation
//! - **Classification**: Entropy-based strength buckets with a 0-100 score
//!   and ordered improvement recommendations
//! - **Attack Simulation**: Crack-time estimates across a fixed catalog of
//!   attacker profiles, from throttled online guessing to GPU clusters
//! - **Generation**: CSPRNG-backed passwords with a per-class inclusion
//!   guarantee
//!
//! # Usage
//!
//! ```rust
//! use passgauge::{GenerationConfig, PasswordEngine};
//!
//! let engine = PasswordEngine::new();
//!
//! // Assess an existing password
//! let report = engine.analyze("Tr0ub4dor&3").unwrap();
//! println!("{}: {} bits", report.strength_level, report.entropy);
//!
//! // Generate a replacement
//! let generated = engine.generate(&GenerationConfig::default()).unwrap();
//! assert_eq!(generated.length, 16);
//! ```
//!
//! Passwords are processed in memory only; the engine never persists or
//! logs submitted values.

pub mod api;
pub mod attack;
pub mod charset;
pub mod crack;
pub mod entropy;
pub mod generator;
pub mod logging;
pub mod models;
pub mod patterns;
pub mod strength;

// Re-export commonly used types for convenience
pub use api::{EngineConfig, PasswordEngine};
pub use error::{EngineError, EngineResult};
pub use models::{AnalysisResult, GeneratedPassword, GenerationConfig, SimulationResult};
pub use patterns::{Lexicon, PatternKind, PatternMatch};
pub use strength::StrengthLevel;

/// Error types used throughout the engine
pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error, Clone, PartialEq, Eq)]
    pub enum EngineError {
        /// A request parameter was out of range or contradictory
        #[error("Invalid configuration: {message}")]
        InvalidConfig { message: String },

        /// The submitted password exceeds the engine's length bound
        #[error("Input of {length} characters exceeds the maximum of {max}")]
        InputTooLong { length: usize, max: usize },
    }

    pub type EngineResult<T> = Result<T, EngineError>;
}

/// Engine-wide constants
pub mod constants {
    /// Longest password accepted anywhere in the engine
    pub const MAX_PASSWORD_LENGTH: usize = 256;

    /// Length used by [`crate::GenerationConfig::default`]
    pub const DEFAULT_GENERATED_LENGTH: usize = 16;

    /// Headline attacker throughput: a well-funded offline attacker
    pub const REFERENCE_GUESSES_PER_SECOND: f64 = 1e9;

    /// 365-day year, matching the convention of crack-time calculators
    pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

    /// Durations at or beyond this many years are reported as
    /// "effectively uncrackable"
    pub const UNCRACKABLE_YEARS: f64 = 1e20;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_shared<T: Send + Sync>() {}
        assert_shared::<PasswordEngine>();
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::InputTooLong { length: 300, max: 256 };
        assert_eq!(
            err.to_string(),
            "Input of 300 characters exceeds the maximum of 256"
        );
        let err = EngineError::InvalidConfig {
            message: "no character classes enabled".to_string(),
        };
        assert!(err.to_string().starts_with("Invalid configuration:"));
    }

    #[test]
    fn test_public_surface_round_trip() {
        let engine = PasswordEngine::new();
        let generated = engine.generate(&GenerationConfig::default()).unwrap();
        let report = engine.analyze(&generated.password).unwrap();
        assert_eq!(report.length, generated.length);
        let rows = engine.simulate(&generated.password).unwrap();
        assert_eq!(rows.len(), 4);
    }
}
