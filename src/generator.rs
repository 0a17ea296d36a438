//! Cryptographically secure password generation
//!
//! Draws every character from the operating system RNG and guarantees that
//! each requested character class appears at least once (when the length
//! permits): one character is drawn per enabled class, the remainder is
//! filled from the combined pool, and the buffer is shuffled so the
//! guaranteed characters do not sit at predictable positions.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::charset::CharacterSets;
use crate::error::{EngineError, EngineResult};
use crate::models::GenerationConfig;

pub struct PasswordGenerator;

impl PasswordGenerator {
    /// Generate a password satisfying `config`, bounded by `max_length`.
    ///
    /// Fails with [`EngineError::InvalidConfig`] when no class is enabled or
    /// the length is zero or above the bound. When the requested length is
    /// shorter than the number of enabled classes, the all-classes-present
    /// guarantee is relaxed to as many distinct classes as fit.
    pub fn generate(config: &GenerationConfig, max_length: usize) -> EngineResult<String> {
        if config.selected_classes() == 0 {
            return Err(EngineError::InvalidConfig {
                message: "at least one character class must be enabled".to_string(),
            });
        }
        if config.length == 0 {
            return Err(EngineError::InvalidConfig {
                message: "password length must be at least 1".to_string(),
            });
        }
        if config.length > max_length {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "password length {} exceeds the maximum of {}",
                    config.length, max_length
                ),
            });
        }

        let mut pools: Vec<&[u8]> = Vec::with_capacity(4);
        if config.lowercase {
            pools.push(CharacterSets::LOWERCASE.as_bytes());
        }
        if config.uppercase {
            pools.push(CharacterSets::UPPERCASE.as_bytes());
        }
        if config.numbers {
            pools.push(CharacterSets::DIGITS.as_bytes());
        }
        if config.special {
            pools.push(CharacterSets::SPECIAL.as_bytes());
        }

        let combined: Vec<u8> = pools.iter().flat_map(|pool| pool.iter().copied()).collect();

        let mut rng = OsRng;
        let mut password: Vec<u8> = Vec::with_capacity(config.length);

        // One draw per class first, so every enabled class is represented.
        // When the length cannot fit every class the guarantee is dropped
        // entirely and all positions come from the combined pool; reserving
        // positions for a prefix of the classes would make the others
        // unreachable.
        if config.length >= pools.len() {
            for pool in &pools {
                password.push(pool[rng.gen_range(0..pool.len())]);
            }
        }
        while password.len() < config.length {
            password.push(combined[rng.gen_range(0..combined.len())]);
        }
        password.shuffle(&mut rng);

        // The pools are all ASCII, so the bytes form valid UTF-8.
        Ok(String::from_utf8_lossy(&password).into_owned())
    }
}
