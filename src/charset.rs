//! Character class profiling
//!
//! Classifies which character classes a password draws from and derives the
//! effective alphabet size used for all entropy arithmetic. Every character
//! belongs to exactly one class; the alphabet size is the sum of the nominal
//! sizes of the classes that are present.

use serde::{Deserialize, Serialize};

/// Character sets used for classification and generation
pub struct CharacterSets;

impl CharacterSets {
    pub const LOWERCASE: &'static str = "abcdefghijklmnopqrstuvwxyz";
    pub const UPPERCASE: &'static str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    pub const DIGITS: &'static str = "0123456789";
    /// Printable ASCII punctuation. The generation pool; space is excluded
    /// here but still classifies as special during analysis.
    pub const SPECIAL: &'static str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
}

/// Nominal class sizes for alphabet-size accounting
pub const LOWERCASE_SIZE: usize = 26;
pub const UPPERCASE_SIZE: usize = 26;
pub const DIGIT_SIZE: usize = 10;
/// The 32 punctuation characters plus space
pub const SPECIAL_SIZE: usize = 33;
/// Conservative contribution (one bit-equivalent) per distinct non-ASCII
/// class encountered
pub const OTHER_CLASS_SIZE: usize = 2;

/// Which character classes a password draws from, and the resulting
/// effective alphabet size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetProfile {
    /// Contains at least one ASCII lowercase letter
    pub has_lowercase: bool,

    /// Contains at least one ASCII uppercase letter
    pub has_uppercase: bool,

    /// Contains at least one ASCII digit
    pub has_digits: bool,

    /// Contains at least one printable special character (punctuation or space)
    pub has_special: bool,

    /// Contains at least one character outside the four ASCII classes
    pub has_other: bool,

    /// Sum of the nominal sizes of the present classes; 0 only for the
    /// empty password
    pub alphabet_size: usize,
}

impl CharsetProfile {
    /// Bits contributed by one character drawn from this alphabet.
    /// Zero when the alphabet is degenerate (size <= 1).
    pub fn alphabet_bits(&self) -> f64 {
        if self.alphabet_size <= 1 {
            0.0
        } else {
            (self.alphabet_size as f64).log2()
        }
    }

    /// Number of the four standard ASCII classes present
    pub fn class_count(&self) -> usize {
        [
            self.has_lowercase,
            self.has_uppercase,
            self.has_digits,
            self.has_special,
        ]
        .iter()
        .filter(|&&present| present)
        .count()
    }
}

/// Classifies passwords into character-class profiles
pub struct CharsetProfiler;

impl CharsetProfiler {
    /// Profile a password. An empty password yields an all-false profile
    /// with alphabet size 0, which callers treat as the degenerate
    /// zero-entropy case rather than an error.
    pub fn profile(password: &str) -> CharsetProfile {
        let mut has_lowercase = false;
        let mut has_uppercase = false;
        let mut has_digits = false;
        let mut has_special = false;

        // Non-ASCII characters are grouped into coarse classes so an
        // unfamiliar script still widens the alphabet a little without
        // crediting it a full script's worth of symbols.
        let mut other_alphabetic = false;
        let mut other_numeric = false;
        let mut other_misc = false;

        for c in password.chars() {
            if c.is_ascii_lowercase() {
                has_lowercase = true;
            } else if c.is_ascii_uppercase() {
                has_uppercase = true;
            } else if c.is_ascii_digit() {
                has_digits = true;
            } else if c == ' ' || CharacterSets::SPECIAL.contains(c) {
                has_special = true;
            } else if c.is_alphabetic() {
                other_alphabetic = true;
            } else if c.is_numeric() {
                other_numeric = true;
            } else {
                other_misc = true;
            }
        }

        let other_classes = [other_alphabetic, other_numeric, other_misc]
            .iter()
            .filter(|&&present| present)
            .count();

        let mut alphabet_size = 0;
        if has_lowercase {
            alphabet_size += LOWERCASE_SIZE;
        }
        if has_uppercase {
            alphabet_size += UPPERCASE_SIZE;
        }
        if has_digits {
            alphabet_size += DIGIT_SIZE;
        }
        if has_special {
            alphabet_size += SPECIAL_SIZE;
        }
        alphabet_size += other_classes * OTHER_CLASS_SIZE;

        CharsetProfile {
            has_lowercase,
            has_uppercase,
            has_digits,
            has_special,
            has_other: other_classes > 0,
            alphabet_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let profile = CharsetProfiler::profile("");
        assert_eq!(profile.alphabet_size, 0);
        assert_eq!(profile.alphabet_bits(), 0.0);
        assert!(!profile.has_lowercase);
        assert!(!profile.has_other);
    }

    #[test]
    fn test_single_class() {
        let profile = CharsetProfiler::profile("abcdef");
        assert!(profile.has_lowercase);
        assert!(!profile.has_uppercase);
        assert_eq!(profile.alphabet_size, LOWERCASE_SIZE);
    }

    #[test]
    fn test_all_four_classes() {
        let profile = CharsetProfiler::profile("aB3!");
        assert!(profile.has_lowercase);
        assert!(profile.has_uppercase);
        assert!(profile.has_digits);
        assert!(profile.has_special);
        assert!(!profile.has_other);
        assert_eq!(
            profile.alphabet_size,
            LOWERCASE_SIZE + UPPERCASE_SIZE + DIGIT_SIZE + SPECIAL_SIZE
        );
        assert_eq!(profile.class_count(), 4);
    }

    #[test]
    fn test_space_counts_as_special() {
        let profile = CharsetProfiler::profile("correct horse");
        assert!(profile.has_special);
        assert!(!profile.has_other);
        assert_eq!(profile.alphabet_size, LOWERCASE_SIZE + SPECIAL_SIZE);
    }

    #[test]
    fn test_non_ascii_widens_alphabet_conservatively() {
        let ascii_only = CharsetProfiler::profile("abc");
        let with_unicode = CharsetProfiler::profile("abcé");
        assert!(with_unicode.has_other);
        assert_eq!(
            with_unicode.alphabet_size,
            ascii_only.alphabet_size + OTHER_CLASS_SIZE
        );
    }

    #[test]
    fn test_alphabet_nonzero_for_any_nonempty_input() {
        // Control characters fall into the misc "other" class
        for pwd in ["a", "Z", "7", "!", " ", "é", "字", "\u{7}"] {
            let profile = CharsetProfiler::profile(pwd);
            assert!(profile.alphabet_size >= 1, "alphabet empty for {pwd:?}");
        }
    }

    #[test]
    fn test_alphabet_bits_monotonic_in_classes() {
        let lower = CharsetProfiler::profile("abc");
        let mixed = CharsetProfiler::profile("abcA1");
        assert!(mixed.alphabet_bits() > lower.alphabet_bits());
    }
}
