//! Weakness lexicon
//!
//! The process-wide, read-only dictionary the pattern detector matches
//! against: a bundled wordlist of common passwords and guessable words, the
//! leetspeak substitution table, and the compiled digit-run pattern used for
//! date detection. Built once at startup and shared behind `Arc`; tests
//! substitute a small fixture via [`Lexicon::new`].

use regex::Regex;

/// Words shorter than this are ignored when building a lexicon; very short
/// fragments match almost everything and carry no signal.
pub const MIN_WORD_LENGTH: usize = 4;

/// Allowance on top of the wordlist rank for case toggling and the common
/// suffix/prefix mangling rules attackers apply to dictionary words.
const MANGLING_MARGIN_BITS: f64 = 6.0;

/// Extra attacker cost for enumerating leetspeak substitution choices.
pub const LEET_MARGIN_BITS: f64 = 2.0;

/// A dictionary-word occurrence inside a password, in character positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconHit {
    pub start: usize,
    pub length: usize,
}

/// The shared weakness dictionary.
#[derive(Debug)]
pub struct Lexicon {
    words: Vec<Vec<u8>>,
    digit_runs: Regex,
    search_cost_bits: f64,
}

impl Lexicon {
    /// Build a lexicon from an arbitrary word set. Words are lowercased and
    /// entries shorter than [`MIN_WORD_LENGTH`] are discarded.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<Vec<u8>> = words
            .into_iter()
            .map(|w| w.as_ref().to_ascii_lowercase().into_bytes())
            .filter(|w| w.len() >= MIN_WORD_LENGTH)
            .collect();
        words.sort();
        words.dedup();

        // An attacker trying the whole list plus mangling rules pays the
        // list rank once per word, not per character.
        let search_cost_bits = (words.len().max(2) as f64).log2() + MANGLING_MARGIN_BITS;

        Self {
            words,
            digit_runs: Regex::new(r"\d+").expect("digit run pattern is valid"),
            search_cost_bits,
        }
    }

    /// The bundled default wordlist.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_WORDS.iter().copied())
    }

    /// Number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Bits an attacker spends to locate one dictionary word, mangling
    /// included.
    pub fn search_cost_bits(&self) -> f64 {
        self.search_cost_bits
    }

    /// Compiled pattern matching maximal runs of ASCII digits.
    pub fn digit_runs(&self) -> &Regex {
        &self.digit_runs
    }

    /// All word occurrences in an ASCII-folded haystack (see
    /// [`super::ascii_fold`]), whole-string and substring matches alike.
    pub fn find_words(&self, folded: &[u8]) -> Vec<LexiconHit> {
        let mut hits = Vec::new();
        for word in &self.words {
            if word.len() > folded.len() {
                continue;
            }
            for start in 0..=(folded.len() - word.len()) {
                if &folded[start..start + word.len()] == word.as_slice() {
                    hits.push(LexiconHit {
                        start,
                        length: word.len(),
                    });
                }
            }
        }
        hits.sort_by_key(|h| (h.start, h.length));
        hits
    }
}

/// Apply the leetspeak substitution table to a folded haystack. Returns the
/// normalized variants that differ from the input ("1" maps to both "i" and
/// "l", so there can be two); an empty vector means nothing was substituted.
pub fn leet_variants(folded: &[u8]) -> Vec<Vec<u8>> {
    let normalize = |one: u8| -> Vec<u8> {
        folded
            .iter()
            .map(|&b| match b {
                b'0' => b'o',
                b'1' => one,
                b'3' => b'e',
                b'4' => b'a',
                b'5' => b's',
                b'7' => b't',
                b'@' => b'a',
                b'$' => b's',
                b'!' => b'i',
                other => other,
            })
            .collect()
    };

    let mut variants = Vec::new();
    let with_i = normalize(b'i');
    if with_i != folded {
        if folded.contains(&b'1') {
            variants.push(normalize(b'l'));
        }
        variants.push(with_i);
    }
    variants.dedup();
    variants
}

/// Common passwords and guessable dictionary words, lowercase, length >= 4.
/// Substring matching makes short high-frequency words ("pass", "love")
/// worth carrying despite the overlap with their longer forms.
const BUILTIN_WORDS: &[&str] = &[
    "access", "admin", "administrator", "america", "amanda", "andrew", "angel", "apple",
    "arsenal", "ashley", "august", "austin", "bailey", "banana", "bandit", "baseball",
    "batman", "buster", "butterfly", "captain", "charlie", "cheese", "chelsea",
    "chocolate", "cobra", "coffee", "computer", "cookie", "corvette", "dallas", "dance",
    "daniel", "devil", "diamond", "donald", "dragon", "eagle", "facebook", "falcon",
    "ferrari", "flower", "football", "freedom", "friday", "george", "ginger", "golden",
    "google", "guitar", "hannah", "happy", "harley", "heaven", "hello", "hockey", "honda",
    "horse", "hunter", "iloveyou", "internet", "january", "jennifer", "jessica", "jordan",
    "joshua", "killer", "letmein", "liverpool", "login", "london", "love", "lucky",
    "maggie", "magic", "master", "matthew", "mercedes", "michael", "mickey", "monday",
    "money", "monkey", "music", "mustang", "network", "nicole", "ninja", "oliver",
    "orange", "panther", "party", "pass", "password", "peace", "pepper", "phoenix",
    "piano", "pokemon", "porsche", "power", "princess", "purple", "qwerty", "rainbow",
    "ranger", "robert", "router", "samsung", "secret", "security", "server", "shadow",
    "silver", "smile", "smokey", "snoopy", "soccer", "soldier", "sophie", "spider",
    "spring", "star", "starwars", "summer", "sunshine", "super", "superman", "system",
    "thomas", "tiger", "tigger", "toyota", "twitter", "viper", "welcome", "whatever",
    "winter", "yamaha", "yellow",
];
