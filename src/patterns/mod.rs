//! Weak-pattern detection
//!
//! Scans a password against the fixed library of weakness structures and
//! reports every occurrence with an entropy penalty. A penalty is the gap
//! between what the matched span would cost a brute-force attacker
//! (span length x alphabet bits) and what the structure actually costs a
//! pattern-aware attacker to enumerate. Overlapping matches are all
//! reported; de-duplication happens during aggregation in the entropy
//! estimator, never here.

pub mod keyboard;
pub mod lexicon;

pub use lexicon::{Lexicon, LexiconHit};

use serde::{Deserialize, Serialize};

/// The closed set of weakness structures the detector recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// Ascending or descending run of consecutive characters ("abcd", "4321")
    Sequential,
    /// A short unit repeated back to back ("aaaa", "ababab")
    Repeated,
    /// Physically adjacent keys on the reference layout ("qwer", "1qaz")
    KeyboardWalk,
    /// A bundled wordlist entry, whole-string or substring
    DictionaryWord,
    /// Digit run shaped like a year or calendar date
    DateLike,
    /// Wordlist entry visible only after substitution normalization
    Leetspeak,
}

/// One pattern occurrence with its entropy penalty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub kind: PatternKind,
    /// Start offset in characters
    pub start: usize,
    /// Span length in characters
    pub length: usize,
    /// Bits of entropy this span overstates, >= 0
    pub penalty_bits: f64,
}

impl PatternMatch {
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Human-readable description for the analysis report
    pub fn describe(&self, password: &str) -> String {
        let span: String = password
            .chars()
            .skip(self.start)
            .take(self.length)
            .collect();
        match self.kind {
            PatternKind::Sequential => format!("Sequential characters: \"{span}\""),
            PatternKind::Repeated => format!("Repeated pattern: \"{span}\""),
            PatternKind::KeyboardWalk => format!("Keyboard walk: \"{span}\""),
            PatternKind::DictionaryWord => format!("Common word: \"{span}\""),
            PatternKind::DateLike => format!("Date-like digits: \"{span}\""),
            PatternKind::Leetspeak => format!("Disguised common word: \"{span}\""),
        }
    }
}

/// Map a password to a byte haystack with one byte per character: ASCII is
/// lowercased in place, anything else becomes a 0x01 placeholder that can
/// never match a dictionary word or keyboard key. Keeps byte offsets equal
/// to character offsets.
pub fn ascii_fold(password: &str) -> Vec<u8> {
    password
        .chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase() as u8
            } else {
                0x01
            }
        })
        .collect()
}

// Attacker cost models, in bits. See DESIGN.md for the derivations.

fn sequential_cost(length: usize, class_size: usize) -> f64 {
    // Starting character, direction, length choice
    (class_size as f64).log2() + 1.0 + (length as f64).log2()
}

fn repeat_cost(unit: usize, repetitions: usize, alphabet_bits: f64) -> f64 {
    // One full unit plus a repetition count
    unit as f64 * alphabet_bits + (repetitions as f64).log2()
}

const KEYBOARD_START_BITS: f64 = 5.5;
const KEYBOARD_STEP_BITS: f64 = 2.0;

fn keyboard_cost(length: usize) -> f64 {
    KEYBOARD_START_BITS + KEYBOARD_STEP_BITS * (length - 1) as f64
}

const YEAR_SEARCH_BITS: f64 = 7.6; // ~two centuries of years
const DATE6_SEARCH_BITS: f64 = 15.2; // day x month x two-digit year
const DATE8_SEARCH_BITS: f64 = 16.2; // day x month x full year

fn date_cost(digit_count: usize) -> f64 {
    match digit_count {
        4 => YEAR_SEARCH_BITS,
        6 => DATE6_SEARCH_BITS,
        _ => DATE8_SEARCH_BITS,
    }
}

fn penalty(length: usize, alphabet_bits: f64, cost_bits: f64) -> f64 {
    (length as f64 * alphabet_bits - cost_bits).max(0.0)
}

/// Scans passwords against a shared [`Lexicon`]
pub struct PatternDetector<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> PatternDetector<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Scan a password. `alphabet_bits` is the per-character entropy of the
    /// password's full alphabet, used to size each match's penalty. Matches
    /// come back ordered by start position, then length.
    pub fn scan(&self, password: &str, alphabet_bits: f64) -> Vec<PatternMatch> {
        let chars: Vec<char> = password.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }
        let folded = ascii_fold(password);
        let mut matches = Vec::new();

        self.scan_sequential(&chars, alphabet_bits, &mut matches);
        self.scan_repeats(&chars, alphabet_bits, &mut matches);
        self.scan_keyboard(&folded, alphabet_bits, &mut matches);
        self.scan_dates(&folded, alphabet_bits, &mut matches);
        let dictionary_spans = self.scan_dictionary(&folded, alphabet_bits, &mut matches);
        self.scan_leetspeak(&folded, &dictionary_spans, alphabet_bits, &mut matches);

        matches.sort_by(|a, b| (a.start, a.length).cmp(&(b.start, b.length)));
        matches
    }

    fn scan_sequential(&self, chars: &[char], alphabet_bits: f64, out: &mut Vec<PatternMatch>) {
        fn class_size(c: char) -> Option<usize> {
            if c.is_ascii_digit() {
                Some(10)
            } else if c.is_ascii_alphabetic() {
                Some(26)
            } else {
                None
            }
        }
        fn same_class(a: char, b: char) -> bool {
            (a.is_ascii_digit() && b.is_ascii_digit())
                || (a.is_ascii_lowercase() && b.is_ascii_lowercase())
                || (a.is_ascii_uppercase() && b.is_ascii_uppercase())
        }

        let mut i = 0;
        while i + 1 < chars.len() {
            let step = chars[i + 1] as i64 - chars[i] as i64;
            if (step == 1 || step == -1) && same_class(chars[i], chars[i + 1]) {
                let mut end = i + 1;
                while end + 1 < chars.len()
                    && chars[end + 1] as i64 - chars[end] as i64 == step
                    && same_class(chars[end], chars[end + 1])
                {
                    end += 1;
                }
                let length = end - i + 1;
                if length >= 3 {
                    let class = class_size(chars[i]).unwrap_or(26);
                    out.push(PatternMatch {
                        kind: PatternKind::Sequential,
                        start: i,
                        length,
                        penalty_bits: penalty(length, alphabet_bits, sequential_cost(length, class)),
                    });
                }
                i = end;
            } else {
                i += 1;
            }
        }
    }

    fn scan_repeats(&self, chars: &[char], alphabet_bits: f64, out: &mut Vec<PatternMatch>) {
        let n = chars.len();
        for unit in 1..=4usize {
            let mut i = 0;
            while i + 2 * unit <= n {
                // Units that are themselves one repeated character are
                // already covered by the unit-1 pass
                if unit > 1 && chars[i..i + unit].iter().all(|&c| c == chars[i]) {
                    i += 1;
                    continue;
                }
                let mut repetitions = 1;
                while i + (repetitions + 1) * unit <= n
                    && chars[i + repetitions * unit..i + (repetitions + 1) * unit]
                        == chars[i..i + unit]
                {
                    repetitions += 1;
                }
                let total = repetitions * unit;
                if repetitions >= 2 && total >= 3 {
                    out.push(PatternMatch {
                        kind: PatternKind::Repeated,
                        start: i,
                        length: total,
                        penalty_bits: penalty(
                            total,
                            alphabet_bits,
                            repeat_cost(unit, repetitions, alphabet_bits),
                        ),
                    });
                    i += total;
                } else {
                    i += 1;
                }
            }
        }
    }

    fn scan_keyboard(&self, folded: &[u8], alphabet_bits: f64, out: &mut Vec<PatternMatch>) {
        for walk in keyboard::find_walks(folded) {
            out.push(PatternMatch {
                kind: PatternKind::KeyboardWalk,
                start: walk.start,
                length: walk.length,
                penalty_bits: penalty(walk.length, alphabet_bits, keyboard_cost(walk.length)),
            });
        }
    }

    fn scan_dates(&self, folded: &[u8], alphabet_bits: f64, out: &mut Vec<PatternMatch>) {
        // The fold maps every character to one byte, so regex byte offsets
        // are character offsets
        let haystack = std::str::from_utf8(folded).expect("fold output is ASCII");
        for run in self.lexicon.digit_runs().find_iter(haystack) {
            let digits = run.as_str();
            if looks_like_date(digits) {
                out.push(PatternMatch {
                    kind: PatternKind::DateLike,
                    start: run.start(),
                    length: digits.len(),
                    penalty_bits: penalty(digits.len(), alphabet_bits, date_cost(digits.len())),
                });
            }
        }
    }

    fn scan_dictionary(
        &self,
        folded: &[u8],
        alphabet_bits: f64,
        out: &mut Vec<PatternMatch>,
    ) -> Vec<(usize, usize)> {
        let cost = self.lexicon.search_cost_bits();
        let mut spans = Vec::new();
        for hit in self.lexicon.find_words(folded) {
            spans.push((hit.start, hit.length));
            out.push(PatternMatch {
                kind: PatternKind::DictionaryWord,
                start: hit.start,
                length: hit.length,
                penalty_bits: penalty(hit.length, alphabet_bits, cost),
            });
        }
        spans
    }

    fn scan_leetspeak(
        &self,
        folded: &[u8],
        dictionary_spans: &[(usize, usize)],
        alphabet_bits: f64,
        out: &mut Vec<PatternMatch>,
    ) {
        let cost = self.lexicon.search_cost_bits() + lexicon::LEET_MARGIN_BITS;
        let mut seen: Vec<(usize, usize)> = Vec::new();
        for variant in lexicon::leet_variants(folded) {
            for hit in self.lexicon.find_words(&variant) {
                let span = (hit.start, hit.length);
                // Only count spans that actually needed normalization and
                // were not already plain dictionary hits
                let substituted =
                    folded[hit.start..hit.end_offset()] != variant[hit.start..hit.end_offset()];
                if substituted && !dictionary_spans.contains(&span) && !seen.contains(&span) {
                    seen.push(span);
                    out.push(PatternMatch {
                        kind: PatternKind::Leetspeak,
                        start: hit.start,
                        length: hit.length,
                        penalty_bits: penalty(hit.length, alphabet_bits, cost),
                    });
                }
            }
        }
    }
}

/// Whether a digit run reads as a year or calendar date. Years cover
/// 1900-2099; 6- and 8-digit runs are accepted in day-first, month-first,
/// and year-first orders.
fn looks_like_date(digits: &str) -> bool {
    fn valid_day_month(day: u32, month: u32) -> bool {
        (1..=31).contains(&day) && (1..=12).contains(&month)
    }
    fn valid_year(year: u32) -> bool {
        (1900..=2099).contains(&year)
    }
    let num = |range: std::ops::Range<usize>| -> u32 { digits[range].parse().unwrap_or(0) };

    match digits.len() {
        4 => valid_year(num(0..4)),
        6 => {
            valid_day_month(num(0..2), num(2..4)) // DDMMYY
                || valid_day_month(num(2..4), num(0..2)) // MMDDYY
                || valid_day_month(num(4..6), num(2..4)) // YYMMDD
        }
        8 => {
            (valid_day_month(num(0..2), num(2..4)) && valid_year(num(4..8))) // DDMMYYYY
                || (valid_day_month(num(2..4), num(0..2)) && valid_year(num(4..8))) // MMDDYYYY
                || (valid_year(num(0..4)) && valid_day_month(num(6..8), num(4..6))) // YYYYMMDD
        }
        _ => false,
    }
}

impl LexiconHit {
    fn end_offset(&self) -> usize {
        self.start + self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(password: &str) -> Vec<PatternMatch> {
        let lexicon = Lexicon::builtin();
        let profile = crate::charset::CharsetProfiler::profile(password);
        PatternDetector::new(&lexicon).scan(password, profile.alphabet_bits())
    }

    fn kinds(matches: &[PatternMatch]) -> Vec<PatternKind> {
        matches.iter().map(|m| m.kind).collect()
    }

    #[test]
    fn test_empty_password_no_matches() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_sequential_ascending_and_descending() {
        let matches = scan("abcd");
        assert!(kinds(&matches).contains(&PatternKind::Sequential));
        assert_eq!(matches[0].start, 0);
        assert_eq!(matches[0].length, 4);

        assert!(kinds(&scan("9876")).contains(&PatternKind::Sequential));
    }

    #[test]
    fn test_sequential_is_case_sensitive() {
        // 'a' -> 'B' is not a run even though the code points are adjacent
        // after case folding
        let matches = scan("xaBcx");
        assert!(!kinds(&matches).contains(&PatternKind::Sequential));
    }

    #[test]
    fn test_repeated_single_char_and_unit() {
        let matches = scan("aaaa");
        assert!(kinds(&matches).contains(&PatternKind::Repeated));

        let matches = scan("xyxyxy");
        let repeat = matches
            .iter()
            .find(|m| m.kind == PatternKind::Repeated)
            .unwrap();
        assert_eq!((repeat.start, repeat.length), (0, 6));
    }

    #[test]
    fn test_two_chars_not_repeated() {
        assert!(!kinds(&scan("aa")).contains(&PatternKind::Repeated));
    }

    #[test]
    fn test_keyboard_walk() {
        assert!(kinds(&scan("v1qazv")).contains(&PatternKind::KeyboardWalk));
    }

    #[test]
    fn test_dictionary_word_whole_and_substring() {
        let matches = scan("password");
        assert!(kinds(&matches).contains(&PatternKind::DictionaryWord));

        let matches = scan("mydragon99");
        let hit = matches
            .iter()
            .find(|m| m.kind == PatternKind::DictionaryWord)
            .unwrap();
        assert_eq!((hit.start, hit.length), (2, 6));
    }

    #[test]
    fn test_dictionary_case_insensitive() {
        assert!(kinds(&scan("DRAGON")).contains(&PatternKind::DictionaryWord));
    }

    #[test]
    fn test_date_like_year_and_full_date() {
        assert!(kinds(&scan("x1987x")).contains(&PatternKind::DateLike));
        assert!(kinds(&scan("31121999")).contains(&PatternKind::DateLike));
        assert!(kinds(&scan("19991231")).contains(&PatternKind::DateLike));
        // 8 digits that read as no date order
        assert!(!kinds(&scan("x55555555x")).contains(&PatternKind::DateLike));
    }

    #[test]
    fn test_leetspeak_tagged_only_after_normalization() {
        let matches = scan("p@ssw0rd");
        assert!(kinds(&matches).contains(&PatternKind::Leetspeak));
        assert!(!kinds(&matches).contains(&PatternKind::DictionaryWord));

        // Plain dictionary hit is never double-tagged as leetspeak
        let matches = scan("password");
        assert!(!kinds(&matches).contains(&PatternKind::Leetspeak));
    }

    #[test]
    fn test_penalties_are_non_negative() {
        for pwd in ["password", "aaaa", "abcd", "qwerty", "19991231", "p@ss"] {
            for m in scan(pwd) {
                assert!(m.penalty_bits >= 0.0, "negative penalty for {pwd}");
            }
        }
    }

    #[test]
    fn test_matches_ordered_by_position() {
        let matches = scan("abcd1987dragon");
        let starts: Vec<usize> = matches.iter().map(|m| m.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_describe_quotes_span() {
        let matches = scan("mydragon99");
        let hit = matches
            .iter()
            .find(|m| m.kind == PatternKind::DictionaryWord)
            .unwrap();
        assert_eq!(hit.describe("mydragon99"), "Common word: \"dragon\"");
    }
}
