//! Attack simulation
//!
//! Runs the crack-time estimator across a fixed roster of attacker models
//! so callers can compare how the same password holds up against different
//! throughput assumptions. Output preserves catalog order, never sorted by
//! result, so comparisons stay reproducible.

use crate::crack::CrackTimeEstimator;
use crate::models::SimulationResult;
use crate::patterns::{PatternKind, PatternMatch};

/// A named assumption about attacker throughput
#[derive(Debug, Clone, PartialEq)]
pub struct AttackProfile {
    pub name: &'static str,
    pub guesses_per_second: f64,
    /// Rule-based attackers enumerate mutations of known words instead of
    /// the full alphabet space, so they get a reduced effective space when
    /// the password overlaps the dictionary
    pub rule_based: bool,
}

impl AttackProfile {
    /// The fixed catalog, in presentation order
    pub fn catalog() -> Vec<AttackProfile> {
        vec![
            AttackProfile {
                name: "Online throttled guessing",
                guesses_per_second: 1e2,
                rule_based: false,
            },
            AttackProfile {
                name: "Offline fast hash (GPU)",
                guesses_per_second: 1e11,
                rule_based: false,
            },
            AttackProfile {
                name: "Offline slow hash (memory-hard)",
                guesses_per_second: 1e4,
                rule_based: false,
            },
            AttackProfile {
                name: "Dictionary + mangling rules",
                guesses_per_second: 1e7,
                rule_based: true,
            },
        ]
    }
}

/// Simulates the attack catalog against one analyzed password
pub struct AttackSimulator<'a> {
    catalog: &'a [AttackProfile],
    /// Attacker cost per matched dictionary region, from the lexicon
    word_cost_bits: f64,
}

impl<'a> AttackSimulator<'a> {
    pub fn new(catalog: &'a [AttackProfile], word_cost_bits: f64) -> Self {
        Self {
            catalog,
            word_cost_bits,
        }
    }

    /// Produce one result per catalog entry. `adjusted_bits` is the
    /// password's adjusted entropy; the reported `entropy` field carries it
    /// unchanged for every row, while rule-based profiles substitute their
    /// own effective space for the time computation.
    pub fn run(
        &self,
        password: &str,
        length: usize,
        alphabet_bits: f64,
        adjusted_bits: f64,
        matches: &[PatternMatch],
    ) -> Vec<SimulationResult> {
        self.catalog
            .iter()
            .map(|profile| {
                let effective_bits = if profile.rule_based {
                    dictionary_effective_bits(length, alphabet_bits, matches, self.word_cost_bits)
                } else {
                    adjusted_bits
                };
                let crack = CrackTimeEstimator::estimate(effective_bits, profile.guesses_per_second);
                SimulationResult {
                    profile: profile.name.to_string(),
                    password: password.to_string(),
                    entropy: adjusted_bits,
                    time_to_crack: crack.seconds,
                    time_formatted: crack.formatted,
                }
            })
            .collect()
    }
}

/// Effective search space for a rule-based dictionary attacker: the
/// non-matched residue still costs full alphabet entropy (unadjusted), while
/// each contiguous dictionary-covered region collapses to a fixed wordlist
/// search cost.
fn dictionary_effective_bits(
    length: usize,
    alphabet_bits: f64,
    matches: &[PatternMatch],
    word_cost_bits: f64,
) -> f64 {
    let mut covered = vec![false; length];
    for m in matches {
        if matches!(m.kind, PatternKind::DictionaryWord | PatternKind::Leetspeak) {
            for position in m.start..m.end().min(length) {
                covered[position] = true;
            }
        }
    }

    let uncovered = covered.iter().filter(|&&c| !c).count();
    let mut regions = 0;
    let mut inside = false;
    for &position_covered in &covered {
        if position_covered && !inside {
            regions += 1;
        }
        inside = position_covered;
    }

    uncovered as f64 * alphabet_bits + regions as f64 * word_cost_bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharsetProfiler;
    use crate::patterns::{Lexicon, PatternDetector};

    fn simulate(password: &str) -> Vec<SimulationResult> {
        let lexicon = Lexicon::builtin();
        let catalog = AttackProfile::catalog();
        let profile = CharsetProfiler::profile(password);
        let matches = PatternDetector::new(&lexicon).scan(password, profile.alphabet_bits());
        let estimate = crate::entropy::EntropyEstimator::estimate(
            &profile,
            password.chars().count(),
            &matches,
        );
        AttackSimulator::new(&catalog, lexicon.search_cost_bits()).run(
            password,
            password.chars().count(),
            profile.alphabet_bits(),
            estimate.adjusted_bits,
            &matches,
        )
    }

    #[test]
    fn test_catalog_order_preserved() {
        let results = simulate("kD8#mQ2v");
        let names: Vec<&str> = results.iter().map(|r| r.profile.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Online throttled guessing",
                "Offline fast hash (GPU)",
                "Offline slow hash (memory-hard)",
                "Dictionary + mangling rules",
            ]
        );
    }

    #[test]
    fn test_time_decreases_with_throughput() {
        let results = simulate("kD8#mQ2v");
        // Rows 0, 2, 1 share the adjusted entropy; throughput rises in that
        // order
        assert!(results[0].time_to_crack > results[2].time_to_crack);
        assert!(results[2].time_to_crack > results[1].time_to_crack);
    }

    #[test]
    fn test_entropy_identical_across_rows() {
        let results = simulate("dragonK9!");
        assert!(results
            .windows(2)
            .all(|pair| pair[0].entropy == pair[1].entropy));
    }

    #[test]
    fn test_password_echoed() {
        let results = simulate("kD8#mQ2v");
        assert!(results.iter().all(|r| r.password == "kD8#mQ2v"));
    }

    #[test]
    fn test_dictionary_profile_punishes_dictionary_words() {
        // Fully dictionary-covered: the rule-based attacker needs only the
        // word cost, far below GPU brute force over the raw alphabet
        let dictionary_heavy = simulate("password");
        let rule_row = &dictionary_heavy[3];
        let gpu_row = &dictionary_heavy[1];
        assert!(rule_row.time_to_crack < gpu_row.time_to_crack * 1e6);

        // No dictionary overlap: the rule attacker faces the unadjusted
        // space at modest throughput, slower than the GPU row
        let random_like = simulate("kD8#mQ2v");
        assert!(random_like[3].time_to_crack > random_like[1].time_to_crack);
    }

    #[test]
    fn test_residue_bits_without_matches_is_unadjusted() {
        let bits = dictionary_effective_bits(8, 6.0, &[], 14.0);
        assert_eq!(bits, 48.0);
    }

    #[test]
    fn test_residue_bits_with_one_region() {
        let matches = vec![PatternMatch {
            kind: PatternKind::DictionaryWord,
            start: 2,
            length: 6,
            penalty_bits: 10.0,
        }];
        let bits = dictionary_effective_bits(10, 6.0, &matches, 14.0);
        // 4 uncovered chars at 6 bits plus one region at 14 bits
        assert_eq!(bits, 4.0 * 6.0 + 14.0);
    }

    #[test]
    fn test_overlapping_word_hits_count_one_region() {
        let matches = vec![
            PatternMatch {
                kind: PatternKind::DictionaryWord,
                start: 0,
                length: 8,
                penalty_bits: 10.0,
            },
            PatternMatch {
                kind: PatternKind::DictionaryWord,
                start: 0,
                length: 4,
                penalty_bits: 5.0,
            },
        ];
        let bits = dictionary_effective_bits(8, 6.0, &matches, 14.0);
        assert_eq!(bits, 14.0);
    }
}
