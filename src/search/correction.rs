//! Single-edit typo correction in a fixed priority order.
//!
//! When a query does not produce enough matches, each query word is varied
//! by one substitution, deletion or insertion and the variants that exist in
//! the index are queried instead. Variants are grouped into ten [`Tier`]s
//! that are tried strictly in ascending order:
//!
//! | tier | edits                                              | guard            |
//! |------|----------------------------------------------------|------------------|
//! | 1    | substitute at every index `>= 4`                   | len >= 5         |
//! | 2    | delete/insert at every index `>= 4`; substitute 3  | len >= 5; len >= 4 |
//! | 3    | substitute at 2                                    | len >= 3         |
//! | 4    | delete/insert at 3; substitute at 1                | len >= 4; len >= 2 |
//! | 5    | substitute at 0                                    |                  |
//! | 6    | delete/insert at 2                                 | len >= 3         |
//! | 7    | (none)                                             |                  |
//! | 8    | delete/insert at 1                                 | len >= 2         |
//! | 9    | (none)                                             |                  |
//! | 10   | delete/insert at 0                                 |                  |
//!
//! Edits near the end of a word come first and edits of the first
//! character come last. This is a heuristic order, not an edit-distance
//! ranking.

use super::matcher::PhraseMatcher;
use crate::index::{Occurrence, OccurrenceTrie};
use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Single-character edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Replace the character at the index
    Substitute,
    /// Remove the character at the index
    Delete,
    /// Insert a character before the index
    Insert,
}

/// Indices an edit rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditPositions {
    /// Exactly this index
    At(usize),
    /// Every index from this one to the end of the word
    AtOrAfter(usize),
}

/// One row of a tier: an edit, where to apply it, and the minimum word
/// length for it to be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditRule {
    /// Edit operation
    pub kind: EditKind,
    /// Indices the edit is applied at
    pub positions: EditPositions,
    /// Words shorter than this skip the rule
    pub min_len: usize,
}

const fn rule(kind: EditKind, positions: EditPositions, min_len: usize) -> EditRule {
    EditRule {
        kind,
        positions,
        min_len,
    }
}

use EditKind::{Delete, Insert, Substitute};
use EditPositions::{At, AtOrAfter};

static TIER_RULES: [&[EditRule]; 10] = [
    &[rule(Substitute, AtOrAfter(4), 5)],
    &[
        rule(Delete, AtOrAfter(4), 5),
        rule(Insert, AtOrAfter(4), 5),
        rule(Substitute, At(3), 4),
    ],
    &[rule(Substitute, At(2), 3)],
    &[
        rule(Delete, At(3), 4),
        rule(Insert, At(3), 4),
        rule(Substitute, At(1), 2),
    ],
    &[rule(Substitute, At(0), 0)],
    &[rule(Delete, At(2), 3), rule(Insert, At(2), 3)],
    &[],
    &[rule(Delete, At(1), 2), rule(Insert, At(1), 2)],
    &[],
    &[rule(Delete, At(0), 0), rule(Insert, At(0), 0)],
];

/// A correction priority level, numbered 1 through 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u8);

impl Tier {
    /// Highest-priority tier
    pub const FIRST: Tier = Tier(1);
    /// Lowest-priority tier
    pub const LAST: Tier = Tier(10);

    /// Tier with the given number, if it is in `1..=10`.
    pub fn new(number: u8) -> Option<Tier> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&number)
            .then_some(Tier(number))
    }

    /// All tiers in evaluation order
    pub fn all() -> impl Iterator<Item = Tier> {
        (Self::FIRST.0..=Self::LAST.0).map(Tier)
    }

    /// The tier number
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Edit rules of this tier
    pub fn rules(self) -> &'static [EditRule] {
        TIER_RULES[usize::from(self.0 - 1)]
    }

    /// Whether this tier has no edits (tiers 7 and 9)
    pub fn is_empty(self) -> bool {
        self.rules().is_empty()
    }

    /// Indexed words reachable from `word` by this tier's edits,
    /// deduplicated and in lexicographic order.
    pub fn candidates(self, index: &OccurrenceTrie, word: &str) -> BTreeSet<String> {
        let len = word.len();
        let mut words = BTreeSet::new();
        for rule in self.rules() {
            if len < rule.min_len {
                continue;
            }
            let indices = match rule.positions {
                At(i) => i..i + 1,
                AtOrAfter(start) => start..len,
            };
            for i in indices {
                let found = match rule.kind {
                    Substitute => index.change_letter(word, i),
                    Delete => index.remove_letter(word, i),
                    Insert => index.add_letter(word, i),
                };
                words.extend(found);
            }
        }
        words
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.0)
    }
}

/// One evaluated tier for one query word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierAttempt {
    /// Index of the corrected word within the query
    pub position: usize,
    /// Tier that generated the candidates
    pub tier: Tier,
    /// Candidates the tier produced
    pub candidates: Vec<String>,
}

/// What a correction run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionReport {
    /// Evaluated tiers, in order
    pub attempts: Vec<TierAttempt>,
    /// Whether the result count reached the deficit
    pub satisfied: bool,
    /// Whether the deadline stopped the run
    pub deadline_expired: bool,
}

impl CorrectionReport {
    /// Evaluated tiers, in order
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.attempts.iter().map(|attempt| attempt.tier)
    }

    /// The last tier evaluated
    pub fn last_tier(&self) -> Option<Tier> {
        self.attempts.last().map(|attempt| attempt.tier)
    }
}

/// Tiered single-edit correction over an [`OccurrenceTrie`].
#[derive(Debug, Clone, Copy)]
pub struct FuzzyCorrector<'a> {
    index: &'a OccurrenceTrie,
    shift: usize,
    deadline: Option<Duration>,
}

impl<'a> FuzzyCorrector<'a> {
    /// Create a corrector using phrase shift 1 and no deadline.
    pub fn new(index: &'a OccurrenceTrie) -> Self {
        FuzzyCorrector {
            index,
            shift: super::config::DEFAULT_PHRASE_SHIFT,
            deadline: None,
        }
    }

    /// Phrase shift used when re-matching multi-word queries.
    pub fn with_shift(mut self, shift: usize) -> Self {
        self.shift = shift;
        self
    }

    /// Stop starting new tiers once `deadline` has elapsed.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Append matches for single-edit variants of `words` to `found`.
    ///
    /// `found` holds the results gathered so far and `deficit` is the count
    /// it must reach. A single-word query appends the matches of every
    /// candidate of a tier and stops after the first tier that brings
    /// `found` to `deficit`. A multi-word query corrects one word at a time,
    /// substituting each candidate into a working phrase, and stops as soon
    /// as `found` reaches `deficit`, leaving later words uncorrected.
    ///
    /// Substitutions are not undone: once a position is done, the phrase
    /// keeps the last candidate tried there (the lexicographically greatest
    /// of its last non-empty tier) while later positions are corrected.
    ///
    /// Running out of tiers is not an error; `found` simply stays short.
    pub fn correct<S: AsRef<str>>(
        &self,
        words: &[S],
        found: &mut Vec<Occurrence>,
        deficit: usize,
    ) -> CorrectionReport {
        let words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
        match words.as_slice() {
            [] => CorrectionReport::default(),
            [word] => self.correct_word(word, found, deficit),
            _ => self.correct_phrase(&words, found, deficit),
        }
    }

    fn correct_word(&self, word: &str, found: &mut Vec<Occurrence>, deficit: usize) -> CorrectionReport {
        let matcher = PhraseMatcher::new(self.index);
        let started = Instant::now();
        let mut report = CorrectionReport::default();

        for tier in Tier::all() {
            if self.expired(started) {
                warn!(word, %tier, "correction deadline expired");
                report.deadline_expired = true;
                break;
            }

            let candidates = tier.candidates(self.index, word);
            debug!(word, %tier, candidates = candidates.len(), "correcting word");
            for candidate in &candidates {
                found.extend(matcher.search_word(candidate));
            }
            report.attempts.push(TierAttempt {
                position: 0,
                tier,
                candidates: candidates.into_iter().collect(),
            });

            if found.len() >= deficit {
                report.satisfied = true;
                break;
            }
        }
        report
    }

    fn correct_phrase(&self, words: &[&str], found: &mut Vec<Occurrence>, deficit: usize) -> CorrectionReport {
        let matcher = PhraseMatcher::new(self.index);
        let started = Instant::now();
        let mut report = CorrectionReport::default();
        let mut phrase: Vec<String> = words.iter().map(|w| w.to_string()).collect();

        for (position, word) in words.iter().enumerate() {
            for tier in Tier::all() {
                if self.expired(started) {
                    warn!(word, position, %tier, "correction deadline expired");
                    report.deadline_expired = true;
                    return report;
                }

                let candidates = tier.candidates(self.index, word);
                debug!(word, position, %tier, candidates = candidates.len(), "correcting phrase word");
                report.attempts.push(TierAttempt {
                    position,
                    tier,
                    candidates: candidates.iter().cloned().collect(),
                });

                for candidate in &candidates {
                    phrase[position].clone_from(candidate);
                    found.extend(matcher.search_words(&phrase, self.shift));
                    if found.len() >= deficit {
                        report.satisfied = true;
                        return report;
                    }
                }
            }
        }
        report
    }

    fn expired(&self, started: Instant) -> bool {
        self.deadline
            .is_some_and(|deadline| started.elapsed() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;

    fn corpus(lines: &[&str]) -> Corpus {
        Corpus::from_documents([lines.to_vec()]).unwrap()
    }

    fn sorted(set: BTreeSet<String>) -> Vec<String> {
        set.into_iter().collect()
    }

    #[test]
    fn test_tier_numbers() {
        let numbers: Vec<u8> = Tier::all().map(Tier::number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
        assert_eq!(Tier::new(0), None);
        assert_eq!(Tier::new(11), None);
        assert_eq!(Tier::new(7), Some(Tier(7)));
    }

    #[test]
    fn test_tiers_seven_and_nine_are_empty() {
        let empty: Vec<u8> = Tier::all().filter(|t| t.is_empty()).map(Tier::number).collect();
        assert_eq!(empty, vec![7, 9]);
    }

    #[test]
    fn test_tier_table() {
        let t = |n| Tier::new(n).unwrap().rules().to_vec();
        assert_eq!(t(1), vec![rule(Substitute, AtOrAfter(4), 5)]);
        assert_eq!(
            t(2),
            vec![
                rule(Delete, AtOrAfter(4), 5),
                rule(Insert, AtOrAfter(4), 5),
                rule(Substitute, At(3), 4)
            ]
        );
        assert_eq!(t(3), vec![rule(Substitute, At(2), 3)]);
        assert_eq!(
            t(4),
            vec![
                rule(Delete, At(3), 4),
                rule(Insert, At(3), 4),
                rule(Substitute, At(1), 2)
            ]
        );
        assert_eq!(t(5), vec![rule(Substitute, At(0), 0)]);
        assert_eq!(t(6), vec![rule(Delete, At(2), 3), rule(Insert, At(2), 3)]);
        assert_eq!(t(8), vec![rule(Delete, At(1), 2), rule(Insert, At(1), 2)]);
        assert_eq!(t(10), vec![rule(Delete, At(0), 0), rule(Insert, At(0), 0)]);
    }

    #[test]
    fn test_tier_one_substitutes_the_tail() {
        let c = corpus(&["pythom python pithon"]);
        let tier = Tier::new(1).unwrap();
        assert_eq!(sorted(tier.candidates(c.index(), "pythox")), vec!["pythom", "python"]);
        // Index 1 is out of tier 1's reach.
        assert!(tier.candidates(c.index(), "pothon").is_empty());
        // Too short.
        assert!(tier.candidates(c.index(), "pyth").is_empty());
    }

    #[test]
    fn test_tier_two_edits() {
        let c = corpus(&["python pythons pyxhon"]);
        let tier = Tier::new(2).unwrap();
        assert_eq!(sorted(tier.candidates(c.index(), "pythoon")), vec!["python"]);
        assert_eq!(sorted(tier.candidates(c.index(), "pythns")), vec!["pythons"]);
        assert_eq!(sorted(tier.candidates(c.index(), "pytzon")), vec!["python"]);
    }

    #[test]
    fn test_tier_three_uses_literal_index_two() {
        let c = corpus(&["the tee cat"]);
        let tier = Tier::new(3).unwrap();
        // Substituting index 2 of "teh" gives "te?", never "the".
        assert_eq!(sorted(tier.candidates(c.index(), "teh")), vec!["tee"]);
    }

    #[test]
    fn test_transposition_is_not_reachable() {
        let c = corpus(&["the cat sat"]);
        for tier in Tier::all() {
            assert!(
                !tier.candidates(c.index(), "teh").contains("the"),
                "{tier} produced a transposition"
            );
        }
    }

    #[test]
    fn test_front_edits_come_last() {
        let c = corpus(&["cat"]);
        let hits: Vec<u8> = Tier::all()
            .filter(|t| !t.candidates(c.index(), "xcat").is_empty())
            .map(Tier::number)
            .collect();
        assert_eq!(hits, vec![10]);

        let hits: Vec<u8> = Tier::all()
            .filter(|t| !t.candidates(c.index(), "bat").is_empty())
            .map(Tier::number)
            .collect();
        assert_eq!(hits, vec![5]);
    }

    #[test]
    fn test_single_word_stops_after_satisfying_tier() {
        let c = corpus(&["bat cat hat", "cast"]);
        let corrector = FuzzyCorrector::new(c.index());
        let mut found = Vec::new();

        let report = corrector.correct(&["xat"], &mut found, 2);

        // Tier 5 (substitute index 0) finds bat, cat and hat.
        assert!(report.satisfied);
        assert_eq!(report.last_tier(), Tier::new(5));
        assert_eq!(
            report.tiers().map(Tier::number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        // The whole tier is appended, even past the deficit.
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_single_word_exhausts_without_error() {
        let c = corpus(&["the cat sat"]);
        let corrector = FuzzyCorrector::new(c.index());
        let mut found = Vec::new();

        let report = corrector.correct(&["dog"], &mut found, 3);

        assert!(!report.satisfied);
        assert!(found.is_empty());
        assert_eq!(report.tiers().count(), 10);
    }

    #[test]
    fn test_existing_results_count_toward_deficit() {
        let c = corpus(&["bat cat hat"]);
        let corrector = FuzzyCorrector::new(c.index());
        let mut found = vec![Occurrence::new(9, 9, 9)];

        let report = corrector.correct(&["xat"], &mut found, 1);

        // Already satisfied, so only the first tier runs.
        assert_eq!(report.tiers().map(Tier::number).collect::<Vec<_>>(), vec![1]);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_phrase_correction_stops_mid_tier() {
        let c = corpus(&["big cat", "big hat", "big bat"]);
        let corrector = FuzzyCorrector::new(c.index());
        let mut found = Vec::new();

        let report = corrector.correct(&["big", "xat"], &mut found, 1);

        assert!(report.satisfied);
        // "big" has no variants, then "xat" is corrected in tier 5 and the
        // first candidate ("bat") already satisfies the deficit.
        assert_eq!(found, vec![Occurrence::new(0, 2, 0)]);
        let last = report.attempts.last().unwrap();
        assert_eq!(last.position, 1);
        assert_eq!(last.tier, Tier::new(5).unwrap());
    }

    #[test]
    fn test_phrase_correction_carries_earlier_substitution() {
        let c = corpus(&["big cat", "bag cat"]);
        let corrector = FuzzyCorrector::new(c.index());
        let mut found = Vec::new();

        let report = corrector.correct(&["bug", "cot"], &mut found, 1);

        // "bag cot" and "big cot" miss; the phrase keeps "big" and the
        // second word is corrected against it.
        assert!(report.satisfied);
        assert_eq!(found, vec![Occurrence::new(0, 0, 0)]);
        let last = report.attempts.last().unwrap();
        assert_eq!(last.position, 1);
        assert_eq!(last.candidates, vec!["cat"]);
    }

    #[test]
    fn test_phrase_correction_keeps_uncorrectable_word() {
        let c = corpus(&["big cat"]);
        let corrector = FuzzyCorrector::new(c.index());
        let mut found = Vec::new();

        // "big" has no variants, so the original word stays in place.
        let report = corrector.correct(&["big", "cot"], &mut found, 1);

        assert!(report.satisfied);
        assert_eq!(found, vec![Occurrence::new(0, 0, 0)]);
    }

    #[test]
    fn test_phrase_correction_first_word() {
        let c = corpus(&["big cat", "bag cat"]);
        let corrector = FuzzyCorrector::new(c.index());
        let mut found = Vec::new();

        let report = corrector.correct(&["bxg", "cat"], &mut found, 5);

        assert!(!report.satisfied);
        let mut found_sorted = found.clone();
        found_sorted.sort();
        assert_eq!(
            found_sorted,
            vec![Occurrence::new(0, 0, 0), Occurrence::new(0, 1, 0)]
        );
    }

    #[test]
    fn test_no_words_is_a_no_op() {
        let c = corpus(&["cat"]);
        let mut found = Vec::new();
        let report = FuzzyCorrector::new(c.index()).correct::<&str>(&[], &mut found, 1);
        assert_eq!(report, CorrectionReport::default());
    }

    #[test]
    fn test_zero_deadline_stops_before_first_tier() {
        let c = corpus(&["bat cat"]);
        let corrector = FuzzyCorrector::new(c.index()).with_deadline(Some(Duration::ZERO));
        let mut found = Vec::new();

        let report = corrector.correct(&["xat"], &mut found, 1);

        assert!(report.deadline_expired);
        assert!(report.attempts.is_empty());
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_lookups_after_stopping_tier() {
        let c = corpus(&["bat"]);
        let corrector = FuzzyCorrector::new(c.index());

        // Baseline: lookups spent by tiers 1..=5 alone.
        c.index().reset_stats();
        for tier in Tier::all().take(5) {
            for candidate in tier.candidates(c.index(), "xat") {
                c.index().search(&candidate);
            }
        }
        let through_tier_five = c.index().stats();

        c.index().reset_stats();
        let mut found = Vec::new();
        let report = corrector.correct(&["xat"], &mut found, 1);

        assert_eq!(report.last_tier(), Tier::new(5));
        assert_eq!(c.index().stats(), through_tier_five);
    }
}
