//! Contiguous phrase matching by positional intersection.
//!
//! Each query word contributes its full occurrence list. The lists are
//! reduced left to right: the running result (occurrences of the first
//! word) is intersected with word `i`'s list, keeping an occurrence only if
//! word `i` appears in the same sentence exactly `base_shift + i - 1`
//! positions after it. With the default shift of 1 this means the query
//! words must appear as an unbroken run.

use crate::corpus::tokenize;
use crate::index::{Occurrence, OccurrenceLookup};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Phrase matcher over any occurrence source.
#[derive(Debug, Clone, Copy)]
pub struct PhraseMatcher<I> {
    index: I,
}

impl<I: OccurrenceLookup> PhraseMatcher<I> {
    /// Create a matcher reading from `index`.
    pub fn new(index: I) -> Self {
        PhraseMatcher { index }
    }

    /// Occurrences of a single word.
    pub fn search_word(&self, word: &str) -> Vec<Occurrence> {
        self.index.lookup(word).to_vec()
    }

    /// Occurrences of `words[0]` that start a match of the whole phrase.
    ///
    /// A single word returns its occurrence list unfiltered. A word with no
    /// occurrences empties the result.
    pub fn search_words<S: AsRef<str>>(&self, words: &[S], shift: usize) -> Vec<Occurrence> {
        let lists: Vec<&[Occurrence]> = words
            .iter()
            .map(|word| self.index.lookup(word.as_ref()))
            .collect();
        filter_by_indexes(&lists, shift)
    }

    /// Split a normalized query on whitespace and match it as a phrase.
    pub fn search(&self, query: &str, shift: usize) -> Vec<Occurrence> {
        let words: Vec<&str> = tokenize(query).collect();
        self.search_words(&words, shift)
    }
}

/// Reduce per-word occurrence lists to the occurrences of the first word
/// that begin a phrase match.
///
/// List `i` (for `i >= 1`) is compared with shift `base_shift + i - 1`.
/// No lists yields no occurrences.
pub fn filter_by_indexes(lists: &[&[Occurrence]], base_shift: usize) -> Vec<Occurrence> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };

    let mut result = first.to_vec();
    for (i, list) in rest.iter().enumerate() {
        // `rest[i]` is word `i + 1` of the phrase.
        result = compare_indexes(&result, list, base_shift + i);
    }
    result
}

/// Keep the occurrences in `left` that have a `right` occurrence in the
/// same sentence exactly `shift` positions later.
///
/// The right-hand list is bucketed by `(document_id, sentence_id)` and each
/// bucket is sorted, which lets the scan stop as soon as the positions pass
/// the one `left` needs.
pub fn compare_indexes(left: &[Occurrence], right: &[Occurrence], shift: usize) -> Vec<Occurrence> {
    let mut buckets: FxHashMap<(usize, usize), SmallVec<[usize; 4]>> = FxHashMap::default();
    for occurrence in right {
        buckets
            .entry(occurrence.sentence_key())
            .or_default()
            .push(occurrence.position);
    }
    for positions in buckets.values_mut() {
        positions.sort_unstable();
    }

    let mut result = Vec::new();
    for occurrence in left {
        let Some(positions) = buckets.get(&occurrence.sentence_key()) else {
            continue;
        };
        for &position in positions {
            let Some(target) = position.checked_sub(shift) else {
                continue;
            };
            if occurrence.position == target {
                result.push(*occurrence);
            } else if occurrence.position < target {
                break;
            }
        }
    }
    result
}
