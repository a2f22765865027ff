//! Occurrence index over the corpus vocabulary.
//!
//! The index is a dense 36-ary prefix tree. Every node that terminates an
//! indexed word carries the list of [`Occurrence`]s recorded for that word,
//! so an exact lookup answers "where does this word appear?" in time
//! proportional to the word length.
//!
//! Lookups go through the [`OccurrenceLookup`] trait so that phrase matching
//! can run against any source of occurrence lists, not only the trie.

pub mod alphabet;
pub mod trie;

pub use alphabet::{symbol_char, symbol_index, ALPHABET_SIZE};
pub use trie::{IndexStats, OccurrenceTrie, TrieNode};

use std::fmt;

/// Location of one word inside the corpus.
///
/// The three fields always appear in this order: document, sentence within
/// the document, word position within the sentence. All are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Occurrence {
    /// Document the word belongs to
    pub document_id: usize,
    /// Sentence (non-blank line) within the document
    pub sentence_id: usize,
    /// Word position within the sentence
    pub position: usize,
}

impl Occurrence {
    /// Create a new occurrence reference.
    #[inline]
    pub const fn new(document_id: usize, sentence_id: usize, position: usize) -> Self {
        Self {
            document_id,
            sentence_id,
            position,
        }
    }

    /// The `(document_id, sentence_id)` pair identifying the sentence.
    #[inline]
    pub const fn sentence_key(&self) -> (usize, usize) {
        (self.document_id, self.sentence_id)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.document_id, self.sentence_id, self.position
        )
    }
}

/// Exact word lookup returning every recorded occurrence.
///
/// Absence is an empty slice, never an error.
pub trait OccurrenceLookup {
    /// Occurrences recorded for exactly `word`
    fn lookup(&self, word: &str) -> &[Occurrence];
}

impl OccurrenceLookup for OccurrenceTrie {
    #[inline]
    fn lookup(&self, word: &str) -> &[Occurrence] {
        self.search(word)
    }
}

impl<T: OccurrenceLookup + ?Sized> OccurrenceLookup for &T {
    #[inline]
    fn lookup(&self, word: &str) -> &[Occurrence] {
        (**self).lookup(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_display() {
        assert_eq!(Occurrence::new(1, 2, 3).to_string(), "(1, 2, 3)");
    }

    #[test]
    fn test_sentence_key() {
        let occ = Occurrence::new(4, 7, 2);
        assert_eq!(occ.sentence_key(), (4, 7));
    }

    #[test]
    fn test_occurrence_ordering_follows_field_order() {
        let mut occs = vec![
            Occurrence::new(1, 0, 0),
            Occurrence::new(0, 2, 1),
            Occurrence::new(0, 2, 0),
        ];
        occs.sort();
        assert_eq!(
            occs,
            vec![
                Occurrence::new(0, 2, 0),
                Occurrence::new(0, 2, 1),
                Occurrence::new(1, 0, 0),
            ]
        );
    }
}
