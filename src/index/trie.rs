//! Dense prefix tree mapping words to their occurrences.
//!
//! Each node has one child slot per alphabet symbol. A word's terminal node
//! is flagged as end-of-word and accumulates one [`Occurrence`] per
//! insertion of that word.
//!
//! Besides exact lookup, the trie hosts the single-edit primitives used by
//! typo correction ([`change_letter`](OccurrenceTrie::change_letter),
//! [`add_letter`](OccurrenceTrie::add_letter),
//! [`remove_letter`](OccurrenceTrie::remove_letter)). Substitution and
//! insertion stitch a prefix walk to a suffix walk through
//! [`search_from`](OccurrenceTrie::search_from), so candidates are validated
//! without re-walking from the root for every symbol.

use super::alphabet::{symbol_char, symbol_index, ALPHABET_SIZE};
use super::Occurrence;
use crate::error::{CompletionError, Result};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A node of the occurrence trie.
#[derive(Debug)]
pub struct TrieNode {
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    occurrences: Vec<Occurrence>,
    is_end_of_word: bool,
}

impl TrieNode {
    fn new() -> Self {
        TrieNode {
            children: std::array::from_fn(|_| None),
            occurrences: Vec::new(),
            is_end_of_word: false,
        }
    }

    /// Whether an indexed word ends at this node
    #[inline]
    pub fn is_end_of_word(&self) -> bool {
        self.is_end_of_word
    }

    /// Occurrences of the word ending at this node, in insertion order
    #[inline]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Child reached through the given alphabet slot
    #[inline]
    pub fn child(&self, symbol: usize) -> Option<&TrieNode> {
        self.children.get(symbol)?.as_deref()
    }

    /// Iterate over the populated child slots as `(symbol, child)` pairs
    pub fn children(&self) -> impl Iterator<Item = (usize, &TrieNode)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(symbol, child)| child.as_deref().map(|node| (symbol, node)))
    }
}

/// Snapshot of the trie's lookup counters.
///
/// `exact_lookups` counts calls to [`OccurrenceTrie::search`];
/// `traversals` counts calls to [`OccurrenceTrie::search_from`], which the
/// edit primitives issue once per prefix and once per candidate suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Exact word lookups
    pub exact_lookups: usize,
    /// Partial walks from an arbitrary node
    pub traversals: usize,
}

#[derive(Debug, Default)]
struct Counters {
    exact_lookups: AtomicUsize,
    traversals: AtomicUsize,
}

/// Prefix tree from normalized words to the places they occur.
///
/// The trie is built once and then only read. Its instrumentation counters
/// are atomics, so a built trie can be shared between threads as is.
#[derive(Debug)]
pub struct OccurrenceTrie {
    root: TrieNode,
    word_count: usize,
    node_count: usize,
    occurrence_count: usize,
    counters: Counters,
}

impl OccurrenceTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        OccurrenceTrie {
            root: TrieNode::new(),
            word_count: 0,
            node_count: 1,
            occurrence_count: 0,
            counters: Counters::default(),
        }
    }

    /// The root node
    #[inline]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Record one occurrence of `word`.
    ///
    /// Repeated insertion of the same word only grows its occurrence list.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::EmptyWord`] for an empty word and
    /// [`CompletionError::InvalidAlphabet`] if any character is outside
    /// `[a-z0-9]` (case-insensitive). The trie is left untouched on error.
    pub fn insert(&mut self, word: &str, occurrence: Occurrence) -> Result<()> {
        if word.is_empty() {
            return Err(CompletionError::EmptyWord);
        }

        let mut path: SmallVec<[usize; 24]> = SmallVec::with_capacity(word.len());
        for ch in word.chars() {
            match symbol_index(ch) {
                Some(symbol) => path.push(symbol),
                None => {
                    return Err(CompletionError::InvalidAlphabet {
                        word: word.to_string(),
                        ch,
                    })
                }
            }
        }

        let mut created = 0;
        let mut node = &mut self.root;
        for symbol in path {
            node = node.children[symbol].get_or_insert_with(|| {
                created += 1;
                Box::new(TrieNode::new())
            });
        }
        self.node_count += created;

        if !node.is_end_of_word {
            node.is_end_of_word = true;
            self.word_count += 1;
        }
        node.occurrences.push(occurrence);
        self.occurrence_count += 1;
        Ok(())
    }

    /// Every occurrence of exactly `word`.
    ///
    /// Returns an empty slice when any part of the path is missing, when the
    /// path ends on a node that is only a prefix of longer words, or when
    /// `word` contains a character outside the alphabet.
    pub fn search(&self, word: &str) -> &[Occurrence] {
        self.counters.exact_lookups.fetch_add(1, Ordering::Relaxed);
        match walk(&self.root, word) {
            Some(node) if node.is_end_of_word => &node.occurrences,
            _ => &[],
        }
    }

    /// Walk `word` starting at `node`.
    ///
    /// Returns the node at the end of the path, or `None` if the path leaves
    /// the trie. The returned node need not be end-of-word.
    pub fn search_from<'a>(&self, node: &'a TrieNode, word: &str) -> Option<&'a TrieNode> {
        self.counters.traversals.fetch_add(1, Ordering::Relaxed);
        walk(node, word)
    }

    /// Indexed words obtained by replacing the character at `index` with any
    /// other alphabet symbol.
    ///
    /// Returns nothing when `index` is past the end of `word`.
    pub fn change_letter(&self, word: &str, index: usize) -> Vec<String> {
        if index >= word.len() || !word.is_ascii() {
            return Vec::new();
        }
        let (prefix, rest) = word.split_at(index);
        let current = rest.chars().next().and_then(symbol_index);
        let suffix = &rest[1..];

        let Some(prefix_node) = self.search_from(&self.root, prefix) else {
            return Vec::new();
        };

        let mut words = Vec::new();
        for (symbol, child) in prefix_node.children() {
            if Some(symbol) == current {
                continue;
            }
            if self
                .search_from(child, suffix)
                .is_some_and(TrieNode::is_end_of_word)
            {
                words.push(splice(prefix, symbol, suffix));
            }
        }
        words
    }

    /// Indexed words obtained by inserting one alphabet symbol before the
    /// character at `index`.
    ///
    /// Only positions inside the word are tried: appending after the last
    /// character is not an insertion this primitive performs.
    pub fn add_letter(&self, word: &str, index: usize) -> Vec<String> {
        if index >= word.len() || !word.is_ascii() {
            return Vec::new();
        }
        let (prefix, suffix) = word.split_at(index);

        let Some(prefix_node) = self.search_from(&self.root, prefix) else {
            return Vec::new();
        };

        let mut words = Vec::new();
        for (symbol, child) in prefix_node.children() {
            if self
                .search_from(child, suffix)
                .is_some_and(TrieNode::is_end_of_word)
            {
                words.push(splice(prefix, symbol, suffix));
            }
        }
        words
    }

    /// The word with the character at `index` removed, if that word is
    /// indexed.
    ///
    /// Unlike the other primitives this performs a fresh exact lookup of the
    /// whole candidate.
    pub fn remove_letter(&self, word: &str, index: usize) -> Vec<String> {
        if index >= word.len() || !word.is_ascii() {
            return Vec::new();
        }
        let candidate = format!("{}{}", &word[..index], &word[index + 1..]);
        if self.search(&candidate).is_empty() {
            Vec::new()
        } else {
            vec![candidate]
        }
    }

    /// Number of distinct indexed words
    #[inline]
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether no word has been indexed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of nodes, including the root
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Total number of recorded occurrences
    #[inline]
    pub fn occurrence_count(&self) -> usize {
        self.occurrence_count
    }

    /// Current values of the lookup counters
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            exact_lookups: self.counters.exact_lookups.load(Ordering::Relaxed),
            traversals: self.counters.traversals.load(Ordering::Relaxed),
        }
    }

    /// Reset the lookup counters to zero
    pub fn reset_stats(&self) {
        self.counters.exact_lookups.store(0, Ordering::Relaxed);
        self.counters.traversals.store(0, Ordering::Relaxed);
    }
}

impl Default for OccurrenceTrie {
    fn default() -> Self {
        Self::new()
    }
}

fn walk<'a>(mut node: &'a TrieNode, word: &str) -> Option<&'a TrieNode> {
    for ch in word.chars() {
        node = node.child(symbol_index(ch)?)?;
    }
    Some(node)
}

fn splice(prefix: &str, symbol: usize, suffix: &str) -> String {
    let mut word = String::with_capacity(prefix.len() + 1 + suffix.len());
    word.push_str(prefix);
    word.push(symbol_char(symbol));
    word.push_str(suffix);
    word
}
