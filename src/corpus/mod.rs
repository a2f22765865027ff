//! Corpus construction and storage.
//!
//! A [`Corpus`] is an immutable snapshot made of two structures built by the
//! same normalization pass:
//!
//! - the [`OccurrenceTrie`], mapping each word to where it occurs, and
//! - the [`CorpusStore`], holding the normalized sentences those
//!   occurrences point into.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use phrase_complete::corpus::{Corpus, CorpusLoader};
//!
//! // Every `.txt` file below `data/` becomes one document.
//! let corpus = CorpusLoader::new("data").load()?;
//! println!("{}", corpus.stats());
//! ```
//!
//! ## Numbering
//!
//! Document ids are assigned in load order starting at the loader's offset
//! (0 by default) and only advance for documents that contain at least one
//! non-blank line. Sentence ids count non-blank lines within a document and
//! word positions count tokens within a sentence, both from 0.

pub mod builder;
pub mod loader;
pub mod normalize;
pub mod store;

pub use builder::CorpusBuilder;
pub use loader::CorpusLoader;
pub use normalize::{normalize, normalize_line, tokenize};
pub use store::{source_label, CorpusStore, Document, Sentence};

use crate::error::Result;
use crate::index::OccurrenceTrie;
use std::fmt;
use std::path::Path;

/// Immutable index + sentence store pair.
#[derive(Debug)]
pub struct Corpus {
    index: OccurrenceTrie,
    store: CorpusStore,
}

impl Corpus {
    /// Build a corpus from in-memory documents, each given as lines.
    pub fn from_documents<D, L, S>(documents: D) -> Result<Self>
    where
        D: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = CorpusBuilder::new();
        for document in documents {
            builder.add_document(document)?;
        }
        Ok(builder.build())
    }

    /// Load every `.txt` file below `root`.
    ///
    /// Shorthand for `CorpusLoader::new(root).load()`.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        CorpusLoader::new(root).load()
    }

    /// The occurrence index
    #[inline]
    pub fn index(&self) -> &OccurrenceTrie {
        &self.index
    }

    /// The sentence store
    #[inline]
    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// Size summary
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            documents: self.store.len(),
            sentences: self.store.sentence_count(),
            words: self.store.word_count(),
            distinct_words: self.index.len(),
            trie_nodes: self.index.node_count(),
        }
    }
}

/// Size summary of a [`Corpus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CorpusStats {
    /// Documents with at least one sentence
    pub documents: usize,
    /// Non-blank lines
    pub sentences: usize,
    /// Word tokens
    pub words: usize,
    /// Distinct words in the index
    pub distinct_words: usize,
    /// Trie nodes, including the root
    pub trie_nodes: usize,
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Documents:      {}", self.documents)?;
        writeln!(f, "Sentences:      {}", self.sentences)?;
        writeln!(f, "Words:          {}", self.words)?;
        writeln!(f, "Distinct words: {}", self.distinct_words)?;
        write!(f, "Trie nodes:     {}", self.trie_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_documents_and_stats() {
        let corpus = Corpus::from_documents([
            vec!["the cat sat", "the dog ran"],
            vec!["", "a cat"],
            vec!["   "],
        ])
        .unwrap();

        let stats = corpus.stats();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.words, 8);
        assert_eq!(stats.distinct_words, 6);
        assert_eq!(corpus.index().search("cat").len(), 2);
    }

    #[test]
    fn test_stats_display() {
        let corpus = Corpus::from_documents([vec!["hi there"]]).unwrap();
        let text = corpus.stats().to_string();
        assert!(text.contains("Documents:      1"));
        assert!(text.contains("Distinct words: 2"));
    }

    #[test]
    fn test_corpus_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Corpus>();
    }
}
