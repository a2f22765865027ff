//! Single-pass construction of the index and the sentence store.

use super::normalize::{normalize_line, tokenize};
use super::store::{CorpusStore, Sentence};
use super::Corpus;
use crate::error::Result;
use crate::index::{Occurrence, OccurrenceTrie};
use tracing::trace;

/// Builds a [`Corpus`] one document at a time.
///
/// Every line is normalized; blank results are skipped and do not count as
/// sentences. Each surviving word is inserted into the index with its
/// `(document_id, sentence_id, position)` and the same words are kept in
/// the store, so occurrences always resolve.
///
/// # Example
///
/// ```
/// use phrase_complete::corpus::CorpusBuilder;
///
/// let mut builder = CorpusBuilder::new();
/// assert_eq!(builder.add_document(["The cat sat.", "", "On the mat!"])?, Some(0));
/// assert_eq!(builder.add_document(["...", "   "])?, None);
/// assert_eq!(builder.add_document(["Another one"])?, Some(1));
///
/// let corpus = builder.build();
/// assert_eq!(corpus.index().search("mat").len(), 1);
/// # Ok::<(), phrase_complete::CompletionError>(())
/// ```
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    index: OccurrenceTrie,
    store: CorpusStore,
}

impl CorpusBuilder {
    /// Create a builder whose first document gets id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose first document gets id `offset`.
    pub fn with_document_offset(offset: usize) -> Self {
        CorpusBuilder {
            index: OccurrenceTrie::new(),
            store: CorpusStore::with_first_document_id(offset),
        }
    }

    /// Index one document given as lines of raw text.
    ///
    /// Returns the id assigned to the document, or `None` if no line
    /// survived normalization. Such a document does not consume an id.
    ///
    /// # Errors
    ///
    /// Propagates index insertion errors. Normalized tokens are always
    /// indexable, so this only fails if normalization itself is broken; the
    /// builder must be discarded in that case.
    pub fn add_document<I, S>(&mut self, lines: I) -> Result<Option<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let document_id = self.store.next_document_id();
        let mut sentences: Vec<Sentence> = Vec::new();

        for line in lines {
            let Some(line) = normalize_line(line.as_ref()) else {
                continue;
            };
            let sentence_id = sentences.len();
            let mut words = Sentence::new();
            for (position, word) in tokenize(&line).enumerate() {
                self.index
                    .insert(word, Occurrence::new(document_id, sentence_id, position))?;
                words.push(word.to_string());
            }
            sentences.push(words);
        }

        if sentences.is_empty() {
            trace!(document_id, "document has no indexable sentences");
            return Ok(None);
        }

        trace!(document_id, sentences = sentences.len(), "indexed document");
        Ok(Some(self.store.push_document(sentences)))
    }

    /// Number of documents indexed so far
    #[inline]
    pub fn document_count(&self) -> usize {
        self.store.len()
    }

    /// Finish building.
    pub fn build(self) -> Corpus {
        Corpus {
            index: self.index,
            store: self.store,
        }
    }
}
