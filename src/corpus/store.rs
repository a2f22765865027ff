//! Sentence storage used to turn occurrences back into text.

use crate::error::{CompletionError, Result};
use crate::index::Occurrence;

/// A sentence: the normalized words of one non-blank line.
pub type Sentence = Vec<String>;

/// A document: its sentences in file order.
pub type Document = Vec<Sentence>;

/// Ordered collection of documents, addressed by document id.
///
/// Document ids start at `first_document_id` (the loader's document offset)
/// and are contiguous from there.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    first_document_id: usize,
    documents: Vec<Document>,
}

impl CorpusStore {
    /// Create an empty store whose first document will get the given id.
    pub fn with_first_document_id(first_document_id: usize) -> Self {
        CorpusStore {
            first_document_id,
            documents: Vec::new(),
        }
    }

    /// Append a document and return its id.
    pub(crate) fn push_document(&mut self, document: Document) -> usize {
        self.documents.push(document);
        self.first_document_id + self.documents.len() - 1
    }

    /// Id that the next pushed document will receive
    #[inline]
    pub fn next_document_id(&self) -> usize {
        self.first_document_id + self.documents.len()
    }

    /// Look up a document by id
    pub fn document(&self, document_id: usize) -> Option<&Document> {
        let offset = document_id.checked_sub(self.first_document_id)?;
        self.documents.get(offset)
    }

    /// All documents in id order
    #[inline]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Resolve the sentence an occurrence points into.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::OccurrenceOutOfBounds`] if the document or
    /// sentence does not exist. Occurrences produced by the same build pass
    /// as this store always resolve.
    pub fn sentence(&self, occurrence: &Occurrence) -> Result<&[String]> {
        let document = self.document(occurrence.document_id);
        document
            .and_then(|doc| doc.get(occurrence.sentence_id))
            .map(Vec::as_slice)
            .ok_or_else(|| CompletionError::OccurrenceOutOfBounds {
                occurrence: *occurrence,
                documents: self.documents.len(),
                sentences: document.map_or(0, Vec::len),
            })
    }

    /// Number of documents
    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of sentences across all documents
    pub fn sentence_count(&self) -> usize {
        self.documents.iter().map(Vec::len).sum()
    }

    /// Number of words (tokens) across all documents
    pub fn word_count(&self) -> usize {
        self.documents
            .iter()
            .flatten()
            .map(Vec::len)
            .sum()
    }
}

/// Display label for a document.
///
/// Derived from the id alone; it is not looked up from the file system.
pub fn source_label(document_id: usize) -> String {
    format!("input\\{document_id}.txt")
}
