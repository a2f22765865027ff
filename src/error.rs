//! Error types for indexing and completion.

use crate::index::Occurrence;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a corpus or resolving completions.
///
/// A query that matches nothing is not an error: it produces an empty
/// result list.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// A token contains a character outside `[a-z0-9]`.
    ///
    /// Corpus text and queries are normalized before they reach the index,
    /// so this indicates a caller bypassing the normalizer.
    #[error("word {word:?} contains {ch:?}, which is outside the [a-z0-9] alphabet")]
    InvalidAlphabet {
        /// The offending word
        word: String,
        /// First character that could not be mapped
        ch: char,
    },

    /// An empty token was passed to the index.
    #[error("cannot index an empty word")]
    EmptyWord,

    /// An occurrence does not point at a sentence of the corpus store.
    ///
    /// The index and the store are built by the same pass, so this is a
    /// construction bug rather than a user error.
    #[error(
        "occurrence {occurrence} is outside the corpus store ({documents} documents, {sentences} sentences in the addressed document)"
    )]
    OccurrenceOutOfBounds {
        /// The dangling reference
        occurrence: Occurrence,
        /// Number of documents in the store
        documents: usize,
        /// Number of sentences in the addressed document (0 if it is missing)
        sentences: usize,
    },

    /// Reading the corpus failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The corpus root does not exist or is not a directory.
    #[error("corpus root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// A specialized `Result` type for indexing and completion operations.
pub type Result<T> = std::result::Result<T, CompletionError>;
