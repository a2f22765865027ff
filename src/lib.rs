//! # phrase-complete
//!
//! In-memory phrase autocompletion over a corpus of plain-text documents.
//!
//! Every line of every document is normalized (ASCII letters and digits
//! only, lowercased) and indexed word by word in a character trie that
//! records where each word occurs. A query is matched as a contiguous
//! phrase; when that yields too few results, single-character typo
//! corrections of the query words are tried in a fixed priority order.
//!
//! ## Example
//!
//! ```
//! use phrase_complete::prelude::*;
//!
//! let corpus = Corpus::from_documents([
//!     vec!["The quick brown fox.", "A lazy dog sleeps."],
//!     vec!["Quick thinking saves the day."],
//! ])?;
//! let engine = CompletionEngine::new(corpus);
//!
//! for completion in engine.complete("quick brwn", 5)? {
//!     println!("{completion}");
//! }
//! # Ok::<(), phrase_complete::CompletionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod error;
pub mod index;
pub mod search;

/// Interactive REPL for querying a loaded corpus
#[cfg(feature = "cli")]
pub mod repl;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

pub use error::{CompletionError, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::corpus::{Corpus, CorpusBuilder, CorpusLoader, CorpusStats};
    pub use crate::error::{CompletionError, Result};
    pub use crate::index::{Occurrence, OccurrenceLookup, OccurrenceTrie};
    pub use crate::search::{
        Completion, CompletionConfig, CompletionEngine, FuzzyCorrector, PhraseMatcher, Tier,
    };
}
