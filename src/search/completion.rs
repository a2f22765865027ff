//! The query entry point: normalized text in, ranked sentences out.

use super::config::CompletionConfig;
use super::correction::{CorrectionReport, FuzzyCorrector};
use super::matcher::PhraseMatcher;
use crate::corpus::{normalize, source_label, tokenize, Corpus};
use crate::error::Result;
use crate::index::Occurrence;
use std::fmt;
use tracing::debug;

/// One completion: the sentence a match was found in, and where it came
/// from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Completion {
    /// Words of the matched sentence
    pub completed_sentence: Vec<String>,
    /// Label of the source document
    pub source_label: String,
    /// Sentence index within the source document
    pub offset: usize,
    /// Length of the normalized query that produced this completion
    pub query_length_at_match: usize,
}

impl Completion {
    /// Build a completion for `occurrence` from its resolved sentence.
    pub fn new(occurrence: &Occurrence, sentence: &[String], query_length: usize) -> Self {
        Completion {
            completed_sentence: sentence.to_vec(),
            source_label: source_label(occurrence.document_id),
            offset: occurrence.sentence_id,
            query_length_at_match: query_length,
        }
    }

    /// The sentence words joined by single spaces
    pub fn text(&self) -> String {
        self.completed_sentence.join(" ")
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. ({}, {})", self.text(), self.source_label, self.offset)
    }
}

/// Completions for a query together with how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// The normalized query text
    pub query: String,
    /// At most `k` completions, exact matches first
    pub completions: Vec<Completion>,
    /// Number of exact phrase matches before correction
    pub exact_matches: usize,
    /// The correction run, if exact matches fell short
    pub correction: Option<CorrectionReport>,
}

/// Answers completion queries against one corpus snapshot.
///
/// # Example
///
/// ```
/// use phrase_complete::corpus::Corpus;
/// use phrase_complete::search::CompletionEngine;
///
/// let corpus = Corpus::from_documents([vec!["The cat sat."]])?;
/// let engine = CompletionEngine::new(corpus);
///
/// let results = engine.complete("the CAT", 5)?;
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].to_string(), "the cat sat. (input\\0.txt, 0)");
/// # Ok::<(), phrase_complete::CompletionError>(())
/// ```
#[derive(Debug)]
pub struct CompletionEngine {
    corpus: Corpus,
    config: CompletionConfig,
}

impl CompletionEngine {
    /// Create an engine with the default configuration.
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, CompletionConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(corpus: Corpus, config: CompletionConfig) -> Self {
        CompletionEngine { corpus, config }
    }

    /// The corpus being queried
    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Current configuration
    #[inline]
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Mutable access to the configuration
    #[inline]
    pub fn config_mut(&mut self) -> &mut CompletionConfig {
        &mut self.config
    }

    /// Up to `k` completions for `query_text`.
    ///
    /// The query is normalized first; a query with nothing indexable left
    /// yields no completions. Exact phrase matches come first, followed by
    /// matches found through typo correction when there are fewer than `k`
    /// exact ones.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::OccurrenceOutOfBounds`] if a match does not
    /// resolve in the corpus store, which indicates a corrupt corpus.
    ///
    /// [`CompletionError::OccurrenceOutOfBounds`]: crate::CompletionError::OccurrenceOutOfBounds
    pub fn complete(&self, query_text: &str, k: usize) -> Result<Vec<Completion>> {
        Ok(self.complete_with_outcome(query_text, k)?.completions)
    }

    /// Completions using the configured default limit.
    pub fn suggest(&self, query_text: &str) -> Result<Vec<Completion>> {
        self.complete(query_text, self.config.limit)
    }

    /// Like [`complete`](Self::complete), also reporting exact-match count
    /// and the correction run.
    pub fn complete_with_outcome(&self, query_text: &str, k: usize) -> Result<CompletionOutcome> {
        let query = normalize(query_text);
        let words: Vec<&str> = tokenize(&query).collect();
        if words.is_empty() {
            return Ok(CompletionOutcome {
                query,
                completions: Vec::new(),
                exact_matches: 0,
                correction: None,
            });
        }

        let index = self.corpus.index();
        let mut occurrences =
            PhraseMatcher::new(index).search_words(&words, self.config.phrase_shift);
        let exact_matches = occurrences.len();
        debug!(query = %query, exact_matches, k, "phrase match");

        let correction = (exact_matches < k).then(|| {
            FuzzyCorrector::new(index)
                .with_shift(self.config.phrase_shift)
                .with_deadline(self.config.correction_deadline())
                .correct(&words, &mut occurrences, k - exact_matches)
        });
        occurrences.truncate(k);

        let store = self.corpus.store();
        let query_length = query.chars().count();
        let completions = occurrences
            .iter()
            .map(|occurrence| {
                store
                    .sentence(occurrence)
                    .map(|sentence| Completion::new(occurrence, sentence, query_length))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompletionOutcome {
            query,
            completions,
            exact_matches,
            correction,
        })
    }
}
