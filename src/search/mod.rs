//! Query answering: exact phrase matching, typo correction, and the
//! [`CompletionEngine`] that ties them together.
//!
//! A query is answered in two stages. The normalized query words are first
//! matched as a contiguous phrase against the index. If that yields fewer
//! results than requested, [`FuzzyCorrector`] tries single-character
//! variants of the query words, tier by tier, until enough matches are found
//! or the tiers run out.

pub mod completion;
pub mod config;
pub mod correction;
pub mod matcher;

pub use completion::{Completion, CompletionEngine, CompletionOutcome};
pub use config::{CompletionConfig, DEFAULT_LIMIT, DEFAULT_PHRASE_SHIFT};
pub use correction::{
    CorrectionReport, EditKind, EditPositions, EditRule, FuzzyCorrector, Tier, TierAttempt,
};
pub use matcher::{compare_indexes, filter_by_indexes, PhraseMatcher};
