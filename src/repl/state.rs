//! REPL state management
//!
//! Owns the completion engine and the per-session result limit.

use crate::corpus::CorpusStats;
use crate::search::{Completion, CompletionEngine};
use anyhow::{bail, Result};

/// Mutable session state
#[derive(Debug)]
pub struct ReplState {
    engine: CompletionEngine,
    /// Completions printed per query
    pub limit: usize,
    /// Queries answered this session
    pub queries: usize,
}

impl ReplState {
    /// Start a session over `engine`, using its configured limit.
    pub fn new(engine: CompletionEngine) -> Self {
        let limit = engine.config().limit;
        Self {
            engine,
            limit,
            queries: 0,
        }
    }

    /// Complete `text` with the session limit.
    pub fn complete(&mut self, text: &str) -> Result<Vec<Completion>> {
        self.queries += 1;
        Ok(self.engine.complete(text, self.limit)?)
    }

    /// Change the session limit.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        if limit == 0 {
            bail!("Limit must be at least 1");
        }
        self.limit = limit;
        Ok(())
    }

    /// Size summary of the loaded corpus
    pub fn stats(&self) -> CorpusStats {
        self.engine.corpus().stats()
    }
}
