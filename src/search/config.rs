//! Query-time settings.

use std::time::Duration;

/// Number of completions returned when the caller does not ask for a count.
pub const DEFAULT_LIMIT: usize = 5;

/// Positional gap between consecutive query words (1 = adjacent).
pub const DEFAULT_PHRASE_SHIFT: usize = 1;

/// Settings for [`CompletionEngine`](super::CompletionEngine).
///
/// ```
/// use phrase_complete::search::CompletionConfig;
/// use std::time::Duration;
///
/// let config = CompletionConfig::default()
///     .with_limit(10)
///     .with_correction_deadline(Duration::from_millis(50));
/// assert_eq!(config.limit, 10);
/// assert_eq!(config.correction_deadline(), Some(Duration::from_millis(50)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Completions returned by [`suggest`](super::CompletionEngine::suggest)
    pub limit: usize,
    /// Base shift for phrase matching
    pub phrase_shift: usize,
    /// Time budget for typo correction, in milliseconds
    pub correction_deadline_ms: Option<u64>,
}

impl CompletionConfig {
    /// Set the default number of completions.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the base phrase shift.
    pub fn with_phrase_shift(mut self, shift: usize) -> Self {
        self.phrase_shift = shift;
        self
    }

    /// Bound the time spent in typo correction.
    pub fn with_correction_deadline(mut self, deadline: Duration) -> Self {
        self.correction_deadline_ms = Some(u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// The correction time budget, if any
    pub fn correction_deadline(&self) -> Option<Duration> {
        self.correction_deadline_ms.map(Duration::from_millis)
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            phrase_shift: DEFAULT_PHRASE_SHIFT,
            correction_deadline_ms: None,
        }
    }
}
