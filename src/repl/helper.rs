//! Rustyline helper integration
//!
//! Completes meta command names, hints from history, and dims meta
//! commands so they stand apart from query text.

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

const META_COMMANDS: [&str; 5] = [":limit", ":stats", ":help", ":exit", ":quit"];

/// REPL helper
pub struct CompletionHelper {
    hinter: HistoryHinter,
}

impl CompletionHelper {
    /// Create a new helper instance
    pub fn new() -> Self {
        Self {
            hinter: HistoryHinter::new(),
        }
    }

    /// Meta commands starting with `prefix`
    pub fn meta_candidates(prefix: &str) -> Vec<Pair> {
        let prefix = prefix.to_lowercase();
        META_COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}

impl Default for CompletionHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for CompletionHelper {}

impl Completer for CompletionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let line = &line[..pos];
        let typing_meta = line.starts_with(':') && !line.contains(char::is_whitespace);
        if typing_meta {
            Ok((0, Self::meta_candidates(line)))
        } else {
            Ok((pos, Vec::new()))
        }
    }
}

impl Hinter for CompletionHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for CompletionHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) if cmd.starts_with(':') => {
                Cow::Owned(format!("{} {}", cmd.cyan().bold(), rest))
            }
            None if line.starts_with(':') => Cow::Owned(line.cyan().bold().to_string()),
            _ => Cow::Borrowed(line),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with(':')
    }
}

impl Validator for CompletionHelper {}
