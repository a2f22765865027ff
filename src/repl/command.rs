//! Command parsing and execution
//!
//! Input starting with `:` is a meta command. Anything else is normalized
//! first; `exit` and `quit` then end the session and all other text is
//! completed.

use super::state::ReplState;
use crate::cli::commands::format_completions;
use crate::corpus::normalize;
use anyhow::{bail, Context, Result};

/// Printed when a query has nothing left after normalization.
pub const EMPTY_QUERY_MESSAGE: &str = "You didn't enter a text.";

/// REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Complete the given text
    Query {
        /// Normalized query text
        text: String,
    },
    /// Show or set the result limit: :limit [n]
    Limit {
        /// New limit, or `None` to show the current one
        limit: Option<usize>,
    },
    /// Show corpus statistics: :stats
    Stats,
    /// Show help: :help
    Help,
    /// Exit REPL: exit | quit | :exit | :quit
    Exit,
}

/// Command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Continue REPL
    Continue(String),
    /// Exit REPL
    Exit,
}

impl Command {
    /// Parse command from input string
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let Some(meta) = input.strip_prefix(':') else {
            let text = normalize(input);
            if text == "exit" || text == "quit" {
                return Ok(Self::Exit);
            }
            return Ok(Self::Query { text });
        };

        let parts: Vec<&str> = meta.split_whitespace().collect();
        let Some(cmd) = parts.first().map(|cmd| cmd.to_lowercase()) else {
            bail!("Empty command. Type ':help' for available commands.");
        };

        match cmd.as_str() {
            "limit" => Self::parse_limit(&parts[1..]),
            "stats" | "info" => Ok(Self::Stats),
            "help" | "?" => Ok(Self::Help),
            "exit" | "quit" => Ok(Self::Exit),
            _ => bail!(
                "Unknown command: ':{}'. Type ':help' for available commands.",
                cmd
            ),
        }
    }

    fn parse_limit(args: &[&str]) -> Result<Self> {
        let limit = match args.first() {
            None => None,
            Some(arg) => Some(arg.parse().context("Invalid limit value")?),
        };
        Ok(Self::Limit { limit })
    }

    /// Execute command
    pub fn execute(&self, state: &mut ReplState) -> Result<CommandResult> {
        match self {
            Self::Query { text } => {
                if text.is_empty() {
                    return Ok(CommandResult::Continue(EMPTY_QUERY_MESSAGE.to_string()));
                }
                let results = state.complete(text)?;
                let listing = if results.is_empty() {
                    "No completions found".to_string()
                } else {
                    format_completions(&results)
                };
                Ok(CommandResult::Continue(format!(
                    "You entered: {text}\n{listing}"
                )))
            }

            Self::Limit { limit: Some(limit) } => {
                state.set_limit(*limit)?;
                Ok(CommandResult::Continue(format!("Limit set to {}", limit)))
            }

            Self::Limit { limit: None } => {
                Ok(CommandResult::Continue(format!("Limit: {}", state.limit)))
            }

            Self::Stats => Ok(CommandResult::Continue(state.stats().to_string())),

            Self::Help => Ok(CommandResult::Continue(Self::help_text())),

            Self::Exit => Ok(CommandResult::Exit),
        }
    }

    fn help_text() -> String {
        [
            "Type any text to see the sentences it completes.",
            "",
            "Commands:",
            "  :limit [n]   Show or set the number of completions",
            "  :stats       Show corpus statistics",
            "  :help        Show this help",
            "  exit, quit   Leave the REPL",
        ]
        .join("\n")
    }
}
