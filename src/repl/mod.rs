//! Interactive REPL for phrase completion
//!
//! Every line that is not a meta command is completed against the loaded
//! corpus and the top results are printed.

pub mod command;
pub mod helper;
pub mod state;

pub use command::{Command, CommandResult, EMPTY_QUERY_MESSAGE};
pub use helper::CompletionHelper;
pub use state::ReplState;

/// REPL configuration
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string
    pub prompt: String,
    /// History file path
    pub history_file: Option<std::path::PathBuf>,
    /// Maximum history entries
    pub max_history: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "Enter your text: ".to_string(),
            history_file: Some(
                dirs::home_dir()
                    .unwrap_or_else(|| std::path::PathBuf::from("."))
                    .join(".phrase_complete_history"),
            ),
            max_history: 1000,
        }
    }
}
