//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phrase-complete")]
#[command(about = "Phrase autocompletion with typo correction over a text corpus")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a corpus and complete queries interactively
    Repl {
        /// Corpus directory
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Number of completions per query
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Complete a single query
    Query {
        /// Query text
        text: String,

        /// Corpus directory
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Number of completions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print completions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display corpus statistics
    Stats {
        /// Corpus directory
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Show or update user settings
    Settings {
        /// Set default corpus directory
        #[arg(long)]
        set_data: Option<PathBuf>,

        /// Set default number of completions
        #[arg(long)]
        set_limit: Option<usize>,

        /// Set the typo-correction time budget in milliseconds
        #[arg(long)]
        set_deadline_ms: Option<u64>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
