//! CLI interface for phrase-complete
//!
//! Provides command-line utilities for loading a corpus and running queries.

pub mod args;
pub mod commands;
pub mod paths;

pub use args::{Cli, Commands};
pub use paths::{config_dir, resolve_data_path, PersistentConfig, DATA_PATH_ENV, DOTENV_FILE};
