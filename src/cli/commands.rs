//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::corpus::{Corpus, CorpusLoader};
use crate::search::{Completion, CompletionEngine};

use super::args::Commands;
use super::paths::{config_file_path, resolve_data_path, PersistentConfig};

/// Execute a CLI command
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Repl { .. } => {
            // Handled in main.rs
            unreachable!("REPL command should be handled in main");
        }
        Commands::Query {
            text,
            data,
            limit,
            json,
        } => cmd_query(&text, data, limit, json, config_path),
        Commands::Stats { data } => cmd_stats(data, config_path),
        Commands::Settings {
            set_data,
            set_limit,
            set_deadline_ms,
            reset,
        } => cmd_settings(set_data, set_limit, set_deadline_ms, reset, config_path),
    }
}

/// Load the corpus below `data_path` and wrap it in an engine configured
/// from `config`.
pub fn load_engine(data_path: &Path, config: &PersistentConfig) -> Result<CompletionEngine> {
    Ok(CompletionEngine::with_config(
        load_corpus(data_path)?,
        config.completion_config(),
    ))
}

fn load_corpus(data_path: &Path) -> Result<Corpus> {
    let loader = CorpusLoader::new(data_path);
    loader
        .load()
        .with_context(|| format!("Failed to load corpus from {}", loader.root().display()))
}

/// Render completions as a numbered list, one per line.
pub fn format_completions(completions: &[Completion]) -> String {
    completions
        .iter()
        .enumerate()
        .map(|(i, completion)| format!("{}. {}", i + 1, completion))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Query command
fn cmd_query(
    text: &str,
    data: Option<PathBuf>,
    limit: Option<usize>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = PersistentConfig::load_from(config_path)?.merge_with_cli(data.clone(), limit);
    let data_path = resolve_data_path(data, &config)?;
    let engine = load_engine(&data_path, &config)?;

    let results = engine.suggest(text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", "No completions found".yellow());
    } else {
        println!("{}", format_completions(&results));
    }

    Ok(())
}

/// Stats command
fn cmd_stats(data: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let config = PersistentConfig::load_from(config_path)?;
    let data_path = resolve_data_path(data, &config)?;
    let stats = load_corpus(&data_path)?.stats();

    println!("{}", "Corpus Information".bold().underline());
    println!();
    println!("  Path:           {}", data_path.display().to_string().cyan());
    println!("  Documents:      {}", stats.documents.to_string().green());
    println!("  Sentences:      {}", stats.sentences.to_string().green());
    println!("  Words:          {}", stats.words.to_string().green());
    println!("  Distinct words: {}", stats.distinct_words.to_string().green());
    println!("  Trie nodes:     {}", stats.trie_nodes.to_string().green());

    Ok(())
}

/// Settings command
fn cmd_settings(
    set_data: Option<PathBuf>,
    set_limit: Option<usize>,
    set_deadline_ms: Option<u64>,
    reset: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    if reset {
        let config = PersistentConfig::default();
        config.save_to(config_path)?;
        println!("{}", "Configuration reset to defaults".green().bold());
        println!();
        print_config(&config, config_path);
        return Ok(());
    }

    let mut config = PersistentConfig::load_from(config_path).unwrap_or_default();
    let mut changed = false;

    if let Some(data) = set_data {
        if !data.is_dir() {
            eprintln!(
                "  {}: {} is not a directory",
                "Warning".yellow().bold(),
                data.display()
            );
        }
        println!(
            "  Set default corpus directory: {}",
            data.display().to_string().cyan()
        );
        config.data_path = Some(data);
        changed = true;
    }

    if let Some(limit) = set_limit {
        config.limit = Some(limit);
        println!("  Set default limit: {}", limit.to_string().green());
        changed = true;
    }

    if let Some(deadline) = set_deadline_ms {
        config.correction_deadline_ms = Some(deadline);
        println!(
            "  Set correction deadline: {} ms",
            deadline.to_string().green()
        );
        changed = true;
    }

    if changed {
        config.save_to(config_path)?;
        println!();
        println!("{}", "Configuration saved".green().bold());
    } else {
        print_config(&config, config_path);
    }

    Ok(())
}

fn print_config(config: &PersistentConfig, config_path: Option<&Path>) {
    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Current Settings".bold().underline());
    println!();
    if let Ok(path) = config_file_path(config_path) {
        println!("  Config file:         {}", path.display().to_string().cyan());
    }
    println!(
        "  Corpus directory:    {}",
        config
            .data_path
            .as_ref()
            .map_or_else(unset, |p| p.display().to_string().cyan().to_string())
    );
    println!(
        "  Limit:               {}",
        config
            .limit
            .map_or_else(unset, |l| l.to_string().green().to_string())
    );
    println!(
        "  Correction deadline: {}",
        config
            .correction_deadline_ms
            .map_or_else(unset, |ms| format!("{} ms", ms).green().to_string())
    );
}
