//! phrase-complete - Phrase autocompletion with typo correction
//!
//! Provides one-shot CLI commands and an interactive REPL over a corpus of
//! `.txt` files.

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use phrase_complete::cli::commands::{self, load_engine};
use phrase_complete::cli::{resolve_data_path, Cli, Commands, PersistentConfig};
use phrase_complete::repl::{Command, CommandResult, CompletionHelper, ReplConfig, ReplState};
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Repl { data, limit } => run_repl(data, limit, config_path),
        command => commands::execute(command, config_path),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_repl(
    data: Option<PathBuf>,
    limit: Option<usize>,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = PersistentConfig::load_from(config_path)
        .unwrap_or_default()
        .merge_with_cli(data.clone(), limit);
    let data_path = resolve_data_path(data, &config)?;

    print_banner();
    println!(
        "  Loading corpus from {}...",
        data_path.display().to_string().cyan()
    );
    let engine = load_engine(&data_path, &config)?;
    let stats = engine.corpus().stats();
    println!(
        "  Loaded {} document(s), {} sentence(s)",
        stats.documents.to_string().green().bold(),
        stats.sentences.to_string().green().bold()
    );
    println!();

    let mut state = ReplState::new(engine);
    let repl_config = ReplConfig::default();

    let rustyline_config = Config::builder()
        .auto_add_history(true)
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .max_history_size(repl_config.max_history)?
        .build();

    let mut editor: Editor<CompletionHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(rustyline_config)?;
    editor.set_helper(Some(CompletionHelper::new()));

    if let Some(history_path) = &repl_config.history_file {
        if history_path.exists() {
            let _ = editor.load_history(history_path);
        }
    }

    loop {
        let line = match editor.readline(&repl_config.prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}: {:?}", "Readline error".red().bold(), err);
                break;
            }
        };

        let outcome = Command::parse(&line).and_then(|command| command.execute(&mut state));
        match outcome {
            Ok(CommandResult::Continue(output)) => println!("{}", output),
            Ok(CommandResult::Exit) => break,
            Err(e) => eprintln!("{}: {:#}", "Error".red().bold(), e),
        }
    }

    if let Some(history_path) = &repl_config.history_file {
        if let Err(e) = editor.save_history(history_path) {
            eprintln!("{}: Failed to save history: {}", "Warning".yellow(), e);
        }
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!(
        "{}",
        "═══════════════════════════════════════════════════════".bright_cyan()
    );
    println!(
        "{}",
        "   phrase-complete - Phrase Autocompletion".bright_cyan().bold()
    );
    println!(
        "{}",
        "═══════════════════════════════════════════════════════".bright_cyan()
    );
    println!();
    println!("  Version: {}", env!("CARGO_PKG_VERSION").green());
    println!("  Type {} for available commands", "':help'".yellow().bold());
    println!(
        "  Type {} or press {} to exit",
        "'exit'".yellow().bold(),
        "Ctrl+D".yellow().bold()
    );
    println!();
}
