//! Default paths and persistent user settings

use crate::search::CompletionConfig;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Variable naming the corpus directory, read from the environment or a
/// `.env` file.
pub const DATA_PATH_ENV: &str = "PATH_TO_DATA";

/// File name searched for when resolving [`DATA_PATH_ENV`].
pub const DOTENV_FILE: &str = ".env";

/// Get the configuration directory for phrase-complete
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(base.join("phrase-complete"))
}

/// Get the default user config path
fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Get the config file path with optional override
pub fn config_file_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Validate that a config file path has .json extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(()),
        Some(ext) => bail!("Config file must have .json extension, got .{ext}"),
        None => bail!("Config file must have .json extension"),
    }
}

/// The nearest `.env` file in `start` or one of its ancestors.
pub fn find_dotenv(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DOTENV_FILE))
        .find(|path| path.is_file())
}

/// The [`DATA_PATH_ENV`] entry of the `.env` file at `path`.
///
/// When the key appears more than once the last value wins.
pub fn dotenv_data_path(path: &Path) -> Result<Option<PathBuf>> {
    let entries = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut value = None;
    for entry in entries {
        let (key, val) =
            entry.with_context(|| format!("Failed to parse {}", path.display()))?;
        if key == DATA_PATH_ENV {
            value = Some(PathBuf::from(val));
        }
    }
    Ok(value)
}

/// Pick the corpus directory: command line, then the `PATH_TO_DATA`
/// environment variable, then `PATH_TO_DATA` in the nearest `.env` file,
/// then the saved setting.
///
/// An unreadable `.env` file is logged and skipped.
pub fn resolve_data_path(cli_path: Option<PathBuf>, config: &PersistentConfig) -> Result<PathBuf> {
    let env_path = std::env::var_os(DATA_PATH_ENV).map(PathBuf::from);
    let dotenv_path = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_dotenv(&cwd))
        .and_then(|file| match dotenv_data_path(&file) {
            Ok(path) => path,
            Err(e) => {
                warn!(file = %file.display(), error = %format!("{e:#}"), "ignoring .env file");
                None
            }
        });
    resolve_data_path_from(cli_path, env_path, dotenv_path, config)
}

/// [`resolve_data_path`] with the environment and `.env` values passed in.
///
/// Empty values count as unset.
pub fn resolve_data_path_from(
    cli_path: Option<PathBuf>,
    env_path: Option<PathBuf>,
    dotenv_path: Option<PathBuf>,
    config: &PersistentConfig,
) -> Result<PathBuf> {
    let non_empty = |path: &PathBuf| !path.as_os_str().is_empty();
    cli_path
        .or(env_path.filter(non_empty))
        .or(dotenv_path.filter(non_empty))
        .or_else(|| config.data_path.clone())
        .with_context(|| {
            format!(
                "No corpus directory given. Pass --data, set {DATA_PATH_ENV} in the \
                 environment or a {DOTENV_FILE} file, or run \
                 `phrase-complete settings --set-data <DIR>`"
            )
        })
}

/// User configuration stored in config file
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistentConfig {
    /// Default corpus directory
    pub data_path: Option<PathBuf>,
    /// Default number of completions
    pub limit: Option<usize>,
    /// Typo-correction time budget in milliseconds
    pub correction_deadline_ms: Option<u64>,
}

impl PersistentConfig {
    /// Load configuration from `custom_path`, or the default location
    ///
    /// A missing file yields the defaults.
    pub fn load_from(custom_path: Option<&Path>) -> Result<Self> {
        let path = config_file_path(custom_path)?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to `custom_path`, or the default location
    pub fn save_to(&self, custom_path: Option<&Path>) -> Result<PathBuf> {
        let path = config_file_path(custom_path)?;
        validate_config_path(&path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(&self, data_path: Option<PathBuf>, limit: Option<usize>) -> Self {
        Self {
            data_path: data_path.or_else(|| self.data_path.clone()),
            limit: limit.or(self.limit),
            correction_deadline_ms: self.correction_deadline_ms,
        }
    }

    /// Engine settings derived from these options
    pub fn completion_config(&self) -> CompletionConfig {
        let mut config = CompletionConfig::default();
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        config.correction_deadline_ms = self.correction_deadline_ms;
        config
    }
}
