//! Configuration file support for the CLI.
//!
//! Loads and saves CLI configuration from TOML files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tabula_sql::storage::DEFAULT_EXTENSION;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the table files. Defaults to the working directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Extension of table files.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Default output format.
    #[serde(default = "default_format")]
    pub output_format: String,

    /// Enable timing by default.
    #[serde(default)]
    pub timing: bool,

    /// History file path.
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Maximum history size.
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Prompt shown while waiting for a query.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_format() -> String {
    "csv".to_string()
}

fn default_history_size() -> usize {
    1000
}

fn default_prompt() -> String {
    "tabula> ".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            extension: default_extension(),
            output_format: default_format(),
            timing: false,
            history_file: None,
            history_size: default_history_size(),
            prompt: default_prompt(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads the default configuration file.
    ///
    /// Looks in the following locations:
    /// 1. ~/.config/tabula/config.toml
    /// 2. ~/.tabula/config.toml
    /// 3. Returns default if not found
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".tabula").join("config.toml");
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Returns the default configuration file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tabula").join("config.toml"))
    }

    /// Returns the directory to load tables from.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns the history file, falling back to the local data directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("tabula").join("history")))
    }
}
