//! Configuration handling for tasklist
//!
//! Configuration is read from `--config <path>` when given, otherwise from
//! `config.toml` in the user config directory (e.g.
//! `~/.config/tasklist/config.toml`). A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{TaskFilter, UNTITLED_TASK};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given
    pub default_format: OutputFormat,

    /// Status view for `list` when `--filter` is not given
    pub default_filter: TaskFilter,

    /// Name for tasks added with a blank name
    pub untitled_name: String,

    /// First id handed out when adding to an empty list
    pub first_id: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            default_filter: TaskFilter::All,
            untitled_name: UNTITLED_TASK.to_string(),
            first_id: 1,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "tasklist", "tasklist").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that TOML typing cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.untitled_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "untitled_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.default_filter, TaskFilter::All);
        assert_eq!(config.untitled_name, "Untitled Task");
        assert_eq!(config.first_id, 1);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
default_format = "json"
default_filter = "pending"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.default_filter, TaskFilter::Pending);
        assert_eq!(config.first_id, 1);
    }

    #[test]
    fn unknown_filter_means_all() {
        let config: Config = toml::from_str("default_filter = \"cancelled\"").unwrap();
        assert_eq!(config.default_filter, TaskFilter::All);
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "first_id = 100\nuntitled_name = \"Todo\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.first_id, 100);
        assert_eq!(config.untitled_name, "Todo");
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_filter = 3").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn blank_untitled_name_is_rejected() {
        let config = Config {
            untitled_name: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
