//! Configuration management for find-and-replace
//!
//! Settings live in ~/.find-and-replace/config.toml, or wherever the
//! FIND_AND_REPLACE_CONFIG environment variable points. A missing file means
//! defaults; command-line flags override whatever the file says.

use crate::match_formatter::ColorMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "FIND_AND_REPLACE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// "auto", "always" or "never"
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_show_context")]
    pub show_context: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            show_context: default_show_context(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub debug: bool,
}

fn default_color() -> String { "auto".to_string() }
fn default_show_context() -> bool { true }

impl Config {
    /// Parsed color mode; call [`validate_config`] first
    pub fn color_mode(&self) -> ColorMode {
        ColorMode::parse(&self.display.color).unwrap_or_default()
    }
}

/// Directory holding the config file and the debug log
pub fn app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".find-and-replace"))
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    Ok(app_dir()?.join("config.toml"))
}

/// Load configuration from the default location
///
/// Read-only: a missing file means defaults and nothing is created.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path()?)
}

/// Load configuration from `path`, falling back to defaults if it does not exist
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if ColorMode::parse(&config.display.color).is_none() {
        anyhow::bail!(
            "Invalid color: {} (must be 'auto', 'always', or 'never')",
            config.display.color
        );
    }

    Ok(())
}
