//! Configuration loading
//!
//! Config file lookup follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. `PB_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/pb/config.toml` on Linux)
//!
//! A missing file is not an error: callers get compiled defaults and a
//! warning. A file that exists but does not parse is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PB_CONFIG";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Overrides for the phrase splitter
    #[serde(default)]
    pub split: SplitOverrides,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Optional splitter settings read from the `[split]` table.
///
/// Every field is optional; unset fields leave the compiled default alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SplitOverrides {
    pub min_silence_len_ms: Option<u64>,
    pub silence_thresh_db: Option<f64>,
    pub keep_silence_ms: Option<u64>,
    pub window_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub base_name: Option<String>,
    /// Output format name ("wav" or "mp3")
    pub output_format: Option<String>,
    pub write_manifest: Option<bool>,
}

/// Resolve which config file to read, if any.
///
/// Returns `None` when no candidate exists. An explicitly named file
/// (argument or environment) is returned even if it does not exist so the
/// caller can report it.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    let user_config = default_config_path()?;
    if user_config.exists() {
        Some(user_config)
    } else {
        None
    }
}

/// Platform default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pb").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Parse TOML config text
pub fn parse_toml_config(content: &str) -> std::result::Result<TomlConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No candidate file; compiled defaults
    Defaults,
    /// A named file did not exist; compiled defaults
    Missing(PathBuf),
    /// Parsed from this file
    File(PathBuf),
}

impl ConfigSource {
    /// Log how the configuration was resolved.
    ///
    /// Kept apart from [`load_config`] so binaries can load the config, set
    /// up their subscriber from it, and then report the outcome.
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => debug!("No config file found, using compiled defaults"),
            ConfigSource::Missing(path) => warn!(
                path = %path.display(),
                "Config file not found, using compiled defaults"
            ),
            ConfigSource::File(path) => info!(path = %path.display(), "Loaded configuration"),
        }
    }
}

/// Load configuration without logging.
///
/// Missing file → defaults. Unreadable or malformed file → error.
pub fn load_config(cli_arg: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let Some(path) = resolve_config_path(cli_arg) else {
        return Ok((TomlConfig::default(), ConfigSource::Defaults));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    let config = load_toml_config(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// Load configuration with graceful degradation, logging the outcome
pub fn load_or_default(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let (config, source) = load_config(cli_arg)?;
    source.log();
    Ok(config)
}
