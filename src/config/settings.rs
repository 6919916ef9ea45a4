//! Host settings management
//!
//! This module defines the configuration structure a host uses to set up the
//! language controller and logging, and provides methods for loading settings
//! from configuration files and environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::errors::Result;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub lang: LangConfig,
    pub logging: LoggingConfig,
}

/// Language controller configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LangConfig {
    /// Plugin data directory; language files live in its `lang` subdirectory
    pub data_folder: PathBuf,
    /// Language made active when the controller is created
    pub default_language: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling log files; stdout only when unset
    pub directory: Option<String>,
    pub file_prefix: String,
    /// Emit stdout events as JSON lines
    pub json: bool,
}

impl Default for LangConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("plugins/lang-host"),
            default_language: "en".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "plugin-lang.log".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from the optional `config` file and environment variables
    ///
    /// Environment variables use the `PLUGIN_LANG` prefix with `__` between
    /// sections, e.g. `PLUGIN_LANG__LANG__DEFAULT_LANGUAGE=de`.
    pub fn new() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("PLUGIN_LANG")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load settings from an explicit file, falling back to defaults for
    /// anything the file leaves out
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }
}
