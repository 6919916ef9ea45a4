//! Configuration validation module
//!
//! This module provides validation functions for host configuration so that
//! a bad value is reported at startup instead of on the first language switch.

use super::Settings;
use crate::lang::controller::validate_language_name;
use crate::utils::errors::{LangError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_lang_config(&settings.lang)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate language controller configuration
fn validate_lang_config(config: &super::LangConfig) -> Result<()> {
    if config.data_folder.as_os_str().is_empty() {
        return Err(LangError::Config("Data folder is required".to_string()));
    }

    validate_language_name(&config.default_language)
        .map_err(|e| LangError::Config(format!("Default language is invalid: {}", e)))?;

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LangError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(LangError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    if config.directory.is_some() && config.file_prefix.is_empty() {
        return Err(LangError::Config(
            "Log file prefix is required when a log directory is set".to_string(),
        ));
    }

    Ok(())
}
