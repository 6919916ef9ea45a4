//! Logging configuration and setup
//!
//! This module provides subscriber initialization for hosts that do not
//! install their own, and structured logging helpers for language events.

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::{LangError, Result};

/// Initialize logging based on configuration
///
/// When a log directory is configured, events are also written to a daily
/// rolling file. The returned guard must be held for as long as file output
/// is wanted; dropping it flushes and stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| LangError::Logging(format!("invalid level '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = config
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout));
    let plain_layer = (!config.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(plain_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LangError::Logging(e.to_string()))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log the outcome of an active-language switch
pub fn log_language_switch(from: &str, to: &str, success: bool) {
    if success {
        info!(from = from, to = to, "Active language switched");
    } else {
        error!(from = from, to = to, "Active language switched but file sync failed");
    }
}

/// Log a module registration with the number of seeded keys
pub fn log_module_registered(module: &str, keys: usize) {
    debug!(module = module, keys = keys, "Language module registered");
}
