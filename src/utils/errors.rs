//! Error handling for plugin-lang
//!
//! This module defines the error type shared by the language controller,
//! the definition tables and the file store, along with a small
//! classification API used when deciding how loudly to report a failure.

use thiserror::Error;

/// Main error type for plugin-lang
#[derive(Error, Debug)]
pub enum LangError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on language file {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse language file {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize language file {file}: {source}")]
    Serialize {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid language file {file}: {reason}")]
    InvalidDocument { file: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

/// Result type alias for plugin-lang operations
pub type Result<T> = std::result::Result<T, LangError>;

impl LangError {
    /// Shorthand for an invalid-argument error
    pub fn invalid(message: impl Into<String>) -> Self {
        LangError::InvalidArgument(message.into())
    }

    /// Check if the error is recoverable
    ///
    /// Storage problems are transient from the caller's point of view: the
    /// in-memory definitions stay usable and a later load or save may work.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LangError::InvalidArgument(_) => false,
            LangError::Io { .. } => true,
            LangError::Parse { .. } => true,
            LangError::Serialize { .. } => true,
            LangError::InvalidDocument { .. } => true,
            LangError::Config(_) => false,
            LangError::ConfigLoad(_) => false,
            LangError::Logging(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LangError::InvalidArgument(_) => ErrorSeverity::Info,
            LangError::Config(_) => ErrorSeverity::Critical,
            LangError::ConfigLoad(_) => ErrorSeverity::Critical,
            LangError::Logging(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl ErrorSeverity {
    /// Tracing level used when reporting an error of this severity
    pub fn level(self) -> tracing::Level {
        match self {
            ErrorSeverity::Info => tracing::Level::INFO,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Error | ErrorSeverity::Critical => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
