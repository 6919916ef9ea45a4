//! Host collaborator contract
//!
//! The language controller needs two things from the plugin hosting it: a
//! data directory to keep language files in, and a logger for reporting
//! storage failures.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, trace, warn, Level};

/// The plugin a [`Lang`](crate::Lang) controller belongs to
pub trait Plugin: Send + Sync {
    /// Root of the plugin's data directory
    fn data_folder(&self) -> &Path;

    /// Report a message at the given severity
    ///
    /// Hosts with their own logger override this; the default forwards to
    /// `tracing` tagged with the data folder.
    fn log(&self, level: Level, message: &str) {
        let folder = self.data_folder().display();
        match level {
            Level::ERROR => error!(data_folder = %folder, "{}", message),
            Level::WARN => warn!(data_folder = %folder, "{}", message),
            Level::INFO => info!(data_folder = %folder, "{}", message),
            Level::DEBUG => debug!(data_folder = %folder, "{}", message),
            _ => trace!(data_folder = %folder, "{}", message),
        }
    }
}

/// A host that is nothing more than a data directory
#[derive(Debug, Clone)]
pub struct DataFolder {
    path: PathBuf,
}

impl DataFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Plugin for DataFolder {
    fn data_folder(&self) -> &Path {
        &self.path
    }
}
