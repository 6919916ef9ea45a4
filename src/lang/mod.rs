//! Language definitions module
//!
//! This module handles per-module language strings for a plugin: default
//! registration, YAML file persistence for the active language, and
//! formatting with positional arguments and colour codes.

pub mod controller;
pub mod definitions;
pub mod file;
pub mod format;
pub mod host;
pub mod module;

// Re-export commonly used language components
pub use controller::{Lang, DEFAULT_LANGUAGE};
pub use definitions::LangDefinitions;
pub use file::LangFile;
pub use format::{coloured, or_blank, strip_colour, substitute};
pub use host::{DataFolder, Plugin};
pub use module::LangModule;
