//! Utility modules
//!
//! This module contains the error type and logging setup shared by the
//! rest of the crate.

pub mod errors;
pub mod logging;

pub use errors::{ErrorSeverity, LangError, Result};
