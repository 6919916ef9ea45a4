//! Plugin Lang
//!
//! Language definitions for game-server plugins. Modules register default
//! strings under their own name, the active language's YAML file overrides
//! them, and strings are formatted with positional `{0}` arguments and `&`
//! colour codes for the host's chat.
//!
//! ```no_run
//! use std::sync::Arc;
//! use plugin_lang::{DataFolder, Lang, LangDefinitions, LangModule, Result};
//!
//! struct Shop;
//!
//! impl LangModule for Shop {
//!     fn define(&self, l: &LangDefinitions) -> Result<()> {
//!         l.define("bought", "&aYou bought {0} for {1} coins")
//!     }
//!
//!     fn name(&self) -> &str {
//!         "shop"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let lang = Lang::new(Arc::new(DataFolder::new("plugins/shop")));
//! lang.register(&Shop)?;
//! lang.load();
//! lang.save();
//! let message = lang.module("shop")?.format("bought", &[&"a sword", &120]);
//! # let _ = message;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod lang;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{LangError, Result};

// Re-export main components for easy access
pub use lang::{DataFolder, Lang, LangDefinitions, LangModule, Plugin};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
