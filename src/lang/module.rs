//! Module registration contract

use super::LangDefinitions;
use crate::utils::errors::Result;

/// Implemented by anything that owns a set of language definitions
///
/// A module's defaults are seeded once per controller lifetime through
/// [`Lang::register`](super::Lang::register). Use
/// [`LangDefinitions::define`] inside [`LangModule::define`] so values loaded
/// from the language file are kept.
pub trait LangModule {
    /// Seed default definitions
    fn define(&self, definitions: &LangDefinitions) -> Result<()>;

    /// Name of the module; also the section name in the language file
    ///
    /// Compared case-insensitively.
    fn name(&self) -> &str;
}
