//! Language controller
//!
//! [`Lang`] owns the active language and every module's definitions for one
//! plugin. It is created once at host startup, shared behind an `Arc`, and
//! passed to whatever needs to register or format strings.
//!
//! Switching language reloads the new language file over the in-memory
//! definitions and immediately saves it again, so keys registered since the
//! file was last written show up in it with their defaults.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use super::definitions::normalize;
use super::file::{file_name, LangFile};
use super::{LangDefinitions, LangModule, Plugin};
use crate::config::LangConfig;
use crate::utils::errors::{LangError, Result};
use crate::utils::logging::{log_language_switch, log_module_registered};

/// Language active when none is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language definitions for a whole plugin, split into modules
pub struct Lang {
    host: Arc<dyn Plugin>,
    file: Mutex<LangFile>,
    modules: DashMap<String, Arc<LangDefinitions>>,
    language: RwLock<String>,
}

impl fmt::Debug for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.modules.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        f.debug_struct("Lang")
            .field("data_folder", &self.host.data_folder())
            .field("language", &*self.language.read())
            .field("modules", &names)
            .finish()
    }
}

impl Lang {
    /// Create a controller with [`DEFAULT_LANGUAGE`] active
    ///
    /// The language file is loaded and written straight away. A storage
    /// failure is reported through the host logger and does not prevent
    /// construction.
    pub fn new(host: Arc<dyn Plugin>) -> Self {
        let lang = Self::unsynced(host, DEFAULT_LANGUAGE);
        lang.sync();
        lang
    }

    /// Create a controller with `language` active
    pub fn with_language(host: Arc<dyn Plugin>, language: &str) -> Result<Self> {
        validate_language_name(language)?;
        let lang = Self::unsynced(host, language);
        lang.sync();
        Ok(lang)
    }

    /// Create a controller from host configuration
    pub fn from_config(host: Arc<dyn Plugin>, config: &LangConfig) -> Result<Self> {
        Self::with_language(host, &config.default_language)
    }

    fn unsynced(host: Arc<dyn Plugin>, language: &str) -> Self {
        Self {
            host,
            file: Mutex::new(LangFile::new()),
            modules: DashMap::new(),
            language: RwLock::new(language.to_string()),
        }
    }

    fn sync(&self) -> bool {
        self.load() && self.save()
    }

    /// Make `language` the active language
    ///
    /// Returns `Ok(true)` when the language is already active (compared
    /// case-insensitively) or when the new language file was loaded and saved,
    /// and `Ok(false)` when either step failed. The language stays switched
    /// either way.
    pub fn set_language(&self, language: &str) -> Result<bool> {
        validate_language_name(language)?;

        let previous = {
            let mut current = self.language.write();
            if current.to_lowercase() == language.to_lowercase() {
                return Ok(true);
            }
            std::mem::replace(&mut *current, language.to_string())
        };

        let success = self.sync();
        log_language_switch(&previous, language, success);
        Ok(success)
    }

    /// The active language
    pub fn language(&self) -> String {
        self.language.read().clone()
    }

    /// Get the definitions for module `name`, creating them if needed
    ///
    /// Names are case-insensitive; every caller gets the same table for the
    /// same name.
    pub fn module(&self, name: &str) -> Result<Arc<LangDefinitions>> {
        let name = checked_module_name(name)?;
        let definitions = self
            .modules
            .entry(name.clone())
            .or_insert_with(|| Arc::new(LangDefinitions::new(name)))
            .value()
            .clone();
        Ok(definitions)
    }

    /// Seed the defaults of `module`
    ///
    /// Defaults are seeded once per module name; registering the same name
    /// again, even from a different implementation, does nothing.
    pub fn register<M: LangModule + ?Sized>(&self, module: &M) -> Result<()> {
        let definitions = self.module(module.name())?;
        if definitions.claim_seeding() {
            module.define(&definitions)?;
            log_module_registered(definitions.name(), definitions.len());
        }
        Ok(())
    }

    /// Whether a table exists for module `name`
    pub fn is_registered(&self, name: &str) -> bool {
        self.modules.contains_key(&normalize(name))
    }

    /// Snapshot of all module tables, ordered by name
    pub fn modules(&self) -> Vec<Arc<LangDefinitions>> {
        let mut modules: Vec<_> = self.modules.iter().map(|e| e.value().clone()).collect();
        modules.sort_by(|a, b| a.name().cmp(b.name()));
        modules
    }

    /// Load the active language file into the module tables
    pub fn load(&self) -> bool {
        let language = self.language();
        let modules = self.modules();
        let result = self
            .file
            .lock()
            .load(self.host.data_folder(), &language, &modules);
        self.report("load", &language, result)
    }

    /// Write the module tables to the active language file
    pub fn save(&self) -> bool {
        let language = self.language();
        let modules = self.modules();
        let result = self
            .file
            .lock()
            .save(self.host.data_folder(), &language, &modules);
        self.report("save", &language, result)
    }

    fn report(&self, action: &str, language: &str, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                let mut message =
                    format!("Failed to {} language file {}: {}", action, file_name(language), e);
                if e.is_recoverable() {
                    message.push_str(" (in-memory definitions are still in use)");
                }
                self.host.log(e.severity().level(), &message);
                false
            }
        }
    }

    /// The plugin this controller belongs to
    pub fn host(&self) -> &Arc<dyn Plugin> {
        &self.host
    }

    /// Path of the active language file, once it has been resolved
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.lock().path().map(|p| p.to_path_buf())
    }
}

/// Check that `language` can name a language file
pub fn validate_language_name(language: &str) -> Result<()> {
    if language.trim().is_empty() {
        return Err(LangError::invalid("language name must not be empty"));
    }
    if language == "." || language == ".." || language.contains(['/', '\\', '\0']) {
        return Err(LangError::invalid(format!(
            "language name '{}' is not a valid file name",
            language
        )));
    }
    Ok(())
}

fn checked_module_name(name: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(LangError::invalid("module name must not be empty"));
    }
    Ok(normalize(name))
}
