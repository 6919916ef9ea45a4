//! Language file storage
//!
//! Each language is stored as `<data folder>/lang/<language>.yml`. The
//! document has one top-level mapping per module, each a flat map from key to
//! template:
//!
//! ```yaml
//! chat:
//!   greeting: '&aHello, {0}!'
//! shop:
//!   closed: '&cThe shop is closed.'
//! ```
//!
//! Loading merges the file over the in-memory defaults (the file wins) and
//! saving merges the in-memory definitions back into the document, so
//! sections and keys the process does not know about are preserved.
//!
//! Saves are not atomic: a failure while writing can leave a truncated file.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use super::definitions::normalize;
use super::LangDefinitions;
use crate::utils::errors::{LangError, Result};

/// Subdirectory of the data folder holding language files
pub const LANG_DIRECTORY: &str = "lang";

/// Extension of language files
pub const FILE_EXTENSION: &str = "yml";

/// File name for a language, e.g. `en.yml`
pub fn file_name(language: &str) -> String {
    format!("{}.{}", language, FILE_EXTENSION)
}

/// File-backed store for the active language
#[derive(Debug, Default)]
pub struct LangFile {
    directory: Option<PathBuf>,
    file: Option<PathBuf>,
    document: Mapping,
    /// File name the in-memory document was read from
    document_source: Option<String>,
}

impl LangFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the most recently resolved language file
    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Read the language file and apply its values to `modules`
    ///
    /// Only keys already defined in memory are read; anything else in the
    /// file is left alone. Nothing is changed in memory when the file cannot
    /// be parsed.
    pub fn load(
        &mut self,
        data_folder: &Path,
        language: &str,
        modules: &[Arc<LangDefinitions>],
    ) -> Result<()> {
        let file_name = file_name(language);
        let path = self.ensure_file(data_folder, &file_name)?;
        let document = read_document(&path, &file_name)?;

        let mut applied = 0usize;
        for module in modules {
            let section = match document.get(section_key(&document, module.name())) {
                Some(Value::Mapping(section)) => section,
                Some(Value::Null) | None => continue,
                Some(_) => {
                    warn!(file = %file_name, module = module.name(), "Module section is not a mapping, keeping defaults");
                    continue;
                }
            };
            let on_disk = lowercase_entries(section);

            for key in module.definitions().into_keys() {
                let Some(value) = on_disk.get(&key) else {
                    continue;
                };
                match scalar_text(value) {
                    Some(text) => {
                        module.set_loaded(&key, &text);
                        applied += 1;
                    }
                    None => {
                        warn!(file = %file_name, module = module.name(), key = %key, "Non-text value left on disk, using default");
                    }
                }
            }
        }

        self.document = document;
        self.document_source = Some(file_name.clone());
        debug!(file = %file_name, modules = modules.len(), applied = applied, "Loaded language file");
        Ok(())
    }

    /// Write every definition of `modules` to the language file
    ///
    /// Keys whose value on disk is not text (lists, mappings, null) are left
    /// as they are.
    pub fn save(
        &mut self,
        data_folder: &Path,
        language: &str,
        modules: &[Arc<LangDefinitions>],
    ) -> Result<()> {
        let file_name = file_name(language);
        let path = self.ensure_file(data_folder, &file_name)?;

        // never merge one language's document into another language's file
        if self.document_source.as_deref() != Some(file_name.as_str()) {
            self.document = read_document(&path, &file_name)?;
            self.document_source = Some(file_name.clone());
        }

        for module in modules {
            let section = section_mut(&mut self.document, module.name());
            for (key, template) in module.definitions() {
                match existing_key(section, &key) {
                    // load never applied it, so the file still owns this value
                    Some(existing) if section.get(&existing).and_then(scalar_text).is_none() => {}
                    Some(existing) => {
                        section.insert(existing, Value::String(template));
                    }
                    None => {
                        section.insert(Value::String(key), Value::String(template));
                    }
                }
            }
        }

        let serialized = serde_yaml::to_string(&self.document).map_err(|source| {
            LangError::Serialize {
                file: file_name.clone(),
                source,
            }
        })?;
        fs::write(&path, serialized).map_err(io_error(&file_name))?;

        debug!(file = %file_name, modules = modules.len(), "Saved language file");
        Ok(())
    }

    /// Resolve and create the `lang` directory
    fn ensure_directory(&mut self, data_folder: &Path, file_name: &str) -> Result<PathBuf> {
        let directory = self
            .directory
            .get_or_insert_with(|| data_folder.join(LANG_DIRECTORY))
            .clone();

        if !directory.is_dir() {
            fs::create_dir_all(&directory).map_err(io_error(file_name))?;
            debug!(directory = %directory.display(), "Created language directory");
        }

        // existence after the call is what counts, not what create_dir_all reported
        if directory.is_dir() {
            Ok(directory)
        } else {
            Err(io_error(file_name)(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is not a directory", directory.display()),
            )))
        }
    }

    /// Resolve the file for `file_name`, creating it empty if absent
    fn ensure_file(&mut self, data_folder: &Path, file_name: &str) -> Result<PathBuf> {
        let directory = self.ensure_directory(data_folder, file_name)?;

        let path = match &self.file {
            Some(file) if has_file_name(file, file_name) => file.clone(),
            _ => {
                let file = directory.join(file_name);
                self.file = Some(file.clone());
                file
            }
        };

        if !path.exists() {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => debug!(file = %path.display(), "Created language file"),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(io_error(file_name)(e)),
            }
        }

        if path.is_file() {
            Ok(path)
        } else {
            Err(io_error(file_name)(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is not a file", path.display()),
            )))
        }
    }
}

fn has_file_name(path: &Path, file_name: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
}

fn io_error(file_name: &str) -> impl FnOnce(io::Error) -> LangError + '_ {
    move |source| LangError::Io {
        file: file_name.to_string(),
        source,
    }
}

/// Read and parse a language document; an empty file is an empty document
fn read_document(path: &Path, file_name: &str) -> Result<Mapping> {
    let content = fs::read_to_string(path).map_err(io_error(file_name))?;
    parse_document(&content, file_name)
}

fn parse_document(content: &str, file_name: &str) -> Result<Mapping> {
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yaml::from_str(content).map_err(|source| LangError::Parse {
        file: file_name.to_string(),
        source,
    })?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(LangError::InvalidDocument {
            file: file_name.to_string(),
            reason: "top level is not a mapping of module sections".to_string(),
        }),
    }
}

/// Section entries keyed by lower-case key
fn lowercase_entries(section: &Mapping) -> HashMap<String, &Value> {
    section
        .iter()
        .filter_map(|(key, value)| key.as_str().map(|key| (normalize(key), value)))
        .collect()
}

/// Text of a scalar value; YAML numbers and booleans read as their literal text
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Key of the module's section, reusing a differently-cased existing key
fn section_key(document: &Mapping, module: &str) -> Value {
    existing_key(document, module).unwrap_or_else(|| Value::String(module.to_string()))
}

/// Module section of the document, replacing anything that is not a mapping
fn section_mut<'a>(document: &'a mut Mapping, module: &str) -> &'a mut Mapping {
    let key = section_key(document, module);
    if !matches!(document.get(&key), Some(Value::Mapping(_))) {
        document.insert(key.clone(), Value::Mapping(Mapping::new()));
    }
    match document.get_mut(&key) {
        Some(Value::Mapping(section)) => section,
        _ => unreachable!("section was just inserted as a mapping"),
    }
}

/// The string key of `mapping` equal to `key` ignoring case
fn existing_key(mapping: &Mapping, key: &str) -> Option<Value> {
    mapping
        .keys()
        .find(|existing| existing.as_str().is_some_and(|s| normalize(s) == key))
        .cloned()
}
