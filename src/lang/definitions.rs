//! Per-module language definitions
//!
//! A [`LangDefinitions`] table maps lower-case keys to template strings for
//! one module. Tables are shared between threads behind an `Arc` and use a
//! concurrent map, so no caller-side locking is needed.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

use super::format;
use crate::utils::errors::{LangError, Result};

/// Language definitions for a single module
pub struct LangDefinitions {
    name: String,
    definitions: DashMap<String, String>,
    /// Set once a [`LangModule`](super::LangModule) has seeded this table
    seeded: AtomicBool,
}

impl fmt::Debug for LangDefinitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LangDefinitions")
            .field("name", &self.name)
            .field("definition_count", &self.definitions.len())
            .field("seeded", &self.seeded.load(Ordering::Relaxed))
            .finish()
    }
}

impl LangDefinitions {
    /// Create an empty table; `name` must already be normalized
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: DashMap::new(),
            seeded: AtomicBool::new(false),
        }
    }

    /// Module name, lower-case
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the template stored under `key`
    ///
    /// Missing keys yield a readable placeholder naming the module and key, so
    /// untranslated strings show up in-game instead of failing.
    pub fn get_definition(&self, key: &str) -> String {
        self.definitions
            .get(&normalize(key))
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| {
                format!("Unknown lang definition for module '{}': '{}'", self.name, key)
            })
    }

    /// Check whether `key` has a definition
    pub fn is_defined(&self, key: &str) -> bool {
        self.definitions.contains_key(&normalize(key))
    }

    /// Define `key` unless it already has a value
    ///
    /// Values loaded from the language file are never replaced by defaults.
    pub fn define(&self, key: &str, template: &str) -> Result<()> {
        let key = checked_key(key)?;
        checked_template(template)?;
        self.definitions
            .entry(key)
            .or_insert_with(|| template.to_string());
        Ok(())
    }

    /// Store `template` under `key`, replacing any previous value
    pub fn set(&self, key: &str, template: &str) -> Result<()> {
        let key = checked_key(key)?;
        checked_template(template)?;
        self.definitions.insert(key, template.to_string());
        Ok(())
    }

    /// Derive a fixed string from the template at `key` and define it as `new_key`
    ///
    /// The arguments are substituted now; colour codes are kept as `&` codes so
    /// the derived entry reads like any other template in the language file.
    ///
    /// Fails when `key` is not defined, so a misspelled base key cannot end
    /// up in the language file as a real entry.
    pub fn extend(&self, key: &str, new_key: &str, args: &[&dyn Display]) -> Result<()> {
        checked_key(key)?;
        if !self.is_defined(key) {
            return Err(LangError::invalid(format!(
                "cannot extend undefined key '{}' of module '{}'",
                key, self.name
            )));
        }
        let derived = format::substitute(&self.get_definition(key), args);
        self.define(new_key, &derived)
    }

    /// Store a value read from the language file
    ///
    /// Blank values are accepted here: a translator may empty a message on
    /// purpose.
    pub(crate) fn set_loaded(&self, key: &str, template: &str) {
        self.definitions.insert(normalize(key), template.to_string());
    }

    /// Substitute `args` into the template at `key` and translate colour codes
    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        let definition = self.get_definition(key);
        self.coloured(&format::substitute(&definition, args))
    }

    /// Translate `&` colour codes into native colour sequences
    pub fn coloured(&self, s: &str) -> String {
        format::coloured(s)
    }

    /// Snapshot of all definitions, ordered by key
    pub fn definitions(&self) -> BTreeMap<String, String> {
        self.definitions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Number of defined keys
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Claim the right to seed defaults; true only for the first caller
    pub(crate) fn claim_seeding(&self) -> bool {
        !self.seeded.swap(true, Ordering::AcqRel)
    }
}

/// Lower-case a key or module name
pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase()
}

fn checked_key(key: &str) -> Result<String> {
    if key.trim().is_empty() {
        return Err(LangError::invalid("definition key must not be empty"));
    }
    Ok(normalize(key))
}

fn checked_template(template: &str) -> Result<()> {
    if template.is_empty() {
        return Err(LangError::invalid("definition template must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn table() -> LangDefinitions {
        LangDefinitions::new("chat")
    }

    #[test]
    fn test_unknown_key_fallback() {
        let defs = table();
        let text = defs.get_definition("missing.key");
        assert!(text.contains("chat"));
        assert!(text.contains("missing.key"));
        assert!(!defs.is_defined("missing.key"));
    }

    #[test]
    fn test_define_first_write_wins() {
        let defs = table();
        defs.define("greet", "Hello").unwrap();
        defs.define("greet", "Howdy").unwrap();
        assert_eq!(defs.get_definition("greet"), "Hello");
    }

    #[test]
    fn test_set_last_write_wins() {
        let defs = table();
        defs.set("greet", "Hello").unwrap();
        defs.set("greet", "Howdy").unwrap();
        assert_eq!(defs.get_definition("greet"), "Howdy");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let defs = table();
        defs.define("Join.Message", "&e{0} joined").unwrap();
        assert!(defs.is_defined("join.message"));
        assert!(defs.is_defined("JOIN.MESSAGE"));
        assert_eq!(defs.definitions().keys().collect::<Vec<_>>(), vec!["join.message"]);
    }

    #[test]
    fn test_empty_arguments_rejected() {
        let defs = table();
        assert_matches!(defs.define("", "x"), Err(LangError::InvalidArgument(_)));
        assert_matches!(defs.define("  ", "x"), Err(LangError::InvalidArgument(_)));
        assert_matches!(defs.define("k", ""), Err(LangError::InvalidArgument(_)));
        assert_matches!(defs.set("", "x"), Err(LangError::InvalidArgument(_)));
        assert!(defs.is_empty());
    }

    #[test]
    fn test_format_substitutes_and_colours() {
        let defs = table();
        defs.define("greet", "&aHello, {0}!").unwrap();
        assert_eq!(defs.format("greet", &[&"Alice"]), "§aHello, Alice!");
        assert_eq!(defs.format("greet", &[]), "§aHello, {0}!");
    }

    #[test]
    fn test_format_missing_key_returns_fallback() {
        let defs = table();
        let text = defs.format("nope", &[&1]);
        assert!(text.starts_with("Unknown lang definition"));
    }

    #[test]
    fn test_extend_stores_literal() {
        let defs = table();
        defs.define("prefix", "&7[{0}]&r ").unwrap();
        defs.extend("prefix", "prefix.shop", &[&"Shop"]).unwrap();
        assert_eq!(defs.get_definition("prefix.shop"), "&7[Shop]&r ");
        assert_eq!(defs.format("prefix.shop", &[&"ignored"]), "§7[Shop]§r ");
    }

    #[test]
    fn test_extend_undefined_base_key_fails() {
        let defs = table();
        defs.define("prefix", "[{0}]").unwrap();
        let result = defs.extend("prefx", "prefix.shop", &[&"Shop"]);
        assert_matches!(result, Err(LangError::InvalidArgument(ref msg)) if msg.contains("prefx"));
        assert!(!defs.is_defined("prefix.shop"));
    }

    #[test]
    fn test_extend_keeps_existing_value() {
        let defs = table();
        defs.define("prefix", "[{0}]").unwrap();
        defs.set("prefix.shop", "<Shop>").unwrap();
        defs.extend("prefix", "prefix.shop", &[&"Shop"]).unwrap();
        assert_eq!(defs.get_definition("prefix.shop"), "<Shop>");
    }

    #[test]
    fn test_definitions_is_a_snapshot() {
        let defs = table();
        defs.define("a", "1").unwrap();
        let mut snapshot = defs.definitions();
        snapshot.insert("b".to_string(), "2".to_string());
        assert!(!defs.is_defined("b"));
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn test_claim_seeding_once() {
        let defs = table();
        assert!(defs.claim_seeding());
        assert!(!defs.claim_seeding());
    }

    #[test]
    fn test_concurrent_defines_keep_one_value() {
        let defs = std::sync::Arc::new(table());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let defs = defs.clone();
                std::thread::spawn(move || defs.define("race", &format!("v{}", i)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(defs.len(), 1);
        assert!(defs.get_definition("race").starts_with('v'));
    }

    proptest! {
        #[test]
        fn undefined_keys_mention_module_and_key(key in "[a-z][a-z.]{0,12}") {
            let defs = table();
            let text = defs.get_definition(&key);
            prop_assert!(text.contains(defs.name()));
            prop_assert!(text.contains(&key));
            prop_assert!(!defs.is_defined(&key));
        }

        #[test]
        fn greet_formats_like_coloured_substitution(name in "[A-Za-z ]{0,16}") {
            let defs = table();
            defs.define("greet", "Hello, {0}!").unwrap();
            prop_assert_eq!(
                defs.format("greet", &[&name]),
                format::coloured(&format!("Hello, {}!", name))
            );
        }
    }
}
