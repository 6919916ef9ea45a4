//! Test helpers module
//!
//! Shared setup for the integration tests: a temp-dir backed host that
//! records what the controller logs, and a couple of language modules.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use parking_lot::Mutex;
use plugin_lang::{Lang, LangDefinitions, LangModule, Plugin, Result};
use tempfile::TempDir;
use tracing::Level;

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// Host backed by a temporary data folder that keeps every log line
pub struct RecordingHost {
    data_folder: PathBuf,
    logs: Mutex<Vec<(Level, String)>>,
}

impl RecordingHost {
    pub fn new(data_folder: &Path) -> Self {
        Self {
            data_folder: data_folder.to_path_buf(),
            logs: Mutex::new(Vec::new()),
        }
    }

    pub fn logs(&self) -> Vec<(Level, String)> {
        self.logs.lock().clone()
    }
}

impl Plugin for RecordingHost {
    fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    fn log(&self, level: Level, message: &str) {
        self.logs.lock().push((level, message.to_string()));
    }
}

/// Test context owning the data folder for one test
pub struct TestContext {
    pub temp_dir: TempDir,
    pub host: Arc<RecordingHost>,
}

impl TestContext {
    pub fn new() -> Self {
        init_test_env();
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let host = Arc::new(RecordingHost::new(temp_dir.path()));
        Self { temp_dir, host }
    }

    /// A controller on this context's data folder
    pub fn lang(&self) -> Lang {
        Lang::new(self.host.clone())
    }

    /// A controller with its own host on the same data folder
    pub fn fresh_lang(&self) -> Lang {
        Lang::new(Arc::new(RecordingHost::new(self.temp_dir.path())))
    }

    pub fn lang_dir(&self) -> PathBuf {
        self.temp_dir.path().join("lang")
    }

    pub fn lang_file(&self, language: &str) -> PathBuf {
        self.lang_dir().join(format!("{}.yml", language))
    }

    pub fn read_lang_file(&self, language: &str) -> String {
        fs::read_to_string(self.lang_file(language)).expect("Failed to read language file")
    }

    pub fn write_lang_file(&self, language: &str, content: &str) {
        fs::create_dir_all(self.lang_dir()).expect("Failed to create lang dir");
        fs::write(self.lang_file(language), content).expect("Failed to write language file");
    }

    pub fn parse_lang_file(&self, language: &str) -> serde_yaml::Value {
        serde_yaml::from_str(&self.read_lang_file(language)).expect("Language file is not YAML")
    }
}

/// Module with a single greeting
pub struct ModuleA;

impl LangModule for ModuleA {
    fn define(&self, l: &LangDefinitions) -> Result<()> {
        l.define("greeting", "Hello")
    }

    fn name(&self) -> &str {
        "moduleA"
    }
}

/// Second implementation declaring the same module name with other defaults
pub struct ModuleAImpostor;

impl LangModule for ModuleAImpostor {
    fn define(&self, l: &LangDefinitions) -> Result<()> {
        l.set("greeting", "Overwritten")?;
        l.define("extra", "Extra")
    }

    fn name(&self) -> &str {
        "MODULEA"
    }
}

/// Module using placeholders, colour codes and derived keys
pub struct Shop;

impl LangModule for Shop {
    fn define(&self, l: &LangDefinitions) -> Result<()> {
        l.define("prefix", "&6[{0}]&r ")?;
        l.extend("prefix", "prefix.shop", &[&"Shop"])?;
        l.define("bought", "&aYou bought {0} for {1} coins")?;
        l.define("x", "&atest")
    }

    fn name(&self) -> &str {
        "shop"
    }
}
