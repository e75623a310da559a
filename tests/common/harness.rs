//! Test harness for data directory lifecycle management.
//!
//! Provides an isolated data directory per test using tempfile.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use internsprint::init::AppContext;

/// Test harness that owns a temporary data directory.
///
/// The directory and every data file in it are removed when the harness is
/// dropped.
pub struct TestHarness {
    /// Temporary directory (kept alive while harness exists)
    pub temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with an empty data directory.
    ///
    /// Panics if the directory cannot be created (appropriate for tests).
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test data");
        Self { temp_dir }
    }

    pub fn data_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Open an application context over the data directory, loading any
    /// existing files.
    pub fn open(&self) -> AppContext {
        AppContext::open(self.data_path())
    }

    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.file(name), contents).expect("Failed to write test data file");
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.file(name)).expect("Failed to read test data file")
    }

    pub fn read_json(&self, name: &str) -> Value {
        serde_json::from_str(&self.read(name)).expect("Data file should be valid JSON")
    }
}
