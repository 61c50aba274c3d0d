#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the dispatcher-cfg binary.
#[macro_export]
macro_rules! dispatcher_cfg {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dispatcher-cfg"))
    };
}

/// Temporary working directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a `dispatcher.toml` in the temp directory.
    pub fn create_config(&self, content: &str) {
        self.create_file("dispatcher.toml", content);
    }

    /// Reads a file generated under the temp directory.
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}

/// A farm definition matching the minimal publish setup.
pub const MINIMAL_CONFIG: &str = r#"
[farms.publish]
virtualhosts = ["*"]

[farms.publish.cache]
docroot = "/var/www/html"
rules = [{ rank = 1, glob = "*.html", allow = true }]
allowed_clients = [{ rank = 1, glob = "*.*.*.*", allow = false }]
"#;
