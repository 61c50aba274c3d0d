use std::path::{Path, PathBuf};

use crate::error::{DispatcherCfgError, Result};

use super::Config;
use super::validation::validate_config;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "dispatcher.toml";

/// Trait for loading a validated configuration.
pub trait ConfigLoader {
    /// Load configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if no config file exists, or it cannot be read,
    /// parsed, or validated.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Loads configuration files through a `FileSystem`.
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn parse(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| DispatcherCfgError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        let config: Config = toml::from_str(&content)?;
        validate_config(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        let cwd = self.fs.current_dir()?;
        let candidate = cwd.join(CONFIG_FILE_NAME);
        if !self.fs.exists(&candidate) {
            return Err(DispatcherCfgError::ConfigNotFound { path: candidate });
        }
        self.parse(&candidate)
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        self.parse(path)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
