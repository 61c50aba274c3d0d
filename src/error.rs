use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatcherCfgError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}. Run `dispatcher-cfg init` to create one.")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Unknown farm: {0}")]
    UnknownFarm(String),
}

pub type Result<T> = std::result::Result<T, DispatcherCfgError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
