mod json;
mod plan;
mod text;

pub use json::JsonFormatter;
pub use plan::{GeneratedFile, plan_files, write_files};
pub use text::{ColorMode, TextFormatter};

use serde::Serialize;

use crate::config::{Config, Farm};
use crate::error::Result;
use crate::render::farm_file_name;

/// Per-farm summary reported by `validate`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FarmSummary {
    pub name: String,
    pub file_name: String,
    pub renderers: usize,
    pub filters: usize,
    pub cache: bool,
    pub secure: bool,
}

impl FarmSummary {
    #[must_use]
    pub fn from_farm(name: &str, farm: &Farm) -> Self {
        Self {
            name: name.to_string(),
            file_name: farm_file_name(name, farm.priority),
            renderers: farm.renderers.len(),
            filters: farm.filters.len(),
            cache: farm.cache.is_some(),
            secure: farm.secure,
        }
    }
}

/// Validation report over a whole configuration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub farms: Vec<FarmSummary>,
}

impl ValidationReport {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            farms: config
                .farms
                .iter()
                .map(|(name, farm)| FarmSummary::from_farm(name, farm))
                .collect(),
        }
    }
}

/// Trait for formatting a validation report into an output format.
pub trait OutputFormatter {
    /// Format the report into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &ValidationReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
