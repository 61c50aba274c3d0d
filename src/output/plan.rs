use std::path::Path;

use crate::config::Config;
use crate::error::{DispatcherCfgError, Result};
use crate::render::{
    DISPATCHER_CONF, FARMS_ANY, farm_file_name, render_dispatcher_conf, render_farm,
    render_farms_include,
};

/// One rendered file, named relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// Renders the full file set for a validated configuration: one include file
/// per farm, the farm aggregator, and the Apache directives block.
#[must_use]
pub fn plan_files(config: &Config) -> Vec<GeneratedFile> {
    let mut files: Vec<GeneratedFile> = config
        .farms
        .iter()
        .map(|(name, farm)| GeneratedFile {
            name: farm_file_name(name, farm.priority),
            content: render_farm(name, farm),
        })
        .collect();
    files.push(GeneratedFile {
        name: FARMS_ANY.to_string(),
        content: render_farms_include(),
    });
    files.push(GeneratedFile {
        name: DISPATCHER_CONF.to_string(),
        content: render_dispatcher_conf(&config.module),
    });
    files
}

/// Writes every planned file under `dir`, creating the directory if needed.
///
/// # Errors
/// Returns a `FileWrite` error naming the offending path.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| DispatcherCfgError::FileWrite {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for file in files {
        let path = dir.join(&file.name);
        std::fs::write(&path, &file.content).map_err(|e| DispatcherCfgError::FileWrite {
            path,
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
