//! Semantic validation of a parsed configuration.
//!
//! Shape errors (wrong types, unknown fields, missing required fields) are
//! caught by serde during parsing; this module checks everything the type
//! system cannot: rank uniqueness, value grammars, and cross-field rules.
//! The first failure aborts the whole run - no partial rendering ever happens.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{Cache, Config, Farm, GlobRule, StickyConnections};
use crate::{DispatcherCfgError, Result};

/// Octal file mode, three or four digits.
static MODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-7]{3,4}$").expect("mode pattern is valid"));

/// `DispatcherPassError` value: "0", "1", or ranges like "400-411,413-417,500".
static PASS_ERROR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(-\d+)?(,\d+(-\d+)?)*$").expect("pass_error pattern is valid"));

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns a `Config` error describing the first offending field.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_module(config)?;
    for (name, farm) in &config.farms {
        validate_farm_name(name)?;
        validate_farm(name, farm)?;
    }
    Ok(())
}

fn validate_module(config: &Config) -> Result<()> {
    if !PASS_ERROR_RE.is_match(&config.module.pass_error) {
        return Err(DispatcherCfgError::Config(format!(
            "module.pass_error has invalid value '{}'. Expected \"0\", \"1\", or status ranges like \"400-411,413-417,500\"",
            config.module.pass_error
        )));
    }
    Ok(())
}

fn validate_farm_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DispatcherCfgError::Config(
            "farm names must not be empty".to_string(),
        ));
    }
    if name.contains(char::is_whitespace) || name.contains('/') {
        return Err(DispatcherCfgError::Config(format!(
            "farm name '{name}' must not contain whitespace or '/'"
        )));
    }
    Ok(())
}

fn validate_farm(name: &str, farm: &Farm) -> Result<()> {
    validate_renderers(name, farm)?;
    validate_filters(name, farm)?;
    if let Some(cache) = &farm.cache {
        validate_cache(name, cache)?;
    }
    validate_auth_checker(name, farm)?;
    validate_statistics(name, farm)?;
    validate_sticky_connections(name, farm)?;
    validate_vanity_urls(name, farm)?;
    Ok(())
}

fn validate_renderers(name: &str, farm: &Farm) -> Result<()> {
    if farm.renderers.is_empty() {
        return Err(DispatcherCfgError::Config(format!(
            "farms.{name}.renderers must not be empty"
        )));
    }
    for (i, renderer) in farm.renderers.iter().enumerate() {
        if renderer.hostname.is_empty() {
            return Err(DispatcherCfgError::Config(format!(
                "farms.{name}.renderers[{i}].hostname must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_filters(name: &str, farm: &Farm) -> Result<()> {
    if farm.filters.is_empty() {
        return Err(DispatcherCfgError::Config(format!(
            "farms.{name}.filters must not be empty"
        )));
    }
    for (i, filter) in farm.filters.iter().enumerate() {
        if filter.is_empty() {
            return Err(DispatcherCfgError::Config(format!(
                "farms.{name}.filters[{i}] must set at least one of method, query, protocol, path, selectors, extension, suffix, url"
            )));
        }
    }
    validate_unique_ranks(
        &format!("farms.{name}.filters"),
        farm.filters.iter().map(|f| f.rank),
    )
}

fn validate_cache(name: &str, cache: &Cache) -> Result<()> {
    if !cache.docroot.starts_with('/') {
        return Err(DispatcherCfgError::Config(format!(
            "farms.{name}.cache.docroot must be an absolute path, got '{}'",
            cache.docroot
        )));
    }
    validate_rule_list(&format!("farms.{name}.cache.rules"), &cache.rules, true)?;
    validate_rule_list(
        &format!("farms.{name}.cache.allowed_clients"),
        &cache.allowed_clients,
        true,
    )?;
    validate_rule_list(
        &format!("farms.{name}.cache.invalidate"),
        &cache.invalidate,
        false,
    )?;
    validate_rule_list(
        &format!("farms.{name}.cache.ignore_url_params"),
        &cache.ignore_url_params,
        false,
    )?;
    if let Some(mode) = &cache.mode
        && !MODE_RE.is_match(mode)
    {
        return Err(DispatcherCfgError::Config(format!(
            "farms.{name}.cache.mode must be an octal mode like \"0660\", got '{mode}'"
        )));
    }
    Ok(())
}

fn validate_auth_checker(name: &str, farm: &Farm) -> Result<()> {
    let Some(auth_checker) = &farm.auth_checker else {
        return Ok(());
    };
    validate_rule_list(
        &format!("farms.{name}.auth_checker.filters"),
        &auth_checker.filters,
        true,
    )?;
    validate_rule_list(
        &format!("farms.{name}.auth_checker.headers"),
        &auth_checker.headers,
        true,
    )
}

fn validate_statistics(name: &str, farm: &Farm) -> Result<()> {
    for (i, category) in farm.statistics_categories.iter().enumerate() {
        if category.name.is_empty() {
            return Err(DispatcherCfgError::Config(format!(
                "farms.{name}.statistics_categories[{i}].name must not be empty"
            )));
        }
    }
    validate_unique_ranks(
        &format!("farms.{name}.statistics_categories"),
        farm.statistics_categories.iter().map(|c| c.rank),
    )
}

fn validate_sticky_connections(name: &str, farm: &Farm) -> Result<()> {
    if let Some(StickyConnections::Detailed { paths, .. }) = &farm.sticky_connections
        && paths.is_empty()
    {
        return Err(DispatcherCfgError::Config(format!(
            "farms.{name}.sticky_connections.paths must not be empty"
        )));
    }
    Ok(())
}

fn validate_vanity_urls(name: &str, farm: &Farm) -> Result<()> {
    if let Some(vanity_urls) = &farm.vanity_urls
        && vanity_urls.delay == 0
    {
        return Err(DispatcherCfgError::Config(format!(
            "farms.{name}.vanity_urls.delay must be greater than zero"
        )));
    }
    Ok(())
}

fn validate_rule_list(context: &str, rules: &[GlobRule], required: bool) -> Result<()> {
    if required && rules.is_empty() {
        return Err(DispatcherCfgError::Config(format!(
            "{context} must not be empty"
        )));
    }
    validate_unique_ranks(context, rules.iter().map(|r| r.rank))
}

fn validate_unique_ranks(context: &str, ranks: impl Iterator<Item = u32>) -> Result<()> {
    let mut seen = HashSet::new();
    for rank in ranks {
        if !seen.insert(rank) {
            return Err(DispatcherCfgError::Config(format!(
                "{context} contains duplicate rank {rank}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
