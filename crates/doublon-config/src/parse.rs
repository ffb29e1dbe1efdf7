//! Configuration file parsing.
//!
//! Parses individual `.doublon.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, StoreBackend};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Score cutoffs.
    pub thresholds: Option<RawThresholds>,
    /// Per-collection result caps.
    pub limits: Option<RawLimits>,
    /// Candidate gating.
    pub matching: Option<RawMatching>,
    /// HTTP listener.
    pub server: Option<RawServer>,
    /// Candidate store.
    pub store: Option<RawStore>,
}

/// Raw `[thresholds]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawThresholds {
    /// Inclusion cutoff.
    pub low: Option<f64>,
    /// "similar" cutoff.
    pub medium: Option<f64>,
    /// "very similar" cutoff.
    pub high: Option<f64>,
}

/// Raw `[limits]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLimits {
    /// Maximum brands returned.
    pub brands: Option<usize>,
    /// Maximum controversies returned.
    pub controversies: Option<usize>,
    /// Maximum propositions returned.
    pub propositions: Option<usize>,
}

/// Raw `[matching]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMatching {
    /// Minimum brand name similarity before a controversy or proposition is scored.
    pub gate: Option<f64>,
}

/// Raw `[server]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawServer {
    /// Address to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
}

/// Raw `[store]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStore {
    /// Which adapter serves candidates.
    pub backend: Option<StoreBackend>,
    /// Snapshot file for the JSON backend.
    pub path: Option<String>,
    /// Base URL for the REST backend.
    pub url: Option<String>,
    /// Environment variable holding the REST API key.
    pub api_key_env: Option<String>,
    /// Seconds a fetched collection stays cached (0 disables caching).
    pub cache_ttl_secs: Option<u64>,
    /// REST request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Table (or view) names for the REST backend.
    pub tables: Option<RawTables>,
}

/// Raw `[store.tables]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTables {
    /// Brands table.
    pub brands: Option<String>,
    /// Approved controversies table.
    pub controversies: Option<String>,
    /// Propositions table.
    pub propositions: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
