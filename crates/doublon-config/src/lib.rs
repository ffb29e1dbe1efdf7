//! Configuration system for doublon.
//!
//! doublon uses TOML configuration files named `.doublon.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.doublon.toml` files found, then loading `~/.doublon.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

use doublon_similarity::{GATE_THRESHOLD, HIGH_THRESHOLD, LOW_THRESHOLD, MEDIUM_THRESHOLD};
use serde::{Deserialize, Serialize};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawLimits, RawMatching, RawServer, RawStore, RawTables, RawThresholds,
    parse_config_file, parse_config_str,
};
pub use resolve::resolve_store_path;
pub use templates::ConfigScope;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for doublon.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.doublon.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Score cutoffs.
    pub thresholds: ThresholdSettings,
    /// Per-collection result caps.
    pub limits: LimitSettings,
    /// Candidate gating.
    pub matching: MatchingSettings,
    /// HTTP listener.
    pub server: ServerSettings,
    /// Candidate store.
    pub store: StoreSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.doublon.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Scores outside `[0, 1]` and unordered thresholds
    /// - Zero result limits
    /// - A store backend missing its path or URL
    /// - An unset REST API key variable
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.doublon.toml` file.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            thresholds: &self.thresholds,
            limits: &self.limits,
            matching: &self.matching,
            server: &self.server,
            store: &self.store,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Score cutoffs used to include and label matches.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdSettings {
    /// Minimum overall score for a match to be reported.
    pub low: f64,
    /// Matches at or above this are "similar".
    pub medium: f64,
    /// Matches at or above this are "very similar".
    pub high: f64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            low: LOW_THRESHOLD,
            medium: MEDIUM_THRESHOLD,
            high: HIGH_THRESHOLD,
        }
    }
}

/// Maximum number of matches returned per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitSettings {
    /// Brand matches.
    pub brands: usize,
    /// Controversy matches.
    pub controversies: usize,
    /// Proposition matches.
    pub propositions: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            brands: 5,
            controversies: 3,
            propositions: 3,
        }
    }
}

/// Candidate gating settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingSettings {
    /// Minimum brand name similarity before a controversy or proposition is scored.
    pub gate: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            gate: GATE_THRESHOLD,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
        }
    }
}

/// Which adapter serves candidate collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// A local JSON snapshot file.
    #[default]
    Json,
    /// A hosted PostgREST-style backend.
    Rest,
}

/// Candidate store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Which adapter serves candidates.
    pub backend: StoreBackend,
    /// Absolute path of the JSON snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Base URL of the REST backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Environment variable holding the REST API key.
    pub api_key_env: String,
    /// Seconds a fetched collection stays cached (0 disables caching).
    pub cache_ttl_secs: u64,
    /// REST request timeout in seconds.
    pub timeout_secs: u64,
    /// REST table names.
    pub tables: TableNames,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: None,
            url: None,
            api_key_env: String::from("DOUBLON_STORE_KEY"),
            cache_ttl_secs: 0,
            timeout_secs: 10,
            tables: TableNames::default(),
        }
    }
}

/// Table (or view) names exposed by the REST backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableNames {
    /// Brands.
    pub brands: String,
    /// Approved controversies.
    pub controversies: String,
    /// Propositions awaiting or past moderation.
    pub propositions: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            brands: String::from("marques"),
            controversies: String::from("evenements"),
            propositions: String::from("propositions"),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Score cutoffs.
    thresholds: &'a ThresholdSettings,
    /// Result caps.
    limits: &'a LimitSettings,
    /// Gating.
    matching: &'a MatchingSettings,
    /// Listener.
    server: &'a ServerSettings,
    /// Store.
    store: &'a StoreSettings,
}
