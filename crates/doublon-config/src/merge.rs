//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving store paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, LimitSettings, MatchingSettings, ServerSettings, StoreSettings,
    ThresholdSettings,
    parse::{RawConfig, RawLimits, RawMatching, RawServer, RawStore, RawThresholds},
    resolve::resolve_store_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). Every scalar takes the first defined value.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut config = Config::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref thresholds) = raw.thresholds {
            apply_raw_thresholds(&mut config.thresholds, thresholds);
        }
        if let Some(ref limits) = raw.limits {
            apply_raw_limits(&mut config.limits, limits);
        }
        if let Some(ref matching) = raw.matching {
            apply_raw_matching(&mut config.matching, matching);
        }
        if let Some(ref server) = raw.server {
            apply_raw_server(&mut config.server, server);
        }
        if let Some(ref store) = raw.store {
            apply_raw_store(&mut config.store, store, parsed.dir())?;
        }
    }

    config.config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(config)
}

/// Applies raw thresholds, overwriting any present values.
fn apply_raw_thresholds(result: &mut ThresholdSettings, raw: &RawThresholds) {
    if let Some(v) = raw.low {
        result.low = v;
    }
    if let Some(v) = raw.medium {
        result.medium = v;
    }
    if let Some(v) = raw.high {
        result.high = v;
    }
}

/// Applies raw limits.
fn apply_raw_limits(result: &mut LimitSettings, raw: &RawLimits) {
    if let Some(v) = raw.brands {
        result.brands = v;
    }
    if let Some(v) = raw.controversies {
        result.controversies = v;
    }
    if let Some(v) = raw.propositions {
        result.propositions = v;
    }
}

/// Applies raw matching settings.
fn apply_raw_matching(result: &mut MatchingSettings, raw: &RawMatching) {
    if let Some(v) = raw.gate {
        result.gate = v;
    }
}

/// Applies raw server settings.
fn apply_raw_server(result: &mut ServerSettings, raw: &RawServer) {
    if let Some(ref v) = raw.host {
        result.host = v.clone();
    }
    if let Some(v) = raw.port {
        result.port = v;
    }
}

/// Applies raw store settings, resolving the snapshot path against `config_dir`.
fn apply_raw_store(
    result: &mut StoreSettings,
    raw: &RawStore,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.backend {
        result.backend = v;
    }
    if let Some(ref v) = raw.path {
        result.path = Some(resolve_store_path(v, config_dir)?);
    }
    if let Some(ref v) = raw.url {
        result.url = Some(v.clone());
    }
    if let Some(ref v) = raw.api_key_env {
        result.api_key_env = v.clone();
    }
    if let Some(v) = raw.cache_ttl_secs {
        result.cache_ttl_secs = v;
    }
    if let Some(v) = raw.timeout_secs {
        result.timeout_secs = v;
    }
    if let Some(ref tables) = raw.tables {
        if let Some(ref v) = tables.brands {
            result.tables.brands = v.clone();
        }
        if let Some(ref v) = tables.controversies {
            result.tables.controversies = v.clone();
        }
        if let Some(ref v) = tables.propositions {
            result.tables.propositions = v.clone();
        }
    }
    Ok(())
}
