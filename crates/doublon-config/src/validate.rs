//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{env, fmt};

use crate::{Config, StoreBackend};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// Thresholds are not ordered `low <= medium <= high`.
    ThresholdsOutOfOrder {
        /// Low cutoff.
        low: f64,
        /// Medium cutoff.
        medium: f64,
        /// High cutoff.
        high: f64,
    },
    /// A score setting lies outside `[0, 1]`.
    ValueOutOfRange {
        /// Dotted key of the setting.
        key: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A result limit is zero, so that collection can never report a match.
    ZeroLimit {
        /// Dotted key of the setting.
        key: &'static str,
    },
    /// The JSON backend is selected but no snapshot path is configured.
    StorePathMissing,
    /// The configured snapshot file does not exist.
    StorePathNotFound {
        /// Path that doesn't exist.
        path: String,
    },
    /// The REST backend is selected but no URL is configured.
    StoreUrlMissing,
    /// The REST API key variable is not set in the environment.
    ApiKeyUnset {
        /// Name of the environment variable.
        var: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdsOutOfOrder { low, medium, high } => write!(
                f,
                "thresholds should satisfy low <= medium <= high (got {low}, {medium}, {high})"
            ),
            Self::ValueOutOfRange { key, value } => {
                write!(f, "{key} should be between 0 and 1 (got {value})")
            }
            Self::ZeroLimit { key } => write!(f, "{key} is 0, no matches will be returned"),
            Self::StorePathMissing => write!(f, "store.path is not set for the json backend"),
            Self::StorePathNotFound { path } => write!(f, "store file does not exist: {path}"),
            Self::StoreUrlMissing => write!(f, "store.url is not set for the rest backend"),
            Self::ApiKeyUnset { var } => {
                write!(f, "environment variable {var} is not set, requests will be anonymous")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let t = &config.thresholds;
    let ranged = [
        ("thresholds.low", t.low),
        ("thresholds.medium", t.medium),
        ("thresholds.high", t.high),
        ("matching.gate", config.matching.gate),
    ];
    for (key, value) in ranged {
        if !(0.0..=1.0).contains(&value) {
            warnings.push(ConfigWarning::ValueOutOfRange { key, value });
        }
    }

    if !(t.low <= t.medium && t.medium <= t.high) {
        warnings.push(ConfigWarning::ThresholdsOutOfOrder {
            low: t.low,
            medium: t.medium,
            high: t.high,
        });
    }

    let limits = [
        ("limits.brands", config.limits.brands),
        ("limits.controversies", config.limits.controversies),
        ("limits.propositions", config.limits.propositions),
    ];
    for (key, value) in limits {
        if value == 0 {
            warnings.push(ConfigWarning::ZeroLimit { key });
        }
    }

    let store = &config.store;
    match store.backend {
        StoreBackend::Json => match store.path {
            None => warnings.push(ConfigWarning::StorePathMissing),
            Some(ref path) if !path.is_file() => {
                warnings.push(ConfigWarning::StorePathNotFound {
                    path: path.display().to_string(),
                });
            }
            Some(_) => {}
        },
        StoreBackend::Rest => {
            if store.url.is_none() {
                warnings.push(ConfigWarning::StoreUrlMissing);
            }
            if env::var_os(&store.api_key_env).is_none() {
                warnings.push(ConfigWarning::ApiKeyUnset {
                    var: store.api_key_env.clone(),
                });
            }
        }
    }

    warnings
}
