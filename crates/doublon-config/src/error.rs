//! Configuration loading failures.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Why the configuration could not be loaded. Semantic problems with otherwise well-formed
/// files are reported as [`crate::ConfigWarning`]s instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A discovered `.doublon.toml` could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// File being read.
        path: PathBuf,
        /// I/O failure.
        source: io::Error,
    },

    /// A `.doublon.toml` is not valid TOML or does not match the settings schema.
    #[error("invalid configuration in {path}: {source}")]
    ParseToml {
        /// File being parsed.
        path: PathBuf,
        /// Deserialization failure, with line and column.
        source: de::Error,
    },

    /// A `~` store path was configured but the home directory is unknown.
    #[error("cannot expand ~ in store.path: home directory unknown")]
    NoHomeDirectory,
}
