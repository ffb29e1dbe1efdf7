//! Turning the configured snapshot path into a filesystem location.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves the `[store] path` value found in the config file stored in `config_dir`.
///
/// `~` and `~/…` expand to the home directory, relative values are taken relative to
/// `config_dir`, and absolute values pass through. Existence is checked later by
/// `Config::validate`.
pub fn resolve_store_path(raw: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let path = match raw.strip_prefix('~') {
        Some("") => home()?,
        Some(rest) if rest.starts_with('/') => home()?.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(raw),
    };

    if path.is_absolute() {
        return Ok(path);
    }
    Ok(config_dir.join(path))
}

/// Home directory of the current user.
fn home() -> Result<PathBuf, ConfigError> {
    let dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(dirs.home_dir().to_path_buf())
}
