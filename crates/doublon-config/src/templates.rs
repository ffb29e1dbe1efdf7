//! Starter files written by `doublon init`.
//!
//! Both templates are kept as valid TOML under `templates/` and are written fully commented
//! out, so a fresh file documents every key without changing the effective settings.

use std::path::{Path, PathBuf};

use crate::discovery::{CONFIG_FILENAME, global_config_path};

/// Which configuration file a template is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `.doublon.toml` in the working directory.
    Local,
    /// `~/.doublon.toml`.
    Global,
}

impl ConfigScope {
    /// Global when asked for, or when `cwd` already is the home directory.
    pub fn for_cwd(cwd: &Path, global: bool) -> Self {
        let in_home = global_config_path().is_some_and(|p| p.parent() == Some(cwd));
        if global || in_home {
            Self::Global
        } else {
            Self::Local
        }
    }

    /// Where the file for this scope lives, `None` when home cannot be determined.
    pub fn config_path(self, cwd: &Path) -> Option<PathBuf> {
        match self {
            Self::Local => Some(cwd.join(CONFIG_FILENAME)),
            Self::Global => global_config_path(),
        }
    }

    /// The uncommented template source.
    fn source(self) -> &'static str {
        match self {
            Self::Local => include_str!("../templates/config.toml"),
            Self::Global => include_str!("../templates/config-global.toml"),
        }
    }

    /// The template as written to disk.
    pub fn template(self) -> String {
        self.source()
            .lines()
            .map(|line| {
                if line.is_empty() || line.starts_with('#') {
                    format!("{line}\n")
                } else {
                    format!("# {line}\n")
                }
            })
            .collect()
    }
}
