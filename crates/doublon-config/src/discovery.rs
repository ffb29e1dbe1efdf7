//! Locating `.doublon.toml` files.
//!
//! A deployment usually keeps one file next to its snapshot and, optionally, one in the home
//! directory with the REST credentials variable and listener defaults.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".doublon.toml";

/// Lists the configuration files that apply to `cwd`, highest precedence first.
///
/// Every ancestor of `cwd` (inclusive) holding a `.doublon.toml` contributes one entry. A file
/// with `root = true` ends the walk and also hides the global file; otherwise `~/.doublon.toml`
/// comes last when it exists and was not already reached by the walk.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        found.push(candidate);
        if stop {
            return found;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file())
        && !found.contains(&global)
    {
        found.push(global);
    }
    found
}

/// Location of the global configuration file, `None` without a home directory.
pub fn global_config_path() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    Some(dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| global == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Tree;

    /// Discovery result without the developer's own `~/.doublon.toml`.
    fn discover_local(cwd: &Path) -> Vec<PathBuf> {
        discover_config_files(cwd)
            .into_iter()
            .filter(|p| !is_global_config(p))
            .collect()
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let tree = Tree::new();
        let cwd = tree.dir("exports/2024");
        assert!(discover_local(&cwd).is_empty());
    }

    #[test]
    fn nearest_file_comes_first() {
        let tree = Tree::new();
        let outer = tree.config("", "[server]\nport = 8080\n");
        let deployment = tree.config("deploy", "[store]\npath = \"snapshot.json\"\n");
        let cwd = tree.dir("deploy/logs");

        assert_eq!(discover_local(&cwd), vec![deployment, outer]);
    }

    #[test]
    fn config_in_cwd_is_found() {
        let tree = Tree::new();
        let here = tree.config("deploy", "");
        assert_eq!(discover_local(&tree.path().join("deploy")), vec![here]);
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let tree = Tree::new();
        tree.dir(CONFIG_FILENAME);
        let cwd = tree.dir("deploy");
        assert!(discover_local(&cwd).is_empty());
    }

    #[test]
    fn root_marker_ends_walk_and_hides_global() {
        let tree = Tree::new();
        tree.config("", "[limits]\nbrands = 1\n");
        let pinned = tree.config("deploy", "root = true\n");
        let cwd = tree.dir("deploy/logs");

        assert_eq!(discover_config_files(&cwd), vec![pinned]);
    }

    #[test]
    fn explicit_root_false_keeps_walking() {
        let tree = Tree::new();
        let outer = tree.config("", "");
        let inner = tree.config("deploy", "root = false\n");

        assert_eq!(discover_local(&tree.dir("deploy/logs")), vec![inner, outer]);
    }

    #[test]
    fn global_path_lives_in_home() {
        let global = global_config_path().unwrap();
        assert_eq!(global.file_name().unwrap(), CONFIG_FILENAME);
        assert!(is_global_config(&global));
    }
}
