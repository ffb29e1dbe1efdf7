//! Scratch directory trees for unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A throwaway directory tree, removed on drop.
pub struct Tree(TempDir);

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` (and its parents) as a directory.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a `.doublon.toml` inside `dir` (`""` for the tree root).
    pub fn config(&self, dir: &str, content: &str) -> PathBuf {
        self.write(&Path::new(dir).join(CONFIG_FILENAME).to_string_lossy(), content)
    }
}
