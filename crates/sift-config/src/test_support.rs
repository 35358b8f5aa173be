//! Layered `.sift.toml` trees for sift-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary project tree whose directories may each carry a `.sift.toml`.
pub struct ConfigTree {
    /// Owned temporary directory, removed on drop.
    root: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Top of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates `rel` (and its parents) and returns it.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a config in `rel` whose engine url names the layer.
    ///
    /// An empty `rel` writes at the top of the tree.
    pub fn layer(&self, rel: &str) -> PathBuf {
        let url = format!("http://{}:9200", layer_host(rel));
        self.write(rel, &format!("[engine]\nurl = \"{url}\"\n"))
    }

    /// Writes a config in `rel` that stops discovery.
    pub fn root_layer(&self, rel: &str) -> PathBuf {
        self.write(rel, &format!("root = true\n[indices]\ncontents = \"{}\"\n", layer_host(rel)))
    }

    /// Writes `content` as the config in `rel`.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let config = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&config, content).unwrap();
        config
    }
}

/// Host-safe label for the layer at `rel`.
pub fn layer_host(rel: &str) -> String {
    if rel.is_empty() {
        String::from("top")
    } else {
        rel.replace('/', "-")
    }
}
