//! Configuration file discovery.
//!
//! Discovers `.sift.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.sift.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".sift.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.sift.toml`) last.
/// Discovery stops at the first file that sets `root = true`; the global file is then skipped.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stops = is_root_config(&candidate);
        configs.push(candidate);
        if stops {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }
    configs
}

/// Returns the path to the global configuration file (`~/.sift.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::ConfigTree;

    fn without_global(configs: Vec<PathBuf>) -> Vec<PathBuf> {
        configs.into_iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn empty_tree_has_no_local_configs() {
        let tree = ConfigTree::new();
        let cwd = tree.dir("app/src/bin");

        assert!(without_global(discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn closest_layer_comes_first() {
        let tree = ConfigTree::new();
        let top = tree.layer("");
        let service = tree.layer("services/feed");
        let cwd = tree.dir("services/feed/src");

        let configs = without_global(discover_config_files(&cwd));

        assert_eq!(configs, vec![service, top]);
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let tree = ConfigTree::new();
        fs::create_dir_all(tree.path().join(CONFIG_FILENAME)).unwrap();
        let cwd = tree.dir("app");

        assert!(without_global(discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn root_layer_stops_the_walk() {
        let tree = ConfigTree::new();
        tree.layer("");
        let project = tree.root_layer("project");
        let child = tree.layer("project/ingest");
        let cwd = tree.dir("project/ingest/jobs");

        assert_eq!(discover_config_files(&cwd), vec![child, project]);
    }

    #[test]
    fn global_path_is_recognised() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/srv/search/.sift.toml")));
    }
}
