//! Project layout: `data/<name>` and `plots/<name>` under the project root.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::root::{ResolvedRoot, RootChain};
use crate::config::Config;
use crate::error::Result;

/// Resolves the project root and derives resource directories from it.
///
/// Nothing is cached: every call re-runs root resolution from `start`.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    config: Config,
    start: PathBuf,
}

impl ProjectLayout {
    pub fn new(config: Config, start: impl Into<PathBuf>) -> Self {
        Self {
            config,
            start: start.into(),
        }
    }

    /// Layout anchored at the current working directory.
    pub fn current(config: Config) -> Result<Self> {
        Ok(Self::new(config, std::env::current_dir()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn start(&self) -> &Path {
        &self.start
    }

    /// Resolve the project root through the configured fallback chain.
    pub fn root(&self) -> Result<ResolvedRoot> {
        RootChain::from_config(&self.config).resolve(&self.start)
    }

    /// `<root>/<category>/<name>`, created (with parents) when `create` is set.
    pub fn resource_dir(&self, category: &str, name: &str, create: bool) -> Result<PathBuf> {
        let root = self.root()?;
        let path = root.path.join(category).join(name);
        if create && !path.exists() {
            fs::create_dir_all(&path)?;
            info!(path = %path.display(), "created directory");
        }
        Ok(path)
    }

    pub fn data_dir(&self, name: &str, create: bool) -> Result<PathBuf> {
        self.resource_dir(&self.config.data_dir, name, create)
    }

    pub fn plots_dir(&self, name: &str, create: bool) -> Result<PathBuf> {
        self.resource_dir(&self.config.plots_dir, name, create)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn marker_layout(root: &Path) -> ProjectLayout {
        let config = Config {
            marker: "h5utils-layout.cfg".to_string(),
            use_git: false,
            ..Config::default()
        };
        fs::write(root.join(&config.marker), "").unwrap();
        let start = root.join("notebooks");
        fs::create_dir_all(&start).unwrap();
        ProjectLayout::new(config, start)
    }

    #[test]
    fn test_resource_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let layout = marker_layout(dir.path());

        let first = layout.resource_dir("data", "run1", true).unwrap();
        assert!(first.is_dir());
        assert_eq!(first, dir.path().join("data").join("run1"));

        let second = layout.resource_dir("data", "run1", true).unwrap();
        assert_eq!(first, second);
        assert!(second.is_dir());
    }

    #[test]
    fn test_no_create_leaves_disk_untouched() {
        let dir = tempdir().unwrap();
        let layout = marker_layout(dir.path());

        let path = layout.plots_dir("figs", false).unwrap();
        assert_eq!(path, dir.path().join("plots").join("figs"));
        assert!(!path.exists());
        assert!(!dir.path().join("plots").exists());
    }

    #[test]
    fn test_nested_names_create_intermediates() {
        let dir = tempdir().unwrap();
        let layout = marker_layout(dir.path());

        let path = layout.data_dir("a/b/c", true).unwrap();
        assert!(path.is_dir());
        assert!(path.ends_with("data/a/b/c"));
    }

    #[test]
    fn test_custom_directory_names() {
        let dir = tempdir().unwrap();
        let mut layout = marker_layout(dir.path());
        layout.config.data_dir = "datasets".to_string();
        layout.config.plots_dir = "figures".to_string();

        assert_eq!(
            layout.data_dir("x", false).unwrap(),
            dir.path().join("datasets").join("x")
        );
        assert_eq!(
            layout.plots_dir("x", false).unwrap(),
            dir.path().join("figures").join("x")
        );
    }

    #[test]
    fn test_root_is_not_cached() {
        let dir = tempdir().unwrap();
        let layout = marker_layout(dir.path());
        assert_eq!(layout.root().unwrap().path, dir.path());

        // A closer marker appearing later is picked up on the next call.
        fs::write(layout.start().join(&layout.config().marker), "").unwrap();
        assert_eq!(layout.root().unwrap().path, layout.start());
    }
}
