//! Project configuration loaded from `h5utils.toml`.
//!
//! Every field is optional in the file; missing fields fall back to the
//! defaults below.
//!
//! ```toml
//! marker = "setup.cfg"
//! data_dir = "data"
//! plots_dir = "plots"
//! use_git = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{H5Error, Result};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "h5utils.toml";

/// Marker file used when the git query cannot resolve a root.
pub const DEFAULT_MARKER: &str = "setup.cfg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filename that identifies the project root during the upward walk.
    pub marker: String,
    /// Directory under the root holding data files.
    pub data_dir: String,
    /// Directory under the root holding figures.
    pub plots_dir: String,
    /// Ask git for the working-tree root before walking for the marker.
    pub use_git: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            data_dir: "data".to_string(),
            plots_dir: "plots".to_string(),
            use_git: true,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| H5Error::Config(e.to_string()))
    }

    /// Load a config file. Fails if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Load `path` if given, else `<dir>/h5utils.toml` if present, else defaults.
    pub fn load_or_default(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml("marker = \"Cargo.toml\"").unwrap();
        assert_eq!(config.marker, "Cargo.toml");
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.plots_dir, "plots");
        assert!(config.use_git);
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::from_toml("marker = [");
        assert!(matches!(result, Err(H5Error::Config(_))));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "use_git = false\nplots_dir = \"figures\"\n",
        )
        .unwrap();
        let config = Config::load_or_default(None, dir.path()).unwrap();
        assert!(!config.use_git);
        assert_eq!(config.plots_dir, "figures");
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load_or_default(Some(&missing), dir.path()),
            Err(H5Error::Io(_))
        ));
    }
}
