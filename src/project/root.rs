//! Project root resolution: an ordered chain of strategies.
//!
//! The default chain asks git for the working-tree top level and falls back
//! to walking up the directory tree for a marker file. Each strategy either
//! yields a path or an error; errors are collected and only surfaced when
//! every strategy in the chain has failed.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{H5Error, Result};

/// Which strategy produced a project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootSource {
    Git,
    Marker,
}

impl fmt::Display for RootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootSource::Git => write!(f, "git"),
            RootSource::Marker => write!(f, "marker"),
        }
    }
}

/// A resolved project root and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoot {
    pub path: PathBuf,
    pub source: RootSource,
}

/// One way of locating the project root from a starting directory.
pub trait RootStrategy {
    fn source(&self) -> RootSource;

    fn locate(&self, start: &Path) -> Result<PathBuf>;
}

/// Asks git for the top-level directory of the repository containing `start`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitToplevel;

impl RootStrategy for GitToplevel {
    fn source(&self) -> RootSource {
        RootSource::Git
    }

    fn locate(&self, start: &Path) -> Result<PathBuf> {
        if !start.is_dir() {
            return Err(H5Error::Git(format!("no such path: {}", start.display())));
        }

        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(start)
            .output()
            .map_err(|e| H5Error::Git(format!("could not run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(H5Error::Git(stderr.trim().to_string()));
        }

        let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if toplevel.is_empty() {
            return Err(H5Error::Git("not inside a working tree".to_string()));
        }

        let path = PathBuf::from(toplevel);
        if !path.is_dir() {
            return Err(H5Error::Git(format!("no such path: {}", path.display())));
        }
        Ok(path)
    }
}

/// Walks upward from `start` looking for a directory that contains `marker`.
#[derive(Debug, Clone)]
pub struct MarkerWalk {
    pub marker: String,
}

impl MarkerWalk {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }
}

impl RootStrategy for MarkerWalk {
    fn source(&self) -> RootSource {
        RootSource::Marker
    }

    fn locate(&self, start: &Path) -> Result<PathBuf> {
        find_project_root_from(start, &self.marker)
    }
}

/// Find the nearest ancestor of `start` (inclusive) that contains `marker`.
///
/// The filesystem root itself is never matched; reaching it is a
/// [`H5Error::RootNotFound`].
pub fn find_project_root_from(start: &Path, marker: &str) -> Result<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()?.join(start)
    };

    let mut current = start.as_path();
    while let Some(parent) = current.parent() {
        // symlink_metadata so dangling links still count as present
        if current.join(marker).symlink_metadata().is_ok() {
            return Ok(current.to_path_buf());
        }
        current = parent;
    }

    Err(H5Error::RootNotFound {
        marker: marker.to_string(),
        start,
    })
}

/// Ordered fallback chain of root strategies.
pub struct RootChain {
    strategies: Vec<Box<dyn RootStrategy>>,
}

impl RootChain {
    /// An empty chain. Resolving it always fails.
    pub fn new() -> Self {
        Self { strategies: Vec::new() }
    }

    /// Append a strategy; earlier strategies take precedence.
    pub fn with(mut self, strategy: impl RootStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Git first (unless disabled), then the configured marker.
    pub fn from_config(config: &Config) -> Self {
        let chain = Self::new();
        let chain = if config.use_git { chain.with(GitToplevel) } else { chain };
        chain.with(MarkerWalk::new(config.marker.clone()))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Try each strategy in order and return the first success.
    pub fn resolve(&self, start: &Path) -> Result<ResolvedRoot> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match strategy.locate(start) {
                Ok(path) => {
                    info!(
                        root = %path.display(),
                        source = %strategy.source(),
                        "project root resolved"
                    );
                    return Ok(ResolvedRoot {
                        path,
                        source: strategy.source(),
                    });
                }
                Err(e) => {
                    debug!(
                        source = %strategy.source(),
                        error = %e,
                        "root strategy failed, falling back"
                    );
                    attempts.push(format!("{}: {}", strategy.source(), e));
                }
            }
        }

        Err(H5Error::NoProjectRoot { attempts })
    }
}

impl Default for RootChain {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
