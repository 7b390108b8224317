//! Project paths: locate the project root and its data/plots directories.
//!
//! The free functions here resolve against the current working directory
//! with the default [`Config`]. Use [`ProjectLayout`] for a custom marker,
//! custom directory names or an explicit starting directory.

pub mod layout;
pub mod root;

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

pub use layout::ProjectLayout;
pub use root::{
    find_project_root_from, GitToplevel, MarkerWalk, ResolvedRoot, RootChain, RootSource,
    RootStrategy,
};

/// Walk up from the current directory until a directory containing `marker` is found.
pub fn find_project_root(marker: &str) -> Result<PathBuf> {
    find_project_root_from(&std::env::current_dir()?, marker)
}

/// Git top-level of the current directory, falling back to the `setup.cfg` marker.
pub fn resolve_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(RootChain::default().resolve(&cwd)?.path)
}

/// `<root>/<category>/<name>`, created on demand when `create` is set.
pub fn resource_dir(category: &str, name: &str, create: bool) -> Result<PathBuf> {
    ProjectLayout::current(Config::default())?.resource_dir(category, name, create)
}

/// `<root>/data/<name>`.
pub fn data_dir(name: &str, create: bool) -> Result<PathBuf> {
    ProjectLayout::current(Config::default())?.data_dir(name, create)
}

/// `<root>/plots/<name>`.
pub fn plots_dir(name: &str, create: bool) -> Result<PathBuf> {
    ProjectLayout::current(Config::default())?.plots_dir(name, create)
}
