//! # h5utils
//!
//! Helpers for storing labelled numeric arrays in HDF5 files and for finding
//! a project's `data/` and `plots/` directories.
//!
//! ## Key Features
//!
//! - **Project paths**: root from git, falling back to a marker file
//! - **Labelled datasets**: chunked float32 datasets with a `label` attribute
//! - **Structure reports**: indented text (or JSON) view of a file's tree
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use h5utils::{data_dir, write_data_and_label, print_structure};
//! use ndarray::Array4;
//!
//! # fn main() -> h5utils::Result<()> {
//! let path = data_dir("example_directory", true)?.join("example.h5");
//! let data = Array4::<f32>::from_elem((1, 3, 4, 4), 0.5);
//! write_data_and_label(&path, "image", &data, ["x"])?;
//!
//! let file = hdf5::File::open(&path)?;
//! print_structure(&file, 2)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod container;
pub mod demo;
pub mod error;
pub mod project;

// Re-exports for convenience
pub use config::Config;
pub use error::{H5Error, Result};

pub use container::{
    inspect_group, print_structure, read_data, read_data_and_label, read_label,
    render_structure, setup_container, write_data_and_label, Node, LABEL_ATTR,
};
pub use project::{
    data_dir, find_project_root, plots_dir, resolve_root, resource_dir, ProjectLayout,
    ResolvedRoot, RootChain, RootSource,
};
