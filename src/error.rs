//! Error types for h5utils.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by path resolution and container I/O.
#[derive(Debug, Error)]
pub enum H5Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("could not find the project root: no {marker} found in {} or any parent directory", .start.display())]
    RootNotFound { marker: String, start: PathBuf },

    #[error("no project root could be resolved ({})", .attempts.join("; "))]
    NoProjectRoot { attempts: Vec<String> },

    #[error("git query failed: {0}")]
    Git(String),

    #[error("dataset '{dataset}' has shape {expected:?}, data has shape {found:?}")]
    ShapeMismatch {
        dataset: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("dataset '{dataset}' stores {found}, expected float32")]
    DtypeMismatch { dataset: String, found: String },

    #[error("'{0}' exists but is not a dataset")]
    NotADataset(String),

    #[error("invalid label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("dataset '{0}' has no label attribute")]
    MissingLabel(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, H5Error>;
