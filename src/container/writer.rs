//! Container writer: create chunked float32 datasets and overwrite them
//! together with their `label` attribute.

use hdf5::types::VarLenUnicode;
use hdf5::{Dataset, File, Group, H5Type};
use ndarray::{ArrayBase, Data, Dimension};
use std::path::Path;
use tracing::{debug, info};

use super::values::dtype_name;
use super::LABEL_ATTR;
use crate::error::{H5Error, Result};

/// Write `data` into `dataset_name` and attach `labels` as its `label` attribute.
///
/// A missing file is created (and the dataset set up from `data`'s shape)
/// first. The dataset contents and the label attribute are fully replaced;
/// nothing is appended. Data whose shape differs from the existing dataset
/// is rejected with [`H5Error::ShapeMismatch`] before anything is written.
pub fn write_data_and_label<S, D, I, L>(
    file_path: impl AsRef<Path>,
    dataset_name: &str,
    data: &ArrayBase<S, D>,
    labels: I,
) -> Result<()>
where
    S: Data<Elem = f32>,
    D: Dimension,
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let file_path = file_path.as_ref();
    let labels = encode_labels(labels)?;

    if !file_path.exists() {
        setup_container(file_path, dataset_name, data.shape())?;
    }

    let file = File::open_rw(file_path)?;
    let dataset = require_dataset(&file, dataset_name, data.shape())?;

    let standard = data.as_standard_layout();
    dataset.write(&standard)?;
    set_labels(&dataset, &labels)?;

    debug!(
        file = %file_path.display(),
        dataset = dataset_name,
        elements = data.len(),
        labels = labels.len(),
        "dataset written"
    );
    Ok(())
}

/// Open or create `file_path` and require a float32 dataset of `shape`.
///
/// Idempotent for an existing dataset of the same shape; any other shape
/// or element type is an error.
pub fn setup_container(
    file_path: impl AsRef<Path>,
    dataset_name: &str,
    shape: &[usize],
) -> Result<()> {
    let file = File::append(file_path.as_ref())?;
    require_dataset(&file, dataset_name, shape)?;
    Ok(())
}

/// Chunk layout for a dataset: one leading-axis element per chunk.
///
/// `None` means contiguous storage, used for scalars and for shapes with a
/// zero-length axis, which HDF5 cannot chunk at a fixed size.
pub fn chunk_shape(shape: &[usize]) -> Option<Vec<usize>> {
    if shape.is_empty() || shape.contains(&0) {
        return None;
    }
    let mut chunk = shape.to_vec();
    chunk[0] = 1;
    Some(chunk)
}

/// Return the dataset at `name`, creating it (and any parent groups) if absent.
pub fn require_dataset(root: &Group, name: &str, shape: &[usize]) -> Result<Dataset> {
    let (parent, leaf) = require_parent(root, name)?;

    if parent.link_exists(leaf) {
        let dataset = parent
            .dataset(leaf)
            .map_err(|_| H5Error::NotADataset(name.to_string()))?;
        check_dataset(&dataset, name, shape)?;
        return Ok(dataset);
    }

    let builder = parent.new_dataset::<f32>();
    let dataset = match chunk_shape(shape) {
        Some(chunk) => builder.chunk(chunk).shape(shape).create(leaf)?,
        None => builder.no_chunk().shape(shape).create(leaf)?,
    };

    info!(dataset = name, shape = ?shape, "dataset created");
    Ok(dataset)
}

fn check_dataset(dataset: &Dataset, name: &str, shape: &[usize]) -> Result<()> {
    let descriptor = dataset.dtype()?.to_descriptor()?;
    if descriptor != f32::type_descriptor() {
        return Err(H5Error::DtypeMismatch {
            dataset: name.to_string(),
            found: dtype_name(&descriptor),
        });
    }

    let existing = dataset.shape();
    if existing != shape {
        return Err(H5Error::ShapeMismatch {
            dataset: name.to_string(),
            expected: existing,
            found: shape.to_vec(),
        });
    }
    Ok(())
}

/// Walk (and create) the groups leading to the last path component of `name`.
fn require_parent<'a>(root: &Group, name: &'a str) -> Result<(Group, &'a str)> {
    let mut segments: Vec<&str> = name.split('/').filter(|s| !s.is_empty()).collect();
    let leaf = segments.pop().ok_or_else(|| H5Error::NotADataset(name.to_string()))?;

    let mut group = root.clone();
    for segment in segments {
        group = if group.link_exists(segment) {
            group.group(segment)?
        } else {
            debug!(group = segment, "creating intermediate group");
            group.create_group(segment)?
        };
    }
    Ok((group, leaf))
}

fn encode_labels<I, L>(labels: I) -> Result<Vec<VarLenUnicode>>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| {
            let label = label.as_ref();
            label.parse::<VarLenUnicode>().map_err(|e| H5Error::InvalidLabel {
                label: label.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Replace the `label` attribute with a 1-D string array.
fn set_labels(dataset: &Dataset, labels: &[VarLenUnicode]) -> Result<()> {
    if dataset.attr_names()?.iter().any(|n| n == LABEL_ATTR) {
        dataset.delete_attr(LABEL_ATTR)?;
    }
    dataset
        .new_attr::<VarLenUnicode>()
        .shape((labels.len(),))
        .create(LABEL_ATTR)?
        .write_raw(labels)?;
    Ok(())
}
