//! Read datasets and their labels back from a container file.

use hdf5::{Dataset, File, Group};
use ndarray::ArrayD;
use std::path::Path;

use super::values::{dtype_name, read_values};
use super::LABEL_ATTR;
use crate::error::{H5Error, Result};

/// Open `name` under `group`, distinguishing "is a group" from "missing".
pub fn open_dataset(group: &Group, name: &str) -> Result<Dataset> {
    group.dataset(name).map_err(|e| {
        if group.group(name).is_ok() {
            H5Error::NotADataset(name.to_string())
        } else {
            H5Error::Hdf5(e)
        }
    })
}

/// Read the full contents of a dataset as float32.
pub fn read_data(file_path: impl AsRef<Path>, dataset_name: &str) -> Result<ArrayD<f32>> {
    let file = File::open(file_path.as_ref())?;
    let dataset = open_dataset(&file, dataset_name)?;
    Ok(dataset.read_dyn::<f32>()?)
}

/// Decode the `label` attribute of a dataset into strings.
pub fn read_label(file_path: impl AsRef<Path>, dataset_name: &str) -> Result<Vec<String>> {
    let file = File::open(file_path.as_ref())?;
    let dataset = open_dataset(&file, dataset_name)?;
    dataset_labels(&dataset, dataset_name)
}

/// Read a dataset and its labels with a single open.
pub fn read_data_and_label(
    file_path: impl AsRef<Path>,
    dataset_name: &str,
) -> Result<(ArrayD<f32>, Vec<String>)> {
    let file = File::open(file_path.as_ref())?;
    let dataset = open_dataset(&file, dataset_name)?;
    let data = dataset.read_dyn::<f32>()?;
    let labels = dataset_labels(&dataset, dataset_name)?;
    Ok((data, labels))
}

fn dataset_labels(dataset: &Dataset, name: &str) -> Result<Vec<String>> {
    if !dataset.attr_names()?.iter().any(|n| n == LABEL_ATTR) {
        return Err(H5Error::MissingLabel(name.to_string()));
    }
    let attr = dataset.attr(LABEL_ATTR)?;

    match read_values(&attr)?.and_then(|v| v.into_text()) {
        Some(labels) => Ok(labels),
        None => {
            let dtype = dtype_name(&attr.dtype()?.to_descriptor()?);
            Err(H5Error::InvalidLabel {
                label: LABEL_ATTR.to_string(),
                reason: format!("stored as {}, not strings", dtype),
            })
        }
    }
}
