//! Image round-trip demo: write an RGB image as a `(1, C, H, W)` float32
//! dataset with a label, print the file structure and read it back.

use hdf5::File;
use ndarray::{Array3, Array4, Axis};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::container::{
    read_data_and_label, render_structure, write_data_and_label, DEFAULT_INDENT,
};
use crate::error::Result;
use crate::project::ProjectLayout;

pub const DEMO_FILE: &str = "astronaut.h5";
pub const DEMO_DATASET: &str = "image";
pub const DEMO_LABEL: &str = "astronaut";

/// What the demo wrote and read back.
#[derive(Debug, Clone, Serialize)]
pub struct DemoSummary {
    pub file: PathBuf,
    pub dataset: String,
    pub label: String,
    pub shape: Vec<usize>,
    pub channel_means: Vec<f32>,
    pub structure: String,
}

/// An 8-bit RGB test card in `(H, W, 3)` layout.
pub fn test_card(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
        0 => (x * 255 / width.max(1)) as u8,
        1 => (y * 255 / height.max(1)) as u8,
        _ => (((x / 8) + (y / 8)) % 2 * 255) as u8,
    })
}

/// Normalize to `[0, 1]` and move channels first: `(H, W, C)` to `(1, C, H, W)`.
pub fn to_nchw(image: &Array3<u8>) -> Array4<f32> {
    image
        .mapv(|v| v as f32 / 255.0)
        .insert_axis(Axis(0))
        .permuted_axes([0, 3, 1, 2])
}

/// Write the test card under `data/<name>/`, then read it back.
pub fn run(layout: &ProjectLayout, name: &str, height: usize, width: usize) -> Result<DemoSummary> {
    let file_path = layout.data_dir(name, true)?.join(DEMO_FILE);
    let data = to_nchw(&test_card(height, width));

    write_data_and_label(&file_path, DEMO_DATASET, &data, [DEMO_LABEL])?;
    info!(file = %file_path.display(), "demo image written");

    let structure = {
        let file = File::open(&file_path)?;
        render_structure(&file, DEFAULT_INDENT)?
    };

    let (back, labels) = read_data_and_label(&file_path, DEMO_DATASET)?;
    let image = back.index_axis(Axis(0), 0);
    let channel_means = image
        .outer_iter()
        .map(|channel| channel.mean().unwrap_or(0.0))
        .collect();

    Ok(DemoSummary {
        file: file_path,
        dataset: DEMO_DATASET.to_string(),
        label: labels.into_iter().next().unwrap_or_default(),
        shape: back.shape().to_vec(),
        channel_means,
        structure,
    })
}
