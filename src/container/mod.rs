//! Container module: labelled float32 datasets in HDF5 files.
//!
//! - `writer`: create chunked datasets and overwrite data + label
//! - `reader`: read datasets and labels back
//! - `structure`: render the group/dataset/attribute tree as text
//! - `values`: attribute decoding and dtype names shared by the above

pub mod reader;
pub mod structure;
pub mod values;
pub mod writer;

/// Attribute name the label array is stored under.
pub const LABEL_ATTR: &str = "label";

pub use reader::{open_dataset, read_data, read_data_and_label, read_label};
pub use structure::{
    inspect_group, print_structure, render_structure, AttributeInfo, DatasetInfo, Node,
    StructureReport, DEFAULT_INDENT, SMALL_ATTRIBUTE_LIMIT,
};
pub use values::AttributeValues;
pub use writer::{chunk_shape, require_dataset, setup_container, write_data_and_label};
