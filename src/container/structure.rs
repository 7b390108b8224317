//! Structure printer: depth-first report of groups, datasets and attributes.
//!
//! Traversal and formatting are split: [`inspect_group`] classifies every
//! member as a [`Node::Group`] or a [`Node::Dataset`] and collects shapes,
//! dtypes and small attribute values; [`StructureReport`] renders the
//! resulting tree as indented text.

use hdf5::{Dataset, Group};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::values::{dtype_name, format_shape, read_values, AttributeValues};
use crate::error::Result;

/// Attributes with fewer elements than this have their values decoded.
pub const SMALL_ATTRIBUTE_LIMIT: usize = 10;

/// Default indentation of top-level entries.
pub const DEFAULT_INDENT: usize = 2;

/// One member of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Group { name: String, children: Vec<Node> },
    Dataset(DatasetInfo),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group { name, .. } => name,
            Node::Dataset(info) => &info.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: String,
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeInfo {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: String,
    /// Present only for attributes below [`SMALL_ATTRIBUTE_LIMIT`] elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<AttributeValues>,
}

/// Walk `group` depth-first in the library's member order.
///
/// Members that are neither groups nor datasets (named datatypes) are
/// skipped.
pub fn inspect_group(group: &Group) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();

    for name in group.member_names()? {
        if let Ok(dataset) = group.dataset(&name) {
            nodes.push(Node::Dataset(describe_dataset(&name, &dataset)?));
        } else if let Ok(subgroup) = group.group(&name) {
            let children = inspect_group(&subgroup)?;
            nodes.push(Node::Group { name, children });
        } else {
            debug!(member = %name, "skipping member that is neither group nor dataset");
        }
    }

    Ok(nodes)
}

fn describe_dataset(name: &str, dataset: &Dataset) -> Result<DatasetInfo> {
    let mut attributes = Vec::new();

    for attr_name in dataset.attr_names()? {
        let attr = dataset.attr(&attr_name)?;
        let values = if attr.size() < SMALL_ATTRIBUTE_LIMIT {
            read_values(&attr)?
        } else {
            None
        };
        attributes.push(AttributeInfo {
            name: attr_name,
            shape: attr.shape(),
            dtype: dtype_name(&attr.dtype()?.to_descriptor()?),
            values,
        });
    }

    Ok(DatasetInfo {
        name: name.to_string(),
        shape: dataset.shape(),
        dtype: dtype_name(&dataset.dtype()?.to_descriptor()?),
        attributes,
    })
}

/// Text rendering of an inspected tree.
pub struct StructureReport<'a> {
    nodes: &'a [Node],
    indent: usize,
}

impl<'a> StructureReport<'a> {
    pub fn new(nodes: &'a [Node], indent: usize) -> Self {
        Self { nodes, indent }
    }

    fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node], indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        let detail = " ".repeat(indent + 4);

        for node in nodes {
            match node {
                Node::Group { name, children } => {
                    writeln!(f, "{}group: {}/", pad, name)?;
                    Self::write_nodes(f, children, indent + 2)?;
                }
                Node::Dataset(info) => {
                    writeln!(f, "{}dataset:", pad)?;
                    writeln!(
                        f,
                        "{}{} (shape: {}, dtype: {})",
                        detail,
                        info.name,
                        format_shape(&info.shape),
                        info.dtype
                    )?;

                    if info.attributes.is_empty() {
                        continue;
                    }
                    writeln!(f, "{}attributes:", pad)?;
                    for attr in &info.attributes {
                        writeln!(
                            f,
                            "{}{}: (shape={}, dtype={})",
                            detail,
                            attr.name,
                            format_shape(&attr.shape),
                            attr.dtype
                        )?;
                        if let Some(values) = &attr.values {
                            writeln!(f, "{}values: {}", detail, values)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for StructureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HDF5 File Structure:")?;
        Self::write_nodes(f, self.nodes, self.indent)
    }
}

/// Render the structure of `group` as text.
pub fn render_structure(group: &Group, indent: usize) -> Result<String> {
    let nodes = inspect_group(group)?;
    Ok(StructureReport::new(&nodes, indent).to_string())
}

/// Print the structure of `group` to stdout.
pub fn print_structure(group: &Group, indent: usize) -> Result<()> {
    print!("{}", render_structure(group, indent)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::writer::write_data_and_label;
    use crate::container::LABEL_ATTR;
    use hdf5::types::FixedAscii;
    use hdf5::File;
    use ndarray::{Array1, Array4};
    use tempfile::tempdir;

    #[test]
    fn test_report_layout() {
        let nodes = vec![
            Node::Group {
                name: "grp".to_string(),
                children: vec![Node::Dataset(DatasetInfo {
                    name: "inner".to_string(),
                    shape: vec![2],
                    dtype: "float32".to_string(),
                    attributes: vec![],
                })],
            },
            Node::Dataset(DatasetInfo {
                name: "image".to_string(),
                shape: vec![1, 3, 4, 4],
                dtype: "float32".to_string(),
                attributes: vec![AttributeInfo {
                    name: "label".to_string(),
                    shape: vec![1],
                    dtype: "str".to_string(),
                    values: Some(AttributeValues::Text(vec!["x".to_string()])),
                }],
            }),
        ];

        let expected = "\
HDF5 File Structure:
  group: grp/
    dataset:
        inner (shape: (2,), dtype: float32)
  dataset:
      image (shape: (1, 3, 4, 4), dtype: float32)
  attributes:
      label: (shape=(1,), dtype=str)
      values: ['x']
";
        assert_eq!(StructureReport::new(&nodes, DEFAULT_INDENT).to_string(), expected);
    }

    #[test]
    fn test_inspect_lists_groups_and_datasets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("structure.h5");

        let image = Array4::<f32>::from_elem((1, 3, 4, 4), 0.5);
        write_data_and_label(&path, "image", &image, ["x"]).unwrap();
        let series = Array1::<f32>::zeros(12);
        write_data_and_label(&path, "runs/series", &series, ["only"]).unwrap();

        let file = File::open(&path).unwrap();
        let nodes = inspect_group(&file).unwrap();
        let names: Vec<&str> = nodes.iter().map(|n| n.name()).collect();
        assert!(names.contains(&"image"));
        assert!(names.contains(&"runs"));

        let image_node = nodes.iter().find(|n| n.name() == "image").unwrap();
        match image_node {
            Node::Dataset(info) => {
                assert_eq!(info.shape, vec![1, 3, 4, 4]);
                assert_eq!(info.dtype, "float32");
                assert_eq!(info.attributes.len(), 1);
                assert_eq!(info.attributes[0].name, "label");
                assert_eq!(info.attributes[0].shape, vec![1]);
            }
            other => panic!("Expected dataset, got: {:?}", other),
        }

        let runs = nodes.iter().find(|n| n.name() == "runs").unwrap();
        match runs {
            Node::Group { children, .. } => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].name(), "series");
            }
            other => panic!("Expected group, got: {:?}", other),
        }
    }

    #[test]
    fn test_small_attribute_values_shown_large_hidden() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attrs.h5");

        let nine: Vec<String> = (0..9).map(|i| format!("label_{}", i)).collect();
        let ten: Vec<String> = (0..10).map(|i| format!("label_{}", i)).collect();
        write_data_and_label(&path, "nine", &Array1::<f32>::zeros(9), &nine).unwrap();
        write_data_and_label(&path, "ten", &Array1::<f32>::zeros(10), &ten).unwrap();

        let file = File::open(&path).unwrap();
        let report = render_structure(&file, DEFAULT_INDENT).unwrap();

        assert!(report.starts_with("HDF5 File Structure:\n"));
        assert!(report.contains("nine (shape: (9,), dtype: float32)"));
        assert!(report.contains("ten (shape: (10,), dtype: float32)"));
        assert!(report.contains("label: (shape=(9,), dtype=str)"));
        assert!(report.contains("label: (shape=(10,), dtype=str)"));
        assert!(report.contains("'label_8'"));
        assert!(!report.contains("'label_9'"));
        assert_eq!(report.matches("values:").count(), 1);
    }

    #[test]
    fn test_fixed_length_byte_values_shown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bytes.h5");
        write_data_and_label(&path, "image", &Array1::<f32>::zeros(3), ["tmp"]).unwrap();
        {
            let file = File::open_rw(&path).unwrap();
            let ds = file.dataset("image").unwrap();
            ds.delete_attr(LABEL_ATTR).unwrap();
            let label = FixedAscii::<9>::from_ascii(b"astronaut").unwrap();
            ds.new_attr::<FixedAscii<9>>()
                .shape((1,))
                .create(LABEL_ATTR)
                .unwrap()
                .write_raw(&[label][..])
                .unwrap();
        }

        let file = File::open(&path).unwrap();
        let report = render_structure(&file, DEFAULT_INDENT).unwrap();
        assert!(report.contains("label: (shape=(1,), dtype=|S9)"));
        assert!(report.contains("values: ['astronaut']"));
    }

    #[test]
    fn test_nested_indent_grows_by_two() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep.h5");
        write_data_and_label(&path, "a/b/leaf", &Array1::<f32>::zeros(1), ["l"]).unwrap();

        let file = File::open(&path).unwrap();
        let report = render_structure(&file, 0).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[1], "group: a/");
        assert_eq!(lines[2], "  group: b/");
        assert_eq!(lines[3], "    dataset:");
        assert_eq!(lines[4], "        leaf (shape: (1,), dtype: float32)");
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.h5");
        let file = File::create(&path).unwrap();

        assert!(inspect_group(&file).unwrap().is_empty());
        assert_eq!(render_structure(&file, 2).unwrap(), "HDF5 File Structure:\n");
    }

    #[test]
    fn test_nodes_serialize_with_kind_tag() {
        let node = Node::Group {
            name: "g".to_string(),
            children: vec![],
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "group");
        assert_eq!(json["name"], "g");
    }
}
