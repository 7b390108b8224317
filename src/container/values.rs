//! Attribute decoding and dtype naming.

use hdf5::types::{
    FixedAscii, FixedUnicode, FloatSize, IntSize, TypeDescriptor, VarLenAscii, VarLenUnicode,
};
use hdf5::Attribute;
use serde::Serialize;
use std::fmt;

use crate::error::Result;

/// Longest fixed-length string element (in bytes) that gets decoded.
pub const FIXED_STRING_LIMIT: usize = 1024;

/// Decoded attribute contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValues {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Unsigned(Vec<u64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
}

impl AttributeValues {
    pub fn len(&self) -> usize {
        match self {
            AttributeValues::Text(v) => v.len(),
            AttributeValues::Integer(v) => v.len(),
            AttributeValues::Unsigned(v) => v.len(),
            AttributeValues::Float(v) => v.len(),
            AttributeValues::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_text(self) -> Option<Vec<String>> {
        match self {
            AttributeValues::Text(v) => Some(v),
            _ => None,
        }
    }
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    each: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        each(f, item)?;
    }
    write!(f, "]")
}

/// Renders like a Python list: strings quoted, numbers bare.
impl fmt::Display for AttributeValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValues::Text(v) => write_list(f, v, |f, s| write!(f, "'{}'", s)),
            AttributeValues::Integer(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            AttributeValues::Unsigned(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            AttributeValues::Float(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            AttributeValues::Bool(v) => {
                write_list(f, v, |f, b| write!(f, "{}", if *b { "True" } else { "False" }))
            }
        }
    }
}

macro_rules! read_as {
    ($attr:expr, $ty:ty, $variant:ident, $wide:ty) => {
        AttributeValues::$variant(
            $attr
                .read_raw::<$ty>()?
                .into_iter()
                .map(|x| x as $wide)
                .collect(),
        )
    };
}

/// Read every element of `attr`.
///
/// Fixed-length strings (numpy `S` arrays) are decoded as UTF-8 with
/// trailing NUL padding dropped. Returns `None` for element types with no
/// flat text or numeric form (compounds, enums, arrays, references) and for
/// fixed-length strings wider than [`FIXED_STRING_LIMIT`].
pub fn read_values(attr: &Attribute) -> Result<Option<AttributeValues>> {
    let descriptor = attr.dtype()?.to_descriptor()?;

    let values = match descriptor {
        TypeDescriptor::VarLenUnicode => AttributeValues::Text(
            attr.read_raw::<VarLenUnicode>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        ),
        TypeDescriptor::VarLenAscii => AttributeValues::Text(
            attr.read_raw::<VarLenAscii>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        ),
        TypeDescriptor::FixedAscii(len) if len <= FIXED_STRING_LIMIT => AttributeValues::Text(
            attr.read_raw::<FixedAscii<FIXED_STRING_LIMIT>>()?
                .iter()
                .map(|s| String::from_utf8_lossy(s.as_bytes()).into_owned())
                .collect(),
        ),
        TypeDescriptor::FixedUnicode(len) if len <= FIXED_STRING_LIMIT => AttributeValues::Text(
            attr.read_raw::<FixedUnicode<FIXED_STRING_LIMIT>>()?
                .iter()
                .map(|s| String::from_utf8_lossy(s.as_bytes()).into_owned())
                .collect(),
        ),
        TypeDescriptor::Integer(IntSize::U1) => read_as!(attr, i8, Integer, i64),
        TypeDescriptor::Integer(IntSize::U2) => read_as!(attr, i16, Integer, i64),
        TypeDescriptor::Integer(IntSize::U4) => read_as!(attr, i32, Integer, i64),
        TypeDescriptor::Integer(IntSize::U8) => read_as!(attr, i64, Integer, i64),
        TypeDescriptor::Unsigned(IntSize::U1) => read_as!(attr, u8, Unsigned, u64),
        TypeDescriptor::Unsigned(IntSize::U2) => read_as!(attr, u16, Unsigned, u64),
        TypeDescriptor::Unsigned(IntSize::U4) => read_as!(attr, u32, Unsigned, u64),
        TypeDescriptor::Unsigned(IntSize::U8) => read_as!(attr, u64, Unsigned, u64),
        TypeDescriptor::Float(FloatSize::U4) => read_as!(attr, f32, Float, f64),
        TypeDescriptor::Float(FloatSize::U8) => read_as!(attr, f64, Float, f64),
        TypeDescriptor::Boolean => AttributeValues::Bool(attr.read_raw::<bool>()?),
        _ => return Ok(None),
    };

    Ok(Some(values))
}

/// numpy-style name for an HDF5 element type.
pub fn dtype_name(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Integer(size) => format!("int{}", int_bits(*size)),
        TypeDescriptor::Unsigned(size) => format!("uint{}", int_bits(*size)),
        TypeDescriptor::Float(FloatSize::U4) => "float32".to_string(),
        TypeDescriptor::Float(FloatSize::U8) => "float64".to_string(),
        TypeDescriptor::Boolean => "bool".to_string(),
        TypeDescriptor::FixedAscii(len) => format!("|S{}", len),
        TypeDescriptor::FixedUnicode(len) => format!("utf8[{}]", len),
        TypeDescriptor::VarLenAscii => "bytes".to_string(),
        TypeDescriptor::VarLenUnicode => "str".to_string(),
        TypeDescriptor::Enum(_) => "enum".to_string(),
        TypeDescriptor::Compound(_) => "compound".to_string(),
        TypeDescriptor::FixedArray(inner, len) => format!("{}[{}]", dtype_name(inner), len),
        TypeDescriptor::VarLenArray(inner) => format!("vlen[{}]", dtype_name(inner)),
        _ => "opaque".to_string(),
    }
}

fn int_bits(size: IntSize) -> usize {
    match size {
        IntSize::U1 => 8,
        IntSize::U2 => 16,
        IntSize::U4 => 32,
        IntSize::U8 => 64,
    }
}

/// Python tuple notation: `()`, `(3,)`, `(1, 3, 4, 4)`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [n] => format!("({},)", n),
        dims => {
            let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[]), "()");
        assert_eq!(format_shape(&[10]), "(10,)");
        assert_eq!(format_shape(&[1, 3, 4, 4]), "(1, 3, 4, 4)");
    }

    #[test]
    fn test_dtype_names() {
        assert_eq!(dtype_name(&TypeDescriptor::Float(FloatSize::U4)), "float32");
        assert_eq!(dtype_name(&TypeDescriptor::Unsigned(IntSize::U1)), "uint8");
        assert_eq!(dtype_name(&TypeDescriptor::Integer(IntSize::U8)), "int64");
        assert_eq!(dtype_name(&TypeDescriptor::FixedAscii(9)), "|S9");
        assert_eq!(dtype_name(&TypeDescriptor::VarLenUnicode), "str");
        assert_eq!(
            dtype_name(&TypeDescriptor::FixedArray(Box::new(TypeDescriptor::Boolean), 3)),
            "bool[3]"
        );
    }

    #[test]
    fn test_values_display() {
        let text = AttributeValues::Text(vec!["label_0".to_string(), "label_1".to_string()]);
        assert_eq!(text.to_string(), "['label_0', 'label_1']");
        assert_eq!(AttributeValues::Integer(vec![-1, 2]).to_string(), "[-1, 2]");
        assert_eq!(AttributeValues::Float(vec![0.5]).to_string(), "[0.5]");
        assert_eq!(AttributeValues::Bool(vec![true, false]).to_string(), "[True, False]");
        assert_eq!(AttributeValues::Text(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_into_text() {
        let text = AttributeValues::Text(vec!["x".to_string()]);
        assert_eq!(text.len(), 1);
        assert_eq!(text.into_text(), Some(vec!["x".to_string()]));
        assert_eq!(AttributeValues::Unsigned(vec![1]).into_text(), None);
    }
}
