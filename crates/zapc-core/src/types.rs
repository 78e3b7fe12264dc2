//! Cluster-library type rows.

use serde::{Deserialize, Serialize};

/// Atomic (built-in) data type, e.g. `int8u`, `char_string`, `array`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomicType {
    pub name: String,
    /// Fixed size in bytes. Absent for variable-length strings and lists.
    #[serde(default)]
    pub byte_size: Option<u16>,
    #[serde(default)]
    pub is_string: bool,
    /// Long strings carry a 2-byte length prefix instead of 1.
    #[serde(default)]
    pub is_long: bool,
    #[serde(default)]
    pub is_signed: bool,
    #[serde(default)]
    pub is_discrete: bool,
    #[serde(default)]
    pub is_float: bool,
}

impl AtomicType {
    /// Fixed-size unsigned (or signed) integer type.
    pub fn integer(name: impl Into<String>, byte_size: u16, is_signed: bool) -> Self {
        Self {
            name: name.into(),
            byte_size: Some(byte_size),
            is_string: false,
            is_long: false,
            is_signed,
            is_discrete: false,
            is_float: false,
        }
    }

    /// Length-prefixed string type without a fixed size.
    pub fn string(name: impl Into<String>, is_long: bool) -> Self {
        Self {
            name: name.into(),
            byte_size: None,
            is_string: true,
            is_long,
            is_signed: false,
            is_discrete: true,
            is_float: false,
        }
    }

    /// Width of the length prefix for string types.
    pub fn length_prefix(&self) -> u16 {
        if self.is_long { 2 } else { 1 }
    }
}

/// Enumerated type backed by an integer of `byte_size` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    pub name: String,
    pub byte_size: u16,
}

/// Bitmap type backed by an integer of `byte_size` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitmapType {
    pub name: String,
    pub byte_size: u16,
}

/// Struct type. Its size is derived from its fields, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<StructField>,
}

/// A single struct member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub is_array: bool,
}

impl StructType {
    pub fn new(name: impl Into<String>, fields: Vec<StructField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

impl StructField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_array: false,
        }
    }

    pub fn array(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            is_array: true,
            ..Self::new(name, type_name)
        }
    }
}
