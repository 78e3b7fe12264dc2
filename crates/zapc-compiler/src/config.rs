//! Configuration for one compilation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use zapc_tables::{Endianness, FormatCategory};

use crate::{Error, Result};

/// Widest pointer an inline default word can be aligned to.
const MAX_POINTER_SIZE: u8 = 8;

/// Per-category symbol overrides consumed by the format characterizer.
///
/// Different emission targets want different symbols for the same storage
/// category, so nothing here is hardcoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOverrides {
    /// Keyed by byte count, 1 to 16.
    bytes: BTreeMap<u8, String>,
    short_string: Option<String>,
    long_string: Option<String>,
    array: Option<String>,
    #[serde(rename = "struct")]
    struct_type: Option<String>,
    default: Option<String>,
}

impl FormatOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the symbol for one category.
    pub fn with(mut self, category: FormatCategory, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        match category {
            FormatCategory::Bytes(n) => {
                self.bytes.insert(n, symbol);
            }
            FormatCategory::ShortString => self.short_string = Some(symbol),
            FormatCategory::LongString => self.long_string = Some(symbol),
            FormatCategory::Array => self.array = Some(symbol),
            FormatCategory::Struct => self.struct_type = Some(symbol),
            FormatCategory::Default => self.default = Some(symbol),
        }
        self
    }

    pub fn get(&self, category: FormatCategory) -> Option<&str> {
        match category {
            FormatCategory::Bytes(n) => self.bytes.get(&n),
            FormatCategory::ShortString => self.short_string.as_ref(),
            FormatCategory::LongString => self.long_string.as_ref(),
            FormatCategory::Array => self.array.as_ref(),
            FormatCategory::Struct => self.struct_type.as_ref(),
            FormatCategory::Default => self.default.as_ref(),
        }
        .map(String::as_str)
    }
}

/// Compilation configuration.
///
/// Built with the consuming setters, or deserialized from the host's JSON
/// (`{"endianness": "big", "pointerSize": 8}`); missing fields keep their
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub(crate) endianness: Endianness,
    /// Pointer width of the target in bytes.
    #[serde(deserialize_with = "deserialize_pointer_size")]
    pub(crate) pointer_size: u8,
    /// Largest default stored inline, in bytes.
    pub(crate) space_for_default_value: u16,
    pub(crate) format_overrides: FormatOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endianness: Endianness::Little,
            pointer_size: 4,
            space_for_default_value: 2,
            format_overrides: FormatOverrides::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target byte order.
    pub fn endianness(mut self, value: Endianness) -> Self {
        self.endianness = value;
        self
    }

    /// Set the target pointer width in bytes. Only used to pad inline
    /// defaults on big-endian targets. Checked by [`validate`](Self::validate).
    pub fn pointer_size(mut self, value: u8) -> Self {
        self.pointer_size = value;
        self
    }

    /// Set the inline default threshold in bytes.
    pub fn space_for_default_value(mut self, value: u16) -> Self {
        self.space_for_default_value = value;
        self
    }

    pub fn format_overrides(mut self, value: FormatOverrides) -> Self {
        self.format_overrides = value;
        self
    }

    /// Reject settings no target can have. [`Compiler::compile`] and
    /// [`LayoutCollector::collect`] call this first.
    ///
    /// [`Compiler::compile`]: crate::Compiler::compile
    /// [`LayoutCollector::collect`]: crate::LayoutCollector::collect
    pub fn validate(&self) -> Result<()> {
        check_pointer_size(self.pointer_size)
    }
}

fn check_pointer_size(value: u8) -> Result<()> {
    if value == 0 || value > MAX_POINTER_SIZE {
        return Err(Error::InvalidPointerSize(value));
    }
    Ok(())
}

fn deserialize_pointer_size<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    check_pointer_size(value).map_err(serde::de::Error::custom)?;
    Ok(value)
}
