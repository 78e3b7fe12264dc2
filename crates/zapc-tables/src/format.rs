//! Storage format categories.

use std::fmt;

/// Coarse storage category of a type, used to pick an emitter symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatCategory {
    /// Fixed-size value of 1 to 16 bytes.
    Bytes(u8),
    ShortString,
    LongString,
    Array,
    /// Struct whose size is not fixed.
    Struct,
    /// Anything without a dedicated category.
    Default,
}

impl FormatCategory {
    pub const MAX_FIXED_SIZE: u32 = 16;

    /// Category for a fixed byte count; sizes outside `1..=16` are `Default`.
    pub fn for_size(size: u32) -> Self {
        if (1..=Self::MAX_FIXED_SIZE).contains(&size) {
            Self::Bytes(size as u8)
        } else {
            Self::Default
        }
    }

    pub fn byte_count(self) -> Option<u8> {
        match self {
            Self::Bytes(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(n) => write!(f, "bytes{n}"),
            Self::ShortString => f.write_str("short_string"),
            Self::LongString => f.write_str("long_string"),
            Self::Array => f.write_str("array"),
            Self::Struct => f.write_str("struct"),
            Self::Default => f.write_str("default"),
        }
    }
}
