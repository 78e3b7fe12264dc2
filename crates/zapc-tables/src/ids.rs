//! Manufacturer-extended identifiers.

use std::fmt;

use zapc_core::ManufacturerCode;

/// Manufacturer-extended identifier: `manufacturer_code << 16 | code`.
///
/// Standard elements have a zero upper half. Manufacturer code `0` is the
/// same as no manufacturer code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(transparent)]
pub struct Mei(pub u32);

impl Mei {
    #[inline]
    pub fn new(manufacturer_code: Option<ManufacturerCode>, code: u16) -> Self {
        let mfg = manufacturer_code.unwrap_or(0) as u32;
        Self(mfg << 16 | code as u32)
    }

    #[inline]
    pub fn code(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// The manufacturer half, `None` for standard elements.
    #[inline]
    pub fn manufacturer_code(self) -> Option<ManufacturerCode> {
        match (self.0 >> 16) as u16 {
            0 => None,
            mfg => Some(mfg),
        }
    }

    #[inline]
    pub fn is_standard(self) -> bool {
        self.0 >> 16 == 0
    }
}

impl fmt::Display for Mei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}
