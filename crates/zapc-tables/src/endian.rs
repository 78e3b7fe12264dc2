//! Target byte order.

use serde::{Deserialize, Serialize};

/// Byte order of the firmware target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    #[inline]
    pub fn is_little(self) -> bool {
        self == Self::Little
    }

    /// Rearrange bytes given most-significant first into target order.
    pub fn order_be_bytes(self, bytes: &mut [u8]) {
        if self.is_little() {
            bytes.reverse();
        }
    }

    /// Encode the low `width` bytes of `value` in target order.
    pub fn encode(self, value: u64, width: usize) -> Vec<u8> {
        let be = value.to_be_bytes();
        let width = width.min(be.len());
        let mut bytes = be[be.len() - width..].to_vec();
        self.order_be_bytes(&mut bytes);
        bytes
    }
}
