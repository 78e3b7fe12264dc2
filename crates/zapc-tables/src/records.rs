//! Computed records, one sequence per table.
//!
//! Records reference each other by position only. None of them borrows from
//! the input snapshot, so a `LayoutTables` outlives the compilation that
//! produced it.

use zapc_core::{AttributeCode, ClusterCode, EndpointId, ManufacturerCode};

use crate::ids::Mei;
use crate::mask::{AttributeMask, ClusterMask, CommandMask};

/// Where an attribute's default value lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DefaultValue {
    /// No default (external storage).
    #[default]
    Empty,
    /// Inline numeric word, already arranged for the target byte order.
    Inline(u64),
    /// Byte offset into the concatenated long-default bytes.
    LongOffset(u32),
    /// Position in the min/max table.
    MinMaxIndex(u16),
}

/// One retained attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRecord {
    pub id: Mei,
    /// Type macro suffix, e.g. `INT8U`, `CHAR_STRING`, `ENUM8`, `STRUCT`.
    pub type_macro: String,
    /// Resolved size in bytes. Zero for external attributes of unsizable types.
    pub size: u16,
    pub mask: AttributeMask,
    pub default: DefaultValue,
    pub name: String,
}

impl AttributeRecord {
    /// Bytes this attribute occupies in the attribute store.
    pub fn storage_size(&self) -> u16 {
        if self.mask.contains(AttributeMask::EXTERNAL_STORAGE) {
            0
        } else {
            self.size
        }
    }

    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.mask.contains(AttributeMask::SINGLETON)
    }
}

/// One cluster instance on one endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterRecord {
    pub id: Mei,
    pub attribute_index: u16,
    pub attribute_count: u16,
    /// Sum of the attributes' storage sizes.
    pub attribute_size: u32,
    pub command_index: u16,
    pub command_count: u16,
    pub event_index: u16,
    pub event_count: u16,
    pub mask: ClusterMask,
    /// Symbol of the callback array, `None` for a null pointer.
    pub functions: Option<String>,
    pub comment: String,
}

/// One command accepted or generated by a cluster instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRecord {
    pub cluster_id: Mei,
    pub command_id: Mei,
    pub mask: CommandMask,
    pub name: String,
}

/// One event emitted by a cluster instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub cluster_id: Mei,
    pub event_id: Mei,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointRecord {
    pub endpoint_id: EndpointId,
    pub profile_id: u16,
    pub network_id: u8,
    /// `None` is emitted as the invalid endpoint id.
    pub parent_endpoint: Option<EndpointId>,
    pub cluster_index: u16,
    pub cluster_count: u16,
    pub device_type_index: u16,
    pub device_type_count: u16,
    /// Sum of the clusters' attribute sizes.
    pub attribute_size: u32,
}

/// One device type of one endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceTypeRecord {
    pub endpoint_id: EndpointId,
    pub device_id: u32,
    pub version: u8,
}

/// Default value too large to store inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LongDefaultRecord {
    /// Running byte offset into the concatenated long-default bytes.
    pub offset: u32,
    pub size: u16,
    /// Exactly `size` bytes, in target order.
    pub bytes: Vec<u8>,
    pub name: String,
}

/// Default, minimum and maximum of a bounded attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinMaxRecord {
    pub default: i128,
    pub min: i128,
    pub max: i128,
    /// Width of each of the three values in bytes.
    pub size: u16,
    pub is_signed: bool,
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportingDirection {
    /// Server attribute reported to bound clients.
    Reported,
    /// Client attribute whose reports are expected from the server.
    Received,
}

impl ReportingDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::Received => "received",
        }
    }
}

/// Default reporting configuration of one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportingRecord {
    pub direction: ReportingDirection,
    pub endpoint_id: EndpointId,
    pub cluster_id: ClusterCode,
    pub attribute_id: AttributeCode,
    pub mask: ClusterMask,
    pub manufacturer_code: Option<ManufacturerCode>,
    pub min_interval: u16,
    pub max_interval: u16,
    pub reportable_change: u32,
}

/// Sparse manufacturer-code entry: `index` is a position in the owning table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MfgCodeEntry {
    pub index: u16,
    pub manufacturer_code: ManufacturerCode,
}
