#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Flat layout tables for the zapc endpoint-configuration compiler.
//!
//! Everything here is output: ordered record sequences that refer to each
//! other by position, plus a few scalar aggregates. The compiler appends
//! records in a fixed order; an emitter writes them out as packed C arrays
//! or a binary blob.
//!
//! Index semantics:
//! - `EndpointRecord::cluster_index` is a position in [`LayoutTables::clusters`],
//!   `EndpointRecord::device_type_index` one in [`LayoutTables::device_types`]
//! - `ClusterRecord::attribute_index` is a position in [`LayoutTables::attributes`]
//!   (likewise for commands and events)
//! - [`DefaultValue::LongOffset`] is a byte offset into the concatenated
//!   long-default bytes, [`DefaultValue::MinMaxIndex`] a position in
//!   [`LayoutTables::min_max`]

mod dump;
mod endian;
mod format;
mod ids;
mod mask;
mod records;
mod tables;


pub use dump::dump;
pub use endian::Endianness;
pub use format::FormatCategory;
pub use ids::Mei;
pub use mask::{AttributeMask, ClusterMask, CommandMask};
pub use records::{
    AttributeRecord, ClusterRecord, CommandRecord, DefaultValue, DeviceTypeRecord, EndpointRecord,
    EventRecord, LongDefaultRecord, MfgCodeEntry, MinMaxRecord, ReportingDirection,
    ReportingRecord,
};
pub use tables::{LayoutTables, TableError};
