#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the zapc endpoint-configuration compiler.
//!
//! Two layers:
//! - **Catalog layer**: the cluster-library type rows (atomic, enum, bitmap,
//!   struct) behind the [`TypeCatalog`] lookup trait
//! - **Configuration layer**: endpoints and the cluster, attribute, command
//!   and event instances enabled on them
//!
//! Both layers are read-only inputs. A [`Snapshot`] bundles them so a host
//! can hand the compiler a single JSON or binary document.

mod catalog;
mod endpoint;
mod snapshot;
mod types;
pub mod utils;

#[cfg(test)]
mod catalog_tests;

pub use catalog::{Catalog, TypeCatalog};
pub use endpoint::{
    AttributeInstance, ClusterInstance, CommandInstance, CommandSource, DeviceType, EndpointType,
    EventInstance, Side, StorageOption,
};
pub use snapshot::{Snapshot, SnapshotError};
pub use types::{AtomicType, BitmapType, EnumType, StructField, StructType};

// ============================================================================
// Common Types
// ============================================================================

/// Cluster code as defined by the cluster library (16 bits).
pub type ClusterCode = u16;

/// Attribute code, unique within a cluster and side (16 bits).
pub type AttributeCode = u16;

/// Command code, unique within a cluster and source (16 bits).
pub type CommandCode = u16;

/// Event code, unique within a cluster (16 bits).
pub type EventCode = u16;

/// Manufacturer code qualifying a manufacturer-specific element.
pub type ManufacturerCode = u16;

/// Endpoint number on the device.
pub type EndpointId = u16;
