//! Endpoint configuration: the enabled instances of clusters and their elements.
//!
//! Rows arrive already filtered to what the user enabled. Nothing here is
//! mutated by the compiler; passes sort copies of index lists, never the rows.

use serde::{Deserialize, Serialize};

use crate::{
    AttributeCode, ClusterCode, CommandCode, EndpointId, EventCode, ManufacturerCode,
};

/// Which side of a cluster an instance belongs to.
///
/// Ordering is significant: clusters sort client before server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    Server,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

/// Where an attribute's value lives at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StorageOption {
    #[default]
    #[serde(rename = "RAM", alias = "ram")]
    Ram,
    #[serde(rename = "NVM", alias = "nvm")]
    Nvm,
    #[serde(rename = "External", alias = "external")]
    External,
}

/// Which side sends a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandSource {
    Client,
    Server,
}

/// One attribute enabled on one endpoint's cluster instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInstance {
    pub code: AttributeCode,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub side: Side,
    #[serde(default)]
    pub manufacturer_code: Option<ManufacturerCode>,
    #[serde(default)]
    pub is_writable: bool,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_singleton: bool,
    #[serde(default)]
    pub storage: StorageOption,
    #[serde(default)]
    pub is_bounded: bool,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub included_reportable: bool,
    #[serde(default)]
    pub min_interval: Option<u16>,
    #[serde(default)]
    pub max_interval: Option<u16>,
    #[serde(default)]
    pub reportable_change: Option<u32>,
    #[serde(default)]
    pub max_length: Option<u16>,
    #[serde(default)]
    pub must_use_timed_write: bool,
}

impl AttributeInstance {
    /// A plain server-side RAM attribute; adjust the rest with struct update syntax.
    pub fn new(code: AttributeCode, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            type_name: type_name.into(),
            side: Side::Server,
            manufacturer_code: None,
            is_writable: false,
            is_nullable: false,
            is_singleton: false,
            storage: StorageOption::Ram,
            is_bounded: false,
            min: None,
            max: None,
            default_value: None,
            included_reportable: false,
            min_interval: None,
            max_interval: None,
            reportable_change: None,
            max_length: None,
            must_use_timed_write: false,
        }
    }
}

/// One command enabled on one endpoint's cluster instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInstance {
    pub code: CommandCode,
    pub name: String,
    #[serde(default)]
    pub manufacturer_code: Option<ManufacturerCode>,
    pub source: CommandSource,
    #[serde(default)]
    pub is_incoming: bool,
    #[serde(default)]
    pub is_outgoing: bool,
}

impl CommandInstance {
    pub fn new(code: CommandCode, name: impl Into<String>, source: CommandSource) -> Self {
        Self {
            code,
            name: name.into(),
            manufacturer_code: None,
            source,
            is_incoming: false,
            is_outgoing: false,
        }
    }
}

/// One event enabled on one endpoint's cluster instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    pub code: EventCode,
    pub name: String,
    #[serde(default)]
    pub manufacturer_code: Option<ManufacturerCode>,
}

/// A cluster enabled on an endpoint, on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInstance {
    pub code: ClusterCode,
    pub name: String,
    pub side: Side,
    #[serde(default)]
    pub manufacturer_code: Option<ManufacturerCode>,
    /// Symbol of the cluster's callback array; `None` emits a null pointer.
    #[serde(default)]
    pub functions: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeInstance>,
    #[serde(default)]
    pub commands: Vec<CommandInstance>,
    #[serde(default)]
    pub events: Vec<EventInstance>,
}

impl ClusterInstance {
    pub fn new(code: ClusterCode, name: impl Into<String>, side: Side) -> Self {
        Self {
            code,
            name: name.into(),
            side,
            manufacturer_code: None,
            functions: None,
            attributes: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// A device type implemented by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceType {
    #[serde(rename = "deviceId")]
    pub id: u32,
    #[serde(rename = "deviceVersion", default)]
    pub version: u8,
}

impl DeviceType {
    pub fn new(id: u32, version: u8) -> Self {
        Self { id, version }
    }
}

/// An endpoint and the clusters configured on it.
///
/// Endpoint order is caller-determined and preserved by every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointType {
    pub endpoint_id: EndpointId,
    #[serde(default)]
    pub profile_id: u16,
    #[serde(default)]
    pub network_id: u8,
    /// Enclosing endpoint of a composed device; `None` for a top-level endpoint.
    #[serde(default)]
    pub parent_endpoint: Option<EndpointId>,
    /// In declaration order; the first entry is the primary device type.
    #[serde(default)]
    pub device_types: Vec<DeviceType>,
    #[serde(default)]
    pub clusters: Vec<ClusterInstance>,
}

impl EndpointType {
    pub fn new(endpoint_id: EndpointId, clusters: Vec<ClusterInstance>) -> Self {
        Self {
            endpoint_id,
            profile_id: 0,
            network_id: 0,
            parent_endpoint: None,
            device_types: Vec::new(),
            clusters,
        }
    }
}
