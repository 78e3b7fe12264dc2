//! Snapshot: the catalog plus the endpoint configuration, as one document.
//!
//! JSON is the interchange format with the relational store. The binary form
//! (postcard) is a compact cache of the same data.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::endpoint::EndpointType;

/// Error while loading or storing a snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    Binary(postcard::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary snapshot error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
        }
    }
}

/// Read-only input of one compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub endpoints: Vec<EndpointType>,
}

impl Snapshot {
    pub fn new(catalog: Catalog, endpoints: Vec<EndpointType>) -> Self {
        Self {
            catalog,
            endpoints,
        }
    }

    /// Parse a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Json)
    }

    /// Serialize to the compact binary form.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        postcard::to_allocvec(self).map_err(SnapshotError::Binary)
    }

    /// Decode the compact binary form.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        postcard::from_bytes(bytes).map_err(SnapshotError::Binary)
    }
}
