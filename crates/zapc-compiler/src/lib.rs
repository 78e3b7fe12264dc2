//! Endpoint-configuration compiler.
//!
//! Turns a [`zapc_core::Snapshot`]-style input (type catalog plus enabled
//! endpoints) into the flat tables firmware reads at boot, and assigns
//! persistent-storage tokens.
//!
//! # Example
//!
//! ```
//! use zapc_compiler::{Compiler, Config};
//! use zapc_core::{AtomicType, AttributeInstance, Catalog, ClusterInstance, EndpointType, Side};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_atomic(AtomicType::integer("int8u", 1, false));
//!
//! let mut cluster = ClusterInstance::new(0x0000, "Basic", Side::Server);
//! cluster.attributes.push(AttributeInstance::new(0x0000, "version", "int8u"));
//! let endpoints = vec![EndpointType::new(1, vec![cluster])];
//!
//! let compilation = Compiler::new(&catalog, Config::new()).compile(&endpoints).unwrap();
//! assert_eq!(compilation.layout.attributes.len(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod compilation;
pub mod config;
pub mod layout;
pub mod resolve;
pub mod structs;
pub mod tokens;

#[cfg(test)]
pub mod test_utils;


pub use compilation::{Compilation, Compiler};
pub use config::{Config, FormatOverrides};
pub use layout::LayoutCollector;
pub use resolve::{FormatCharacterizer, ResolveError, StructSize, TypeKind, TypeSizeResolver};
pub use structs::StructDependencySorter;
pub use tokens::{
    ClusterTokens, EndpointTokens, STORAGE_ID_BASE, Token, TokenDeduplicator, TokenDefault,
    TokenFailure, TokenId, TokenKey, TokenSet,
};

use zapc_core::EndpointId;

/// Errors that abort a compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An attribute's type could not be sized or classified.
    #[error("endpoint {endpoint}, cluster `{cluster}`, attribute `{attribute}` (type `{type_name}`): {source}")]
    Attribute {
        endpoint: EndpointId,
        cluster: String,
        attribute: String,
        type_name: String,
        #[source]
        source: ResolveError,
    },

    #[error("struct `{0}` is part of a dependency cycle")]
    StructCycle(String),

    #[error("attribute `{attribute}` has an unparsable default `{value}`")]
    InvalidDefaultValue { attribute: String, value: String },

    #[error("default `{value}` of attribute `{attribute}` does not fit in {size} bytes")]
    DefaultTooLong {
        attribute: String,
        value: String,
        size: u16,
    },

    /// Floats have no null encoding.
    #[error("nullable float attribute `{attribute}` needs an explicit default")]
    NullFloatDefault { attribute: String },

    #[error("bounded attribute `{attribute}` is {size} bytes; min/max holds at most 8")]
    BoundedTooWide { attribute: String, size: u16 },

    /// Inline defaults are at most one 64-bit word wide.
    #[error("pointer size {0} is outside 1..=8 bytes")]
    InvalidPointerSize(u8),

    /// Firmware indexes tables with 16 bits.
    #[error("{count} {table} records exceed the 16-bit index range")]
    TooManyRecords { table: &'static str, count: usize },
}

/// Result type for compilation passes.
pub type Result<T> = std::result::Result<T, Error>;
