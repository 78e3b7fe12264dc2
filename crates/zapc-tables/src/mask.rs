//! Mask flag sets stored in attribute, cluster and command records.

use bitflags::bitflags;

bitflags! {
    /// Per-attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributeMask: u16 {
        const WRITABLE = 1 << 0;
        /// Value lives in non-volatile storage.
        const TOKENIZE = 1 << 1;
        /// Default is an index into the min/max table.
        const MIN_MAX = 1 << 2;
        /// Value is owned by application code, not the attribute store.
        const EXTERNAL_STORAGE = 1 << 4;
        /// One storage slot shared across endpoints.
        const SINGLETON = 1 << 5;
        const CLIENT = 1 << 6;
        const NULLABLE = 1 << 7;
        const MUST_USE_TIMED_WRITE = 1 << 8;
    }
}

bitflags! {
    /// Per-cluster flags. Only the side is recorded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClusterMask: u8 {
        const SERVER = 1 << 6;
        const CLIENT = 1 << 7;
    }
}

bitflags! {
    /// Per-command flags: which side sends or receives the command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CommandMask: u8 {
        const INCOMING_SERVER = 1 << 0;
        const INCOMING_CLIENT = 1 << 1;
        const OUTGOING_SERVER = 1 << 2;
        const OUTGOING_CLIENT = 1 << 3;
    }
}

impl ClusterMask {
    pub fn for_side(side: zapc_core::Side) -> Self {
        match side {
            zapc_core::Side::Client => Self::CLIENT,
            zapc_core::Side::Server => Self::SERVER,
        }
    }
}

/// Render set flags as `A|B`, or `0` when none are set.
pub(crate) fn flag_names<F: bitflags::Flags>(flags: &F) -> String {
    let names: Vec<&str> = flags.iter_names().map(|(name, _)| name).collect();
    if names.is_empty() {
        "0".to_string()
    } else {
        names.join("|")
    }
}
