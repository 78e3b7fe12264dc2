//! The complete output of one layout collection.

use crate::dump::dump;
use crate::records::{
    AttributeRecord, ClusterRecord, CommandRecord, DefaultValue, DeviceTypeRecord, EndpointRecord,
    EventRecord, LongDefaultRecord, MfgCodeEntry, MinMaxRecord, ReportingRecord,
};

/// Structural inconsistency between tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("{owner} #{position} references {table} {start}..{end}, but there are {len}")]
    RangeOutOfBounds {
        owner: &'static str,
        position: usize,
        table: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("{owner} #{position} references {table} #{index}, but there are {len}")]
    IndexOutOfBounds {
        owner: &'static str,
        position: usize,
        table: &'static str,
        index: usize,
        len: usize,
    },
    #[error("attribute #{position} references long default at byte {offset}, which starts no record")]
    DanglingLongOffset { position: usize, offset: u32 },
    #[error("long default #{position} starts at byte {offset}, expected {expected}")]
    LongDefaultOffset {
        position: usize,
        offset: u32,
        expected: u32,
    },
    #[error("{owner} #{position} declares {declared} bytes, but its members occupy {actual}")]
    SizeMismatch {
        owner: &'static str,
        position: usize,
        declared: u32,
        actual: u32,
    },
}

/// Ordered tables plus scalar aggregates, ready for an emitter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutTables {
    pub endpoints: Vec<EndpointRecord>,
    /// Device types of all endpoints, grouped by endpoint in endpoint order.
    pub device_types: Vec<DeviceTypeRecord>,
    pub clusters: Vec<ClusterRecord>,
    pub attributes: Vec<AttributeRecord>,
    pub commands: Vec<CommandRecord>,
    pub events: Vec<EventRecord>,
    pub long_defaults: Vec<LongDefaultRecord>,
    pub min_max: Vec<MinMaxRecord>,
    pub reporting: Vec<ReportingRecord>,
    pub attribute_mfg_codes: Vec<MfgCodeEntry>,
    pub command_mfg_codes: Vec<MfgCodeEntry>,
    pub cluster_mfg_codes: Vec<MfgCodeEntry>,
    /// Largest resolved attribute size seen, external attributes included.
    pub largest_attribute_size: u16,
    /// Storage of singleton attributes, each counted once.
    pub singletons_size: u32,
    /// Storage of all attributes across all endpoints.
    pub total_storage_size: u32,
}

impl LayoutTables {
    /// Total length of the long-default byte array.
    pub fn long_defaults_size(&self) -> u32 {
        self.long_defaults.iter().map(|r| r.size as u32).sum()
    }

    /// The long-default byte array, records concatenated in offset order.
    pub fn long_default_bytes(&self) -> Vec<u8> {
        self.long_defaults
            .iter()
            .flat_map(|r| r.bytes.iter().copied())
            .collect()
    }

    /// Human-readable rendering, see [`crate::dump`].
    pub fn dump(&self) -> String {
        dump(self)
    }

    /// CRC-32 of the dump. Equal tables have equal fingerprints.
    pub fn fingerprint(&self) -> u32 {
        crc32fast::hash(self.dump().as_bytes())
    }

    /// Check that every cross-table reference lands inside its target table
    /// and that declared sizes match their members.
    pub fn validate(&self) -> Result<(), TableError> {
        for (position, ep) in self.endpoints.iter().enumerate() {
            let clusters = check_range(
                "endpoint",
                position,
                "clusters",
                ep.cluster_index,
                ep.cluster_count,
                self.clusters.len(),
            )?;
            let actual: u32 = self.clusters[clusters]
                .iter()
                .map(|c| c.attribute_size)
                .sum();
            check_size("endpoint", position, ep.attribute_size, actual)?;
            check_range(
                "endpoint",
                position,
                "device types",
                ep.device_type_index,
                ep.device_type_count,
                self.device_types.len(),
            )?;
        }

        for (position, cluster) in self.clusters.iter().enumerate() {
            let attributes = check_range(
                "cluster",
                position,
                "attributes",
                cluster.attribute_index,
                cluster.attribute_count,
                self.attributes.len(),
            )?;
            check_range(
                "cluster",
                position,
                "commands",
                cluster.command_index,
                cluster.command_count,
                self.commands.len(),
            )?;
            check_range(
                "cluster",
                position,
                "events",
                cluster.event_index,
                cluster.event_count,
                self.events.len(),
            )?;
            let actual: u32 = self.attributes[attributes]
                .iter()
                .map(|a| a.storage_size() as u32)
                .sum();
            check_size("cluster", position, cluster.attribute_size, actual)?;
        }

        let mut expected = 0u32;
        for (position, record) in self.long_defaults.iter().enumerate() {
            if record.offset != expected {
                return Err(TableError::LongDefaultOffset {
                    position,
                    offset: record.offset,
                    expected,
                });
            }
            expected += record.size as u32;
        }

        for (position, attribute) in self.attributes.iter().enumerate() {
            match attribute.default {
                DefaultValue::LongOffset(offset) => {
                    let found = self
                        .long_defaults
                        .binary_search_by_key(&offset, |r| r.offset)
                        .is_ok();
                    if !found {
                        return Err(TableError::DanglingLongOffset { position, offset });
                    }
                }
                DefaultValue::MinMaxIndex(index) => {
                    check_index(
                        "attribute",
                        position,
                        "min/max entries",
                        index,
                        self.min_max.len(),
                    )?;
                }
                DefaultValue::Empty | DefaultValue::Inline(_) => {}
            }
        }

        let side_tables = [
            ("attribute mfg code", &self.attribute_mfg_codes, self.attributes.len()),
            ("command mfg code", &self.command_mfg_codes, self.commands.len()),
            ("cluster mfg code", &self.cluster_mfg_codes, self.clusters.len()),
        ];
        for (owner, entries, len) in side_tables {
            for (position, entry) in entries.iter().enumerate() {
                check_index(owner, position, "records", entry.index, len)?;
            }
        }

        Ok(())
    }
}

fn check_range(
    owner: &'static str,
    position: usize,
    table: &'static str,
    start: u16,
    count: u16,
    len: usize,
) -> Result<std::ops::Range<usize>, TableError> {
    let start = start as usize;
    let end = start + count as usize;
    if end > len {
        return Err(TableError::RangeOutOfBounds {
            owner,
            position,
            table,
            start,
            end,
            len,
        });
    }
    Ok(start..end)
}

fn check_index(
    owner: &'static str,
    position: usize,
    table: &'static str,
    index: u16,
    len: usize,
) -> Result<(), TableError> {
    if index as usize >= len {
        return Err(TableError::IndexOutOfBounds {
            owner,
            position,
            table,
            index: index as usize,
            len,
        });
    }
    Ok(())
}

fn check_size(
    owner: &'static str,
    position: usize,
    declared: u32,
    actual: u32,
) -> Result<(), TableError> {
    if declared != actual {
        return Err(TableError::SizeMismatch {
            owner,
            position,
            declared,
            actual,
        });
    }
    Ok(())
}
