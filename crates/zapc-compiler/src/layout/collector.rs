//! The layout pass.
//!
//! Order is part of the output contract: every index and offset is a running
//! total over the records appended before it. Endpoints keep their input
//! order; clusters sort by `(code, side)`, attributes by code, commands and
//! events by manufacturer-extended id.

use std::collections::HashSet;

use tracing::debug;
use zapc_core::utils::to_macro_case;
use zapc_core::{
    AttributeInstance, ClusterInstance, CommandInstance, CommandSource, EndpointId, EndpointType,
    Side, StorageOption, TypeCatalog,
};
use zapc_tables::{
    AttributeMask, AttributeRecord, ClusterMask, ClusterRecord, CommandMask, CommandRecord,
    DefaultValue, DeviceTypeRecord, EndpointRecord, EventRecord, LayoutTables, LongDefaultRecord,
    Mei, MfgCodeEntry, ReportingDirection, ReportingRecord,
};

use super::defaults::{DefaultEncoder, ValueShape};
use crate::config::Config;
use crate::resolve::{FormatCharacterizer, ResolveError, TypeKind, TypeSizeResolver};
use crate::{Error, Result};

const DEFAULT_MIN_INTERVAL: u16 = 1;
const DEFAULT_MAX_INTERVAL: u16 = 0xFFFE;

/// Builds [`LayoutTables`] from an endpoint configuration.
pub struct LayoutCollector<'a, C: TypeCatalog + ?Sized> {
    catalog: &'a C,
    config: &'a Config,
}

impl<'a, C: TypeCatalog + ?Sized> LayoutCollector<'a, C> {
    pub fn new(catalog: &'a C, config: &'a Config) -> Self {
        Self { catalog, config }
    }

    /// Collect all endpoints into one set of tables.
    ///
    /// Any attribute that cannot be sized aborts the whole collection: every
    /// later offset depends on it.
    pub fn collect(&self, endpoints: &[EndpointType]) -> Result<LayoutTables> {
        self.config.validate()?;
        let resolver = TypeSizeResolver::new(self.catalog);
        let characterizer = FormatCharacterizer::new(&resolver, &self.config.format_overrides);
        let mut state = Collection {
            characterizer: &characterizer,
            encoder: DefaultEncoder::new(self.config),
            tables: LayoutTables::default(),
            long_offset: 0,
            singletons: HashSet::new(),
        };

        for endpoint in endpoints {
            state.endpoint(endpoint)?;
        }
        state.finish()
    }
}

struct Collection<'x, 'a, 'c, C: TypeCatalog + ?Sized> {
    characterizer: &'x FormatCharacterizer<'a, 'c, C>,
    encoder: DefaultEncoder,
    tables: LayoutTables,
    long_offset: u32,
    /// Singleton attributes already counted towards `singletons_size`,
    /// keyed by cluster, attribute and side.
    singletons: HashSet<(Mei, Mei, Side)>,
}

impl<C: TypeCatalog + ?Sized> Collection<'_, '_, '_, C> {
    fn endpoint(&mut self, endpoint: &EndpointType) -> Result<()> {
        let cluster_index = to_index(self.tables.clusters.len(), "cluster")?;

        let mut clusters: Vec<&ClusterInstance> = endpoint.clusters.iter().collect();
        clusters.sort_by_key(|c| (c.code, c.side));

        let mut attribute_size = 0u32;
        for cluster in &clusters {
            attribute_size += self.cluster(endpoint.endpoint_id, cluster)?;
        }

        let device_type_index = to_index(self.tables.device_types.len(), "device type")?;
        for device in &endpoint.device_types {
            self.tables.device_types.push(DeviceTypeRecord {
                endpoint_id: endpoint.endpoint_id,
                device_id: device.id,
                version: device.version,
            });
        }

        self.tables.endpoints.push(EndpointRecord {
            endpoint_id: endpoint.endpoint_id,
            profile_id: endpoint.profile_id,
            network_id: endpoint.network_id,
            parent_endpoint: endpoint.parent_endpoint,
            cluster_index,
            cluster_count: to_index(clusters.len(), "cluster")?,
            device_type_index,
            device_type_count: to_index(endpoint.device_types.len(), "device type")?,
            attribute_size,
        });
        debug!(
            endpoint = endpoint.endpoint_id,
            clusters = clusters.len(),
            device_types = endpoint.device_types.len(),
            attribute_size,
            "endpoint collected"
        );
        Ok(())
    }

    /// Append one cluster and its elements; returns its attribute storage size.
    fn cluster(&mut self, endpoint_id: EndpointId, cluster: &ClusterInstance) -> Result<u32> {
        let position = self.tables.clusters.len();
        let id = Mei::new(cluster.manufacturer_code, cluster.code);
        let attribute_index = to_index(self.tables.attributes.len(), "attribute")?;
        let command_index = to_index(self.tables.commands.len(), "command")?;
        let event_index = to_index(self.tables.events.len(), "event")?;

        let mut attributes: Vec<&AttributeInstance> = cluster.attributes.iter().collect();
        attributes.sort_by_key(|a| a.code);
        let mut attribute_size = 0u32;
        for attribute in &attributes {
            attribute_size += self.attribute(endpoint_id, cluster, attribute)? as u32;
        }

        let mut commands: Vec<&CommandInstance> = cluster.commands.iter().collect();
        commands.sort_by_key(|k| Mei::new(k.manufacturer_code, k.code));
        for command in &commands {
            if let Some(mfg) = manufacturer(command.manufacturer_code) {
                self.tables.command_mfg_codes.push(MfgCodeEntry {
                    index: to_index(self.tables.commands.len(), "command")?,
                    manufacturer_code: mfg,
                });
            }
            self.tables.commands.push(CommandRecord {
                cluster_id: id,
                command_id: Mei::new(command.manufacturer_code, command.code),
                mask: command_mask(command, cluster.side),
                name: command.name.clone(),
            });
        }

        let mut events: Vec<_> = cluster.events.iter().collect();
        events.sort_by_key(|v| Mei::new(v.manufacturer_code, v.code));
        for event in &events {
            self.tables.events.push(EventRecord {
                cluster_id: id,
                event_id: Mei::new(event.manufacturer_code, event.code),
                name: event.name.clone(),
            });
        }

        self.tables.clusters.push(ClusterRecord {
            id,
            attribute_index,
            attribute_count: to_index(attributes.len(), "attribute")?,
            attribute_size,
            command_index,
            command_count: to_index(commands.len(), "command")?,
            event_index,
            event_count: to_index(events.len(), "event")?,
            mask: ClusterMask::for_side(cluster.side),
            functions: cluster.functions.clone(),
            comment: format!(
                "Endpoint: {}, Cluster: {} ({})",
                endpoint_id,
                cluster.name,
                cluster.side.as_str()
            ),
        });
        if let Some(mfg) = manufacturer(cluster.manufacturer_code) {
            self.tables.cluster_mfg_codes.push(MfgCodeEntry {
                index: to_index(position, "cluster")?,
                manufacturer_code: mfg,
            });
        }

        Ok(attribute_size)
    }

    /// Append one attribute; returns its storage size.
    fn attribute(
        &mut self,
        endpoint_id: EndpointId,
        cluster: &ClusterInstance,
        attr: &AttributeInstance,
    ) -> Result<u16> {
        let wrap = |source: ResolveError| Error::Attribute {
            endpoint: endpoint_id,
            cluster: cluster.name.clone(),
            attribute: attr.name.clone(),
            type_name: attr.type_name.clone(),
            source,
        };
        let resolver = self.characterizer.resolver();
        let external = attr.storage == StorageOption::External;
        let kind = resolver.kind_of(&attr.type_name).map_err(wrap)?;

        let resolved = self
            .characterizer
            .storage_size(&attr.type_name, attr.max_length);
        let size = if external {
            // External values live outside the attribute store; lists and
            // unsizable types are recorded as zero.
            match resolved {
                Ok(Some(n)) if kind != TypeKind::Array => n,
                Ok(_) | Err(ResolveError::UnresolvableType(_)) => 0,
                Err(e) => return Err(wrap(e)),
            }
        } else {
            resolved
                .map_err(wrap)?
                .ok_or_else(|| wrap(ResolveError::unresolvable(&attr.type_name)))?
        };
        let storage = if external { 0 } else { size };

        let type_macro = match kind {
            TypeKind::Atomic | TypeKind::Array => match resolver.atomic(&attr.type_name) {
                Ok(Some(atomic)) => to_macro_case(&atomic.name),
                _ => to_macro_case(&attr.type_name),
            },
            TypeKind::Enum => format!("ENUM{}", 8 * type_bytes(resolver, attr)),
            TypeKind::Bitmap => format!("BITMAP{}", 8 * type_bytes(resolver, attr)),
            TypeKind::Struct => "STRUCT".to_string(),
            TypeKind::Unknown => "UNKNOWN".to_string(),
        };

        let mut mask = AttributeMask::empty();
        mask.set(AttributeMask::WRITABLE, attr.is_writable);
        mask.set(AttributeMask::TOKENIZE, attr.storage == StorageOption::Nvm);
        mask.set(AttributeMask::EXTERNAL_STORAGE, external);
        mask.set(AttributeMask::SINGLETON, attr.is_singleton);
        mask.set(AttributeMask::CLIENT, attr.side == Side::Client);
        mask.set(AttributeMask::NULLABLE, attr.is_nullable);
        mask.set(AttributeMask::MUST_USE_TIMED_WRITE, attr.must_use_timed_write);

        let shape = ValueShape::of(resolver, &attr.type_name).map_err(wrap)?;
        let bounded = attr.is_bounded && !matches!(shape, ValueShape::String { .. });
        let default = if bounded {
            mask.insert(AttributeMask::MIN_MAX);
            let record = self.encoder.min_max(attr, shape, size)?;
            let index = to_index(self.tables.min_max.len(), "min/max")?;
            self.tables.min_max.push(record);
            DefaultValue::MinMaxIndex(index)
        } else if external {
            DefaultValue::Empty
        } else if size > self.encoder.inline_limit() {
            let bytes = self.encoder.long(attr, shape, size)?;
            let offset = self.long_offset;
            self.tables.long_defaults.push(LongDefaultRecord {
                offset,
                size,
                bytes,
                name: attr.name.clone(),
            });
            self.long_offset += size as u32;
            DefaultValue::LongOffset(offset)
        } else {
            DefaultValue::Inline(self.encoder.inline(attr, shape, size)?)
        };

        if attr.included_reportable {
            self.tables.reporting.push(ReportingRecord {
                direction: match attr.side {
                    Side::Server => ReportingDirection::Reported,
                    Side::Client => ReportingDirection::Received,
                },
                endpoint_id,
                cluster_id: cluster.code,
                attribute_id: attr.code,
                mask: ClusterMask::for_side(cluster.side),
                manufacturer_code: manufacturer(attr.manufacturer_code),
                min_interval: attr.min_interval.unwrap_or(DEFAULT_MIN_INTERVAL),
                max_interval: attr.max_interval.unwrap_or(DEFAULT_MAX_INTERVAL),
                reportable_change: attr.reportable_change.unwrap_or(0),
            });
        }

        let id = Mei::new(attr.manufacturer_code, attr.code);
        if let Some(mfg) = manufacturer(attr.manufacturer_code) {
            self.tables.attribute_mfg_codes.push(MfgCodeEntry {
                index: to_index(self.tables.attributes.len(), "attribute")?,
                manufacturer_code: mfg,
            });
        }

        let tables = &mut self.tables;
        tables.largest_attribute_size = tables.largest_attribute_size.max(size);
        tables.total_storage_size += storage as u32;
        let cluster_id = Mei::new(cluster.manufacturer_code, cluster.code);
        if attr.is_singleton && self.singletons.insert((cluster_id, id, attr.side)) {
            tables.singletons_size += storage as u32;
        }

        tables.attributes.push(AttributeRecord {
            id,
            type_macro,
            size,
            mask,
            default,
            name: attr.name.clone(),
        });
        Ok(storage)
    }

    fn finish(self) -> Result<LayoutTables> {
        let tables = self.tables;
        to_index(tables.attributes.len(), "attribute")?;
        to_index(tables.clusters.len(), "cluster")?;
        to_index(tables.commands.len(), "command")?;
        to_index(tables.events.len(), "event")?;
        to_index(tables.device_types.len(), "device type")?;
        to_index(tables.min_max.len(), "min/max")?;

        debug!(
            endpoints = tables.endpoints.len(),
            device_types = tables.device_types.len(),
            clusters = tables.clusters.len(),
            attributes = tables.attributes.len(),
            commands = tables.commands.len(),
            long_defaults = tables.long_defaults.len(),
            min_max = tables.min_max.len(),
            total_storage_size = tables.total_storage_size,
            "layout collected"
        );
        Ok(tables)
    }
}

/// Convert a table position or count to a 16-bit firmware index.
fn to_index(value: usize, table: &'static str) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::TooManyRecords {
        table,
        count: value,
    })
}

/// Manufacturer code `0` means none.
fn manufacturer(code: Option<u16>) -> Option<u16> {
    code.filter(|&c| c != 0)
}

fn type_bytes<C: TypeCatalog + ?Sized>(
    resolver: &TypeSizeResolver<'_, C>,
    attr: &AttributeInstance,
) -> u16 {
    resolver
        .type_size(&attr.type_name)
        .ok()
        .flatten()
        .unwrap_or(0)
}

/// Only the flags that make sense for the command's source and the
/// cluster's side are set.
fn command_mask(command: &CommandInstance, side: Side) -> CommandMask {
    let mut mask = CommandMask::empty();
    match (command.source, side) {
        (CommandSource::Client, Side::Server) => {
            mask.set(CommandMask::INCOMING_SERVER, command.is_incoming);
        }
        (CommandSource::Client, Side::Client) => {
            mask.set(CommandMask::OUTGOING_CLIENT, command.is_outgoing);
        }
        (CommandSource::Server, Side::Server) => {
            mask.set(CommandMask::OUTGOING_SERVER, command.is_outgoing);
        }
        (CommandSource::Server, Side::Client) => {
            mask.set(CommandMask::INCOMING_CLIENT, command.is_incoming);
        }
    }
    mask
}
