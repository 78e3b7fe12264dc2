//! Human-readable dump of layout tables for debugging and snapshot tests.
//!
//! Sections appear in emission order. Empty tables are omitted, except
//! `[scalars]` which is always present. Index labels are zero-padded to the
//! width of the largest index in their table.

use std::fmt::{self, Write as _};

use crate::mask::flag_names;
use crate::records::DefaultValue;
use crate::tables::LayoutTables;

/// Generate a human-readable dump of the layout tables.
pub fn dump(tables: &LayoutTables) -> String {
    Dump(tables).to_string()
}

struct Dump<'a>(&'a LayoutTables);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        dump_scalars(f, t)?;
        dump_endpoints(f, t)?;
        dump_device_types(f, t)?;
        dump_clusters(f, t)?;
        dump_attributes(f, t)?;
        dump_commands(f, t)?;
        dump_events(f, t)?;
        dump_long_defaults(f, t)?;
        dump_min_max(f, t)?;
        dump_reporting(f, t)?;
        dump_mfg_codes(f, "attributes.mfg", 'A', &t.attribute_mfg_codes, t.attributes.len())?;
        dump_mfg_codes(f, "commands.mfg", 'K', &t.command_mfg_codes, t.commands.len())?;
        dump_mfg_codes(f, "clusters.mfg", 'C', &t.cluster_mfg_codes, t.clusters.len())
    }
}

/// Calculate the minimum width needed to display numbers up to `count - 1`.
fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

fn dump_scalars(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    f.write_str("[scalars]\n")?;
    writeln!(f, "largest_attribute_size = {}", t.largest_attribute_size)?;
    writeln!(f, "singletons_size = {}", t.singletons_size)?;
    writeln!(f, "total_storage_size = {}", t.total_storage_size)?;
    writeln!(f, "long_defaults_size = {}", t.long_defaults_size())
}

fn section(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    write!(f, "\n[{name}]\n")
}

fn dump_endpoints(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.endpoints.is_empty() {
        return Ok(());
    }
    section(f, "endpoints")?;
    let w = width_for_count(t.endpoints.len());
    let cw = width_for_count(t.clusters.len());
    let dw = width_for_count(t.device_types.len());
    for (i, ep) in t.endpoints.iter().enumerate() {
        write!(
            f,
            "E{i:0w$} = ep {} :: C{:0cw$}+{} D{:0dw$}+{} size {} profile 0x{:04X} net {}",
            ep.endpoint_id,
            ep.cluster_index,
            ep.cluster_count,
            ep.device_type_index,
            ep.device_type_count,
            ep.attribute_size,
            ep.profile_id,
            ep.network_id
        )?;
        if let Some(parent) = ep.parent_endpoint {
            write!(f, " parent {parent}")?;
        }
        f.write_char('\n')?;
    }
    Ok(())
}

fn dump_device_types(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.device_types.is_empty() {
        return Ok(());
    }
    section(f, "device_types")?;
    let w = width_for_count(t.device_types.len());
    for (i, d) in t.device_types.iter().enumerate() {
        writeln!(
            f,
            "D{i:0w$} = ep {} 0x{:08X} v{}",
            d.endpoint_id, d.device_id, d.version
        )?;
    }
    Ok(())
}

fn dump_clusters(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.clusters.is_empty() {
        return Ok(());
    }
    section(f, "clusters")?;
    let w = width_for_count(t.clusters.len());
    for (i, c) in t.clusters.iter().enumerate() {
        write!(
            f,
            "C{i:0w$} = {} {} A{}+{} K{}+{} V{}+{} size {}",
            c.id,
            flag_names(&c.mask),
            c.attribute_index,
            c.attribute_count,
            c.command_index,
            c.command_count,
            c.event_index,
            c.event_count,
            c.attribute_size
        )?;
        if let Some(functions) = &c.functions {
            write!(f, " fn {functions}")?;
        }
        writeln!(f, "  ; {}", c.comment)?;
    }
    Ok(())
}

fn dump_attributes(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.attributes.is_empty() {
        return Ok(());
    }
    section(f, "attributes")?;
    let w = width_for_count(t.attributes.len());
    for (i, a) in t.attributes.iter().enumerate() {
        let default = match a.default {
            DefaultValue::Empty => "-".to_string(),
            DefaultValue::Inline(v) => format!("0x{v:X}"),
            DefaultValue::LongOffset(offset) => format!("@{offset}"),
            DefaultValue::MinMaxIndex(index) => format!("M{index}"),
        };
        writeln!(
            f,
            "A{i:0w$} = {} {} size {} {} {default}  ; {}",
            a.id,
            a.type_macro,
            a.size,
            flag_names(&a.mask),
            a.name
        )?;
    }
    Ok(())
}

fn dump_commands(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.commands.is_empty() {
        return Ok(());
    }
    section(f, "commands")?;
    let w = width_for_count(t.commands.len());
    for (i, k) in t.commands.iter().enumerate() {
        writeln!(
            f,
            "K{i:0w$} = {} {} {}  ; {}",
            k.cluster_id,
            k.command_id,
            flag_names(&k.mask),
            k.name
        )?;
    }
    Ok(())
}

fn dump_events(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.events.is_empty() {
        return Ok(());
    }
    section(f, "events")?;
    let w = width_for_count(t.events.len());
    for (i, v) in t.events.iter().enumerate() {
        writeln!(f, "V{i:0w$} = {} {}  ; {}", v.cluster_id, v.event_id, v.name)?;
    }
    Ok(())
}

fn dump_long_defaults(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.long_defaults.is_empty() {
        return Ok(());
    }
    section(f, "long_defaults")?;
    for r in &t.long_defaults {
        let mut hex = String::with_capacity(r.bytes.len() * 3);
        for (i, b) in r.bytes.iter().enumerate() {
            if i > 0 {
                hex.push(' ');
            }
            write!(hex, "{b:02X}")?;
        }
        writeln!(f, "@{} = [{hex}]  ; {}", r.offset, r.name)?;
    }
    Ok(())
}

fn dump_min_max(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.min_max.is_empty() {
        return Ok(());
    }
    section(f, "min_max")?;
    let w = width_for_count(t.min_max.len());
    for (i, m) in t.min_max.iter().enumerate() {
        let sign = if m.is_signed { "signed" } else { "unsigned" };
        writeln!(
            f,
            "M{i:0w$} = {} in {}..={} ({sign} {})  ; {}",
            m.default, m.min, m.max, m.size, m.name
        )?;
    }
    Ok(())
}

fn dump_reporting(f: &mut fmt::Formatter<'_>, t: &LayoutTables) -> fmt::Result {
    if t.reporting.is_empty() {
        return Ok(());
    }
    section(f, "reporting")?;
    let w = width_for_count(t.reporting.len());
    for (i, r) in t.reporting.iter().enumerate() {
        write!(
            f,
            "R{i:0w$} = {} ep {} 0x{:04X}/0x{:04X} {} every {}..{} change {}",
            r.direction.as_str(),
            r.endpoint_id,
            r.cluster_id,
            r.attribute_id,
            flag_names(&r.mask),
            r.min_interval,
            r.max_interval,
            r.reportable_change
        )?;
        if let Some(mfg) = r.manufacturer_code {
            write!(f, " mfg 0x{mfg:04X}")?;
        }
        f.write_char('\n')?;
    }
    Ok(())
}

fn dump_mfg_codes(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    prefix: char,
    entries: &[crate::records::MfgCodeEntry],
    table_len: usize,
) -> fmt::Result {
    if entries.is_empty() {
        return Ok(());
    }
    section(f, name)?;
    let w = width_for_count(table_len);
    for e in entries {
        writeln!(
            f,
            "{prefix}{:0w$} = 0x{:04X}",
            e.index, e.manufacturer_code
        )?;
    }
    Ok(())
}
