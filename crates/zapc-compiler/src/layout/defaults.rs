//! Default value encoding: inline words, long-default bytes, min/max triplets.

use zapc_core::{AttributeInstance, TypeCatalog};
use zapc_tables::{Endianness, MinMaxRecord};

use crate::config::Config;
use crate::resolve::{ResolveError, TypeKind, TypeSizeResolver};
use crate::{Error, Result};

/// How values of a type are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ValueShape {
    /// Integers, enums, bitmaps and anything without a textual form.
    Integer { signed: bool },
    Float,
    /// Length-prefixed string; `prefix` is 1 or 2 bytes.
    String { prefix: u16 },
}

impl ValueShape {
    pub(crate) fn of<C: TypeCatalog + ?Sized>(
        resolver: &TypeSizeResolver<'_, C>,
        type_name: &str,
    ) -> std::result::Result<Self, ResolveError> {
        Ok(match resolver.kind_of(type_name)? {
            TypeKind::Atomic => match resolver.atomic(type_name)? {
                Some(a) if a.is_string => Self::String {
                    prefix: a.length_prefix(),
                },
                Some(a) if a.is_float => Self::Float,
                Some(a) => Self::Integer {
                    signed: a.is_signed,
                },
                None => Self::Integer { signed: false },
            },
            TypeKind::Enum
            | TypeKind::Bitmap
            | TypeKind::Struct
            | TypeKind::Array
            | TypeKind::Unknown => Self::Integer { signed: false },
        })
    }
}

/// Encodes attribute defaults for one target.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DefaultEncoder {
    endianness: Endianness,
    pointer_size: u8,
    slot: u16,
}

impl DefaultEncoder {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            endianness: config.endianness,
            pointer_size: config.pointer_size,
            slot: config.space_for_default_value,
        }
    }

    /// Largest size stored inline. Capped at the width of an inline word.
    pub(crate) fn inline_limit(&self) -> u16 {
        self.slot.min(8)
    }

    /// Default as an inline word.
    ///
    /// On big-endian targets the value is left-aligned in a pointer-sized
    /// word, the way the firmware reads its default-value union.
    pub(crate) fn inline(&self, attr: &AttributeInstance, shape: ValueShape, size: u16) -> Result<u64> {
        let bytes = self.value_bytes(attr, shape, size)?;
        let mut word = [0u8; 8];
        let value = match self.endianness {
            Endianness::Little => {
                word[..bytes.len()].copy_from_slice(&bytes);
                u64::from_le_bytes(word)
            }
            Endianness::Big => {
                word[8 - bytes.len()..].copy_from_slice(&bytes);
                u64::from_be_bytes(word)
            }
        };
        if self.endianness == Endianness::Big && self.pointer_size as u16 > self.slot {
            // A slot of zero bytes shifts the whole word out.
            let shift = 8 * (self.pointer_size as u32 - self.slot as u32);
            return Ok(value.checked_shl(shift).unwrap_or(0));
        }
        Ok(value)
    }

    /// Default as `size` bytes in target order.
    pub(crate) fn long(&self, attr: &AttributeInstance, shape: ValueShape, size: u16) -> Result<Vec<u8>> {
        self.value_bytes(attr, shape, size)
    }

    /// Default, minimum and maximum of a bounded attribute. Missing bounds
    /// take the full range of the type.
    pub(crate) fn min_max(&self, attr: &AttributeInstance, shape: ValueShape, size: u16) -> Result<MinMaxRecord> {
        if size == 0 || size > 8 {
            return Err(Error::BoundedTooWide {
                attribute: attr.name.clone(),
                size,
            });
        }
        let signed = match shape {
            ValueShape::Integer { signed } => signed,
            ValueShape::Float | ValueShape::String { .. } => true,
        };
        let bits = 8 * size as u32;
        let (type_min, type_max) = if signed {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        };

        let default = match attr.default_value.as_deref() {
            Some(text) => bound_value(text, shape).ok_or_else(|| invalid(attr, text))?,
            None if attr.is_nullable && shape == ValueShape::Float => {
                return Err(Error::NullFloatDefault {
                    attribute: attr.name.clone(),
                });
            }
            None if attr.is_nullable => {
                if signed {
                    type_min
                } else {
                    type_max
                }
            }
            None => 0,
        };

        Ok(MinMaxRecord {
            default,
            min: attr.min.map_or(type_min, i128::from),
            max: attr.max.map_or(type_max, i128::from),
            size,
            is_signed: signed,
            name: attr.name.clone(),
        })
    }

    fn value_bytes(&self, attr: &AttributeInstance, shape: ValueShape, size: u16) -> Result<Vec<u8>> {
        let size = size as usize;
        let text = attr.default_value.as_deref();

        match shape {
            ValueShape::String { prefix } => string_bytes(attr, text, prefix as usize, size),
            ValueShape::Float => {
                let mut bytes = match text {
                    Some(text) => float_be_bytes(attr, text, size)?,
                    None if attr.is_nullable => {
                        return Err(Error::NullFloatDefault {
                            attribute: attr.name.clone(),
                        });
                    }
                    None => vec![0; size],
                };
                self.endianness.order_be_bytes(&mut bytes);
                Ok(bytes)
            }
            ValueShape::Integer { signed } => {
                let mut bytes = match text {
                    Some(text) => integer_be_bytes(attr, text, size)?,
                    None if attr.is_nullable => null_integer(signed, size),
                    None => vec![0; size],
                };
                self.endianness.order_be_bytes(&mut bytes);
                Ok(bytes)
            }
        }
    }
}

fn invalid(attr: &AttributeInstance, text: &str) -> Error {
    Error::InvalidDefaultValue {
        attribute: attr.name.clone(),
        value: text.to_string(),
    }
}

fn too_long(attr: &AttributeInstance, text: &str, size: usize) -> Error {
    Error::DefaultTooLong {
        attribute: attr.name.clone(),
        value: text.to_string(),
        size: size as u16,
    }
}

/// Null of an integer type: the most negative value when signed, all ones otherwise.
fn null_integer(signed: bool, size: usize) -> Vec<u8> {
    if signed {
        let mut bytes = vec![0; size];
        if let Some(first) = bytes.first_mut() {
            *first = 0x80;
        }
        bytes
    } else {
        vec![0xFF; size]
    }
}

/// Length prefix (little-endian) followed by the content, zero-padded.
/// A nullable string without a default gets an all-ones prefix.
fn string_bytes(attr: &AttributeInstance, text: Option<&str>, prefix: usize, size: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(size);
    match text {
        None if attr.is_nullable => bytes.resize(prefix.min(size), 0xFF),
        _ => {
            let text = text.unwrap_or("");
            let content = text.as_bytes();
            let max_content = if prefix == 1 { 0xFF } else { 0xFFFF };
            if content.len() > max_content || prefix + content.len() > size {
                return Err(too_long(attr, text, size));
            }
            let len = (content.len() as u16).to_le_bytes();
            bytes.extend_from_slice(&len[..prefix]);
            bytes.extend_from_slice(content);
        }
    }
    bytes.resize(size, 0);
    Ok(bytes)
}

/// Parse an integer literal: decimal (optionally signed), `0x` hex, or a boolean.
pub(crate) fn parse_integer(text: &str) -> Option<i128> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    if text.eq_ignore_ascii_case("true") {
        return Some(1);
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(0);
    }
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u128::from_str_radix(hex, 16)
            .ok()
            .and_then(|v| i128::try_from(v).ok());
    }
    text.parse().ok()
}

/// Default of a bounded attribute as an integer. Float defaults are
/// truncated toward zero; the min/max table only holds integers.
fn bound_value(text: &str, shape: ValueShape) -> Option<i128> {
    let value = parse_integer(text);
    if value.is_some() || shape != ValueShape::Float {
        return value;
    }
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i128)
}

/// Two's complement big-endian bytes of an integer default.
///
/// Hex literals are taken as raw bytes, so they may be wider than any
/// native integer.
fn integer_be_bytes(attr: &AttributeInstance, text: &str, size: usize) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return hex_be_bytes(attr, text, hex, size);
    }

    let value = parse_integer(trimmed).ok_or_else(|| invalid(attr, text))?;
    if size < 16 {
        let bits = 8 * size as u32;
        let fits = if value < 0 {
            value >= -(1i128 << bits.saturating_sub(1))
        } else {
            value < (1i128 << bits)
        };
        if !fits {
            return Err(too_long(attr, text, size));
        }
    }

    let be = value.to_be_bytes();
    let mut bytes = vec![if value < 0 { 0xFF } else { 0 }; size.saturating_sub(be.len())];
    bytes.extend_from_slice(&be[be.len() - size.min(be.len())..]);
    Ok(bytes)
}

fn hex_be_bytes(attr: &AttributeInstance, text: &str, hex: &str, size: usize) -> Result<Vec<u8>> {
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(attr, text));
    }
    let digits = hex.trim_start_matches('0');
    if digits.len() > 2 * size {
        return Err(too_long(attr, text, size));
    }

    let padded = format!("{digits:0>width$}", width = 2 * size);
    let mut bytes = Vec::with_capacity(size);
    for pair in padded.as_bytes().chunks(2) {
        let pair = std::str::from_utf8(pair).map_err(|_| invalid(attr, text))?;
        bytes.push(u8::from_str_radix(pair, 16).map_err(|_| invalid(attr, text))?);
    }
    Ok(bytes)
}

/// IEEE-754 big-endian bytes. Hex literals are raw bit patterns.
fn float_be_bytes(attr: &AttributeInstance, text: &str, size: usize) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return hex_be_bytes(attr, text, hex, size);
    }
    let value: f64 = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse().map_err(|_| invalid(attr, text))?
    };
    match size {
        4 => Ok((value as f32).to_bits().to_be_bytes().to_vec()),
        8 => Ok(value.to_bits().to_be_bytes().to_vec()),
        _ => Err(invalid(attr, text)),
    }
}
