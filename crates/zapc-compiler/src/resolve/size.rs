//! Byte sizes of named types.

use std::cell::RefCell;
use std::collections::HashMap;

use zapc_core::{AtomicType, TypeCatalog};

use super::error::ResolveError;
use super::format::StructSize;
use super::kind::TypeKind;

/// Name of the atomic list type.
const ARRAY_TYPE: &str = "array";

/// Lookups memoized for the lifetime of one resolver.
#[derive(Debug, Default)]
struct SizeCache {
    kinds: HashMap<String, TypeKind>,
    structs: HashMap<String, StructSize>,
}

/// Resolves type names against a catalog.
///
/// A resolver belongs to exactly one compilation. Its cache is dropped with
/// it, so sizes never leak from one configuration into the next.
pub struct TypeSizeResolver<'c, C: TypeCatalog + ?Sized> {
    catalog: &'c C,
    cache: RefCell<SizeCache>,
}

impl<'c, C: TypeCatalog + ?Sized> TypeSizeResolver<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            cache: RefCell::new(SizeCache::default()),
        }
    }

    pub fn catalog(&self) -> &'c C {
        self.catalog
    }

    /// Classify a type name.
    ///
    /// The atomic table wins outright. Otherwise a name may match at most one
    /// of the enum, bitmap and struct tables.
    pub fn kind_of(&self, name: &str) -> Result<TypeKind, ResolveError> {
        let key = name.to_ascii_lowercase();
        if let Some(kind) = self.cache.borrow().kinds.get(&key).copied() {
            return Ok(kind);
        }

        let kind = self.classify(name)?;
        self.cache.borrow_mut().kinds.insert(key, kind);
        Ok(kind)
    }

    fn classify(&self, name: &str) -> Result<TypeKind, ResolveError> {
        if self.catalog.atomic(name).is_some() {
            return Ok(if name.eq_ignore_ascii_case(ARRAY_TYPE) {
                TypeKind::Array
            } else {
                TypeKind::Atomic
            });
        }

        let mut matches = Vec::new();
        if self.catalog.enum_type(name).is_some() {
            matches.push(TypeKind::Enum);
        }
        if self.catalog.bitmap(name).is_some() {
            matches.push(TypeKind::Bitmap);
        }
        if self.catalog.struct_type(name).is_some() {
            matches.push(TypeKind::Struct);
        }

        match matches.as_slice() {
            [] => Ok(TypeKind::Unknown),
            [kind] => Ok(*kind),
            _ => Err(ResolveError::AmbiguousType {
                name: name.to_string(),
                kinds: matches.iter().map(|k| k.as_str()).collect(),
            }),
        }
    }

    /// The atomic row for `name`, if it classifies as atomic or array.
    pub fn atomic(&self, name: &str) -> Result<Option<&'c AtomicType>, ResolveError> {
        Ok(match self.kind_of(name)? {
            TypeKind::Atomic | TypeKind::Array => self.catalog.atomic(name),
            _ => None,
        })
    }

    /// Fixed size of a type, `None` when it has none on its own
    /// (structs, lists and variable-length atomics).
    pub fn type_size(&self, name: &str) -> Result<Option<u16>, ResolveError> {
        Ok(match self.kind_of(name)? {
            TypeKind::Atomic => self.catalog.atomic(name).and_then(|a| a.byte_size),
            TypeKind::Enum => self.catalog.enum_type(name).map(|e| e.byte_size),
            TypeKind::Bitmap => self.catalog.bitmap(name).map(|b| b.byte_size),
            TypeKind::Struct | TypeKind::Array | TypeKind::Unknown => None,
        })
    }

    /// Size of an attribute instance of type `name`.
    ///
    /// Strings without a fixed size take `max_length` plus their length
    /// prefix. Lists and names outside the catalog fall back to `max_length`.
    /// Structs return `None`; size them with
    /// [`FormatCharacterizer::struct_size`](super::FormatCharacterizer::struct_size).
    pub fn attribute_size(
        &self,
        name: &str,
        max_length: Option<u16>,
    ) -> Result<Option<u16>, ResolveError> {
        match self.kind_of(name)? {
            TypeKind::Atomic => {
                let atomic = self
                    .catalog
                    .atomic(name)
                    .ok_or_else(|| ResolveError::unresolvable(name))?;
                if let Some(size) = atomic.byte_size {
                    return Ok(Some(size));
                }
                let size = if atomic.is_string {
                    max_length.and_then(|len| len.checked_add(atomic.length_prefix()))
                } else {
                    max_length
                };
                size.map(Some).ok_or_else(|| ResolveError::unresolvable(name))
            }
            TypeKind::Enum | TypeKind::Bitmap => self.type_size(name),
            TypeKind::Struct => Ok(None),
            TypeKind::Array | TypeKind::Unknown => max_length
                .map(Some)
                .ok_or_else(|| ResolveError::unresolvable(name)),
        }
    }

    pub(crate) fn cached_struct(&self, key: &str) -> Option<StructSize> {
        self.cache.borrow().structs.get(key).copied()
    }

    pub(crate) fn cache_struct(&self, key: String, size: StructSize) {
        self.cache.borrow_mut().structs.insert(key, size);
    }
}
