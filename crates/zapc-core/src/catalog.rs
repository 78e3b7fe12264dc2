//! Type catalog: lookups against the cluster-library type rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{AtomicType, BitmapType, EnumType, StructType};

/// Trait for type-row lookups.
///
/// All lookups are case-insensitive: the cluster library mixes `INT8U`,
/// `int8u` and `Int8u` freely. A name may legitimately be found by more than
/// one lookup; deciding what that means is up to the caller.
pub trait TypeCatalog {
    fn atomic(&self, name: &str) -> Option<&AtomicType>;
    fn enum_type(&self, name: &str) -> Option<&EnumType>;
    fn bitmap(&self, name: &str) -> Option<&BitmapType>;
    fn struct_type(&self, name: &str) -> Option<&StructType>;

    /// All struct definitions, in catalog order.
    fn structs(&self) -> Vec<&StructType>;
}

impl<T: TypeCatalog + ?Sized> TypeCatalog for &T {
    fn atomic(&self, name: &str) -> Option<&AtomicType> {
        (*self).atomic(name)
    }
    fn enum_type(&self, name: &str) -> Option<&EnumType> {
        (*self).enum_type(name)
    }
    fn bitmap(&self, name: &str) -> Option<&BitmapType> {
        (*self).bitmap(name)
    }
    fn struct_type(&self, name: &str) -> Option<&StructType> {
        (*self).struct_type(name)
    }
    fn structs(&self) -> Vec<&StructType> {
        (*self).structs()
    }
}

/// In-memory catalog keyed by lower-cased type name.
///
/// Insertion order is preserved so that iteration (and everything derived
/// from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCatalog", into = "RawCatalog")]
pub struct Catalog {
    atomics: IndexMap<String, AtomicType>,
    enums: IndexMap<String, EnumType>,
    bitmaps: IndexMap<String, BitmapType>,
    structs: IndexMap<String, StructType>,
}

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an atomic type. A later row with the same name replaces the earlier one.
    pub fn add_atomic(&mut self, atomic: AtomicType) -> &mut Self {
        self.atomics.insert(key(&atomic.name), atomic);
        self
    }

    pub fn add_enum(&mut self, name: impl Into<String>, byte_size: u16) -> &mut Self {
        let name = name.into();
        self.enums
            .insert(key(&name), EnumType { name, byte_size });
        self
    }

    pub fn add_bitmap(&mut self, name: impl Into<String>, byte_size: u16) -> &mut Self {
        let name = name.into();
        self.bitmaps
            .insert(key(&name), BitmapType { name, byte_size });
        self
    }

    pub fn add_struct(&mut self, ty: StructType) -> &mut Self {
        self.structs.insert(key(&ty.name), ty);
        self
    }

    pub fn atomics(&self) -> impl Iterator<Item = &AtomicType> {
        self.atomics.values()
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumType> {
        self.enums.values()
    }

    pub fn bitmaps(&self) -> impl Iterator<Item = &BitmapType> {
        self.bitmaps.values()
    }

    pub fn is_empty(&self) -> bool {
        self.atomics.is_empty()
            && self.enums.is_empty()
            && self.bitmaps.is_empty()
            && self.structs.is_empty()
    }
}

impl TypeCatalog for Catalog {
    fn atomic(&self, name: &str) -> Option<&AtomicType> {
        self.atomics.get(&key(name))
    }

    fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enums.get(&key(name))
    }

    fn bitmap(&self, name: &str) -> Option<&BitmapType> {
        self.bitmaps.get(&key(name))
    }

    fn struct_type(&self, name: &str) -> Option<&StructType> {
        self.structs.get(&key(name))
    }

    fn structs(&self) -> Vec<&StructType> {
        self.structs.values().collect()
    }
}

/// Serialized form: plain row lists, as the relational store exports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    atomics: Vec<AtomicType>,
    #[serde(default)]
    enums: Vec<EnumType>,
    #[serde(default)]
    bitmaps: Vec<BitmapType>,
    #[serde(default)]
    structs: Vec<StructType>,
}

impl From<RawCatalog> for Catalog {
    fn from(raw: RawCatalog) -> Self {
        let mut catalog = Catalog::new();
        for atomic in raw.atomics {
            catalog.add_atomic(atomic);
        }
        for e in raw.enums {
            catalog.add_enum(e.name, e.byte_size);
        }
        for b in raw.bitmaps {
            catalog.add_bitmap(b.name, b.byte_size);
        }
        for s in raw.structs {
            catalog.add_struct(s);
        }
        catalog
    }
}

impl From<Catalog> for RawCatalog {
    fn from(catalog: Catalog) -> Self {
        Self {
            atomics: catalog.atomics.into_values().collect(),
            enums: catalog.enums.into_values().collect(),
            bitmaps: catalog.bitmaps.into_values().collect(),
            structs: catalog.structs.into_values().collect(),
        }
    }
}
