//! Storage categories and recursive struct sizes.

use zapc_core::{StructField, TypeCatalog};
use zapc_tables::FormatCategory;

use super::error::ResolveError;
use super::kind::TypeKind;
use super::size::TypeSizeResolver;
use crate::config::FormatOverrides;

/// Aggregate size of a struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructSize {
    /// Sum of fixed field sizes.
    Fixed(u32),
    /// Some field is a list, a string or a variable struct.
    Variable,
}

/// Maps types to storage categories and emitter symbols.
pub struct FormatCharacterizer<'a, 'c, C: TypeCatalog + ?Sized> {
    resolver: &'a TypeSizeResolver<'c, C>,
    overrides: &'a FormatOverrides,
}

impl<'a, 'c, C: TypeCatalog + ?Sized> FormatCharacterizer<'a, 'c, C> {
    pub fn new(resolver: &'a TypeSizeResolver<'c, C>, overrides: &'a FormatOverrides) -> Self {
        Self {
            resolver,
            overrides,
        }
    }

    pub fn resolver(&self) -> &'a TypeSizeResolver<'c, C> {
        self.resolver
    }

    pub fn categorize(&self, type_name: &str) -> Result<FormatCategory, ResolveError> {
        Ok(match self.resolver.kind_of(type_name)? {
            TypeKind::Atomic => match self.resolver.atomic(type_name)? {
                Some(atomic) if atomic.is_string && atomic.is_long => FormatCategory::LongString,
                Some(atomic) if atomic.is_string => FormatCategory::ShortString,
                Some(atomic) => atomic
                    .byte_size
                    .map_or(FormatCategory::Default, |n| FormatCategory::for_size(n as u32)),
                None => return Err(ResolveError::unresolvable(type_name)),
            },
            TypeKind::Enum | TypeKind::Bitmap => self
                .resolver
                .type_size(type_name)?
                .map_or(FormatCategory::Default, |n| FormatCategory::for_size(n as u32)),
            TypeKind::Struct => match self.struct_size(type_name)? {
                StructSize::Fixed(n) => FormatCategory::for_size(n),
                StructSize::Variable => FormatCategory::Struct,
            },
            TypeKind::Array => FormatCategory::Array,
            TypeKind::Unknown => return Err(ResolveError::unresolvable(type_name)),
        })
    }

    /// Emitter symbol for `type_name`: the override for its category, or
    /// `default_symbol` when none is configured.
    pub fn characterize(&self, type_name: &str, default_symbol: &str) -> Result<String, ResolveError> {
        let category = self.categorize(type_name)?;
        Ok(self.symbol(category, default_symbol))
    }

    /// Override configured for `category`, or `default_symbol`.
    pub fn symbol(&self, category: FormatCategory, default_symbol: &str) -> String {
        self.overrides
            .get(category)
            .unwrap_or(default_symbol)
            .to_string()
    }

    /// Size of a struct, summed recursively over its fields.
    ///
    /// Any field that fails to resolve fails the whole struct.
    pub fn struct_size(&self, name: &str) -> Result<StructSize, ResolveError> {
        let mut in_progress = Vec::new();
        self.struct_size_inner(name, &mut in_progress)
    }

    fn struct_size_inner(
        &self,
        name: &str,
        in_progress: &mut Vec<String>,
    ) -> Result<StructSize, ResolveError> {
        let key = name.to_ascii_lowercase();
        if let Some(size) = self.resolver.cached_struct(&key) {
            return Ok(size);
        }
        if in_progress.contains(&key) {
            return Err(ResolveError::StructCycle(name.to_string()));
        }
        let Some(ty) = self.resolver.catalog().struct_type(name) else {
            return Err(ResolveError::unresolvable(name));
        };

        in_progress.push(key.clone());
        let mut total = 0u32;
        let mut variable = false;
        for field in &ty.fields {
            match self.field_size(field, in_progress)? {
                StructSize::Fixed(n) => total += n,
                StructSize::Variable => variable = true,
            }
        }
        in_progress.pop();

        let size = if variable {
            StructSize::Variable
        } else {
            StructSize::Fixed(total)
        };
        self.resolver.cache_struct(key, size);
        Ok(size)
    }

    fn field_size(
        &self,
        field: &StructField,
        in_progress: &mut Vec<String>,
    ) -> Result<StructSize, ResolveError> {
        if field.is_array {
            return Ok(StructSize::Variable);
        }
        let name = field.type_name.as_str();
        Ok(match self.resolver.kind_of(name)? {
            TypeKind::Atomic => match self.resolver.atomic(name)? {
                Some(atomic) if atomic.is_string => StructSize::Variable,
                Some(atomic) => atomic
                    .byte_size
                    .map_or(StructSize::Variable, |n| StructSize::Fixed(n as u32)),
                None => return Err(ResolveError::unresolvable(name)),
            },
            TypeKind::Enum | TypeKind::Bitmap => self
                .resolver
                .type_size(name)?
                .map_or(StructSize::Variable, |n| StructSize::Fixed(n as u32)),
            TypeKind::Struct => self.struct_size_inner(name, in_progress)?,
            TypeKind::Array => StructSize::Variable,
            TypeKind::Unknown => return Err(ResolveError::unresolvable(name)),
        })
    }

    /// Storage size of an attribute instance, structs included.
    ///
    /// `None` means the instance has no size of its own: a variable struct
    /// without a max length, or a fixed struct too large for a record.
    pub fn storage_size(
        &self,
        type_name: &str,
        max_length: Option<u16>,
    ) -> Result<Option<u16>, ResolveError> {
        if let Some(size) = self.resolver.attribute_size(type_name, max_length)? {
            return Ok(Some(size));
        }
        Ok(match self.struct_size(type_name)? {
            StructSize::Fixed(n) => u16::try_from(n).ok(),
            StructSize::Variable => max_length,
        })
    }
}
