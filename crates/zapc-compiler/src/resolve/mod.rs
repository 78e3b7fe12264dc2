//! Type resolution: names to kinds, byte sizes and storage categories.
//!
//! - `kind` - the closed set of type kinds
//! - `size` - [`TypeSizeResolver`] and its per-compilation cache
//! - `format` - [`FormatCharacterizer`], recursive struct sizing and symbol overrides

mod error;
mod format;
mod kind;
mod size;


pub use error::ResolveError;
pub use format::{FormatCharacterizer, StructSize};
pub use kind::TypeKind;
pub use size::TypeSizeResolver;
