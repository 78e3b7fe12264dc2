/// What a type name refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Atomic,
    Enum,
    Bitmap,
    Struct,
    /// The atomic list type; its size comes from the instance's max length.
    Array,
    /// Not in any catalog table.
    Unknown,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::Enum => "enum",
            Self::Bitmap => "bitmap",
            Self::Struct => "struct",
            Self::Array => "array",
            Self::Unknown => "unknown",
        }
    }
}
