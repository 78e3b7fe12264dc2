/// Failure to resolve a type name.
///
/// These are data-integrity problems in the catalog or the configuration,
/// never transient: retrying the same lookup gives the same answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("type `{0}` is not in the catalog and has no usable max length")]
    UnresolvableType(String),

    #[error("type `{name}` matches more than one kind: {}", .kinds.join(", "))]
    AmbiguousType {
        name: String,
        kinds: Vec<&'static str>,
    },

    #[error("struct `{0}` contains itself")]
    StructCycle(String),
}

impl ResolveError {
    pub(crate) fn unresolvable(name: &str) -> Self {
        Self::UnresolvableType(name.to_string())
    }
}
