//! The compiler facade: both passes over one input.

use tracing::debug;
use zapc_core::{EndpointType, Snapshot, StructType, TypeCatalog};
use zapc_tables::LayoutTables;

use crate::Result;
use crate::config::Config;
use crate::layout::LayoutCollector;
use crate::structs::StructDependencySorter;
use crate::tokens::{TokenDeduplicator, TokenSet};

/// Everything one compilation produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compilation {
    pub layout: LayoutTables,
    pub tokens: TokenSet,
    /// Catalog structs, dependencies first.
    pub structs: Vec<StructType>,
}

/// Compiles endpoint configurations against one catalog.
///
/// Every [`compile`](Self::compile) call starts from empty resolver caches;
/// nothing learned about a type survives into the next call.
pub struct Compiler<'c, C: TypeCatalog + ?Sized> {
    catalog: &'c C,
    config: Config,
}

impl<'c, C: TypeCatalog + ?Sized> Compiler<'c, C> {
    pub fn new(catalog: &'c C, config: Config) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the layout and token passes.
    ///
    /// A layout failure aborts the compilation. Token failures do not; they
    /// are listed in [`TokenSet::failures`].
    pub fn compile(&self, endpoints: &[EndpointType]) -> Result<Compilation> {
        self.config.validate()?;
        let structs = StructDependencySorter::sort(&self.catalog.structs())?
            .into_iter()
            .cloned()
            .collect();
        let layout = LayoutCollector::new(self.catalog, &self.config).collect(endpoints)?;
        let tokens = TokenDeduplicator::new(self.catalog, &self.config).deduplicate(endpoints);

        debug!(
            endpoints = endpoints.len(),
            attributes = layout.attributes.len(),
            tokens = tokens.len(),
            fingerprint = layout.fingerprint(),
            "compilation finished"
        );
        Ok(Compilation {
            layout,
            tokens,
            structs,
        })
    }
}

impl<'c> Compiler<'c, zapc_core::Catalog> {
    /// Compile a snapshot's endpoints against its own catalog.
    pub fn compile_snapshot(snapshot: &'c Snapshot, config: Config) -> Result<Compilation> {
        Compiler::new(&snapshot.catalog, config).compile(&snapshot.endpoints)
    }
}
