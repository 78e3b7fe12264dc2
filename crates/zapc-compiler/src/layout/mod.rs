//! Layout collection: endpoint configuration to flat indexed tables.

mod collector;
pub(crate) mod defaults;

#[cfg(test)]
mod collector_tests;

pub use collector::LayoutCollector;
