//! Dependency ordering of struct definitions.

use indexmap::{IndexMap, IndexSet};
use zapc_core::StructType;

use crate::{Error, Result};

/// Orders structs so that every struct follows the structs its fields use.
pub struct StructDependencySorter;

impl StructDependencySorter {
    /// Sort `structs`, dependencies first.
    ///
    /// Structs that take part in at least one field reference are emitted in
    /// depth-first post-order; structs with no references at all follow in
    /// their input order. A reference cycle is an error.
    pub fn sort<'s>(structs: &[&'s StructType]) -> Result<Vec<&'s StructType>> {
        let by_name: IndexMap<String, &'s StructType> = structs
            .iter()
            .map(|s| (s.name.to_ascii_lowercase(), *s))
            .collect();

        let mut edges: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut touched = IndexSet::new();
        for s in structs {
            let from = s.name.to_ascii_lowercase();
            for field in &s.fields {
                let to = field.type_name.to_ascii_lowercase();
                if !by_name.contains_key(&to) {
                    continue;
                }
                touched.insert(from.clone());
                touched.insert(to.clone());
                edges.entry(from.clone()).or_default().push(to);
            }
        }

        let mut result = Vec::with_capacity(structs.len());
        let mut visited = IndexMap::new();
        for s in structs {
            let key = s.name.to_ascii_lowercase();
            if touched.contains(&key) {
                visit(&key, &by_name, &edges, &mut visited, &mut result)?;
            }
        }
        for s in structs {
            if !touched.contains(&s.name.to_ascii_lowercase()) {
                result.push(*s);
            }
        }

        Ok(result)
    }
}

/// `visited` maps a key to `true` while it is on the DFS stack.
fn visit<'s>(
    key: &str,
    by_name: &IndexMap<String, &'s StructType>,
    edges: &IndexMap<String, Vec<String>>,
    visited: &mut IndexMap<String, bool>,
    result: &mut Vec<&'s StructType>,
) -> Result<()> {
    match visited.get(key) {
        Some(true) => {
            let name = by_name.get(key).map_or(key, |s| s.name.as_str());
            return Err(Error::StructCycle(name.to_string()));
        }
        Some(false) => return Ok(()),
        None => {}
    }

    visited.insert(key.to_string(), true);
    for dep in edges.get(key).into_iter().flatten() {
        visit(dep, by_name, edges, visited, result)?;
    }
    visited.insert(key.to_string(), false);

    if let Some(s) = by_name.get(key) {
        result.push(*s);
    }
    Ok(())
}
