//! Append-only store of named shapes discovered during resolution.

use std::collections::{btree_map, BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

use super::types::Definition;

/// Synthesized type name → shape.
///
/// Names are never overwritten: a different shape arriving under a taken
/// name is stored under the first free numbered variant (`Status2`, ...),
/// and an identical shape is reused. Iteration is in name order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DefinitionRegistry {
    entries: BTreeMap<String, Definition>,
    /// Names handed out to references still being resolved.
    reserved: BTreeSet<String>,
}

impl DefinitionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Definition> {
        self.entries.iter()
    }

    /// Store `definition` under `name` or a numbered variant of it, and
    /// return the name it is reachable under.
    pub fn register(&mut self, name: &str, definition: Definition) -> String {
        let mut n = 1;
        loop {
            let candidate = numbered(name, n);
            match self.entries.get(&candidate) {
                Some(existing) if *existing == definition => return candidate,
                None if !self.reserved.contains(&candidate) => {
                    if n > 1 {
                        tracing::debug!(
                            name,
                            renamed = %candidate,
                            "name already holds a different shape"
                        );
                    }
                    self.entries.insert(candidate.clone(), definition);
                    return candidate;
                }
                _ => n += 1,
            }
        }
    }

    /// Claim a free name for a shape that is not resolved yet.
    ///
    /// The name stays unavailable to [`register`](Self::register) until
    /// [`fill`](Self::fill) stores the shape.
    pub(crate) fn reserve(&mut self, name: &str) -> String {
        let mut n = 1;
        let free = loop {
            let candidate = numbered(name, n);
            if !self.entries.contains_key(&candidate) && !self.reserved.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        self.reserved.insert(free.clone());
        free
    }

    pub(crate) fn fill(&mut self, name: String, definition: Definition) {
        self.reserved.remove(&name);
        self.entries.insert(name, definition);
    }
}

/// `name` for the first candidate, then `name2`, `name3`, ...
fn numbered(name: &str, n: u32) -> String {
    if n == 1 {
        name.to_string()
    } else {
        format!("{name}{n}")
    }
}

impl<'a> IntoIterator for &'a DefinitionRegistry {
    type Item = (&'a String, &'a Definition);
    type IntoIter = btree_map::Iter<'a, String, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for DefinitionRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.entries)
    }
}
