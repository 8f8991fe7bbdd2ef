//! Pack conflict graph.

use std::collections::{BTreeMap, BTreeSet};

use super::PackDefinition;

/// Symmetric conflict relation between packs.
///
/// A conflict declared by either side blocks both directions, so a pack that
/// forgets to list its counterpart is still kept apart from it.
#[derive(Debug, Clone, Default)]
pub struct ConflictGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl ConflictGraph {
    /// Build the graph from every declared conflict on `packs`.
    pub fn from_packs<'a>(packs: impl IntoIterator<Item = &'a PackDefinition>) -> Self {
        let mut graph = Self::default();
        for pack in packs {
            for other in &pack.conflicts {
                graph.add_edge(&pack.id, other);
            }
        }
        graph
    }

    fn add_edge(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.edges
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.edges
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Whether `a` and `b` cannot both be selected.
    #[must_use]
    pub fn blocks(&self, a: &str, b: &str) -> bool {
        self.edges.get(a).is_some_and(|set| set.contains(b))
    }

    /// The first already-selected pack (by id) that conflicts with `id`.
    #[must_use]
    pub fn blocker(&self, id: &str, selected: &BTreeSet<String>) -> Option<&str> {
        self.neighbours(id).find(|other| selected.contains(*other))
    }

    /// Packs that conflict with `id`, sorted.
    pub fn neighbours(&self, id: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}
