use crate::index::GraphIndex;
use careerpath_core::{Category, Edge, STREAM_CATALOG, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Allow-list of stream categories. Vertices without a category never pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    allowed: BTreeSet<Category>,
}

impl Default for CategoryFilter {
    /// Every built-in stream.
    fn default() -> Self {
        Self::new(STREAM_CATALOG.iter().map(|s| s.category))
    }
}

impl CategoryFilter {
    pub fn new(allowed: impl IntoIterator<Item = Category>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            allowed: BTreeSet::new(),
        }
    }

    pub fn allows(&self, category: Option<Category>) -> bool {
        category.is_some_and(|c| self.allowed.contains(&c))
    }

    /// Flip one category in or out; returns whether it is now allowed.
    pub fn toggle(&mut self, category: Category) -> bool {
        if !self.allowed.remove(&category) {
            self.allowed.insert(category);
            true
        } else {
            false
        }
    }

    pub fn allowed(&self) -> impl Iterator<Item = Category> + '_ {
        self.allowed.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// Union of the descendant closures of every collapsed vertex.
pub fn suppressed_by_collapse(
    index: &GraphIndex,
    collapsed: &HashSet<VertexId>,
) -> HashSet<VertexId> {
    let mut suppressed = HashSet::new();
    for id in collapsed {
        suppressed.extend(index.descendants(id));
    }
    suppressed
}

/// Hidden iff the category is disallowed or a collapsed ancestor suppresses it.
pub fn compute_hidden(
    index: &GraphIndex,
    filter: &CategoryFilter,
    collapsed: &HashSet<VertexId>,
) -> HashSet<VertexId> {
    let mut hidden = suppressed_by_collapse(index, collapsed);
    hidden.extend(
        index
            .vertex_ids()
            .iter()
            .filter(|id| !filter.allows(id.category()))
            .cloned(),
    );
    hidden
}

/// Edges whose endpoints are both visible.
pub fn visible_edges<'a>(
    index: &'a GraphIndex,
    hidden: &'a HashSet<VertexId>,
) -> impl Iterator<Item = &'a Edge> + 'a {
    index
        .edges()
        .iter()
        .filter(|e| !hidden.contains(&e.source) && !hidden.contains(&e.target))
}
