//! Expanded-folder set.

use std::collections::HashSet;

use rdm_core::types::FolderId;

use crate::index::TreeIndex;

/// Ids of expanded folders.
///
/// Folders start collapsed. The set is independent of tree shape, so a
/// rebuilt tree keeps the expansion of every id it still contains. Ids of
/// deleted folders stay behind harmlessly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    expanded: HashSet<FolderId>,
}

impl ExpansionSet {
    /// Create an empty (all collapsed) set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership; returns the new state.
    pub fn toggle(&mut self, id: &FolderId) -> bool {
        if self.expanded.remove(id.as_str()) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Mark `id` expanded.
    pub fn expand(&mut self, id: &FolderId) {
        self.expanded.insert(id.clone());
    }

    /// Mark `id` collapsed.
    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Expand every ancestor of `id` so that it becomes visible.
    pub fn expand_to(&mut self, index: &TreeIndex, id: &str) {
        for ancestor in index.ancestors(id) {
            self.expanded.insert(ancestor.clone());
        }
    }

    /// Drop ids that are no longer in the tree.
    pub fn retain_known(&mut self, index: &TreeIndex) {
        self.expanded.retain(|id| index.contains(id.as_str()));
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
