//! Parent lookup over a built tree.

use std::collections::HashMap;

use rdm_core::types::FolderId;
use rdm_entity::folder::FolderTree;

#[derive(Debug, Clone)]
struct IndexEntry {
    /// Parent the folder is rendered under (`None` for roots, including
    /// folders promoted because of a dangling or cyclic parent).
    parent: Option<FolderId>,
    name: String,
    has_children: bool,
}

/// Id-keyed view of a [`FolderTree`], rebuilt together with the tree.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    entries: HashMap<FolderId, IndexEntry>,
}

impl TreeIndex {
    /// Index every node of `tree`.
    pub fn from_tree(tree: &FolderTree) -> Self {
        let entries = tree
            .walk()
            .into_iter()
            .map(|entry| {
                (
                    entry.node.id.clone(),
                    IndexEntry {
                        parent: entry.parent.cloned(),
                        name: entry.node.name.clone(),
                        has_children: entry.node.has_children(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Number of indexed folders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is in the current tree.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// The folder `id` is rendered under. Outer `None` when `id` is unknown.
    pub fn parent_of(&self, id: &str) -> Option<Option<&FolderId>> {
        self.entries.get(id).map(|e| e.parent.as_ref())
    }

    /// Current name of `id`.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|e| e.name.as_str())
    }

    /// Whether `id` has at least one child.
    pub fn has_children(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(|e| e.has_children)
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: &str) -> Vec<&FolderId> {
        let mut out = Vec::new();
        let mut cursor = self.entries.get(id).and_then(|e| e.parent.as_ref());
        while let Some(parent) = cursor {
            if out.len() > self.entries.len() {
                break;
            }
            out.push(parent);
            cursor = self
                .entries
                .get(parent.as_str())
                .and_then(|e| e.parent.as_ref());
        }
        out
    }

    /// Whether `ancestor` is `id` itself or on the path from `id` to its root.
    pub fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        ancestor == id || self.ancestors(id).iter().any(|a| a.as_str() == ancestor)
    }
}
