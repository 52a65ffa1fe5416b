//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use rdm_core::types::FolderId;

use super::model::FolderRecord;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent ID as recorded by the server (may be dangling).
    pub parent_id: Option<FolderId>,
    /// Number of documents in this folder.
    pub file_count: u64,
    /// Child folder nodes, in input order.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Clone a record into a childless node.
    pub fn from_record(record: &FolderRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            parent_id: record.parent_id.clone(),
            file_count: record.file_count,
            children: Vec::new(),
        }
    }

    /// Whether the node shows an expand affordance.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including the node itself.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Deep chains must not recurse once per level on drop.
impl Drop for FolderNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// One node visited by [`FolderTree::walk`].
#[derive(Debug, Clone, Copy)]
pub struct TreeEntry<'a> {
    /// The visited node.
    pub node: &'a FolderNode,
    /// Depth (0 for roots).
    pub depth: usize,
    /// The node this one is rendered under, `None` for roots.
    pub parent: Option<&'a FolderId>,
}

/// A complete folder forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the tree.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: u64,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }

    /// Wrap a list of roots, counting every node.
    pub fn from_roots(roots: Vec<FolderNode>) -> Self {
        let total_folders = roots.iter().map(FolderNode::subtree_size).sum::<usize>() as u64;
        Self {
            roots,
            total_folders,
        }
    }

    /// Whether the tree has no folders.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first pre-order traversal of every node.
    pub fn walk(&self) -> Vec<TreeEntry<'_>> {
        let mut out = Vec::with_capacity(self.total_folders as usize);
        let mut stack: Vec<TreeEntry<'_>> = self
            .roots
            .iter()
            .rev()
            .map(|node| TreeEntry {
                node,
                depth: 0,
                parent: None,
            })
            .collect();

        while let Some(entry) = stack.pop() {
            for child in entry.node.children.iter().rev() {
                stack.push(TreeEntry {
                    node: child,
                    depth: entry.depth + 1,
                    parent: Some(&entry.node.id),
                });
            }
            out.push(entry);
        }
        out
    }

    /// Find a node anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&FolderNode> {
        let mut stack: Vec<&FolderNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            if node.id.as_str() == id {
                return Some(node);
            }
            stack.extend(node.children.iter());
        }
        None
    }
}

impl Default for FolderTree {
    fn default() -> Self {
        Self::empty()
    }
}
