//! Folder intents.

use serde::{Deserialize, Serialize};

use crate::types::FolderId;

/// A request to change (or act on) folder state, fulfilled by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FolderIntent {
    /// Create a folder under `parent_id` (root level when `None`).
    Create {
        /// Parent folder.
        parent_id: Option<FolderId>,
        /// Requested name (the server may de-duplicate it).
        name: String,
    },
    /// Delete a folder and, on the server, all its descendants.
    Delete {
        /// The folder to delete.
        id: FolderId,
    },
    /// Rename a folder.
    Rename {
        /// The folder to rename.
        id: FolderId,
        /// Trimmed, non-empty new name.
        new_name: String,
    },
    /// Reparent a folder.
    Move {
        /// The folder being moved.
        folder_id: FolderId,
        /// The new parent (root level when `None`).
        new_parent_id: Option<FolderId>,
    },
    /// A folder was selected.
    Select {
        /// The selected folder.
        id: FolderId,
    },
}

impl FolderIntent {
    /// Whether fulfilling this intent changes server state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Select { .. })
    }

    /// Short name used in log fields.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Delete { .. } => "delete",
            Self::Rename { .. } => "rename",
            Self::Move { .. } => "move",
            Self::Select { .. } => "select",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_not_mutation() {
        let select = FolderIntent::Select {
            id: FolderId::from("1"),
        };
        assert!(!select.is_mutation());
        assert_eq!(select.action(), "select");

        let mv = FolderIntent::Move {
            folder_id: FolderId::from("1"),
            new_parent_id: None,
        };
        assert!(mv.is_mutation());
    }

    #[test]
    fn test_tagged_json() {
        let intent = FolderIntent::Rename {
            id: FolderId::from("7"),
            new_name: "Reports".to_string(),
        };
        let json = serde_json::to_value(&intent).expect("serialize");
        assert_eq!(json["type"], "Rename");
        assert_eq!(json["id"], "7");
        assert_eq!(json["new_name"], "Reports");
    }
}
