//! Drop-to-reparent resolution.

use rdm_core::types::FolderId;

use crate::drag::DropTarget;
use crate::index::TreeIndex;

/// Why a drop produced no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event carried no target, or the target id was malformed.
    NoTarget,
    /// The dragged folder is not in the current tree.
    UnknownDragged,
    /// The target folder is not in the current tree.
    UnknownTarget,
    /// Dropped onto itself.
    SelfDrop,
}

/// Outcome of resolving a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResolution {
    /// Reparent `folder_id` under `new_parent_id` (top level when `None`).
    Move {
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    },
    /// Nothing to do.
    Ignored(IgnoreReason),
    /// The move would make the folder its own ancestor.
    IntoDescendant {
        folder_id: FolderId,
        target_parent_id: FolderId,
    },
}

/// Decide the new parent of `dragged` when released over `target`.
///
/// Direct drop on `F` nests under `F`; a drop in `dropzone-F` takes `F`'s
/// current (rendered) parent; `root-drop-area` moves to top level. The path
/// from the proposed parent to its root must not contain `dragged`.
pub fn resolve_drop(
    index: &TreeIndex,
    dragged: &FolderId,
    target: Option<&DropTarget>,
) -> DropResolution {
    let Some(target) = target else {
        return DropResolution::Ignored(IgnoreReason::NoTarget);
    };

    if !index.contains(dragged.as_str()) {
        return DropResolution::Ignored(IgnoreReason::UnknownDragged);
    }

    let new_parent_id = match target {
        DropTarget::Folder(folder) => {
            if folder == dragged {
                return DropResolution::Ignored(IgnoreReason::SelfDrop);
            }
            if !index.contains(folder.as_str()) {
                return DropResolution::Ignored(IgnoreReason::UnknownTarget);
            }
            Some(folder.clone())
        }
        DropTarget::Dropzone(folder) => match index.parent_of(folder.as_str()) {
            Some(parent) => parent.cloned(),
            None => return DropResolution::Ignored(IgnoreReason::UnknownTarget),
        },
        DropTarget::Root => None,
    };

    if let Some(parent) = &new_parent_id {
        if index.is_ancestor_or_self(dragged.as_str(), parent.as_str()) {
            return DropResolution::IntoDescendant {
                folder_id: dragged.clone(),
                target_parent_id: parent.clone(),
            };
        }
    }

    DropResolution::Move {
        folder_id: dragged.clone(),
        new_parent_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;
    use rdm_entity::folder::FolderRecord;

    // A
    // ├── B
    // │   └── E
    // └── C
    // D
    // O (dangling parent)
    fn index() -> TreeIndex {
        let records = vec![
            FolderRecord::new("A", "A", None),
            FolderRecord::new("B", "B", Some("A")),
            FolderRecord::new("C", "C", Some("A")),
            FolderRecord::new("D", "D", None),
            FolderRecord::new("E", "E", Some("B")),
            FolderRecord::new("O", "O", Some("ghost")),
        ];
        TreeIndex::from_tree(&build_tree(&records))
    }

    fn resolve(dragged: &str, target: &str) -> DropResolution {
        resolve_drop(
            &index(),
            &FolderId::from(dragged),
            DropTarget::parse(target).as_ref(),
        )
    }

    fn moved(folder: &str, parent: Option<&str>) -> DropResolution {
        DropResolution::Move {
            folder_id: FolderId::from(folder),
            new_parent_id: parent.map(FolderId::from),
        }
    }

    #[test]
    fn test_direct_drop_nests() {
        assert_eq!(resolve("C", "D"), moved("C", Some("D")));
    }

    #[test]
    fn test_dropzone_makes_sibling() {
        assert_eq!(resolve("E", "dropzone-C"), moved("E", Some("A")));
        assert_eq!(resolve("E", "dropzone-D"), moved("E", None));
    }

    #[test]
    fn test_root_drop_area() {
        assert_eq!(resolve("C", "root-drop-area"), moved("C", None));
    }

    #[test]
    fn test_self_drop_is_ignored() {
        assert_eq!(
            resolve("C", "C"),
            DropResolution::Ignored(IgnoreReason::SelfDrop)
        );
    }

    #[test]
    fn test_unresolvable_targets() {
        assert_eq!(
            resolve("C", "nope"),
            DropResolution::Ignored(IgnoreReason::UnknownTarget)
        );
        assert_eq!(
            resolve("C", "dropzone-nope"),
            DropResolution::Ignored(IgnoreReason::UnknownTarget)
        );
        assert_eq!(
            resolve_drop(&index(), &FolderId::from("C"), None),
            DropResolution::Ignored(IgnoreReason::NoTarget)
        );
        assert_eq!(
            resolve("zzz", "A"),
            DropResolution::Ignored(IgnoreReason::UnknownDragged)
        );
        assert_eq!(
            resolve("C", " D "),
            DropResolution::Ignored(IgnoreReason::UnknownTarget)
        );
    }

    #[test]
    fn test_unchanged_parent_still_moves() {
        assert_eq!(resolve("C", "A"), moved("C", Some("A")));
        assert_eq!(resolve("C", "dropzone-B"), moved("C", Some("A")));
        assert_eq!(resolve("D", "root-drop-area"), moved("D", None));
    }

    #[test]
    fn test_dangling_folder_can_be_moved_to_root() {
        assert_eq!(resolve("O", "root-drop-area"), moved("O", None));
    }

    #[test]
    fn test_move_into_descendant_is_rejected() {
        assert_eq!(
            resolve("A", "E"),
            DropResolution::IntoDescendant {
                folder_id: FolderId::from("A"),
                target_parent_id: FolderId::from("E"),
            }
        );
        // dropzone of a direct child resolves to the dragged folder itself
        assert_eq!(
            resolve("A", "dropzone-B"),
            DropResolution::IntoDescendant {
                folder_id: FolderId::from("A"),
                target_parent_id: FolderId::from("A"),
            }
        );
    }
}
