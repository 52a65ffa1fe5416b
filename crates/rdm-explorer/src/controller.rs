//! The folder explorer component.

use tracing::{debug, info};

use rdm_core::types::FolderId;
use rdm_entity::folder::{FolderRecord, FolderTree};

use crate::builder::build_tree;
use crate::drag::{DragState, DropEvent, DropTarget};
use crate::expansion::ExpansionSet;
use crate::host::{FolderTreeHost, Notice};
use crate::index::TreeIndex;
use crate::rename::{RenameEditor, RenameOutcome, RenameState};
use crate::render::{RenderOptions, VisibleRow, render_text, visible_rows};
use crate::reparent::{DropResolution, resolve_drop};

/// Default name for folders created from the explorer.
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

/// Folder tree view over the server's flat list.
///
/// Holds only transient UI state (expansion, selection, drag, inline edit).
/// Every mutation is forwarded to the host `H`; the tree changes only when
/// the host supplies a new list through [`set_folders`](Self::set_folders).
#[derive(Debug)]
pub struct FolderExplorer<H> {
    host: H,
    default_folder_name: String,
    tree: FolderTree,
    index: TreeIndex,
    expansion: ExpansionSet,
    drag: DragState,
    rename: RenameEditor,
    selected: Option<FolderId>,
}

impl<H: FolderTreeHost> FolderExplorer<H> {
    /// Creates an empty explorer.
    pub fn new(host: H) -> Self {
        Self {
            host,
            default_folder_name: DEFAULT_FOLDER_NAME.to_string(),
            tree: FolderTree::empty(),
            index: TreeIndex::default(),
            expansion: ExpansionSet::new(),
            drag: DragState::default(),
            rename: RenameEditor::new(),
            selected: None,
        }
    }

    /// Overrides the name used by the create actions.
    pub fn with_default_folder_name(mut self, name: impl Into<String>) -> Self {
        self.default_folder_name = name.into();
        self
    }

    /// Replaces the flat list and rebuilds the tree from scratch.
    pub fn set_folders(&mut self, folders: &[FolderRecord]) {
        self.tree = build_tree(folders);
        self.index = TreeIndex::from_tree(&self.tree);

        if let Some(id) = self.rename.editing_id() {
            if !self.index.contains(id.as_str()) {
                let id = self.rename.abandon();
                debug!(folder_id = ?id, "Folder being renamed is gone, dropping edit");
            }
        }

        if let Some(id) = self.drag.active_id() {
            if !self.index.contains(id.as_str()) {
                self.drag.finish();
            }
        }

        debug!(
            folders = self.tree.total_folders,
            roots = self.tree.roots.len(),
            "Folder tree rebuilt"
        );
    }

    /// Sets the selected folder (owned by the host).
    pub fn set_selected(&mut self, selected: Option<FolderId>) {
        self.selected = selected;
    }

    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn selected(&self) -> Option<&FolderId> {
        self.selected.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn rename_state(&self) -> &RenameState {
        self.rename.state()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // ── Expansion ────────────────────────────────────────────────

    /// Flips the expansion of `id`; returns the new state.
    pub fn toggle(&mut self, id: &FolderId) -> bool {
        self.expansion.toggle(id)
    }

    pub fn expand(&mut self, id: &FolderId) {
        self.expansion.expand(id);
    }

    pub fn collapse(&mut self, id: &str) {
        self.expansion.collapse(id);
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion.is_expanded(id)
    }

    /// Expands every ancestor of `id`.
    pub fn reveal(&mut self, id: &str) {
        self.expansion.expand_to(&self.index, id);
    }

    // ── Selection ────────────────────────────────────────────────

    /// Emits a select intent for a known folder.
    pub fn select(&mut self, id: &FolderId) -> bool {
        if !self.index.contains(id.as_str()) {
            return false;
        }
        self.host.on_select(id);
        true
    }

    // ── Drag and drop ────────────────────────────────────────────

    /// Starts dragging a known folder.
    pub fn drag_start(&mut self, id: &FolderId) -> bool {
        if !self.index.contains(id.as_str()) {
            return false;
        }
        self.drag.start(id.clone());
        true
    }

    /// Tracks the target under the pointer.
    pub fn drag_over(&mut self, over_id: Option<&str>) {
        self.drag.hover(over_id.and_then(DropTarget::parse));
    }

    /// Aborts the drag without a move.
    pub fn drag_cancel(&mut self) {
        self.drag.finish();
    }

    /// Releases the current drag over `over_id`.
    pub fn drop_on(&mut self, over_id: Option<&str>) -> DropResolution {
        let Some(active_id) = self.drag.active_id().cloned() else {
            return DropResolution::Ignored(crate::reparent::IgnoreReason::UnknownDragged);
        };
        self.drop(DropEvent {
            active_id,
            over_id: over_id.map(str::to_string),
        })
    }

    /// Handles a finished drag gesture.
    ///
    /// Clears the drag state, resolves the new parent and, for a valid move,
    /// calls `on_move_folder`. The tree is left untouched until the host
    /// supplies the updated list.
    pub fn drop(&mut self, event: DropEvent) -> DropResolution {
        self.drag.finish();

        let target = event.target();
        let resolution = resolve_drop(&self.index, &event.active_id, target.as_ref());

        match &resolution {
            DropResolution::Move {
                folder_id,
                new_parent_id,
            } => {
                info!(
                    folder_id = %folder_id,
                    new_parent_id = ?new_parent_id.as_ref().map(FolderId::as_str),
                    "Folder dropped"
                );
                self.host.on_move_folder(folder_id, new_parent_id.as_ref());
            }
            DropResolution::IntoDescendant { folder_id, .. } => {
                let name = self.index.name_of(folder_id.as_str()).unwrap_or_default();
                self.host.notify(Notice::warning(format!(
                    "Cannot move \"{name}\" into one of its own subfolders"
                )));
            }
            DropResolution::Ignored(reason) => {
                debug!(folder_id = %event.active_id, ?reason, "Drop ignored");
            }
        }

        resolution
    }

    // ── Rename ───────────────────────────────────────────────────

    /// Enters inline editing for a known folder.
    pub fn start_rename(&mut self, id: &FolderId) -> bool {
        let Some(name) = self.index.name_of(id.as_str()) else {
            return false;
        };
        let name = name.to_string();
        self.rename.start(id.clone(), &name);
        true
    }

    /// Updates the text in the rename field.
    pub fn edit_rename(&mut self, text: &str) {
        self.rename.set_draft(text);
    }

    /// Commits the rename field (blur or Enter).
    pub fn commit_rename(&mut self) -> RenameOutcome {
        let outcome = self.rename.commit();
        match &outcome {
            RenameOutcome::Blank => {
                self.host
                    .notify(Notice::warning("Folder name cannot be empty"));
            }
            RenameOutcome::Renamed { id, new_name } => {
                info!(folder_id = %id, new_name = %new_name, "Folder renamed");
                self.host.on_rename_folder(id, new_name);
            }
            RenameOutcome::Unchanged | RenameOutcome::NotEditing => {}
        }
        outcome
    }

    // ── Create / delete ──────────────────────────────────────────

    /// Requests a new top-level folder.
    pub fn create_root_folder(&mut self) {
        let name = self.default_folder_name.clone();
        self.host.on_create_folder(None, &name);
    }

    /// Requests a new subfolder of a known folder and expands the parent.
    pub fn create_subfolder(&mut self, parent_id: &FolderId) -> bool {
        if !self.index.contains(parent_id.as_str()) {
            return false;
        }
        self.expansion.expand(parent_id);
        let name = self.default_folder_name.clone();
        self.host.on_create_folder(Some(parent_id), &name);
        true
    }

    /// Requests deletion of a known folder.
    pub fn delete_folder(&mut self, id: &FolderId) -> bool {
        if !self.index.contains(id.as_str()) {
            return false;
        }
        self.host.on_delete_folder(id);
        true
    }

    // ── Rendering ────────────────────────────────────────────────

    /// Rows currently visible, in display order.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        visible_rows(
            &self.tree,
            &self.expansion,
            self.selected.as_ref(),
            self.rename.editing_id(),
            self.drag.hovered(),
        )
    }

    /// Text rendering of the visible rows.
    pub fn render(&self, indent_width: usize, show_ids: bool) -> String {
        let options = RenderOptions {
            indent_width,
            show_ids,
            draft: self.rename.draft().map(str::to_string),
            root_drop_area: self.drag.is_dragging(),
        };
        render_text(&self.visible_rows(), &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{IntentLog, NoticeLevel};
    use crate::reparent::IgnoreReason;
    use rdm_core::events::FolderIntent;

    fn id(raw: &str) -> FolderId {
        FolderId::from(raw)
    }

    // A ─┬─ B
    //    └─ C
    // D
    fn explorer() -> FolderExplorer<IntentLog> {
        let mut explorer = FolderExplorer::new(IntentLog::new());
        explorer.set_folders(&[
            FolderRecord::new("A", "Alpha", None),
            FolderRecord::new("B", "Beta", Some("A")),
            FolderRecord::new("C", "Gamma", Some("A")),
            FolderRecord::new("D", "Delta", None),
        ]);
        explorer
    }

    #[test]
    fn test_drop_onto_folder_moves_inside() {
        let mut explorer = explorer();
        assert!(explorer.drag_start(&id("C")));
        explorer.drop_on(Some("D"));
        assert!(!explorer.drag().is_dragging());
        assert_eq!(
            explorer.host().intents,
            vec![FolderIntent::Move {
                folder_id: id("C"),
                new_parent_id: Some(id("D")),
            }]
        );
    }

    #[test]
    fn test_drop_onto_dropzone_makes_sibling() {
        let mut explorer = explorer();
        explorer.drop(DropEvent::new("D", Some("dropzone-B")));
        explorer.drop(DropEvent::new("C", Some("dropzone-B")));
        assert_eq!(
            explorer.host().intents,
            vec![
                FolderIntent::Move {
                    folder_id: id("D"),
                    new_parent_id: Some(id("A")),
                },
                FolderIntent::Move {
                    folder_id: id("C"),
                    new_parent_id: Some(id("A")),
                },
            ]
        );
    }

    #[test]
    fn test_drop_onto_root_area() {
        let mut explorer = explorer();
        explorer.drop(DropEvent::new("C", Some("root-drop-area")));
        explorer.drop(DropEvent::new("D", Some("root-drop-area")));
        assert_eq!(
            explorer.host().intents,
            vec![
                FolderIntent::Move {
                    folder_id: id("C"),
                    new_parent_id: None,
                },
                FolderIntent::Move {
                    folder_id: id("D"),
                    new_parent_id: None,
                },
            ]
        );
    }

    #[test]
    fn test_drop_onto_self_emits_nothing() {
        let mut explorer = explorer();
        let outcome = explorer.drop(DropEvent::new("C", Some("C")));
        assert_eq!(outcome, DropResolution::Ignored(IgnoreReason::SelfDrop));
        assert!(explorer.host().intents.is_empty());
    }

    #[test]
    fn test_drop_without_target_clears_drag() {
        let mut explorer = explorer();
        explorer.drag_start(&id("B"));
        explorer.drag_over(Some("D"));
        let outcome = explorer.drop_on(None);
        assert_eq!(outcome, DropResolution::Ignored(IgnoreReason::NoTarget));
        assert!(!explorer.drag().is_dragging());
        assert!(explorer.host().intents.is_empty());
    }

    #[test]
    fn test_drop_into_descendant_warns() {
        let mut explorer = explorer();
        explorer.drop(DropEvent::new("A", Some("B")));
        assert!(explorer.host().intents.is_empty());
        assert_eq!(explorer.host().notices.len(), 1);
        assert_eq!(explorer.host().notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_tree_waits_for_host() {
        let mut explorer = explorer();
        explorer.drop(DropEvent::new("C", Some("D")));
        let d = explorer.tree().find("D").expect("D exists");
        assert!(d.children.is_empty());
    }

    #[test]
    fn test_rename_flow() {
        let mut explorer = explorer();
        assert!(explorer.start_rename(&id("B")));

        explorer.edit_rename("   ");
        assert_eq!(explorer.commit_rename(), RenameOutcome::Blank);
        assert!(matches!(explorer.rename_state(), RenameState::Editing { .. }));
        assert!(explorer.host().intents.is_empty());
        assert_eq!(explorer.host().notices.len(), 1);

        explorer.edit_rename(" Beta ");
        assert_eq!(explorer.commit_rename(), RenameOutcome::Unchanged);
        assert!(explorer.host().intents.is_empty());

        explorer.start_rename(&id("B"));
        explorer.edit_rename("  Budget ");
        explorer.commit_rename();
        assert_eq!(
            explorer.host().intents,
            vec![FolderIntent::Rename {
                id: id("B"),
                new_name: "Budget".to_string(),
            }]
        );
    }

    #[test]
    fn test_rename_dropped_when_folder_disappears() {
        let mut explorer = explorer();
        explorer.start_rename(&id("B"));
        explorer.set_folders(&[FolderRecord::new("A", "Alpha", None)]);
        assert_eq!(explorer.rename_state(), &RenameState::Idle);
    }

    #[test]
    fn test_expansion_survives_rebuild() {
        let mut explorer = explorer();
        assert!(explorer.toggle(&id("A")));
        explorer.set_folders(&[
            FolderRecord::new("A", "Alpha (renamed)", None),
            FolderRecord::new("B", "Beta", Some("A")),
        ]);
        assert!(explorer.is_expanded("A"));
        let rows = explorer.visible_rows();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].expanded);
    }

    #[test]
    fn test_create_actions() {
        let mut explorer = explorer().with_default_folder_name("Untitled");
        explorer.create_root_folder();
        assert!(explorer.create_subfolder(&id("D")));
        assert!(!explorer.create_subfolder(&id("nope")));
        assert!(explorer.is_expanded("D"));
        assert_eq!(
            explorer.host().intents,
            vec![
                FolderIntent::Create {
                    parent_id: None,
                    name: "Untitled".to_string(),
                },
                FolderIntent::Create {
                    parent_id: Some(id("D")),
                    name: "Untitled".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_default_folder_name() {
        let mut explorer = explorer();
        explorer.create_root_folder();
        assert_eq!(
            explorer.host().intents,
            vec![FolderIntent::Create {
                parent_id: None,
                name: "New Folder".to_string(),
            }]
        );
    }

    #[test]
    fn test_select_and_delete_known_only() {
        let mut explorer = explorer();
        assert!(explorer.select(&id("B")));
        assert!(!explorer.select(&id("X")));
        assert!(explorer.delete_folder(&id("C")));
        assert!(!explorer.delete_folder(&id("X")));
        assert_eq!(
            explorer.host().intents,
            vec![
                FolderIntent::Select { id: id("B") },
                FolderIntent::Delete { id: id("C") },
            ]
        );
    }

    #[test]
    fn test_render_shows_selection_and_drag() {
        let mut explorer = explorer();
        explorer.set_selected(Some(id("D")));
        explorer.drag_start(&id("D"));
        explorer.drag_over(Some("A"));
        let text = explorer.render(2, false);
        assert!(text.contains("▸ Alpha  ⇐ drop inside"));
        assert!(text.contains("Delta  ◀"));
        assert!(text.ends_with("┈┈ root-drop-area ┈┈\n"));
    }
}
