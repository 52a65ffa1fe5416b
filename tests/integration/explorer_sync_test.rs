//! End-to-end: explorer gestures flow through the sync worker into the
//! in-memory store and come back as a rebuilt tree.

use std::sync::Arc;

use tokio::sync::watch;

use rdm_client::{
    FolderApi, FolderSnapshot, FolderSync, MemoryFolderStore, RemoteFolderHost, SyncHandle,
};
use rdm_core::types::FolderId;
use rdm_entity::folder::FolderRecord;
use rdm_explorer::{DropResolution, FolderExplorer, NoticeLevel, RenameOutcome};

struct Harness {
    explorer: FolderExplorer<RemoteFolderHost>,
    handle: SyncHandle,
    store: Arc<MemoryFolderStore>,
    revision: u64,
    _shutdown: watch::Sender<bool>,
}

impl Harness {
    async fn start() -> Self {
        let store = Arc::new(MemoryFolderStore::with_folders(vec![
            FolderRecord::new("a", "Policies", None),
            FolderRecord::new("b", "HR", Some("a")),
            FolderRecord::new("c", "Security", Some("a")),
            FolderRecord::new("d", "Contracts", None),
        ]));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (host, handle) = FolderSync::spawn(store.clone(), shutdown_rx);

        let mut harness = Self {
            explorer: FolderExplorer::new(host),
            handle,
            store,
            revision: 0,
            _shutdown: shutdown_tx,
        };
        harness.next_snapshot().await;
        harness
    }

    /// Wait for the next published list and feed it to the explorer.
    async fn next_snapshot(&mut self) -> FolderSnapshot {
        let wanted = self.revision + 1;
        let snapshot = self
            .handle
            .snapshots
            .wait_for(|s| s.revision >= wanted)
            .await
            .expect("sync worker alive")
            .clone();
        self.revision = snapshot.revision;
        self.explorer.set_folders(&snapshot.folders);
        self.explorer.set_selected(snapshot.selected.clone());
        snapshot
    }

    fn parent_of(&self, id: &str) -> Option<String> {
        self.explorer
            .tree()
            .walk()
            .into_iter()
            .find(|entry| entry.node.id.as_str() == id)
            .and_then(|entry| entry.parent.map(|p| p.to_string()))
    }
}

#[tokio::test]
async fn test_initial_tree() {
    let harness = Harness::start().await;
    assert_eq!(harness.explorer.tree().total_folders, 4);
    assert_eq!(harness.explorer.tree().roots.len(), 2);
    assert_eq!(harness.parent_of("b").as_deref(), Some("a"));
}

#[tokio::test]
async fn test_drag_into_folder_moves_on_server() {
    let mut h = Harness::start().await;

    assert!(h.explorer.drag_start(&FolderId::from("d")));
    let resolution = h.explorer.drop_on(Some("b"));
    assert!(matches!(resolution, DropResolution::Move { .. }));

    h.next_snapshot().await;
    assert_eq!(h.parent_of("d").as_deref(), Some("b"));
}

#[tokio::test]
async fn test_dropzone_and_root_area() {
    let mut h = Harness::start().await;

    h.explorer.drag_start(&FolderId::from("d"));
    h.explorer.drop_on(Some("dropzone-c"));
    h.next_snapshot().await;
    assert_eq!(h.parent_of("d").as_deref(), Some("a"));

    h.explorer.drag_start(&FolderId::from("b"));
    h.explorer.drop_on(Some("root-drop-area"));
    h.next_snapshot().await;
    assert_eq!(h.parent_of("b"), None);
}

#[tokio::test]
async fn test_drop_into_descendant_never_reaches_server() {
    let mut h = Harness::start().await;

    h.explorer.drag_start(&FolderId::from("a"));
    let resolution = h.explorer.drop_on(Some("c"));
    assert!(matches!(resolution, DropResolution::IntoDescendant { .. }));

    let notice = h.handle.notices.recv().await.expect("notice");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(h.handle.snapshots.borrow().revision, h.revision);

    let stored = h.store.snapshot().await;
    assert!(stored.iter().all(|f| f.id.as_str() != "a" || f.parent_id.is_none()));
}

#[tokio::test]
async fn test_rename_is_deduplicated_by_server() {
    let mut h = Harness::start().await;

    h.explorer.start_rename(&FolderId::from("c"));
    h.explorer.edit_rename("  hr ");
    let outcome = h.explorer.commit_rename();
    assert_eq!(
        outcome,
        RenameOutcome::Renamed {
            id: FolderId::from("c"),
            new_name: "hr".to_string(),
        }
    );

    h.next_snapshot().await;
    assert_eq!(h.explorer.index().name_of("c"), Some("hr (1)"));
}

#[tokio::test]
async fn test_create_subfolder_and_delete_cascade() {
    let mut h = Harness::start().await;

    assert!(h.explorer.create_subfolder(&FolderId::from("b")));
    assert!(h.explorer.is_expanded("b"));
    h.next_snapshot().await;
    assert_eq!(h.explorer.tree().total_folders, 5);
    let created = h.explorer.tree().find("b").expect("b").children[0].name.clone();
    assert_eq!(created, "New Folder");

    h.explorer.select(&FolderId::from("b"));
    let snapshot = h.next_snapshot().await;
    assert_eq!(snapshot.selected, Some(FolderId::from("b")));

    h.explorer.delete_folder(&FolderId::from("a"));
    let snapshot = h.next_snapshot().await;
    assert!(snapshot.selected.is_none());
    assert_eq!(h.explorer.tree().total_folders, 1);
    assert_eq!(h.explorer.selected(), None);
}

#[tokio::test]
async fn test_rename_edit_dropped_when_folder_deleted() {
    let mut h = Harness::start().await;

    h.explorer.start_rename(&FolderId::from("c"));
    h.store
        .delete_folder(&FolderId::from("c"))
        .await
        .expect("delete");
    h.explorer.host().refresh();
    h.next_snapshot().await;

    assert_eq!(h.explorer.commit_rename(), RenameOutcome::NotEditing);
}
