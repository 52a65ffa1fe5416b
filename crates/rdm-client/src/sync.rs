//! Sync worker: executes explorer intents against the backend and publishes
//! the refreshed folder list.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use rdm_core::events::FolderIntent;
use rdm_core::result::AppResult;
use rdm_core::types::FolderId;
use rdm_entity::folder::FolderRecord;
use rdm_explorer::{FolderTreeHost, Notice};

use crate::api::FolderApi;

/// Work item for the sync worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    Intent(FolderIntent),
    /// Refetch the folder list.
    Refresh,
}

/// The latest known server state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderSnapshot {
    pub folders: Vec<FolderRecord>,
    pub selected: Option<FolderId>,
    /// Incremented on every publish.
    pub revision: u64,
}

/// [`FolderTreeHost`] that forwards every intent to a [`FolderSync`] worker.
///
/// Sending never blocks; the explorer is updated later from the snapshot
/// channel.
#[derive(Debug, Clone)]
pub struct RemoteFolderHost {
    commands: mpsc::UnboundedSender<SyncCommand>,
    notices: mpsc::UnboundedSender<Notice>,
}

impl RemoteFolderHost {
    fn send(&self, command: SyncCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Sync worker has stopped, dropping folder command");
        }
    }

    /// Ask the worker to refetch the folder list.
    pub fn refresh(&self) {
        self.send(SyncCommand::Refresh);
    }
}

impl FolderTreeHost for RemoteFolderHost {
    fn on_create_folder(&mut self, parent_id: Option<&FolderId>, name: &str) {
        self.send(SyncCommand::Intent(FolderIntent::Create {
            parent_id: parent_id.cloned(),
            name: name.to_string(),
        }));
    }

    fn on_delete_folder(&mut self, id: &FolderId) {
        self.send(SyncCommand::Intent(FolderIntent::Delete { id: id.clone() }));
    }

    fn on_rename_folder(&mut self, id: &FolderId, new_name: &str) {
        self.send(SyncCommand::Intent(FolderIntent::Rename {
            id: id.clone(),
            new_name: new_name.to_string(),
        }));
    }

    fn on_move_folder(&mut self, folder_id: &FolderId, new_parent_id: Option<&FolderId>) {
        self.send(SyncCommand::Intent(FolderIntent::Move {
            folder_id: folder_id.clone(),
            new_parent_id: new_parent_id.cloned(),
        }));
    }

    fn on_select(&mut self, id: &FolderId) {
        self.send(SyncCommand::Intent(FolderIntent::Select { id: id.clone() }));
    }

    fn notify(&mut self, notice: Notice) {
        let _ = self.notices.send(notice);
    }
}

/// Receiving side of a running sync worker.
#[derive(Debug)]
pub struct SyncHandle {
    pub snapshots: watch::Receiver<FolderSnapshot>,
    pub notices: mpsc::UnboundedReceiver<Notice>,
    pub task: JoinHandle<()>,
}

/// Background worker owning the authoritative folder list.
///
/// Intents are processed one at a time in arrival order. A failed request
/// is reported as an error notice; nothing is retried or rolled back.
pub struct FolderSync {
    api: Arc<dyn FolderApi>,
    snapshot: FolderSnapshot,
    snapshots: watch::Sender<FolderSnapshot>,
    notices: mpsc::UnboundedSender<Notice>,
}

impl FolderSync {
    /// Spawn the worker on the current runtime.
    ///
    /// The worker loads the folder list once, then runs until `shutdown`
    /// turns `true` or every [`RemoteFolderHost`] clone is dropped.
    pub fn spawn(
        api: Arc<dyn FolderApi>,
        shutdown: watch::Receiver<bool>,
    ) -> (RemoteFolderHost, SyncHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(FolderSnapshot::default());

        let worker = Self {
            api,
            snapshot: FolderSnapshot::default(),
            snapshots: snapshot_tx,
            notices: notice_tx.clone(),
        };
        let task = tokio::spawn(worker.run(command_rx, shutdown));

        let host = RemoteFolderHost {
            commands: command_tx,
            notices: notice_tx,
        };
        let handle = SyncHandle {
            snapshots: snapshot_rx,
            notices: notice_rx,
            task,
        };
        (host, handle)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SyncCommand>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        tracing::info!("Folder sync worker started");

        if *shutdown.borrow() {
            return;
        }
        self.reload().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Folder sync worker received shutdown signal");
                        break;
                    }
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => {
                        tracing::info!("All folder hosts dropped, stopping sync worker");
                        break;
                    }
                }
            }
        }

        tracing::info!("Folder sync worker shut down complete");
    }

    async fn handle(&mut self, command: SyncCommand) {
        let intent = match command {
            SyncCommand::Refresh => {
                self.reload().await;
                return;
            }
            SyncCommand::Intent(intent) => intent,
        };

        if let FolderIntent::Select { id } = intent {
            tracing::debug!(folder_id = %id, "Folder selected");
            self.snapshot.selected = Some(id);
            self.publish();
            return;
        }

        let action = intent.action();
        match self.apply(&intent).await {
            Ok(()) => self.reload().await,
            Err(e) => {
                tracing::error!(action, error = %e, "Folder request failed");
                let _ = self
                    .notices
                    .send(Notice::error(format!("Failed to {action} folder: {}", e.message)));
            }
        }
    }

    async fn apply(&self, intent: &FolderIntent) -> AppResult<()> {
        match intent {
            FolderIntent::Create { parent_id, name } => {
                self.api.create_folder(parent_id.as_ref(), name).await?;
            }
            FolderIntent::Rename { id, new_name } => {
                self.api.rename_folder(id, new_name).await?;
            }
            FolderIntent::Move {
                folder_id,
                new_parent_id,
            } => {
                self.api
                    .move_folder(folder_id, new_parent_id.as_ref())
                    .await?;
            }
            FolderIntent::Delete { id } => {
                self.api.delete_folder(id).await?;
            }
            FolderIntent::Select { .. } => {}
        }
        Ok(())
    }

    async fn reload(&mut self) {
        match self.api.list_folders().await {
            Ok(folders) => {
                let selected_gone = self
                    .snapshot
                    .selected
                    .as_ref()
                    .is_some_and(|id| !folders.iter().any(|f| f.id == *id));
                if selected_gone {
                    self.snapshot.selected = None;
                }
                self.snapshot.folders = folders;
                self.publish();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load folders");
                let _ = self
                    .notices
                    .send(Notice::error(format!("Failed to load folders: {}", e.message)));
            }
        }
    }

    fn publish(&mut self) {
        self.snapshot.revision += 1;
        tracing::debug!(
            revision = self.snapshot.revision,
            folders = self.snapshot.folders.len(),
            "Publishing folder snapshot"
        );
        self.snapshots.send_replace(self.snapshot.clone());
    }
}
