//! Host seam: where explorer intents and notices go.

use tracing::warn;

use rdm_core::events::FolderIntent;
use rdm_core::types::FolderId;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A non-blocking, toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Receiver of explorer intents.
///
/// The explorer calls these synchronously and never waits for the result.
/// The host is expected to perform the request and, once the server has
/// answered, feed the new flat list back through
/// [`FolderExplorer::set_folders`](crate::FolderExplorer::set_folders).
pub trait FolderTreeHost {
    fn on_create_folder(&mut self, parent_id: Option<&FolderId>, name: &str);

    fn on_delete_folder(&mut self, id: &FolderId);

    fn on_rename_folder(&mut self, id: &FolderId, new_name: &str);

    fn on_move_folder(&mut self, folder_id: &FolderId, new_parent_id: Option<&FolderId>);

    fn on_select(&mut self, id: &FolderId);

    /// Show a notice to the user. Logs by default.
    fn notify(&mut self, notice: Notice) {
        warn!(level = ?notice.level, "{}", notice.message);
    }
}

/// A host that records intents and notices instead of acting on them.
///
/// Used by one-shot tools that drive the explorer and then execute the
/// collected intents, and by tests.
#[derive(Debug, Clone, Default)]
pub struct IntentLog {
    pub intents: Vec<FolderIntent>,
    pub notices: Vec<Notice>,
}

impl IntentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every recorded intent, leaving the log empty.
    pub fn drain(&mut self) -> Vec<FolderIntent> {
        std::mem::take(&mut self.intents)
    }
}

impl FolderTreeHost for IntentLog {
    fn on_create_folder(&mut self, parent_id: Option<&FolderId>, name: &str) {
        self.intents.push(FolderIntent::Create {
            parent_id: parent_id.cloned(),
            name: name.to_string(),
        });
    }

    fn on_delete_folder(&mut self, id: &FolderId) {
        self.intents.push(FolderIntent::Delete { id: id.clone() });
    }

    fn on_rename_folder(&mut self, id: &FolderId, new_name: &str) {
        self.intents.push(FolderIntent::Rename {
            id: id.clone(),
            new_name: new_name.to_string(),
        });
    }

    fn on_move_folder(&mut self, folder_id: &FolderId, new_parent_id: Option<&FolderId>) {
        self.intents.push(FolderIntent::Move {
            folder_id: folder_id.clone(),
            new_parent_id: new_parent_id.cloned(),
        });
    }

    fn on_select(&mut self, id: &FolderId) {
        self.intents.push(FolderIntent::Select { id: id.clone() });
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
