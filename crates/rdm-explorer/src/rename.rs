//! Inline rename editing.

use rdm_core::types::FolderId;

/// Inline rename state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenameState {
    #[default]
    Idle,
    Editing {
        /// Folder being renamed.
        id: FolderId,
        /// Name when editing started.
        original: String,
        /// Current text in the field.
        draft: String,
    },
}

/// Result of committing an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Nothing was being edited.
    NotEditing,
    /// The trimmed draft was empty; the field stays in editing state.
    Blank,
    /// The trimmed draft equals the original name; editing ended silently.
    Unchanged,
    /// Editing ended with a new, trimmed name.
    Renamed { id: FolderId, new_name: String },
}

/// `Idle -> Editing -> Idle` state machine behind the rename field.
///
/// There is no cancel path: an edit ends only by committing a valid name
/// or when the folder disappears from the tree.
#[derive(Debug, Clone, Default)]
pub struct RenameEditor {
    state: RenameState,
}

impl RenameEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin editing `id`, seeding the field with its current name.
    pub fn start(&mut self, id: FolderId, current_name: &str) {
        self.state = RenameState::Editing {
            id,
            original: current_name.to_string(),
            draft: current_name.to_string(),
        };
    }

    /// Replace the field text. Ignored when idle.
    pub fn set_draft(&mut self, text: &str) {
        if let RenameState::Editing { draft, .. } = &mut self.state {
            *draft = text.to_string();
        }
    }

    /// Commit the field (blur or Enter).
    pub fn commit(&mut self) -> RenameOutcome {
        let RenameState::Editing {
            id,
            original,
            draft,
        } = &self.state
        else {
            return RenameOutcome::NotEditing;
        };

        let trimmed = draft.trim();
        if trimmed.is_empty() {
            return RenameOutcome::Blank;
        }

        let outcome = if trimmed == original.trim() {
            RenameOutcome::Unchanged
        } else {
            RenameOutcome::Renamed {
                id: id.clone(),
                new_name: trimmed.to_string(),
            }
        };
        self.state = RenameState::Idle;
        outcome
    }

    /// Abandon the edit; used when the folder vanished from the tree.
    pub fn abandon(&mut self) -> Option<FolderId> {
        match std::mem::take(&mut self.state) {
            RenameState::Editing { id, .. } => Some(id),
            RenameState::Idle => None,
        }
    }

    pub fn state(&self) -> &RenameState {
        &self.state
    }

    /// Id of the folder being edited.
    pub fn editing_id(&self) -> Option<&FolderId> {
        match &self.state {
            RenameState::Editing { id, .. } => Some(id),
            RenameState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            RenameState::Editing { draft, .. } => Some(draft.as_str()),
            RenameState::Idle => None,
        }
    }
}
