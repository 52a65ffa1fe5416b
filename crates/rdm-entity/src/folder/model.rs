//! Folder records and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rdm_core::types::{FolderId, OrganizationId};

/// A folder as returned by `GET /folders`.
///
/// Only `id`, `name` and `parent_id` drive the tree; the remaining fields
/// are presentation metadata and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root folders).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Owning organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// When the folder was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of documents directly inside the folder.
    #[serde(default)]
    pub file_count: u64,
    /// Email of the last editor, empty when unknown.
    #[serde(default)]
    pub last_updated_by: String,
}

impl FolderRecord {
    /// Create a bare record with only the tree-relevant fields.
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.map(FolderId::from),
            organization_id: None,
            updated_at: None,
            file_count: 0,
            last_updated_by: String::new(),
        }
    }

    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Body of `POST /folders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// Owning organization.
    pub organization_id: OrganizationId,
}

/// Body of `PUT /folders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFolder {
    /// The new name.
    pub name: String,
}

/// Response of `PUT /folders/{id}`; the name may differ from the request
/// when the server de-duplicated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedFolder {
    /// Folder ID.
    pub id: FolderId,
    /// Name actually stored.
    pub name: String,
}

/// Body of `POST /folders/{id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFolder {
    /// New parent folder, `null` for root level.
    pub new_parent_id: Option<FolderId>,
}
