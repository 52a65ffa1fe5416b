//! Folder endpoints of the RDM backend.

use async_trait::async_trait;
use tracing::info;

use rdm_core::result::AppResult;
use rdm_core::types::{FolderId, OrganizationId};
use rdm_entity::folder::{CreateFolder, FolderRecord, MoveFolder, RenameFolder, RenamedFolder};

use crate::http::RestClient;

/// Folder operations exposed by the backend.
#[async_trait]
pub trait FolderApi: Send + Sync {
    /// Every folder of the organization as a flat list.
    async fn list_folders(&self) -> AppResult<Vec<FolderRecord>>;

    /// Create a folder; the stored name may be de-duplicated.
    async fn create_folder(&self, parent_id: Option<&FolderId>, name: &str) -> AppResult<FolderRecord>;

    /// Rename a folder; the stored name may be de-duplicated.
    async fn rename_folder(&self, id: &FolderId, name: &str) -> AppResult<RenamedFolder>;

    /// Reparent a folder, `None` moving it to the root level.
    async fn move_folder(&self, id: &FolderId, new_parent_id: Option<&FolderId>) -> AppResult<()>;

    /// Delete a folder and everything below it.
    async fn delete_folder(&self, id: &FolderId) -> AppResult<()>;
}

/// [`FolderApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFolderApi {
    rest: RestClient,
    organization_id: OrganizationId,
}

impl HttpFolderApi {
    pub fn new(rest: RestClient, organization_id: OrganizationId) -> Self {
        Self {
            rest,
            organization_id,
        }
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }
}

#[async_trait]
impl FolderApi for HttpFolderApi {
    async fn list_folders(&self) -> AppResult<Vec<FolderRecord>> {
        let folders: Vec<FolderRecord> = self
            .rest
            .get_json_query("/folders", &[("organizationId", self.organization_id.as_str())])
            .await?;
        info!(count = folders.len(), "Fetched folders");
        Ok(folders)
    }

    async fn create_folder(&self, parent_id: Option<&FolderId>, name: &str) -> AppResult<FolderRecord> {
        let body = CreateFolder {
            name: name.to_string(),
            parent_id: parent_id.cloned(),
            organization_id: self.organization_id.clone(),
        };
        let created: FolderRecord = self.rest.post_json("/folders", &body).await?;
        info!(folder_id = %created.id, name = %created.name, "Created folder");
        Ok(created)
    }

    async fn rename_folder(&self, id: &FolderId, name: &str) -> AppResult<RenamedFolder> {
        let body = RenameFolder {
            name: name.to_string(),
        };
        let renamed: RenamedFolder = self.rest.put_json(&format!("/folders/{id}"), &body).await?;
        info!(folder_id = %id, name = %renamed.name, "Renamed folder");
        Ok(renamed)
    }

    async fn move_folder(&self, id: &FolderId, new_parent_id: Option<&FolderId>) -> AppResult<()> {
        let body = MoveFolder {
            new_parent_id: new_parent_id.cloned(),
        };
        self.rest
            .post_empty(&format!("/folders/{id}/move"), &body)
            .await?;
        info!(folder_id = %id, new_parent = ?new_parent_id, "Moved folder");
        Ok(())
    }

    async fn delete_folder(&self, id: &FolderId) -> AppResult<()> {
        self.rest.delete(&format!("/folders/{id}")).await?;
        info!(folder_id = %id, "Deleted folder");
        Ok(())
    }
}
