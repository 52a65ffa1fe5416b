//! In-process folder store with backend semantics.
//!
//! Used for `--offline` runs and as the backend in tests.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use rdm_core::error::AppError;
use rdm_core::result::AppResult;
use rdm_core::types::{FolderId, OrganizationId};
use rdm_entity::folder::{FolderRecord, RenamedFolder};

use crate::api::FolderApi;
use crate::naming::unique_sibling_name;

/// Folders kept in a flat list, the way the server stores them.
#[derive(Debug, Default)]
pub struct MemoryFolderStore {
    organization_id: Option<OrganizationId>,
    folders: RwLock<Vec<FolderRecord>>,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `folders`, kept in the given order.
    pub fn with_folders(folders: Vec<FolderRecord>) -> Self {
        Self {
            organization_id: None,
            folders: RwLock::new(folders),
        }
    }

    /// A small demo hierarchy for offline sessions.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let folder = |id: &str, name: &str, parent: Option<&str>, files: u64| FolderRecord {
            updated_at: Some(now),
            file_count: files,
            last_updated_by: "admin@example.com".to_string(),
            ..FolderRecord::new(id, name, parent)
        };
        Self::with_folders(vec![
            folder("f-policies", "Policies", None, 3),
            folder("f-hr", "HR", Some("f-policies"), 5),
            folder("f-security", "Security", Some("f-policies"), 2),
            folder("f-contracts", "Contracts", None, 0),
            folder("f-vendors", "Vendors", Some("f-contracts"), 7),
            folder("f-archive", "Archive", None, 12),
        ])
    }

    pub fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Snapshot of the stored records.
    pub async fn snapshot(&self) -> Vec<FolderRecord> {
        self.folders.read().await.clone()
    }
}

fn normalized_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    Ok(name.to_string())
}

fn position(folders: &[FolderRecord], id: &FolderId) -> AppResult<usize> {
    folders
        .iter()
        .position(|f| f.id == *id)
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
}

fn sibling_names<'a>(
    folders: &'a [FolderRecord],
    parent_id: Option<&'a FolderId>,
    except: Option<&'a FolderId>,
) -> impl Iterator<Item = &'a str> + 'a {
    folders
        .iter()
        .filter(move |f| f.parent_id.as_ref() == parent_id && Some(&f.id) != except)
        .map(|f| f.name.as_str())
}

/// `id` itself and every folder below it.
fn subtree_ids(folders: &[FolderRecord], id: &FolderId) -> HashSet<FolderId> {
    let mut found: HashSet<FolderId> = HashSet::from([id.clone()]);
    loop {
        let before = found.len();
        for folder in folders {
            if let Some(parent) = &folder.parent_id
                && found.contains(parent)
            {
                found.insert(folder.id.clone());
            }
        }
        if found.len() == before {
            return found;
        }
    }
}

#[async_trait]
impl FolderApi for MemoryFolderStore {
    async fn list_folders(&self) -> AppResult<Vec<FolderRecord>> {
        Ok(self.snapshot().await)
    }

    async fn create_folder(&self, parent_id: Option<&FolderId>, name: &str) -> AppResult<FolderRecord> {
        let name = normalized_name(name)?;
        let mut folders = self.folders.write().await;

        if let Some(parent) = parent_id {
            position(&folders, parent)
                .map_err(|_| AppError::not_found(format!("Parent folder {parent} not found")))?;
        }

        let name = unique_sibling_name(&name, sibling_names(&folders, parent_id, None));
        let record = FolderRecord {
            organization_id: self.organization_id.clone(),
            updated_at: Some(Utc::now()),
            ..FolderRecord::new(FolderId::generate(), name, parent_id.map(FolderId::as_str))
        };
        folders.push(record.clone());

        info!(folder_id = %record.id, name = %record.name, "Created folder");
        Ok(record)
    }

    async fn rename_folder(&self, id: &FolderId, name: &str) -> AppResult<RenamedFolder> {
        let name = normalized_name(name)?;
        let mut folders = self.folders.write().await;
        let idx = position(&folders, id)?;

        let parent = folders[idx].parent_id.clone();
        let name = unique_sibling_name(&name, sibling_names(&folders, parent.as_ref(), Some(id)));

        let folder = &mut folders[idx];
        folder.name = name.clone();
        folder.updated_at = Some(Utc::now());

        info!(folder_id = %id, name = %name, "Renamed folder");
        Ok(RenamedFolder {
            id: id.clone(),
            name,
        })
    }

    async fn move_folder(&self, id: &FolderId, new_parent_id: Option<&FolderId>) -> AppResult<()> {
        let mut folders = self.folders.write().await;
        let idx = position(&folders, id)?;

        if let Some(parent) = new_parent_id {
            if parent == id {
                return Err(AppError::validation("Cannot move a folder into itself"));
            }
            position(&folders, parent)
                .map_err(|_| AppError::not_found(format!("Target folder {parent} not found")))?;
            if subtree_ids(&folders, id).contains(parent) {
                return Err(AppError::validation(
                    "Cannot move a folder into one of its descendants",
                ));
            }
        }

        let folder = &mut folders[idx];
        folder.parent_id = new_parent_id.cloned();
        folder.updated_at = Some(Utc::now());

        info!(folder_id = %id, new_parent = ?new_parent_id, "Moved folder");
        Ok(())
    }

    async fn delete_folder(&self, id: &FolderId) -> AppResult<()> {
        let mut folders = self.folders.write().await;
        position(&folders, id)?;

        let doomed = subtree_ids(&folders, id);
        folders.retain(|f| !doomed.contains(&f.id));

        info!(folder_id = %id, removed = doomed.len(), "Deleted folder");
        Ok(())
    }
}
