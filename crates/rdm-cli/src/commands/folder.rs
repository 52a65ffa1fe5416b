//! Folder management CLI commands.
//!
//! Every command drives a [`FolderExplorer`] the way the interactive view
//! does, then executes the intents it emitted against the backend.

use std::collections::HashMap;

use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use rdm_client::FolderApi;
use rdm_core::config::AppConfig;
use rdm_core::error::AppError;
use rdm_core::events::FolderIntent;
use rdm_core::types::FolderId;
use rdm_entity::folder::FolderRecord;
use rdm_explorer::{
    DROPZONE_PREFIX, DropResolution, FolderExplorer, IgnoreReason, IntentLog, ROOT_DROP_AREA,
    RenameOutcome,
};

use crate::output::{self, OutputFormat};

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show the folder tree
    Tree {
        /// Show folder IDs
        #[arg(long)]
        ids: bool,
        /// Expand only the path to this folder
        #[arg(long)]
        reveal: Option<String>,
    },
    /// List all folders
    List,
    /// Create a new folder
    Create {
        /// Folder name (defaults to explorer.default_folder_name)
        name: Option<String>,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: String,
        /// New name
        name: String,
    },
    /// Move a folder (to the top level unless --into or --beside is given)
    Move {
        /// Folder ID
        id: String,
        /// Nest the folder inside this folder
        #[arg(long, conflicts_with = "beside")]
        into: Option<String>,
        /// Place the folder next to this folder, under the same parent
        #[arg(long)]
        beside: Option<String>,
    },
    /// Delete a folder and all of its subfolders
    Delete {
        /// Folder ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Indented name
    name: String,
    /// Parent ID
    parent: String,
    /// Documents
    files: u64,
    /// Updated at
    updated: String,
    /// Updated by
    #[tabled(rename = "updated by")]
    updated_by: String,
}

/// Execute folder commands
pub async fn execute(
    command: &FolderCommand,
    config: &AppConfig,
    api: &dyn FolderApi,
    format: OutputFormat,
) -> Result<(), AppError> {
    let folders = api.list_folders().await?;
    let mut explorer = FolderExplorer::new(IntentLog::new())
        .with_default_folder_name(config.explorer.default_folder_name.clone());
    explorer.set_folders(&folders);

    match command {
        FolderCommand::Tree { ids, reveal } => {
            match reveal {
                Some(id) => {
                    let id = known(&explorer, id)?;
                    explorer.reveal(id.as_str());
                    explorer.set_selected(Some(id));
                }
                None => expand_all(&mut explorer),
            }

            match format {
                OutputFormat::Table => {
                    print!("{}", explorer.render(config.explorer.indent_width, *ids));
                }
                OutputFormat::Json => output::print_json(&explorer.visible_rows()),
            }
            return Ok(());
        }
        FolderCommand::List => {
            let by_id: HashMap<&str, &FolderRecord> =
                folders.iter().map(|f| (f.id.as_str(), f)).collect();

            let rows: Vec<FolderRow> = explorer
                .tree()
                .walk()
                .into_iter()
                .map(|entry| {
                    let record = by_id.get(entry.node.id.as_str());
                    FolderRow {
                        id: entry.node.id.to_string(),
                        name: format!("{}{}", "  ".repeat(entry.depth), entry.node.name),
                        parent: entry.parent.map(|p| p.to_string()).unwrap_or_default(),
                        files: entry.node.file_count,
                        updated: record
                            .and_then(|r| r.updated_at)
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default(),
                        updated_by: record
                            .map(|r| r.last_updated_by.clone())
                            .unwrap_or_default(),
                    }
                })
                .collect();

            output::print_list(&rows, format);
            return Ok(());
        }
        FolderCommand::Create { name, parent } => {
            if let Some(name) = name {
                if name.trim().is_empty() {
                    return Err(AppError::validation("Folder name cannot be empty"));
                }
                explorer = FolderExplorer::new(IntentLog::new()).with_default_folder_name(name.trim());
                explorer.set_folders(&folders);
            }
            match parent {
                Some(parent) => {
                    let parent = known(&explorer, parent)?;
                    explorer.create_subfolder(&parent);
                }
                None => explorer.create_root_folder(),
            }
        }
        FolderCommand::Rename { id, name } => {
            let id = known(&explorer, id)?;
            explorer.start_rename(&id);
            explorer.edit_rename(name);
            match explorer.commit_rename() {
                RenameOutcome::Blank => {
                    return Err(AppError::validation("Folder name cannot be empty"));
                }
                RenameOutcome::Unchanged => {
                    output::print_warning("Name unchanged, nothing to do");
                    return Ok(());
                }
                RenameOutcome::Renamed { .. } | RenameOutcome::NotEditing => {}
            }
        }
        FolderCommand::Move { id, into, beside } => {
            let id = known(&explorer, id)?;
            let over = match (into, beside) {
                (Some(target), _) => target.clone(),
                (None, Some(sibling)) => format!("{DROPZONE_PREFIX}{sibling}"),
                (None, None) => ROOT_DROP_AREA.to_string(),
            };

            explorer.drag_start(&id);
            explorer.drag_over(Some(over.as_str()));
            match explorer.drop_on(Some(over.as_str())) {
                DropResolution::Move { .. } => {}
                DropResolution::IntoDescendant { .. } => {
                    let message = explorer
                        .host_mut()
                        .notices
                        .pop()
                        .map(|n| n.message)
                        .unwrap_or_else(|| "Cannot move a folder into its own subfolder".into());
                    return Err(AppError::validation(message));
                }
                DropResolution::Ignored(reason) => return ignored(reason),
            }
        }
        FolderCommand::Delete { id, yes } => {
            let id = known(&explorer, id)?;
            if !yes {
                let name = explorer.index().name_of(id.as_str()).unwrap_or_default();
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete folder \"{}\" and all of its subfolders?",
                        name
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            explorer.delete_folder(&id);
        }
    }

    let intents = explorer.into_host().drain();
    for intent in intents {
        run_intent(api, intent, format).await?;
    }
    Ok(())
}

/// Resolve a user-supplied ID against the current tree.
fn known(explorer: &FolderExplorer<IntentLog>, id: &str) -> Result<FolderId, AppError> {
    if explorer.index().contains(id) {
        Ok(FolderId::from(id))
    } else {
        Err(AppError::not_found(format!("Folder {} not found", id)))
    }
}

fn expand_all(explorer: &mut FolderExplorer<IntentLog>) {
    let leaves: Vec<FolderId> = explorer
        .tree()
        .walk()
        .into_iter()
        .filter(|entry| !entry.node.has_children())
        .map(|entry| entry.node.id.clone())
        .collect();
    for leaf in leaves {
        explorer.reveal(leaf.as_str());
    }
}

fn ignored(reason: IgnoreReason) -> Result<(), AppError> {
    match reason {
        IgnoreReason::SelfDrop => Err(AppError::validation("Cannot move a folder into itself")),
        IgnoreReason::UnknownTarget => Err(AppError::not_found("Target folder not found")),
        IgnoreReason::UnknownDragged | IgnoreReason::NoTarget => {
            Err(AppError::validation("Nothing to move"))
        }
    }
}

async fn run_intent(
    api: &dyn FolderApi,
    intent: FolderIntent,
    format: OutputFormat,
) -> Result<(), AppError> {
    tracing::debug!(action = intent.action(), "Executing folder intent");

    match intent {
        FolderIntent::Create { parent_id, name } => {
            let folder = api.create_folder(parent_id.as_ref(), &name).await?;
            match format {
                OutputFormat::Json => output::print_json(&folder),
                OutputFormat::Table => output::print_success(&format!(
                    "Folder '{}' created (id: {})",
                    folder.name, folder.id
                )),
            }
        }
        FolderIntent::Rename { id, new_name } => {
            let renamed = api.rename_folder(&id, &new_name).await?;
            match format {
                OutputFormat::Json => output::print_json(&renamed),
                OutputFormat::Table => {
                    output::print_success(&format!("Folder {} renamed to '{}'", id, renamed.name))
                }
            }
        }
        FolderIntent::Move {
            folder_id,
            new_parent_id,
        } => {
            api.move_folder(&folder_id, new_parent_id.as_ref()).await?;
            let target = new_parent_id
                .map(|p| format!("folder {}", p))
                .unwrap_or_else(|| "the top level".to_string());
            output::print_success(&format!("Folder {} moved to {}", folder_id, target));
        }
        FolderIntent::Delete { id } => {
            api.delete_folder(&id).await?;
            output::print_success(&format!("Folder {} deleted", id));
        }
        FolderIntent::Select { .. } => {}
    }
    Ok(())
}
