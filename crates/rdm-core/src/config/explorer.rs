//! Folder explorer behaviour.

use serde::{Deserialize, Serialize};

/// Settings for the folder explorer component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Name given to folders created from the explorer.
    #[serde(default = "default_folder_name")]
    pub default_folder_name: String,
    /// Indentation (in spaces) per tree level in text rendering.
    #[serde(default = "default_indent")]
    pub indent_width: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_folder_name: default_folder_name(),
            indent_width: default_indent(),
        }
    }
}

fn default_folder_name() -> String {
    "New Folder".to_string()
}

fn default_indent() -> usize {
    2
}
