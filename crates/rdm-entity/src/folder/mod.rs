//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, FolderRecord, MoveFolder, RenameFolder, RenamedFolder};
pub use tree::{FolderNode, FolderTree, TreeEntry};
