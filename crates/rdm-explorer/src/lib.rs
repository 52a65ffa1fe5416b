//! # rdm-explorer
//!
//! Headless folder explorer for the RDM console. The explorer is a view
//! over the server's flat folder list plus transient UI state (expansion,
//! selection, drag, inline edit). It never mutates folders: every change
//! is emitted to a [`FolderTreeHost`], which talks to the backend and later
//! hands back a fresh list.
//!
//! The derived tree is rebuilt wholesale on every new list. Expansion is
//! keyed by folder id, so it survives rebuilds.

pub mod builder;
pub mod controller;
pub mod drag;
pub mod expansion;
pub mod host;
pub mod index;
pub mod rename;
pub mod render;
pub mod reparent;

pub use builder::build_tree;
pub use controller::FolderExplorer;
pub use drag::{DragState, DropEvent, DropTarget, DROPZONE_PREFIX, ROOT_DROP_AREA};
pub use expansion::ExpansionSet;
pub use host::{FolderTreeHost, IntentLog, Notice, NoticeLevel};
pub use index::TreeIndex;
pub use rename::{RenameEditor, RenameOutcome, RenameState};
pub use render::{DropHighlight, RenderOptions, VisibleRow, render_text, visible_rows};
pub use reparent::{DropResolution, IgnoreReason, resolve_drop};
