//! Intents emitted by the folder explorer.
//!
//! The explorer never mutates folders itself. Every user action that would
//! change server state is expressed as a [`FolderIntent`] and handed to the
//! host, which performs the request and supplies the next flat list.

pub mod folder;

pub use folder::FolderIntent;
