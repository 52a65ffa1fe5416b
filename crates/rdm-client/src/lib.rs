//! # rdm-client
//!
//! Everything between the folder explorer and the RDM backend:
//!
//! - [`RestClient`]: bearer-token HTTP client with refresh-then-retry on 401.
//! - [`FolderApi`]: the folder endpoints, implemented over HTTP
//!   ([`HttpFolderApi`]) and in memory ([`MemoryFolderStore`]).
//! - [`FolderSync`]: a worker that fulfils explorer intents and republishes
//!   the authoritative flat list.

pub mod api;
pub mod auth;
pub mod http;
pub mod memory;
pub mod naming;
pub mod sync;

pub use api::{FolderApi, HttpFolderApi};
pub use auth::TokenPair;
pub use http::RestClient;
pub use memory::MemoryFolderStore;
pub use sync::{FolderSnapshot, FolderSync, RemoteFolderHost, SyncHandle};
