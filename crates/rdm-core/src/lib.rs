//! # rdm-core
//!
//! Core crate for the RDM console. Contains configuration schemas,
//! typed identifiers, folder intents, and the unified error system.
//!
//! This crate has **no** internal dependencies on other RDM crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
