//! Core type definitions used across the RDM workspace.

pub mod id;

pub use id::*;
