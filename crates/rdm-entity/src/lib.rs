//! # rdm-entity
//!
//! Domain entity models for the RDM console. Records mirror the JSON the
//! RDM backend returns (camelCase on the wire); derived structures such as
//! the folder tree are rebuilt from those records, never patched.

pub mod folder;
