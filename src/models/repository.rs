//! Repository-level DTOs.
//!
//! - `RepositoryHandle`: a store found under the storage root (listing)
//! - `RepositoryInfo`: handle plus UUID and youngest revision (detail view)
//! - `CreateRepositoryRequest`: body for creating a new store

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryHandle {
    pub name: String,
    #[serde(rename = "path")]
    pub store_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub path: PathBuf,
    pub uuid: String,
    pub revision: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRepositoryRequest {
    pub name: String,
}
