//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `tree`: TreeNode, NodeKind for directory browsing
//! - `commit`: CommitRecord for the commit log
//! - `repository`: RepositoryHandle, RepositoryInfo, CreateRepositoryRequest

pub mod commit;
pub mod repository;
pub mod tree;

pub use commit::*;
pub use repository::*;
pub use tree::*;
