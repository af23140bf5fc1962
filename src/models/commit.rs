use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One revision of a repository, as shown in the commit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub revision: u64,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub message: String,
    /// Raw changed-path lines (`U   trunk/main.c`), passed through as emitted
    pub changes: Vec<String>,
}
