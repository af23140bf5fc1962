//! Runtime configuration for the repository introspection layer.
//!
//! Built once in `main` from CLI flags / environment and handed to
//! `SvnService` and `ProcessRunner` at construction.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SvnConfig {
    /// Directory holding one repository store per entry
    pub repos_root: PathBuf,
    /// Read-only query tool
    pub svnlook: String,
    /// Store administration tool (used for creation only)
    pub svnadmin: String,
    /// Upper bound on a single external command; `None` waits forever
    pub command_timeout: Option<Duration>,
    /// Revisions fetched concurrently while assembling commit history
    pub log_concurrency: usize,
}

impl SvnConfig {
    pub fn new(repos_root: impl Into<PathBuf>) -> Self {
        Self {
            repos_root: repos_root.into(),
            ..Self::default()
        }
    }
}

impl Default for SvnConfig {
    fn default() -> Self {
        Self {
            repos_root: PathBuf::from("/svn/repos"),
            svnlook: "svnlook".to_string(),
            svnadmin: "svnadmin".to_string(),
            command_timeout: Some(Duration::from_secs(30)),
            log_concurrency: 4,
        }
    }
}
