//! Commit history assembled from per-revision `svnlook` queries.
//!
//! The window is fixed up front from the youngest revision and the
//! requested limit. Each revision costs four queries (author, date, log,
//! changed); a revision whose queries fail is skipped without shrinking
//! or extending the window, so the result can be shorter than the limit.

use chrono::{DateTime, FixedOffset};
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{CommitRecord, RepositoryHandle};
use crate::svn::service::SvnService;

/// Inclusive revision bounds for one log request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionWindow {
    pub latest: u64,
    pub oldest: u64,
}

impl RevisionWindow {
    /// `oldest = max(1, latest - limit + 1)`
    pub fn new(latest: u64, limit: u64) -> Self {
        if limit == 0 {
            // empty window
            return Self { latest: 0, oldest: 1 };
        }
        let oldest = latest.saturating_sub(limit - 1).max(1);
        Self { latest, oldest }
    }

    /// Revisions newest first. Empty when the store only has revision 0.
    pub fn revisions(self) -> impl Iterator<Item = u64> {
        (self.oldest..=self.latest).rev()
    }
}

/// Parse `svnlook date` output: `2024-03-01 14:22:05 +0100 (Fri, 01 Mar 2024)`.
pub fn parse_svn_date(raw: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    let stamp = trimmed.split(" (").next().unwrap_or(trimmed);
    DateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S %z")
        .map_err(|e| AppError::MalformedOutput(format!("date {:?}: {}", trimmed, e)))
}

pub fn parse_changes(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim_end().to_string())
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Failures that cost a single revision rather than the whole log.
fn is_skippable(err: &AppError) -> bool {
    matches!(
        err,
        AppError::CommandFailed { .. } | AppError::MalformedOutput(_)
    )
}

impl SvnService {
    /// Up to `limit` commits, newest first.
    pub async fn commit_log(&self, handle: &RepositoryHandle, limit: u64) -> Result<Vec<CommitRecord>> {
        let latest = self.youngest(handle).await?;
        let window = RevisionWindow::new(latest, limit);
        let concurrency = self.config.log_concurrency.max(1);

        tracing::debug!(
            repo = %handle.name,
            latest = window.latest,
            oldest = window.oldest,
            "Fetching commit log"
        );

        // `buffered` yields in input order regardless of completion order.
        let fetched: Vec<(u64, Result<CommitRecord>)> = stream::iter(window.revisions())
            .map(|rev| async move { (rev, self.fetch_commit(handle, rev).await) })
            .buffered(concurrency)
            .collect()
            .await;

        let mut commits = Vec::with_capacity(fetched.len());
        for (rev, result) in fetched {
            match result {
                Ok(commit) => commits.push(commit),
                Err(e) if is_skippable(&e) => {
                    tracing::warn!(repo = %handle.name, revision = rev, "Skipping revision: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(commits)
    }

    async fn fetch_commit(&self, handle: &RepositoryHandle, rev: u64) -> Result<CommitRecord> {
        let store = handle.store_path.to_string_lossy().to_string();
        let query = |subcommand: &str| {
            vec![
                subcommand.to_string(),
                store.clone(),
                "-r".to_string(),
                rev.to_string(),
            ]
        };

        let (author, date, message, changed) = tokio::try_join!(
            self.look(query("author")),
            self.look(query("date")),
            self.look(query("log")),
            self.look(query("changed")),
        )?;

        Ok(CommitRecord {
            revision: rev,
            author: author.trim().to_string(),
            date: parse_svn_date(&date)?,
            message: message.trim().to_string(),
            changes: parse_changes(&changed),
        })
    }
}
