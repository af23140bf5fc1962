//! Repository stores under the storage root.
//!
//! A directory counts as a store when it contains the `format` marker file
//! that `svnadmin create` writes. Listing, lookup, creation and removal all
//! use that same probe.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{RepositoryHandle, RepositoryInfo};
use crate::svn::service::SvnService;

const STORE_MARKER: &str = "format";

pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidName(name.to_string()))
    }
}

async fn is_store(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::try_exists(path.join(STORE_MARKER))
            .await
            .unwrap_or(false),
        _ => false,
    }
}

impl SvnService {
    /// All stores under the storage root, sorted by name.
    pub async fn list_repositories(&self) -> Result<Vec<RepositoryHandle>> {
        let root = &self.config.repos_root;
        let mut read_dir = tokio::fs::read_dir(root).await.map_err(|e| {
            tracing::error!("Failed to read storage root {}: {}", root.display(), e);
            AppError::Io(e)
        })?;

        let mut handles = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let store_path = entry.path();
            if !is_store(&store_path).await {
                continue;
            }

            handles.push(RepositoryHandle {
                name: entry.file_name().to_string_lossy().to_string(),
                store_path,
            });
        }

        handles.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(handles)
    }

    /// Resolve a name to a handle, failing with `RepoNotFound` unless the
    /// store probe succeeds.
    pub async fn resolve(&self, name: &str) -> Result<RepositoryHandle> {
        validate_name(name)?;

        let store_path = self.store_path(name);
        if !is_store(&store_path).await {
            return Err(AppError::RepoNotFound(name.to_string()));
        }

        Ok(RepositoryHandle {
            name: name.to_string(),
            store_path,
        })
    }

    pub async fn create_repository(&self, name: &str) -> Result<RepositoryHandle> {
        validate_name(name)?;

        let store_path = self.store_path(name);
        if is_store(&store_path).await {
            return Err(AppError::AlreadyExists(name.to_string()));
        }

        self.admin(vec![
            "create".to_string(),
            store_path.to_string_lossy().to_string(),
        ])
        .await?;

        tracing::info!("Created repository {} at {}", name, store_path.display());

        Ok(RepositoryHandle {
            name: name.to_string(),
            store_path,
        })
    }

    /// Remove a store and everything inside it.
    pub async fn delete_repository(&self, name: &str) -> Result<()> {
        let handle = self.resolve(name).await?;
        tokio::fs::remove_dir_all(&handle.store_path).await?;
        tracing::info!("Deleted repository {}", name);
        Ok(())
    }

    pub async fn repository_info(&self, name: &str) -> Result<RepositoryInfo> {
        let handle = self.resolve(name).await?;
        let store = handle.store_path.to_string_lossy().to_string();

        let uuid = self.look(vec!["uuid".to_string(), store.clone()]).await?;
        let revision = self.youngest(&handle).await?;

        Ok(RepositoryInfo {
            name: handle.name,
            path: handle.store_path,
            uuid: uuid.trim().to_string(),
            revision,
        })
    }

    /// Latest revision number of a store.
    pub async fn youngest(&self, handle: &RepositoryHandle) -> Result<u64> {
        let output = self
            .look(vec![
                "youngest".to_string(),
                handle.store_path.to_string_lossy().to_string(),
            ])
            .await?;

        output.trim().parse::<u64>().map_err(|_| {
            AppError::MalformedOutput(format!(
                "youngest revision of {}: {:?}",
                handle.name,
                output.trim()
            ))
        })
    }
}
