//! Directory trees and file content at a revision.
//!
//! `svnlook tree --full-paths` prints one path per line, directories with a
//! trailing `/`. `build_tree` turns that listing into a rooted `TreeNode`
//! in two passes (index every entry, then link by parent path), so the
//! result does not depend on parents being printed before their children.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{RepositoryHandle, TreeNode};
use crate::svn::service::SvnService;

struct ListingEntry {
    name: String,
    path: String,
    parent: String,
    is_directory: bool,
    children: Vec<usize>,
}

/// Canonical slash-rooted form: `/`, `/trunk`, `/trunk/src`.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

fn parent_of(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or("/")
}

/// Build the tree rooted at `root_path` from a recursive listing.
pub fn build_tree(root_path: &str, listing: &str) -> TreeNode {
    let root_path = normalize_path(root_path);

    // Pass 1: parse and index every entry by canonical path.
    let mut entries: Vec<ListingEntry> = Vec::new();
    let mut by_path: HashMap<String, usize> = HashMap::new();

    for line in listing.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let is_directory = line.ends_with('/');
        let path = normalize_path(line);

        if is_directory && path == root_path {
            // The tool echoes the starting directory when browsing a subpath.
            continue;
        }
        if by_path.contains_key(&path) {
            tracing::warn!("Duplicate path in listing: {}", path);
            continue;
        }

        by_path.insert(path.clone(), entries.len());
        entries.push(ListingEntry {
            name: last_segment(&path).to_string(),
            parent: parent_of(&path),
            path,
            is_directory,
            children: Vec::new(),
        });
    }

    // Pass 2: link each entry to its parent, in emission order.
    let mut root_children = Vec::new();
    for idx in 0..entries.len() {
        let parent = &entries[idx].parent;
        let parent_idx = if *parent == root_path {
            None
        } else {
            match by_path.get(parent) {
                Some(&p) if entries[p].is_directory => Some(p),
                _ => {
                    tracing::warn!(
                        "Parent {} of {} missing from listing, attaching to root",
                        parent,
                        entries[idx].path
                    );
                    None
                }
            }
        };

        match parent_idx {
            Some(p) => entries[p].children.push(idx),
            None => root_children.push(idx),
        }
    }

    let children = root_children
        .iter()
        .map(|&idx| assemble(&entries, idx))
        .collect();

    TreeNode::directory(last_segment(&root_path), root_path.clone(), children)
}

fn assemble(entries: &[ListingEntry], idx: usize) -> TreeNode {
    let entry = &entries[idx];
    if entry.is_directory {
        let children = entry
            .children
            .iter()
            .map(|&child| assemble(entries, child))
            .collect();
        TreeNode::directory(entry.name.clone(), entry.path.clone(), children)
    } else {
        TreeNode::file(entry.name.clone(), entry.path.clone())
    }
}

impl SvnService {
    pub async fn browse(
        &self,
        handle: &RepositoryHandle,
        path: &str,
        revision: Option<u64>,
    ) -> Result<TreeNode> {
        let path = normalize_path(path);

        let mut args = vec![
            "tree".to_string(),
            handle.store_path.to_string_lossy().to_string(),
            "--full-paths".to_string(),
        ];
        if let Some(rev) = revision {
            args.push("-r".to_string());
            args.push(rev.to_string());
        }
        if path != "/" {
            args.push(path.clone());
        }

        let listing = self.look(args).await?;
        let tree = build_tree(&path, &listing);
        tracing::debug!(repo = %handle.name, path = %path, entries = tree.children().len(), "Built tree");
        Ok(tree)
    }

    /// Raw file bytes at `path`, passed through unmodified.
    pub async fn file_content(
        &self,
        handle: &RepositoryHandle,
        path: &str,
        revision: Option<u64>,
    ) -> Result<Vec<u8>> {
        let mut args = vec![
            "cat".to_string(),
            handle.store_path.to_string_lossy().to_string(),
            normalize_path(path),
        ];
        if let Some(rev) = revision {
            args.push("-r".to_string());
            args.push(rev.to_string());
        }

        self.look_raw(args).await
    }
}
