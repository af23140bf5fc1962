//! API route handlers - maps HTTP endpoints to repository operations.
//!
//! Each submodule defines routes for a feature area:
//! - `health`: Liveness probe (GET /api/health)
//! - `repository`: List, create, inspect and delete stores
//! - `tree`: Directory tree and file content at a revision
//! - `commits`: Commit log, newest first

pub mod commits;
pub mod health;
pub mod repository;
pub mod tree;

use axum::Router;

use crate::svn::SharedSvn;

pub fn create_router(svn: SharedSvn) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(repository::routes(svn.clone()))
        .merge(tree::routes(svn.clone()))
        .merge(commits::routes(svn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SvnConfig;
    use crate::svn::command::testing::ScriptedRunner;
    use crate::svn::SvnService;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn make_store(root: &std::path::Path, name: &str) {
        let path = root.join(name);
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join("format"), "5\n").unwrap();
    }

    fn app(root: &std::path::Path, runner: ScriptedRunner) -> Router {
        let svn = SvnService::with_runner(SvnConfig::new(root), Arc::new(runner));
        create_router(Arc::new(svn))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let root = TempDir::new().unwrap();
        let (status, body) = get(app(root.path(), ScriptedRunner::new()), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn lists_repositories() {
        let root = TempDir::new().unwrap();
        make_store(root.path(), "project");

        let (status, body) = get(app(root.path(), ScriptedRunner::new()), "/api/repositories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "project");
        assert!(body[0]["path"].as_str().unwrap().ends_with("project"));
    }

    #[tokio::test]
    async fn unknown_repository_is_404() {
        let root = TempDir::new().unwrap();
        let (status, body) = get(
            app(root.path(), ScriptedRunner::new()),
            "/api/repositories/ghost/log",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Repository not found: ghost");
    }

    #[tokio::test]
    async fn browse_returns_tree() {
        let root = TempDir::new().unwrap();
        make_store(root.path(), "project");
        let store = root.path().join("project");
        let runner = ScriptedRunner::new().ok(
            &format!("svnlook tree {} --full-paths -r 2 /trunk", store.display()),
            "trunk/\ntrunk/main.c\n",
        );

        let (status, body) = get(
            app(root.path(), runner),
            "/api/repositories/project/browse/trunk?revision=2",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"], "/trunk");
        assert_eq!(body["children"][0]["kind"], "file");
    }

    #[tokio::test]
    async fn zero_limit_is_rejected() {
        let root = TempDir::new().unwrap();
        make_store(root.path(), "project");
        let (status, _) = get(
            app(root.path(), ScriptedRunner::new()),
            "/api/repositories/project/log?limit=0",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
