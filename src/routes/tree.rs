use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::TreeNode;
use crate::svn::SharedSvn;

pub fn routes(svn: SharedSvn) -> Router {
    Router::new()
        .route("/api/repositories/{name}/browse", get(browse_root))
        .route("/api/repositories/{name}/browse/{*path}", get(browse_path))
        .route("/api/repositories/{name}/content/{*path}", get(get_file_content))
        .with_state(svn)
}

#[derive(Debug, Deserialize)]
struct RevisionQuery {
    revision: Option<u64>,
}

async fn browse_root(
    State(svn): State<SharedSvn>,
    Path(name): Path<String>,
    Query(query): Query<RevisionQuery>,
) -> Result<Json<TreeNode>> {
    let handle = svn.resolve(&name).await?;
    let tree = svn.browse(&handle, "/", query.revision).await?;
    Ok(Json(tree))
}

async fn browse_path(
    State(svn): State<SharedSvn>,
    Path((name, path)): Path<(String, String)>,
    Query(query): Query<RevisionQuery>,
) -> Result<Json<TreeNode>> {
    let handle = svn.resolve(&name).await?;
    let tree = svn.browse(&handle, &path, query.revision).await?;
    Ok(Json(tree))
}

async fn get_file_content(
    State(svn): State<SharedSvn>,
    Path((name, path)): Path<(String, String)>,
    Query(query): Query<RevisionQuery>,
) -> Result<impl IntoResponse> {
    let handle = svn.resolve(&name).await?;
    let content = svn.file_content(&handle, &path, query.revision).await?;
    let mime = mime_guess::from_path(&path).first_or_text_plain();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], content))
}
