use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::CommitRecord;
use crate::svn::SharedSvn;

pub fn routes(svn: SharedSvn) -> Router {
    Router::new()
        .route("/api/repositories/{name}/log", get(get_commit_log))
        .with_state(svn)
}

#[derive(Debug, Deserialize)]
struct LogQuery {
    #[serde(default = "default_limit")]
    limit: u64,
}

fn default_limit() -> u64 {
    20
}

async fn get_commit_log(
    State(svn): State<SharedSvn>,
    Path(name): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<CommitRecord>>> {
    if query.limit == 0 {
        return Err(AppError::InvalidRequest("limit must be at least 1".to_string()));
    }

    let handle = svn.resolve(&name).await?;
    let commits = svn.commit_log(&handle, query.limit).await?;
    Ok(Json(commits))
}
