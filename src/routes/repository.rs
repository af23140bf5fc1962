//! Repository management endpoints.
//!
//! - GET /api/repositories
//!   Lists stores found under the storage root.
//!
//! - POST /api/repositories { name: string }
//!   Creates a new empty store. 409 if one already exists.
//!
//! - GET /api/repositories/{name}
//!   Store detail: path, UUID and youngest revision.
//!
//! - DELETE /api/repositories/{name}
//!   Removes the store and all its content.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::models::{CreateRepositoryRequest, RepositoryHandle, RepositoryInfo};
use crate::svn::SharedSvn;

pub fn routes(svn: SharedSvn) -> Router {
    Router::new()
        .route(
            "/api/repositories",
            get(list_repositories).post(create_repository),
        )
        .route(
            "/api/repositories/{name}",
            get(get_repository_info).delete(delete_repository),
        )
        .with_state(svn)
}

async fn list_repositories(State(svn): State<SharedSvn>) -> Result<Json<Vec<RepositoryHandle>>> {
    let repositories = svn.list_repositories().await?;
    Ok(Json(repositories))
}

async fn create_repository(
    State(svn): State<SharedSvn>,
    Json(request): Json<CreateRepositoryRequest>,
) -> Result<(StatusCode, Json<RepositoryHandle>)> {
    let handle = svn.create_repository(&request.name).await?;
    Ok((StatusCode::CREATED, Json(handle)))
}

async fn get_repository_info(
    State(svn): State<SharedSvn>,
    Path(name): Path<String>,
) -> Result<Json<RepositoryInfo>> {
    let info = svn.repository_info(&name).await?;
    Ok(Json(info))
}

async fn delete_repository(
    State(svn): State<SharedSvn>,
    Path(name): Path<String>,
) -> Result<StatusCode> {
    svn.delete_repository(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}
