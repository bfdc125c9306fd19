use crate::db::{EntityKind, EnvironmentCreate, EnvironmentPatch};
use crate::error::CatalogError;
use crate::server::routes::ListQuery;
use crate::server::router::AtlasState;

use atlas_schema::Environment;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route(
            "/environments",
            get(list_environments).post(create_environment),
        )
        .route(
            "/environments/{id}",
            get(get_environment).put(update_environment).delete(delete_environment),
        )
}

/// GET /environments
///
/// Optional `?providerId=` narrows to one provider.
pub async fn list_environments(
    State(state): State<AtlasState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Environment>>, CatalogError> {
    Ok(Json(state.db.list_environments(query.filter()).await?))
}

/// POST /environments
pub async fn create_environment(
    State(state): State<AtlasState>,
    payload: Result<Json<EnvironmentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Environment>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_environment(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /environments/{id}
pub async fn get_environment(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<Environment>, CatalogError> {
    Ok(Json(state.db.get_environment(&id).await?))
}

/// PUT /environments/{id}
pub async fn update_environment(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<EnvironmentPatch>, JsonRejection>,
) -> Result<Json<Environment>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_environment(&id, patch).await?))
}

/// DELETE /environments/{id}
pub async fn delete_environment(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Environment, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
