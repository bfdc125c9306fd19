use crate::db::{EndpointCreate, EndpointPatch, EntityKind};
use crate::error::CatalogError;
use crate::server::routes::ListQuery;
use crate::server::router::AtlasState;

use atlas_schema::EndpointView;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route("/endpoints", get(list_endpoints).post(create_endpoint))
        .route(
            "/endpoints/{id}",
            get(get_endpoint).put(update_endpoint).delete(delete_endpoint),
        )
}

/// GET /endpoints
///
/// Optional `?apiId=` narrows to one API.
pub async fn list_endpoints(
    State(state): State<AtlasState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EndpointView>>, CatalogError> {
    Ok(Json(state.db.list_endpoints(query.filter()).await?))
}

/// POST /endpoints
pub async fn create_endpoint(
    State(state): State<AtlasState>,
    payload: Result<Json<EndpointCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<EndpointView>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_endpoint(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_endpoint(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<EndpointView>, CatalogError> {
    Ok(Json(state.db.get_endpoint(&id).await?))
}

/// PUT /endpoints/{id}
pub async fn update_endpoint(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<EndpointPatch>, JsonRejection>,
) -> Result<Json<EndpointView>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_endpoint(&id, patch).await?))
}

pub async fn delete_endpoint(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Endpoint, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
