use crate::db::{EntityKind, OperationCreate, OperationPatch};
use crate::error::CatalogError;
use crate::server::routes::ListQuery;
use crate::server::router::AtlasState;

use atlas_schema::OperationView;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route("/operations", get(list_operations).post(create_operation))
        .route(
            "/operations/{id}",
            get(get_operation).put(update_operation).delete(delete_operation),
        )
}

/// GET /operations
///
/// Optional `?endpointId=` narrows to one endpoint.
pub async fn list_operations(
    State(state): State<AtlasState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OperationView>>, CatalogError> {
    Ok(Json(state.db.list_operations(query.filter()).await?))
}

/// POST /operations
pub async fn create_operation(
    State(state): State<AtlasState>,
    payload: Result<Json<OperationCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<OperationView>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_operation(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /operations/{id}
pub async fn get_operation(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<OperationView>, CatalogError> {
    Ok(Json(state.db.get_operation(&id).await?))
}

/// PUT /operations/{id}
pub async fn update_operation(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<OperationPatch>, JsonRejection>,
) -> Result<Json<OperationView>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_operation(&id, patch).await?))
}

/// DELETE /operations/{id}
pub async fn delete_operation(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Operation, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
