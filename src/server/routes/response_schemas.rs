use crate::db::{EntityKind, ResponseSchemaCreate, ResponseSchemaPatch};
use crate::error::CatalogError;
use crate::server::routes::ListQuery;
use crate::server::router::AtlasState;

use atlas_schema::ResponseSchema;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route(
            "/response-schemas",
            get(list_response_schemas).post(create_response_schema),
        )
        .route(
            "/response-schemas/{id}",
            get(get_response_schema).put(update_response_schema).delete(delete_response_schema),
        )
}

/// GET /response-schemas
///
/// Optional `?operationId=` narrows to one operation.
pub async fn list_response_schemas(
    State(state): State<AtlasState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ResponseSchema>>, CatalogError> {
    Ok(Json(state.db.list_response_schemas(query.filter()).await?))
}

/// POST /response-schemas
pub async fn create_response_schema(
    State(state): State<AtlasState>,
    payload: Result<Json<ResponseSchemaCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ResponseSchema>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_response_schema(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /response-schemas/{id}
pub async fn get_response_schema(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<ResponseSchema>, CatalogError> {
    Ok(Json(state.db.get_response_schema(&id).await?))
}

/// PUT /response-schemas/{id}
pub async fn update_response_schema(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<ResponseSchemaPatch>, JsonRejection>,
) -> Result<Json<ResponseSchema>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_response_schema(&id, patch).await?))
}

/// DELETE /response-schemas/{id}
pub async fn delete_response_schema(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::ResponseSchema, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
