use crate::db::{EntityKind, ParameterCreate, ParameterPatch};
use crate::error::CatalogError;
use crate::server::routes::ListQuery;
use crate::server::router::AtlasState;

use atlas_schema::Parameter;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route("/parameters", get(list_parameters).post(create_parameter))
        .route(
            "/parameters/{id}",
            get(get_parameter).put(update_parameter).delete(delete_parameter),
        )
}

/// GET /parameters
///
/// Optional `?operationId=` narrows to one operation.
pub async fn list_parameters(
    State(state): State<AtlasState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Parameter>>, CatalogError> {
    Ok(Json(state.db.list_parameters(query.filter()).await?))
}

/// POST /parameters
pub async fn create_parameter(
    State(state): State<AtlasState>,
    payload: Result<Json<ParameterCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Parameter>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_parameter(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_parameter(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<Parameter>, CatalogError> {
    Ok(Json(state.db.get_parameter(&id).await?))
}

pub async fn update_parameter(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<ParameterPatch>, JsonRejection>,
) -> Result<Json<Parameter>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_parameter(&id, patch).await?))
}

pub async fn delete_parameter(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Parameter, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
