use crate::db::{ApiCreate, ApiPatch, EntityKind};
use crate::error::CatalogError;
use crate::server::routes::ListQuery;
use crate::server::router::AtlasState;

use atlas_schema::ApiView;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route("/apis", get(list_apis).post(create_api))
        .route(
            "/apis/{id}",
            get(get_api).put(update_api).delete(delete_api),
        )
}

/// GET /apis
///
/// Optional `?serviceId=` and `?providerId=` narrow the list.
pub async fn list_apis(
    State(state): State<AtlasState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ApiView>>, CatalogError> {
    Ok(Json(state.db.list_apis(query.filter()).await?))
}

/// POST /apis
pub async fn create_api(
    State(state): State<AtlasState>,
    payload: Result<Json<ApiCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiView>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_api(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /apis/{id}
pub async fn get_api(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<ApiView>, CatalogError> {
    Ok(Json(state.db.get_api(&id).await?))
}

/// PUT /apis/{id}
pub async fn update_api(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<ApiPatch>, JsonRejection>,
) -> Result<Json<ApiView>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_api(&id, patch).await?))
}

/// DELETE /apis/{id}
pub async fn delete_api(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Api, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
