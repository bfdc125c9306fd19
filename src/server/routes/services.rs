use crate::db::{EntityKind, ServiceCreate, ServicePatch};
use crate::error::CatalogError;
use crate::server::routes::ListQuery;
use crate::server::router::AtlasState;

use atlas_schema::ServiceView;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}

/// GET /services
///
/// Optional `?providerId=` narrows to one provider.
pub async fn list_services(
    State(state): State<AtlasState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ServiceView>>, CatalogError> {
    Ok(Json(state.db.list_services(query.filter()).await?))
}

/// POST /services
pub async fn create_service(
    State(state): State<AtlasState>,
    payload: Result<Json<ServiceCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ServiceView>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_service(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /services/{id}
pub async fn get_service(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceView>, CatalogError> {
    Ok(Json(state.db.get_service(&id).await?))
}

/// PUT /services/{id}
pub async fn update_service(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<ServicePatch>, JsonRejection>,
) -> Result<Json<ServiceView>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_service(&id, patch).await?))
}

/// DELETE /services/{id}
///
/// Takes the service's APIs, endpoints and operations with it.
pub async fn delete_service(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Service, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
