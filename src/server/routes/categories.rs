use crate::db::{CategoryCreate, CategoryPatch, EntityKind};
use crate::error::CatalogError;
use crate::server::router::AtlasState;

use atlas_schema::Category;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Json, Router, http::StatusCode, routing::get};

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// GET /categories
///
/// Categories sorted by name.
pub async fn list_categories(
    State(state): State<AtlasState>,
) -> Result<Json<Vec<Category>>, CatalogError> {
    Ok(Json(state.db.list_categories().await?))
}

/// POST /categories
pub async fn create_category(
    State(state): State<AtlasState>,
    payload: Result<Json<CategoryCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_category(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, CatalogError> {
    Ok(Json(state.db.get_category(&id).await?))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryPatch>, JsonRejection>,
) -> Result<Json<Category>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_category(&id, patch).await?))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Category, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
