use crate::db::{EntityKind, ProviderCreate, ProviderPatch};
use crate::error::CatalogError;
use crate::server::router::AtlasState;

use atlas_schema::ProviderView;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Deserialize;

pub fn router() -> Router<AtlasState> {
    Router::new()
        .route("/providers", get(list_providers).post(create_provider))
        .route(
            "/providers/{id}",
            get(get_provider).put(update_provider).delete(delete_provider),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderListQuery {
    /// Case-insensitive substring over name, short code and website.
    pub search: Option<String>,
}

/// GET /providers
///
/// Every provider with its categories, environments and service tree.
pub async fn list_providers(
    State(state): State<AtlasState>,
    Query(query): Query<ProviderListQuery>,
) -> Result<Json<Vec<ProviderView>>, CatalogError> {
    let providers = state.db.list_providers(query.search.as_deref()).await?;
    Ok(Json(providers))
}

/// POST /providers
///
/// `categoryIds` in the body sets the provider's tags.
pub async fn create_provider(
    State(state): State<AtlasState>,
    payload: Result<Json<ProviderCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ProviderView>), CatalogError> {
    let Json(create) = payload?;
    let created = state.db.create_provider(create).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_provider(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<Json<ProviderView>, CatalogError> {
    Ok(Json(state.db.get_provider(&id).await?))
}

/// PUT /providers/{id}
///
/// A supplied `categoryIds` (even `[]`) replaces every tag.
pub async fn update_provider(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
    payload: Result<Json<ProviderPatch>, JsonRejection>,
) -> Result<Json<ProviderView>, CatalogError> {
    let Json(patch) = payload?;
    Ok(Json(state.db.update_provider(&id, patch).await?))
}

/// DELETE /providers/{id}
///
/// Removes the whole subtree and every tag row under it.
pub async fn delete_provider(
    State(state): State<AtlasState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.db.delete(EntityKind::Provider, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
