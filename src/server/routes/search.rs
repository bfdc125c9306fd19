use crate::error::CatalogError;
use crate::server::router::AtlasState;

use atlas_schema::SearchResults;
use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::Deserialize;

pub fn router() -> Router<AtlasState> {
    Router::new().route("/search", get(search))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /search?q=
pub async fn search(
    State(state): State<AtlasState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, CatalogError> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(CatalogError::invalid("q", "required"));
    }
    Ok(Json(state.db.search(q).await?))
}
