use crate::error::CatalogError;
use crate::export::{self, ExportFormat};
use crate::server::router::AtlasState;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use serde::Deserialize;

pub fn router() -> Router<AtlasState> {
    Router::new().route("/export", get(export_catalog))
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// GET /export?format=json|csv
///
/// Whole catalog as a file download; JSON when `format` is absent.
pub async fn export_catalog(
    State(state): State<AtlasState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, CatalogError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };

    let snapshot = state.db.export().await?;
    let body = export::render(&snapshot, format)?;

    let disposition = format!(
        "attachment; filename={}.{}",
        state.export_file_stem,
        format.extension()
    );
    let disposition = HeaderValue::from_str(&disposition).map_err(|e| {
        CatalogError::UnexpectedError(format!("invalid export file name: {e}"))
    })?;

    let mut resp = body.into_response();
    let headers = resp.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    Ok(resp)
}
