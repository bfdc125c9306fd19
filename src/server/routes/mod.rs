//! One file per resource; `router()` merges them.

pub mod apis;
pub mod categories;
pub mod endpoints;
pub mod environments;
pub mod export;
pub mod operations;
pub mod parameters;
pub mod providers;
pub mod response_schemas;
pub mod search;
pub mod services;

use crate::db::ListFilter;
use crate::server::router::AtlasState;

use axum::Router;
use serde::Deserialize;

/// Parent filters accepted by the child list routes. Each route reads only
/// the fields that apply to it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub provider_id: Option<String>,
    pub service_id: Option<String>,
    pub api_id: Option<String>,
    pub endpoint_id: Option<String>,
    pub operation_id: Option<String>,
}

impl ListQuery {
    pub fn filter(&self) -> ListFilter<'_> {
        ListFilter {
            provider_id: self.provider_id.as_deref(),
            service_id: self.service_id.as_deref(),
            api_id: self.api_id.as_deref(),
            endpoint_id: self.endpoint_id.as_deref(),
            operation_id: self.operation_id.as_deref(),
        }
    }
}

pub fn router() -> Router<AtlasState> {
    Router::new()
        .merge(categories::router())
        .merge(providers::router())
        .merge(environments::router())
        .merge(services::router())
        .merge(apis::router())
        .merge(endpoints::router())
        .merge(operations::router())
        .merge(parameters::router())
        .merge(response_schemas::router())
        .merge(search::router())
        .merge(export::router())
}
