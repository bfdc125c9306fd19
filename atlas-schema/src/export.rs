use serde::{Deserialize, Serialize};

use crate::{Api, ApiView, Category, EndpointView, Provider, ProviderView};

/// Endpoint flattened out of its tree, carrying the rows it hangs off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedEndpoint {
    #[serde(flatten)]
    pub endpoint: EndpointView,
    pub api: Option<Api>,
    pub provider: Option<Provider>,
}

/// Full catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub categories: Vec<Category>,
    pub providers: Vec<ProviderView>,
    pub apis: Vec<ApiView>,
    pub endpoints: Vec<ExportedEndpoint>,
}
