use serde::{Deserialize, Serialize};

use crate::{ApiView, OperationView, ProviderView, ServiceView};

/// Matches of one free-text query, grouped per entity type.
///
/// The lists are independent: a provider and one of its own APIs may both
/// appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub providers: Vec<ProviderView>,
    pub services: Vec<ServiceView>,
    pub apis: Vec<ApiView>,
    pub operations: Vec<OperationView>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
            && self.services.is_empty()
            && self.apis.is_empty()
            && self.operations.is_empty()
    }
}
