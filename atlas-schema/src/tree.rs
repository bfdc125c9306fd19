//! Assembled relation trees returned by list/get.
//!
//! Each view flattens its own row and nests the children below it, so a
//! `ProviderView` serializes as the provider's fields plus `categories`,
//! `environments` and `services`.

use serde::{Deserialize, Serialize};

use crate::{
    Api, Category, Endpoint, Environment, Operation, Parameter, Provider, ResponseSchema, Service,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderView {
    #[serde(flatten)]
    pub provider: Provider,
    pub categories: Vec<Category>,
    pub environments: Vec<Environment>,
    pub services: Vec<ServiceView>,
}

impl ProviderView {
    /// Number of APIs reachable through the provider's services.
    pub fn api_count(&self) -> usize {
        self.services.iter().map(|s| s.apis.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceView {
    #[serde(flatten)]
    pub service: Service,
    pub apis: Vec<ApiView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiView {
    #[serde(flatten)]
    pub api: Api,
    pub categories: Vec<Category>,
    pub endpoints: Vec<EndpointView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointView {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    pub operations: Vec<OperationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationView {
    #[serde(flatten)]
    pub operation: Operation,
    pub parameters: Vec<Parameter>,
    pub response_schemas: Vec<ResponseSchema>,
}
