//! Write payloads accepted by the catalog store.
//!
//! `*Create` structs carry a full new row; required text fields default to
//! an empty string so a missing field surfaces as a validation failure
//! instead of a body rejection. `*Patch` structs follow the
//! `None` => do not change; `Some(v)` => update convention.

use async_trait::async_trait;
use atlas_schema::ParameterLocation;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::SqliteConnection;

use crate::db::EntityKind;
use crate::error::CatalogError;

/// Abstraction for applying a patch envelope inside the writer's transaction.
#[async_trait]
pub trait DbPatchable {
    async fn apply_patch(&self, conn: &mut SqliteConnection) -> Result<(), CatalogError>;
}

/// Explicit `null` on a non-optional create field reads as the field's
/// default, so a missing required value surfaces in validation.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "nameAr")]
    pub name_localized: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "descriptionAr")]
    pub description_localized: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website_url: String,
    pub logo_url: Option<String>,
    pub documentation_url: Option<String>,
    pub geographic_coverage: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub data_sources: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub historical_data_available: bool,
    pub historical_data_depth: Option<String>,
    pub realtime_latency: Option<String>,
    pub data_granularity: Option<String>,
    pub data_completeness: Option<String>,
    pub data_refresh_rate: Option<String>,
    pub uptime_guarantee: Option<String>,
    pub service_level_agreement: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub support_channels: Vec<String>,
    pub maintenance_windows: Option<String>,
    pub incident_response_time: Option<String>,
    pub pricing_model: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub free_tier_available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub compliance_standards: Vec<String>,
    pub data_retention_policy: Option<String>,
    pub privacy_policy: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact_info: Option<Value>,
    pub support_email: Option<String>,
    pub sales_contact: Option<String>,
    pub technical_contact: Option<String>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
    /// Category tags; never stored on the provider row.
    #[serde(deserialize_with = "null_as_default")]
    pub category_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub provider_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub base_url: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub provider_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub version: Option<String>,
    pub is_active: Option<bool>,
}

/// There is no `provider_id`: it is always copied from the owning service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub service_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub base_path: Option<String>,
    pub auth_type: Option<String>,
    pub rate_limit: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub supported_formats: Vec<String>,
    pub api_design_style: Option<String>,
    pub documentation_url: Option<String>,
    pub swagger_url: Option<String>,
    pub is_active: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub category_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndpointCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub api_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub endpoint_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Defaults to `true`.
    pub auth_required: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub scopes: Vec<String>,
    pub rate_limit: Option<String>,
    /// Defaults to `"json"`.
    pub default_response_format: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cacheable: bool,
    pub cache_time: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub operation_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub param_type: String,
    pub location: Option<ParameterLocation>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub required: bool,
    pub default_value: Option<String>,
    pub example: Option<String>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    #[serde(rename = "enum")]
    #[serde(deserialize_with = "null_as_default")]
    pub enum_values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseSchemaCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub operation_id: String,
    pub status_code: Option<u16>,
    /// Defaults to `"application/json"`.
    pub media_type: Option<String>,
    pub schema: Option<Value>,
    pub description: Option<String>,
    pub example: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryPatch {
    pub name: Option<String>,
    #[serde(alias = "nameAr")]
    pub name_localized: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "descriptionAr")]
    pub description_localized: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderPatch {
    pub name: Option<String>,
    pub short_code: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub documentation_url: Option<String>,
    pub geographic_coverage: Option<String>,
    pub data_sources: Option<Vec<String>>,
    pub historical_data_available: Option<bool>,
    pub historical_data_depth: Option<String>,
    pub realtime_latency: Option<String>,
    pub data_granularity: Option<String>,
    pub data_completeness: Option<String>,
    pub data_refresh_rate: Option<String>,
    pub uptime_guarantee: Option<String>,
    pub service_level_agreement: Option<String>,
    pub support_channels: Option<Vec<String>>,
    pub maintenance_windows: Option<String>,
    pub incident_response_time: Option<String>,
    pub pricing_model: Option<String>,
    pub free_tier_available: Option<bool>,
    pub compliance_standards: Option<Vec<String>>,
    pub data_retention_policy: Option<String>,
    pub privacy_policy: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact_info: Option<Value>,
    pub support_email: Option<String>,
    pub sales_contact: Option<String>,
    pub technical_contact: Option<String>,
    pub is_active: Option<bool>,
    /// `Some(vec![])` clears every tag.
    pub category_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentPatch {
    pub provider_id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub base_url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePatch {
    /// Moving a service also moves its APIs.
    pub provider_id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub version: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiPatch {
    pub service_id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub base_path: Option<String>,
    pub auth_type: Option<String>,
    pub rate_limit: Option<String>,
    pub supported_formats: Option<Vec<String>>,
    pub api_design_style: Option<String>,
    pub documentation_url: Option<String>,
    pub swagger_url: Option<String>,
    pub is_active: Option<bool>,
    pub category_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EndpointPatch {
    pub api_id: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationPatch {
    pub endpoint_id: Option<String>,
    pub method: Option<String>,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub auth_required: Option<bool>,
    pub scopes: Option<Vec<String>>,
    pub rate_limit: Option<String>,
    pub default_response_format: Option<String>,
    pub cacheable: Option<bool>,
    pub cache_time: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterPatch {
    pub operation_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    pub location: Option<ParameterLocation>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<String>,
    pub example: Option<String>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseSchemaPatch {
    pub operation_id: Option<String>,
    pub status_code: Option<u16>,
    pub media_type: Option<String>,
    pub schema: Option<Value>,
    pub description: Option<String>,
    pub example: Option<Value>,
}

/// Create envelope routed to the writer.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityCreate {
    Category(CategoryCreate),
    Provider(ProviderCreate),
    Environment(EnvironmentCreate),
    Service(ServiceCreate),
    Api(ApiCreate),
    Endpoint(EndpointCreate),
    Operation(OperationCreate),
    Parameter(ParameterCreate),
    ResponseSchema(ResponseSchemaCreate),
}

impl EntityCreate {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityCreate::Category(_) => EntityKind::Category,
            EntityCreate::Provider(_) => EntityKind::Provider,
            EntityCreate::Environment(_) => EntityKind::Environment,
            EntityCreate::Service(_) => EntityKind::Service,
            EntityCreate::Api(_) => EntityKind::Api,
            EntityCreate::Endpoint(_) => EntityKind::Endpoint,
            EntityCreate::Operation(_) => EntityKind::Operation,
            EntityCreate::Parameter(_) => EntityKind::Parameter,
            EntityCreate::ResponseSchema(_) => EntityKind::ResponseSchema,
        }
    }
}

/// Patch envelope: the addressed id plus the entity-specific patch.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityPatch {
    Category { id: String, patch: CategoryPatch },
    Provider { id: String, patch: ProviderPatch },
    Environment { id: String, patch: EnvironmentPatch },
    Service { id: String, patch: ServicePatch },
    Api { id: String, patch: ApiPatch },
    Endpoint { id: String, patch: EndpointPatch },
    Operation { id: String, patch: OperationPatch },
    Parameter { id: String, patch: ParameterPatch },
    ResponseSchema { id: String, patch: ResponseSchemaPatch },
}

impl EntityPatch {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityPatch::Category { .. } => EntityKind::Category,
            EntityPatch::Provider { .. } => EntityKind::Provider,
            EntityPatch::Environment { .. } => EntityKind::Environment,
            EntityPatch::Service { .. } => EntityKind::Service,
            EntityPatch::Api { .. } => EntityKind::Api,
            EntityPatch::Endpoint { .. } => EntityKind::Endpoint,
            EntityPatch::Operation { .. } => EntityKind::Operation,
            EntityPatch::Parameter { .. } => EntityKind::Parameter,
            EntityPatch::ResponseSchema { .. } => EntityKind::ResponseSchema,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityPatch::Category { id, .. }
            | EntityPatch::Provider { id, .. }
            | EntityPatch::Environment { id, .. }
            | EntityPatch::Service { id, .. }
            | EntityPatch::Api { id, .. }
            | EntityPatch::Endpoint { id, .. }
            | EntityPatch::Operation { id, .. }
            | EntityPatch::Parameter { id, .. }
            | EntityPatch::ResponseSchema { id, .. } => id,
        }
    }
}
