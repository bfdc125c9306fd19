use atlas_schema::{
    Api, Category, Endpoint, Environment, Operation, Parameter, Provider, ResponseSchema, Service,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbCategory {
    pub id: String,
    pub name: String,
    pub name_localized: Option<String>,
    pub description: Option<String>,
    pub description_localized: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbCategory> for Category {
    fn from(row: DbCategory) -> Self {
        Category {
            id: row.id,
            name: row.name,
            name_localized: row.name_localized,
            description: row.description,
            description_localized: row.description_localized,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbProvider {
    pub id: String,
    pub name: String,
    pub short_code: String,
    pub website_url: String,
    pub logo_url: Option<String>,
    pub documentation_url: Option<String>,
    pub geographic_coverage: Option<String>,
    pub data_sources: Json<Vec<String>>,
    pub historical_data_available: bool,
    pub historical_data_depth: Option<String>,
    pub realtime_latency: Option<String>,
    pub data_granularity: Option<String>,
    pub data_completeness: Option<String>,
    pub data_refresh_rate: Option<String>,
    pub uptime_guarantee: Option<String>,
    pub service_level_agreement: Option<String>,
    pub support_channels: Json<Vec<String>>,
    pub maintenance_windows: Option<String>,
    pub incident_response_time: Option<String>,
    pub pricing_model: Option<String>,
    pub free_tier_available: bool,
    pub compliance_standards: Json<Vec<String>>,
    pub data_retention_policy: Option<String>,
    pub privacy_policy: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact_info: Option<Json<Value>>,
    pub support_email: Option<String>,
    pub sales_contact: Option<String>,
    pub technical_contact: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbProvider> for Provider {
    fn from(row: DbProvider) -> Self {
        Provider {
            id: row.id,
            name: row.name,
            short_code: row.short_code,
            website_url: row.website_url,
            logo_url: row.logo_url,
            documentation_url: row.documentation_url,
            geographic_coverage: row.geographic_coverage,
            data_sources: row.data_sources.0,
            historical_data_available: row.historical_data_available,
            historical_data_depth: row.historical_data_depth,
            realtime_latency: row.realtime_latency,
            data_granularity: row.data_granularity,
            data_completeness: row.data_completeness,
            data_refresh_rate: row.data_refresh_rate,
            uptime_guarantee: row.uptime_guarantee,
            service_level_agreement: row.service_level_agreement,
            support_channels: row.support_channels.0,
            maintenance_windows: row.maintenance_windows,
            incident_response_time: row.incident_response_time,
            pricing_model: row.pricing_model,
            free_tier_available: row.free_tier_available,
            compliance_standards: row.compliance_standards.0,
            data_retention_policy: row.data_retention_policy,
            privacy_policy: row.privacy_policy,
            terms_of_service: row.terms_of_service,
            contact_info: row.contact_info.map(|v| v.0),
            support_email: row.support_email,
            sales_contact: row.sales_contact,
            technical_contact: row.technical_contact,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbEnvironment {
    pub id: String,
    pub provider_id: String,
    pub name: String,
    pub display_name: String,
    pub base_url: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbEnvironment> for Environment {
    fn from(row: DbEnvironment) -> Self {
        Environment {
            id: row.id,
            provider_id: row.provider_id,
            name: row.name,
            display_name: row.display_name,
            base_url: row.base_url,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbService {
    pub id: String,
    pub provider_id: String,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub version: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            provider_id: row.provider_id,
            name: row.name,
            display_name: row.display_name,
            description: row.description,
            icon: row.icon,
            version: row.version,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbApi {
    pub id: String,
    pub service_id: String,
    pub provider_id: String,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub base_path: Option<String>,
    pub auth_type: Option<String>,
    pub rate_limit: Option<String>,
    pub supported_formats: Json<Vec<String>>,
    pub api_design_style: Option<String>,
    pub documentation_url: Option<String>,
    pub swagger_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbApi> for Api {
    fn from(row: DbApi) -> Self {
        Api {
            id: row.id,
            service_id: row.service_id,
            provider_id: row.provider_id,
            name: row.name,
            display_name: row.display_name,
            description: row.description,
            version: row.version,
            base_path: row.base_path,
            auth_type: row.auth_type,
            rate_limit: row.rate_limit,
            supported_formats: row.supported_formats.0,
            api_design_style: row.api_design_style,
            documentation_url: row.documentation_url,
            swagger_url: row.swagger_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbEndpoint {
    pub id: String,
    pub api_id: String,
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbEndpoint> for Endpoint {
    fn from(row: DbEndpoint) -> Self {
        Endpoint {
            id: row.id,
            api_id: row.api_id,
            name: row.name,
            path: row.path,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbOperation {
    pub id: String,
    pub endpoint_id: String,
    pub method: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub auth_required: bool,
    pub scopes: Json<Vec<String>>,
    pub rate_limit: Option<String>,
    pub default_response_format: String,
    pub cacheable: bool,
    pub cache_time: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbOperation> for Operation {
    fn from(row: DbOperation) -> Self {
        Operation {
            id: row.id,
            endpoint_id: row.endpoint_id,
            method: row.method,
            operation_id: row.operation_id,
            summary: row.summary,
            description: row.description,
            auth_required: row.auth_required,
            scopes: row.scopes.0,
            rate_limit: row.rate_limit,
            default_response_format: row.default_response_format,
            cacheable: row.cacheable,
            cache_time: row.cache_time,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbParameter {
    pub id: String,
    pub operation_id: String,
    pub name: String,
    pub param_type: String,
    pub location: String,
    pub description: Option<String>,
    pub required: bool,
    pub default_value: Option<String>,
    pub example: Option<String>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub enum_values: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbParameter> for Parameter {
    type Error = CatalogError;

    fn try_from(row: DbParameter) -> Result<Self, Self::Error> {
        let location = row.location.parse().map_err(|e: String| {
            CatalogError::UnexpectedError(format!("parameter id={}: {e}", row.id))
        })?;
        Ok(Parameter {
            id: row.id,
            operation_id: row.operation_id,
            name: row.name,
            param_type: row.param_type,
            location,
            description: row.description,
            required: row.required,
            default_value: row.default_value,
            example: row.example,
            format: row.format,
            pattern: row.pattern,
            min_length: row.min_length,
            max_length: row.max_length,
            minimum: row.minimum,
            maximum: row.maximum,
            enum_values: row.enum_values.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbResponseSchema {
    pub id: String,
    pub operation_id: String,
    pub status_code: i64,
    pub media_type: String,
    pub schema: Option<Json<Value>>,
    pub description: Option<String>,
    pub example: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbResponseSchema> for ResponseSchema {
    type Error = CatalogError;

    fn try_from(row: DbResponseSchema) -> Result<Self, Self::Error> {
        let status_code = u16::try_from(row.status_code).map_err(|_| {
            CatalogError::UnexpectedError(format!(
                "response schema id={} has invalid status code {}",
                row.id, row.status_code
            ))
        })?;
        Ok(ResponseSchema {
            id: row.id,
            operation_id: row.operation_id,
            status_code,
            media_type: row.media_type,
            schema: row.schema.map(|v| v.0),
            description: row.description,
            example: row.example.map(|v| v.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
