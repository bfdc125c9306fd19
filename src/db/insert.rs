//! EntityCreate -> new row, inside the writer's transaction.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use sqlx::types::Json;
use tracing::debug;
use uuid::Uuid;

use crate::db::EntityKind;
use crate::db::patch::{
    ApiCreate, CategoryCreate, EndpointCreate, EntityCreate, EnvironmentCreate, OperationCreate,
    ParameterCreate, ProviderCreate, ResponseSchemaCreate, ServiceCreate,
};
use crate::db::tags::{self, TagJoin};
use crate::db::validate::{Issues, dedupe_ids};
use crate::error::CatalogError;

const DEFAULT_RESPONSE_FORMAT: &str = "json";
const DEFAULT_MEDIA_TYPE: &str = "application/json";

impl EntityCreate {
    /// Validates, assigns an id and timestamps, and stores the row plus any
    /// tag rows. Returns the new id.
    pub(crate) async fn insert(self, conn: &mut SqliteConnection) -> Result<String, CatalogError> {
        let kind = self.kind();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        match self {
            EntityCreate::Category(c) => insert_category(conn, &id, now, c).await?,
            EntityCreate::Provider(c) => insert_provider(conn, &id, now, c).await?,
            EntityCreate::Environment(c) => insert_environment(conn, &id, now, c).await?,
            EntityCreate::Service(c) => insert_service(conn, &id, now, c).await?,
            EntityCreate::Api(c) => insert_api(conn, &id, now, c).await?,
            EntityCreate::Endpoint(c) => insert_endpoint(conn, &id, now, c).await?,
            EntityCreate::Operation(c) => insert_operation(conn, &id, now, c).await?,
            EntityCreate::Parameter(c) => insert_parameter(conn, &id, now, c).await?,
            EntityCreate::ResponseSchema(c) => insert_response_schema(conn, &id, now, c).await?,
        }

        debug!(entity = kind.as_str(), id = %id, created_at = %now, "db row created");
        Ok(id)
    }
}

async fn insert_category(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: CategoryCreate,
) -> Result<(), CatalogError> {
    let mut issues = Issues::new();
    issues.require("name", &c.name);
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO categories (
            id, name, name_localized, description, description_localized, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.name)
    .bind(c.name_localized)
    .bind(c.description)
    .bind(c.description_localized)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_provider(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: ProviderCreate,
) -> Result<(), CatalogError> {
    let category_ids = dedupe_ids(&c.category_ids);

    let mut issues = Issues::new();
    issues.require("name", &c.name);
    issues.require("shortCode", &c.short_code);
    issues.require("websiteUrl", &c.website_url);
    if !c.short_code.trim().is_empty() {
        issues.short_code(conn, &c.short_code, None).await?;
    }
    issues.categories(conn, &category_ids).await?;
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO providers (
            id, name, short_code, website_url, logo_url, documentation_url,
            geographic_coverage, data_sources, historical_data_available, historical_data_depth,
            realtime_latency, data_granularity, data_completeness, data_refresh_rate,
            uptime_guarantee, service_level_agreement, support_channels, maintenance_windows,
            incident_response_time, pricing_model, free_tier_available, compliance_standards,
            data_retention_policy, privacy_policy, terms_of_service, contact_info,
            support_email, sales_contact, technical_contact, is_active, created_at, updated_at
        )
        VALUES (
            ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
            ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
        )
        "#,
    )
    .bind(id)
    .bind(c.name)
    .bind(c.short_code)
    .bind(c.website_url)
    .bind(c.logo_url)
    .bind(c.documentation_url)
    .bind(c.geographic_coverage)
    .bind(Json(c.data_sources))
    .bind(c.historical_data_available)
    .bind(c.historical_data_depth)
    .bind(c.realtime_latency)
    .bind(c.data_granularity)
    .bind(c.data_completeness)
    .bind(c.data_refresh_rate)
    .bind(c.uptime_guarantee)
    .bind(c.service_level_agreement)
    .bind(Json(c.support_channels))
    .bind(c.maintenance_windows)
    .bind(c.incident_response_time)
    .bind(c.pricing_model)
    .bind(c.free_tier_available)
    .bind(Json(c.compliance_standards))
    .bind(c.data_retention_policy)
    .bind(c.privacy_policy)
    .bind(c.terms_of_service)
    .bind(c.contact_info.map(Json))
    .bind(c.support_email)
    .bind(c.sales_contact)
    .bind(c.technical_contact)
    .bind(c.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    tags::replace(conn, TagJoin::Provider, id, &category_ids).await
}

async fn insert_environment(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: EnvironmentCreate,
) -> Result<(), CatalogError> {
    let mut issues = Issues::new();
    issues.require("providerId", &c.provider_id);
    issues.require("name", &c.name);
    issues.require("displayName", &c.display_name);
    issues.require("baseUrl", &c.base_url);
    issues
        .reference(conn, "providerId", EntityKind::Provider, &c.provider_id)
        .await?;
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO environments (
            id, provider_id, name, display_name, base_url, description, is_active,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.provider_id)
    .bind(c.name)
    .bind(c.display_name)
    .bind(c.base_url)
    .bind(c.description)
    .bind(c.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_service(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: ServiceCreate,
) -> Result<(), CatalogError> {
    let mut issues = Issues::new();
    issues.require("providerId", &c.provider_id);
    issues.require("name", &c.name);
    issues.require("displayName", &c.display_name);
    issues
        .reference(conn, "providerId", EntityKind::Provider, &c.provider_id)
        .await?;
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO services (
            id, provider_id, name, display_name, description, icon, version, is_active,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.provider_id)
    .bind(c.name)
    .bind(c.display_name)
    .bind(c.description)
    .bind(c.icon)
    .bind(c.version)
    .bind(c.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_api(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: ApiCreate,
) -> Result<(), CatalogError> {
    let category_ids = dedupe_ids(&c.category_ids);

    let mut issues = Issues::new();
    issues.require("serviceId", &c.service_id);
    issues.require("name", &c.name);
    issues.require("displayName", &c.display_name);
    let provider_id = service_provider(conn, &c.service_id).await?;
    if provider_id.is_none() && !c.service_id.trim().is_empty() {
        issues.push("serviceId", format!("unknown service {}", c.service_id));
    }
    issues.categories(conn, &category_ids).await?;
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO apis (
            id, service_id, provider_id, name, display_name, description, version, base_path,
            auth_type, rate_limit, supported_formats, api_design_style, documentation_url,
            swagger_url, is_active, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.service_id)
    .bind(provider_id)
    .bind(c.name)
    .bind(c.display_name)
    .bind(c.description)
    .bind(c.version)
    .bind(c.base_path)
    .bind(c.auth_type)
    .bind(c.rate_limit)
    .bind(Json(c.supported_formats))
    .bind(c.api_design_style)
    .bind(c.documentation_url)
    .bind(c.swagger_url)
    .bind(c.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    tags::replace(conn, TagJoin::Api, id, &category_ids).await
}

async fn insert_endpoint(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: EndpointCreate,
) -> Result<(), CatalogError> {
    let mut issues = Issues::new();
    issues.require("apiId", &c.api_id);
    issues.require("name", &c.name);
    issues.require("path", &c.path);
    issues
        .reference(conn, "apiId", EntityKind::Api, &c.api_id)
        .await?;
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO endpoints (
            id, api_id, name, path, description, is_active, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.api_id)
    .bind(c.name)
    .bind(c.path)
    .bind(c.description)
    .bind(c.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_operation(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: OperationCreate,
) -> Result<(), CatalogError> {
    let mut issues = Issues::new();
    issues.require("endpointId", &c.endpoint_id);
    issues.require("method", &c.method);
    issues
        .reference(conn, "endpointId", EntityKind::Endpoint, &c.endpoint_id)
        .await?;
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO operations (
            id, endpoint_id, method, operation_id, summary, description, auth_required,
            scopes, rate_limit, default_response_format, cacheable, cache_time, is_active,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.endpoint_id)
    .bind(c.method)
    .bind(c.operation_id)
    .bind(c.summary)
    .bind(c.description)
    .bind(c.auth_required.unwrap_or(true))
    .bind(Json(c.scopes))
    .bind(c.rate_limit)
    .bind(
        c.default_response_format
            .unwrap_or_else(|| DEFAULT_RESPONSE_FORMAT.to_string()),
    )
    .bind(c.cacheable)
    .bind(c.cache_time)
    .bind(c.is_active.unwrap_or(true))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_parameter(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: ParameterCreate,
) -> Result<(), CatalogError> {
    let mut issues = Issues::new();
    issues.require("operationId", &c.operation_id);
    issues.require("name", &c.name);
    issues.require("type", &c.param_type);
    issues.require_some("location", c.location.as_ref());
    issues
        .reference(conn, "operationId", EntityKind::Operation, &c.operation_id)
        .await?;
    issues.into_result()?;
    let location = c.location.map(|l| l.as_str()).unwrap_or_default();

    sqlx::query(
        r#"
        INSERT INTO parameters (
            id, operation_id, name, param_type, location, description, required,
            default_value, example, format, pattern, min_length, max_length, minimum, maximum,
            enum_values, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.operation_id)
    .bind(c.name)
    .bind(c.param_type)
    .bind(location)
    .bind(c.description)
    .bind(c.required)
    .bind(c.default_value)
    .bind(c.example)
    .bind(c.format)
    .bind(c.pattern)
    .bind(c.min_length)
    .bind(c.max_length)
    .bind(c.minimum)
    .bind(c.maximum)
    .bind(Json(c.enum_values))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_response_schema(
    conn: &mut SqliteConnection,
    id: &str,
    now: DateTime<Utc>,
    c: ResponseSchemaCreate,
) -> Result<(), CatalogError> {
    let mut issues = Issues::new();
    issues.require("operationId", &c.operation_id);
    issues.require_some("statusCode", c.status_code.as_ref());
    issues
        .reference(conn, "operationId", EntityKind::Operation, &c.operation_id)
        .await?;
    issues.into_result()?;

    sqlx::query(
        r#"
        INSERT INTO response_schemas (
            id, operation_id, status_code, media_type, schema, description, example,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(c.operation_id)
    .bind(c.status_code.map(i64::from))
    .bind(c.media_type.unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()))
    .bind(c.schema.map(Json))
    .bind(c.description)
    .bind(c.example.map(Json))
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Provider that owns `service_id`, if the service exists.
pub(crate) async fn service_provider(
    conn: &mut SqliteConnection,
    service_id: &str,
) -> Result<Option<String>, CatalogError> {
    let provider_id: Option<String> =
        sqlx::query_scalar("SELECT provider_id FROM services WHERE id = ?")
            .bind(service_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(provider_id)
}
