//! EntityPatch -> DbPatchable implementation.
//!
//! This sits in the `db` module because it contains SQL/table knowledge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use sqlx::types::Json;
use tracing::debug;

use crate::db::EntityKind;
use crate::db::insert::service_provider;
use crate::db::patch::{
    ApiPatch, CategoryPatch, DbPatchable, EndpointPatch, EntityPatch, EnvironmentPatch,
    OperationPatch, ParameterPatch, ProviderPatch, ResponseSchemaPatch, ServicePatch,
};
use crate::db::tags::{self, TagJoin};
use crate::db::validate::{Issues, dedupe_ids, ensure_exists};
use crate::error::CatalogError;

#[async_trait]
impl DbPatchable for EntityPatch {
    async fn apply_patch(&self, conn: &mut SqliteConnection) -> Result<(), CatalogError> {
        let kind = self.kind();
        let id = self.id();
        ensure_exists(conn, kind, id).await?;

        let updated_at = Utc::now();
        let affected = match self {
            EntityPatch::Category { id, patch } => {
                patch_category(conn, id, updated_at, patch).await?
            }
            EntityPatch::Provider { id, patch } => {
                patch_provider(conn, id, updated_at, patch).await?
            }
            EntityPatch::Environment { id, patch } => {
                patch_environment(conn, id, updated_at, patch).await?
            }
            EntityPatch::Service { id, patch } => {
                patch_service(conn, id, updated_at, patch).await?
            }
            EntityPatch::Api { id, patch } => {
                patch_api(conn, id, updated_at, patch).await?
            }
            EntityPatch::Endpoint { id, patch } => {
                patch_endpoint(conn, id, updated_at, patch).await?
            }
            EntityPatch::Operation { id, patch } => {
                patch_operation(conn, id, updated_at, patch).await?
            }
            EntityPatch::Parameter { id, patch } => {
                patch_parameter(conn, id, updated_at, patch).await?
            }
            EntityPatch::ResponseSchema { id, patch } => {
                patch_response_schema(conn, id, updated_at, patch).await?
            }
        };

        debug!(
            entity = kind.as_str(),
            id,
            affected,
            updated_at = %updated_at,
            "db patch applied"
        );

        if affected == 0 {
            return Err(CatalogError::not_found(kind, id));
        }

        Ok(())
    }
}

async fn patch_category(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &CategoryPatch,
) -> Result<u64, CatalogError> {
    let CategoryPatch {
        name,
        name_localized,
        description,
        description_localized,
    } = patch.clone();

    let mut issues = Issues::new();
    issues.non_blank("name", name.as_ref());
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE categories
        SET
            name = COALESCE(?, name),
            name_localized = COALESCE(?, name_localized),
            description = COALESCE(?, description),
            description_localized = COALESCE(?, description_localized),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(name_localized)
    .bind(description)
    .bind(description_localized)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(res.rows_affected())
}

async fn patch_provider(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &ProviderPatch,
) -> Result<u64, CatalogError> {
    let patch = patch.clone();
    let category_ids = patch.category_ids.as_deref().map(dedupe_ids);

    let mut issues = Issues::new();
    issues.non_blank("name", patch.name.as_ref());
    issues.non_blank("shortCode", patch.short_code.as_ref());
    issues.non_blank("websiteUrl", patch.website_url.as_ref());
    if let Some(short_code) = patch.short_code.as_deref() {
        if !short_code.trim().is_empty() {
            issues.short_code(conn, short_code, Some(id)).await?;
        }
    }
    if let Some(ids) = category_ids.as_deref() {
        issues.categories(conn, ids).await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE providers
        SET
            name = COALESCE(?, name),
            short_code = COALESCE(?, short_code),
            website_url = COALESCE(?, website_url),
            logo_url = COALESCE(?, logo_url),
            documentation_url = COALESCE(?, documentation_url),
            geographic_coverage = COALESCE(?, geographic_coverage),
            data_sources = COALESCE(?, data_sources),
            historical_data_available = COALESCE(?, historical_data_available),
            historical_data_depth = COALESCE(?, historical_data_depth),
            realtime_latency = COALESCE(?, realtime_latency),
            data_granularity = COALESCE(?, data_granularity),
            data_completeness = COALESCE(?, data_completeness),
            data_refresh_rate = COALESCE(?, data_refresh_rate),
            uptime_guarantee = COALESCE(?, uptime_guarantee),
            service_level_agreement = COALESCE(?, service_level_agreement),
            support_channels = COALESCE(?, support_channels),
            maintenance_windows = COALESCE(?, maintenance_windows),
            incident_response_time = COALESCE(?, incident_response_time),
            pricing_model = COALESCE(?, pricing_model),
            free_tier_available = COALESCE(?, free_tier_available),
            compliance_standards = COALESCE(?, compliance_standards),
            data_retention_policy = COALESCE(?, data_retention_policy),
            privacy_policy = COALESCE(?, privacy_policy),
            terms_of_service = COALESCE(?, terms_of_service),
            contact_info = COALESCE(?, contact_info),
            support_email = COALESCE(?, support_email),
            sales_contact = COALESCE(?, sales_contact),
            technical_contact = COALESCE(?, technical_contact),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(patch.name)
    .bind(patch.short_code)
    .bind(patch.website_url)
    .bind(patch.logo_url)
    .bind(patch.documentation_url)
    .bind(patch.geographic_coverage)
    .bind(patch.data_sources.map(Json))
    .bind(patch.historical_data_available)
    .bind(patch.historical_data_depth)
    .bind(patch.realtime_latency)
    .bind(patch.data_granularity)
    .bind(patch.data_completeness)
    .bind(patch.data_refresh_rate)
    .bind(patch.uptime_guarantee)
    .bind(patch.service_level_agreement)
    .bind(patch.support_channels.map(Json))
    .bind(patch.maintenance_windows)
    .bind(patch.incident_response_time)
    .bind(patch.pricing_model)
    .bind(patch.free_tier_available)
    .bind(patch.compliance_standards.map(Json))
    .bind(patch.data_retention_policy)
    .bind(patch.privacy_policy)
    .bind(patch.terms_of_service)
    .bind(patch.contact_info.map(Json))
    .bind(patch.support_email)
    .bind(patch.sales_contact)
    .bind(patch.technical_contact)
    .bind(patch.is_active)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if let Some(ids) = category_ids {
        debug!(provider_id = id, tags = ids.len(), "replacing provider category tags");
        tags::replace(conn, TagJoin::Provider, id, &ids).await?;
    }

    Ok(res.rows_affected())
}

async fn patch_environment(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &EnvironmentPatch,
) -> Result<u64, CatalogError> {
    let EnvironmentPatch {
        provider_id,
        name,
        display_name,
        base_url,
        description,
        is_active,
    } = patch.clone();

    let mut issues = Issues::new();
    issues.non_blank("providerId", provider_id.as_ref());
    issues.non_blank("name", name.as_ref());
    issues.non_blank("displayName", display_name.as_ref());
    issues.non_blank("baseUrl", base_url.as_ref());
    if let Some(provider_id) = provider_id.as_deref() {
        issues
            .reference(conn, "providerId", EntityKind::Provider, provider_id)
            .await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE environments
        SET
            provider_id = COALESCE(?, provider_id),
            name = COALESCE(?, name),
            display_name = COALESCE(?, display_name),
            base_url = COALESCE(?, base_url),
            description = COALESCE(?, description),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(provider_id)
    .bind(name)
    .bind(display_name)
    .bind(base_url)
    .bind(description)
    .bind(is_active)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(res.rows_affected())
}

async fn patch_service(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &ServicePatch,
) -> Result<u64, CatalogError> {
    let ServicePatch {
        provider_id,
        name,
        display_name,
        description,
        icon,
        version,
        is_active,
    } = patch.clone();

    let mut issues = Issues::new();
    issues.non_blank("providerId", provider_id.as_ref());
    issues.non_blank("name", name.as_ref());
    issues.non_blank("displayName", display_name.as_ref());
    if let Some(provider_id) = provider_id.as_deref() {
        issues
            .reference(conn, "providerId", EntityKind::Provider, provider_id)
            .await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE services
        SET
            provider_id = COALESCE(?, provider_id),
            name = COALESCE(?, name),
            display_name = COALESCE(?, display_name),
            description = COALESCE(?, description),
            icon = COALESCE(?, icon),
            version = COALESCE(?, version),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(provider_id.as_deref())
    .bind(name)
    .bind(display_name)
    .bind(description)
    .bind(icon)
    .bind(version)
    .bind(is_active)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    // APIs carry a copy of their service's provider.
    if let Some(provider_id) = provider_id {
        let moved = sqlx::query("UPDATE apis SET provider_id = ? WHERE service_id = ?")
            .bind(&provider_id)
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        debug!(service_id = id, provider_id = %provider_id, moved, "service apis re-parented");
    }

    Ok(res.rows_affected())
}

async fn patch_api(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &ApiPatch,
) -> Result<u64, CatalogError> {
    let patch = patch.clone();
    let category_ids = patch.category_ids.as_deref().map(dedupe_ids);

    let mut issues = Issues::new();
    issues.non_blank("serviceId", patch.service_id.as_ref());
    issues.non_blank("name", patch.name.as_ref());
    issues.non_blank("displayName", patch.display_name.as_ref());
    let mut provider_id = None;
    if let Some(service_id) = patch.service_id.as_deref() {
        provider_id = service_provider(conn, service_id).await?;
        if provider_id.is_none() && !service_id.trim().is_empty() {
            issues.push("serviceId", format!("unknown service {service_id}"));
        }
    }
    if let Some(ids) = category_ids.as_deref() {
        issues.categories(conn, ids).await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE apis
        SET
            service_id = COALESCE(?, service_id),
            provider_id = COALESCE(?, provider_id),
            name = COALESCE(?, name),
            display_name = COALESCE(?, display_name),
            description = COALESCE(?, description),
            version = COALESCE(?, version),
            base_path = COALESCE(?, base_path),
            auth_type = COALESCE(?, auth_type),
            rate_limit = COALESCE(?, rate_limit),
            supported_formats = COALESCE(?, supported_formats),
            api_design_style = COALESCE(?, api_design_style),
            documentation_url = COALESCE(?, documentation_url),
            swagger_url = COALESCE(?, swagger_url),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(patch.service_id)
    .bind(provider_id)
    .bind(patch.name)
    .bind(patch.display_name)
    .bind(patch.description)
    .bind(patch.version)
    .bind(patch.base_path)
    .bind(patch.auth_type)
    .bind(patch.rate_limit)
    .bind(patch.supported_formats.map(Json))
    .bind(patch.api_design_style)
    .bind(patch.documentation_url)
    .bind(patch.swagger_url)
    .bind(patch.is_active)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if let Some(ids) = category_ids {
        debug!(api_id = id, tags = ids.len(), "replacing api category tags");
        tags::replace(conn, TagJoin::Api, id, &ids).await?;
    }

    Ok(res.rows_affected())
}

async fn patch_endpoint(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &EndpointPatch,
) -> Result<u64, CatalogError> {
    let EndpointPatch {
        api_id,
        name,
        path,
        description,
        is_active,
    } = patch.clone();

    let mut issues = Issues::new();
    issues.non_blank("apiId", api_id.as_ref());
    issues.non_blank("name", name.as_ref());
    issues.non_blank("path", path.as_ref());
    if let Some(api_id) = api_id.as_deref() {
        issues.reference(conn, "apiId", EntityKind::Api, api_id).await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE endpoints
        SET
            api_id = COALESCE(?, api_id),
            name = COALESCE(?, name),
            path = COALESCE(?, path),
            description = COALESCE(?, description),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(api_id)
    .bind(name)
    .bind(path)
    .bind(description)
    .bind(is_active)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(res.rows_affected())
}

async fn patch_operation(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &OperationPatch,
) -> Result<u64, CatalogError> {
    let patch = patch.clone();

    let mut issues = Issues::new();
    issues.non_blank("endpointId", patch.endpoint_id.as_ref());
    issues.non_blank("method", patch.method.as_ref());
    if let Some(endpoint_id) = patch.endpoint_id.as_deref() {
        issues
            .reference(conn, "endpointId", EntityKind::Endpoint, endpoint_id)
            .await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE operations
        SET
            endpoint_id = COALESCE(?, endpoint_id),
            method = COALESCE(?, method),
            operation_id = COALESCE(?, operation_id),
            summary = COALESCE(?, summary),
            description = COALESCE(?, description),
            auth_required = COALESCE(?, auth_required),
            scopes = COALESCE(?, scopes),
            rate_limit = COALESCE(?, rate_limit),
            default_response_format = COALESCE(?, default_response_format),
            cacheable = COALESCE(?, cacheable),
            cache_time = COALESCE(?, cache_time),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(patch.endpoint_id)
    .bind(patch.method)
    .bind(patch.operation_id)
    .bind(patch.summary)
    .bind(patch.description)
    .bind(patch.auth_required)
    .bind(patch.scopes.map(Json))
    .bind(patch.rate_limit)
    .bind(patch.default_response_format)
    .bind(patch.cacheable)
    .bind(patch.cache_time)
    .bind(patch.is_active)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(res.rows_affected())
}

async fn patch_parameter(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &ParameterPatch,
) -> Result<u64, CatalogError> {
    let patch = patch.clone();

    let mut issues = Issues::new();
    issues.non_blank("operationId", patch.operation_id.as_ref());
    issues.non_blank("name", patch.name.as_ref());
    issues.non_blank("type", patch.param_type.as_ref());
    if let Some(operation_id) = patch.operation_id.as_deref() {
        issues
            .reference(conn, "operationId", EntityKind::Operation, operation_id)
            .await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE parameters
        SET
            operation_id = COALESCE(?, operation_id),
            name = COALESCE(?, name),
            param_type = COALESCE(?, param_type),
            location = COALESCE(?, location),
            description = COALESCE(?, description),
            required = COALESCE(?, required),
            default_value = COALESCE(?, default_value),
            example = COALESCE(?, example),
            format = COALESCE(?, format),
            pattern = COALESCE(?, pattern),
            min_length = COALESCE(?, min_length),
            max_length = COALESCE(?, max_length),
            minimum = COALESCE(?, minimum),
            maximum = COALESCE(?, maximum),
            enum_values = COALESCE(?, enum_values),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(patch.operation_id)
    .bind(patch.name)
    .bind(patch.param_type)
    .bind(patch.location.map(|l| l.as_str()))
    .bind(patch.description)
    .bind(patch.required)
    .bind(patch.default_value)
    .bind(patch.example)
    .bind(patch.format)
    .bind(patch.pattern)
    .bind(patch.min_length)
    .bind(patch.max_length)
    .bind(patch.minimum)
    .bind(patch.maximum)
    .bind(patch.enum_values.map(Json))
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(res.rows_affected())
}

async fn patch_response_schema(
    conn: &mut SqliteConnection,
    id: &str,
    updated_at: DateTime<Utc>,
    patch: &ResponseSchemaPatch,
) -> Result<u64, CatalogError> {
    let ResponseSchemaPatch {
        operation_id,
        status_code,
        media_type,
        schema,
        description,
        example,
    } = patch.clone();

    let mut issues = Issues::new();
    issues.non_blank("operationId", operation_id.as_ref());
    issues.non_blank("mediaType", media_type.as_ref());
    if let Some(operation_id) = operation_id.as_deref() {
        issues
            .reference(conn, "operationId", EntityKind::Operation, operation_id)
            .await?;
    }
    issues.into_result()?;

    let res = sqlx::query(
        r#"
        UPDATE response_schemas
        SET
            operation_id = COALESCE(?, operation_id),
            status_code = COALESCE(?, status_code),
            media_type = COALESCE(?, media_type),
            schema = COALESCE(?, schema),
            description = COALESCE(?, description),
            example = COALESCE(?, example),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(operation_id)
    .bind(status_code.map(i64::from))
    .bind(media_type)
    .bind(schema.map(Json))
    .bind(description)
    .bind(example.map(Json))
    .bind(updated_at)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(res.rows_affected())
}
