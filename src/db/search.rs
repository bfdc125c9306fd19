//! Naive free-text search: case-insensitive substring match over a fixed
//! set of text fields per entity type. No ranking, no pagination.

use atlas_schema::SearchResults;
use sqlx::SqliteConnection;

use crate::db::assemble::{api_view, operation_view, provider_view, service_view};
use crate::db::models::{DbApi, DbOperation, DbProvider, DbService};
use crate::error::CatalogError;

/// `needle` must already be lowercased.
fn contains(needle: &str, fields: &[Option<&str>]) -> bool {
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

pub(crate) fn provider_matches(row: &DbProvider, needle: &str) -> bool {
    contains(
        needle,
        &[
            Some(row.name.as_str()),
            Some(row.short_code.as_str()),
            Some(row.website_url.as_str()),
        ],
    )
}

fn service_matches(row: &DbService, needle: &str) -> bool {
    contains(
        needle,
        &[
            Some(row.name.as_str()),
            Some(row.display_name.as_str()),
            row.description.as_deref(),
        ],
    )
}

fn api_matches(row: &DbApi, needle: &str) -> bool {
    contains(
        needle,
        &[
            Some(row.name.as_str()),
            Some(row.display_name.as_str()),
            row.description.as_deref(),
        ],
    )
}

fn operation_matches(row: &DbOperation, needle: &str) -> bool {
    contains(
        needle,
        &[
            Some(row.method.as_str()),
            row.summary.as_deref(),
            row.description.as_deref(),
        ],
    )
}

/// Scans providers, services, APIs and operations independently; each hit
/// is assembled with its full relation tree.
pub(crate) async fn search(
    conn: &mut SqliteConnection,
    query: &str,
) -> Result<SearchResults, CatalogError> {
    let needle = query.to_lowercase();
    let mut results = SearchResults::default();

    let providers = sqlx::query_as::<_, DbProvider>("SELECT * FROM providers ORDER BY rowid")
        .fetch_all(&mut *conn)
        .await?;
    for row in providers {
        if provider_matches(&row, &needle) {
            results.providers.push(provider_view(conn, row).await?);
        }
    }

    let services = sqlx::query_as::<_, DbService>("SELECT * FROM services ORDER BY rowid")
        .fetch_all(&mut *conn)
        .await?;
    for row in services {
        if service_matches(&row, &needle) {
            results.services.push(service_view(conn, row).await?);
        }
    }

    let apis = sqlx::query_as::<_, DbApi>("SELECT * FROM apis ORDER BY rowid")
        .fetch_all(&mut *conn)
        .await?;
    for row in apis {
        if api_matches(&row, &needle) {
            results.apis.push(api_view(conn, row).await?);
        }
    }

    let operations = sqlx::query_as::<_, DbOperation>("SELECT * FROM operations ORDER BY rowid")
        .fetch_all(&mut *conn)
        .await?;
    for row in operations {
        if operation_matches(&row, &needle) {
            results.operations.push(operation_view(conn, row).await?);
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn provider(name: &str, short_code: &str) -> DbProvider {
        let now = Utc::now();
        DbProvider {
            id: "p1".to_string(),
            name: name.to_string(),
            short_code: short_code.to_string(),
            website_url: "https://www.flightradar24.com".to_string(),
            logo_url: None,
            documentation_url: None,
            geographic_coverage: Some("Global".to_string()),
            data_sources: Json(vec!["ADS-B".to_string()]),
            historical_data_available: false,
            historical_data_depth: None,
            realtime_latency: None,
            data_granularity: None,
            data_completeness: None,
            data_refresh_rate: None,
            uptime_guarantee: None,
            service_level_agreement: None,
            support_channels: Json(Vec::new()),
            maintenance_windows: None,
            incident_response_time: None,
            pricing_model: None,
            free_tier_available: false,
            compliance_standards: Json(Vec::new()),
            data_retention_policy: None,
            privacy_policy: None,
            terms_of_service: None,
            contact_info: None,
            support_email: None,
            sales_contact: None,
            technical_contact: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn match_ignores_case() {
        let row = provider("Flightradar24", "FR24");
        assert!(provider_matches(&row, "flight"));
        assert!(provider_matches(&row, "fr24"));
    }

    #[test]
    fn unscanned_fields_never_match() {
        let row = provider("Flightradar24", "FR24");
        assert!(!provider_matches(&row, "global"));
        assert!(!provider_matches(&row, "ads-b"));
    }

    #[test]
    fn missing_optional_fields_are_skipped() {
        assert!(contains("get", &[None, Some("GET")]));
        assert!(!contains("get", &[None, None]));
    }
}
