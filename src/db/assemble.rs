//! Relation assembly: turns flat rows into the nested views returned by
//! list/get. Every call re-walks the subtree; nothing is cached.

use atlas_schema::{
    Api, ApiView, Category, EndpointView, Environment, ExportSnapshot, ExportedEndpoint,
    OperationView, Parameter, Provider, ProviderView, ResponseSchema, ServiceView,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqliteConnection};

use crate::db::EntityKind;
use crate::db::models::{
    DbApi, DbCategory, DbEndpoint, DbEnvironment, DbOperation, DbParameter, DbProvider,
    DbResponseSchema, DbService,
};
use crate::db::record::CatalogRecord;
use crate::db::tags::{self, TagJoin};
use crate::error::CatalogError;

/// Optional equality filters for list queries; `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter<'a> {
    pub provider_id: Option<&'a str>,
    pub service_id: Option<&'a str>,
    pub api_id: Option<&'a str>,
    pub endpoint_id: Option<&'a str>,
    pub operation_id: Option<&'a str>,
}

pub(crate) async fn fetch_row<T>(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<Option<T>, CatalogError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let sql = format!("SELECT * FROM {} WHERE id = ?", kind.table());
    let row = sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Rows of `kind` in insertion order, narrowed by `column = value` for each
/// supplied filter.
async fn fetch_rows<T>(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    filters: &[(&str, Option<&str>)],
) -> Result<Vec<T>, CatalogError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut sql = format!("SELECT * FROM {} WHERE 1 = 1", kind.table());
    for (column, value) in filters {
        if value.is_some() {
            sql.push_str(&format!(" AND {column} = ?"));
        }
    }
    sql.push_str(" ORDER BY rowid");

    let mut query = sqlx::query_as::<_, T>(&sql);
    for (_, value) in filters {
        if let Some(value) = value {
            query = query.bind(*value);
        }
    }
    Ok(query.fetch_all(&mut *conn).await?)
}

pub(crate) async fn provider_view(
    conn: &mut SqliteConnection,
    row: DbProvider,
) -> Result<ProviderView, CatalogError> {
    let categories = tags::load(conn, TagJoin::Provider, &row.id).await?;
    let environments = fetch_rows::<DbEnvironment>(
        conn,
        EntityKind::Environment,
        &[("provider_id", Some(row.id.as_str()))],
    )
    .await?
    .into_iter()
    .map(Environment::from)
    .collect();

    let service_rows =
        fetch_rows::<DbService>(conn, EntityKind::Service, &[("provider_id", Some(row.id.as_str()))])
            .await?;
    let mut services = Vec::with_capacity(service_rows.len());
    for service in service_rows {
        services.push(service_view(conn, service).await?);
    }

    Ok(ProviderView {
        provider: Provider::from(row),
        categories,
        environments,
        services,
    })
}

pub(crate) async fn service_view(
    conn: &mut SqliteConnection,
    row: DbService,
) -> Result<ServiceView, CatalogError> {
    let api_rows =
        fetch_rows::<DbApi>(conn, EntityKind::Api, &[("service_id", Some(row.id.as_str()))])
            .await?;
    let mut apis = Vec::with_capacity(api_rows.len());
    for api in api_rows {
        apis.push(api_view(conn, api).await?);
    }
    Ok(ServiceView {
        service: row.into(),
        apis,
    })
}

pub(crate) async fn api_view(
    conn: &mut SqliteConnection,
    row: DbApi,
) -> Result<ApiView, CatalogError> {
    let categories = tags::load(conn, TagJoin::Api, &row.id).await?;
    let endpoint_rows =
        fetch_rows::<DbEndpoint>(conn, EntityKind::Endpoint, &[("api_id", Some(row.id.as_str()))])
            .await?;
    let mut endpoints = Vec::with_capacity(endpoint_rows.len());
    for endpoint in endpoint_rows {
        endpoints.push(endpoint_view(conn, endpoint).await?);
    }
    Ok(ApiView {
        api: row.into(),
        categories,
        endpoints,
    })
}

pub(crate) async fn endpoint_view(
    conn: &mut SqliteConnection,
    row: DbEndpoint,
) -> Result<EndpointView, CatalogError> {
    let operation_rows = fetch_rows::<DbOperation>(
        conn,
        EntityKind::Operation,
        &[("endpoint_id", Some(row.id.as_str()))],
    )
    .await?;
    let mut operations = Vec::with_capacity(operation_rows.len());
    for operation in operation_rows {
        operations.push(operation_view(conn, operation).await?);
    }
    Ok(EndpointView {
        endpoint: row.into(),
        operations,
    })
}

/// Leaf level: parameters and response schemas need no further joins.
pub(crate) async fn operation_view(
    conn: &mut SqliteConnection,
    row: DbOperation,
) -> Result<OperationView, CatalogError> {
    let owner = [("operation_id", Some(row.id.as_str()))];
    let parameters = fetch_rows::<DbParameter>(conn, EntityKind::Parameter, &owner)
        .await?
        .into_iter()
        .map(Parameter::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let response_schemas = fetch_rows::<DbResponseSchema>(conn, EntityKind::ResponseSchema, &owner)
        .await?
        .into_iter()
        .map(ResponseSchema::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OperationView {
        operation: row.into(),
        parameters,
        response_schemas,
    })
}

/// Assembled view of one row, or `None` when the id is unknown.
pub(crate) async fn record(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<Option<CatalogRecord>, CatalogError> {
    let record = match kind {
        EntityKind::Category => fetch_row::<DbCategory>(conn, kind, id)
            .await?
            .map(|row| CatalogRecord::Category(row.into())),
        EntityKind::Provider => match fetch_row::<DbProvider>(conn, kind, id).await? {
            Some(row) => Some(CatalogRecord::Provider(provider_view(conn, row).await?)),
            None => None,
        },
        EntityKind::Environment => fetch_row::<DbEnvironment>(conn, kind, id)
            .await?
            .map(|row| CatalogRecord::Environment(row.into())),
        EntityKind::Service => match fetch_row::<DbService>(conn, kind, id).await? {
            Some(row) => Some(CatalogRecord::Service(service_view(conn, row).await?)),
            None => None,
        },
        EntityKind::Api => match fetch_row::<DbApi>(conn, kind, id).await? {
            Some(row) => Some(CatalogRecord::Api(api_view(conn, row).await?)),
            None => None,
        },
        EntityKind::Endpoint => match fetch_row::<DbEndpoint>(conn, kind, id).await? {
            Some(row) => Some(CatalogRecord::Endpoint(endpoint_view(conn, row).await?)),
            None => None,
        },
        EntityKind::Operation => match fetch_row::<DbOperation>(conn, kind, id).await? {
            Some(row) => Some(CatalogRecord::Operation(operation_view(conn, row).await?)),
            None => None,
        },
        EntityKind::Parameter => match fetch_row::<DbParameter>(conn, kind, id).await? {
            Some(row) => Some(CatalogRecord::Parameter(row.try_into()?)),
            None => None,
        },
        EntityKind::ResponseSchema => {
            match fetch_row::<DbResponseSchema>(conn, kind, id).await? {
                Some(row) => Some(CatalogRecord::ResponseSchema(row.try_into()?)),
                None => None,
            }
        }
    };
    Ok(record)
}

/// Like [`record`], but a missing row is `NotFound`.
pub(crate) async fn require_record(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<CatalogRecord, CatalogError> {
    record(conn, kind, id)
        .await?
        .ok_or_else(|| CatalogError::not_found(kind, id))
}

/// Categories sorted by name, ignoring ASCII case.
pub(crate) async fn list_categories(
    conn: &mut SqliteConnection,
) -> Result<Vec<Category>, CatalogError> {
    let rows = sqlx::query_as::<_, DbCategory>(
        "SELECT * FROM categories ORDER BY name COLLATE NOCASE, rowid",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(Category::from).collect())
}

/// Providers in insertion order. `search` keeps only rows whose name,
/// short code or website contains it, ignoring case.
pub(crate) async fn list_providers(
    conn: &mut SqliteConnection,
    search: Option<&str>,
) -> Result<Vec<ProviderView>, CatalogError> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let rows = fetch_rows::<DbProvider>(conn, EntityKind::Provider, &[]).await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(needle) = needle.as_deref() {
            if !crate::db::search::provider_matches(&row, needle) {
                continue;
            }
        }
        views.push(provider_view(conn, row).await?);
    }
    Ok(views)
}

pub(crate) async fn list_environments(
    conn: &mut SqliteConnection,
    filter: ListFilter<'_>,
) -> Result<Vec<Environment>, CatalogError> {
    let rows = fetch_rows::<DbEnvironment>(
        conn,
        EntityKind::Environment,
        &[("provider_id", filter.provider_id)],
    )
    .await?;
    Ok(rows.into_iter().map(Environment::from).collect())
}

pub(crate) async fn list_services(
    conn: &mut SqliteConnection,
    filter: ListFilter<'_>,
) -> Result<Vec<ServiceView>, CatalogError> {
    let rows = fetch_rows::<DbService>(
        conn,
        EntityKind::Service,
        &[("provider_id", filter.provider_id)],
    )
    .await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(service_view(conn, row).await?);
    }
    Ok(views)
}

pub(crate) async fn list_apis(
    conn: &mut SqliteConnection,
    filter: ListFilter<'_>,
) -> Result<Vec<ApiView>, CatalogError> {
    let rows = fetch_rows::<DbApi>(
        conn,
        EntityKind::Api,
        &[
            ("service_id", filter.service_id),
            ("provider_id", filter.provider_id),
        ],
    )
    .await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(api_view(conn, row).await?);
    }
    Ok(views)
}

pub(crate) async fn list_endpoints(
    conn: &mut SqliteConnection,
    filter: ListFilter<'_>,
) -> Result<Vec<EndpointView>, CatalogError> {
    let rows =
        fetch_rows::<DbEndpoint>(conn, EntityKind::Endpoint, &[("api_id", filter.api_id)]).await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(endpoint_view(conn, row).await?);
    }
    Ok(views)
}

pub(crate) async fn list_operations(
    conn: &mut SqliteConnection,
    filter: ListFilter<'_>,
) -> Result<Vec<OperationView>, CatalogError> {
    let rows = fetch_rows::<DbOperation>(
        conn,
        EntityKind::Operation,
        &[("endpoint_id", filter.endpoint_id)],
    )
    .await?;
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(operation_view(conn, row).await?);
    }
    Ok(views)
}

pub(crate) async fn list_parameters(
    conn: &mut SqliteConnection,
    filter: ListFilter<'_>,
) -> Result<Vec<Parameter>, CatalogError> {
    fetch_rows::<DbParameter>(
        conn,
        EntityKind::Parameter,
        &[("operation_id", filter.operation_id)],
    )
    .await?
    .into_iter()
    .map(Parameter::try_from)
    .collect()
}

pub(crate) async fn list_response_schemas(
    conn: &mut SqliteConnection,
    filter: ListFilter<'_>,
) -> Result<Vec<ResponseSchema>, CatalogError> {
    fetch_rows::<DbResponseSchema>(
        conn,
        EntityKind::ResponseSchema,
        &[("operation_id", filter.operation_id)],
    )
    .await?
    .into_iter()
    .map(ResponseSchema::try_from)
    .collect()
}

/// Whole-catalog snapshot. Endpoints are flattened out of their trees and
/// carry their API and provider rows when those still resolve.
pub(crate) async fn export_snapshot(
    conn: &mut SqliteConnection,
) -> Result<ExportSnapshot, CatalogError> {
    let categories = list_categories(conn).await?;
    let providers = list_providers(conn, None).await?;
    let apis = list_apis(conn, ListFilter::default()).await?;

    let endpoint_rows = fetch_rows::<DbEndpoint>(conn, EntityKind::Endpoint, &[]).await?;
    let mut endpoints = Vec::with_capacity(endpoint_rows.len());
    for row in endpoint_rows {
        let api: Option<Api> = fetch_row::<DbApi>(conn, EntityKind::Api, &row.api_id)
            .await?
            .map(Api::from);
        let provider = match api.as_ref() {
            Some(api) => fetch_row::<DbProvider>(conn, EntityKind::Provider, &api.provider_id)
                .await?
                .map(Provider::from),
            None => None,
        };
        endpoints.push(ExportedEndpoint {
            endpoint: endpoint_view(conn, row).await?,
            api,
            provider,
        });
    }

    Ok(ExportSnapshot {
        categories,
        providers,
        apis,
        endpoints,
    })
}
