//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes one table per catalog entity plus the two
/// category join tables (`provider_categories`, `api_categories`).
///
/// There are no foreign keys: cascades are issued explicitly by the store.
/// List and JSON columns hold serialized JSON text.
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Categories (shared tag taxonomy)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_localized TEXT NULL,
    description TEXT NULL,
    description_localized TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name);

-- ---------------------------------------------------------------------------
-- Providers
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS providers (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    short_code TEXT NOT NULL UNIQUE,
    website_url TEXT NOT NULL,
    logo_url TEXT NULL,
    documentation_url TEXT NULL,
    geographic_coverage TEXT NULL,
    data_sources TEXT NOT NULL DEFAULT '[]', -- JSON array
    historical_data_available INTEGER NOT NULL DEFAULT 0,
    historical_data_depth TEXT NULL,
    realtime_latency TEXT NULL,
    data_granularity TEXT NULL,
    data_completeness TEXT NULL,
    data_refresh_rate TEXT NULL,
    uptime_guarantee TEXT NULL,
    service_level_agreement TEXT NULL,
    support_channels TEXT NOT NULL DEFAULT '[]', -- JSON array
    maintenance_windows TEXT NULL,
    incident_response_time TEXT NULL,
    pricing_model TEXT NULL,
    free_tier_available INTEGER NOT NULL DEFAULT 0,
    compliance_standards TEXT NOT NULL DEFAULT '[]', -- JSON array
    data_retention_policy TEXT NULL,
    privacy_policy TEXT NULL,
    terms_of_service TEXT NULL,
    contact_info TEXT NULL, -- JSON
    support_email TEXT NULL,
    sales_contact TEXT NULL,
    technical_contact TEXT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS provider_categories (
    provider_id TEXT NOT NULL,
    category_id TEXT NOT NULL,
    UNIQUE(provider_id, category_id)
);

CREATE INDEX IF NOT EXISTS idx_provider_categories_category ON provider_categories(category_id);

-- ---------------------------------------------------------------------------
-- Environments and services (children of a provider)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS environments (
    id TEXT PRIMARY KEY NOT NULL,
    provider_id TEXT NOT NULL,
    name TEXT NOT NULL,
    display_name TEXT NOT NULL,
    base_url TEXT NOT NULL,
    description TEXT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_environments_provider ON environments(provider_id);

CREATE TABLE IF NOT EXISTS services (
    id TEXT PRIMARY KEY NOT NULL,
    provider_id TEXT NOT NULL,
    name TEXT NOT NULL,
    display_name TEXT NOT NULL,
    description TEXT NULL,
    icon TEXT NULL,
    version TEXT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_services_provider ON services(provider_id);

-- ---------------------------------------------------------------------------
-- APIs (provider_id always equals the owning service's provider_id)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS apis (
    id TEXT PRIMARY KEY NOT NULL,
    service_id TEXT NOT NULL,
    provider_id TEXT NOT NULL,
    name TEXT NOT NULL,
    display_name TEXT NOT NULL,
    description TEXT NULL,
    version TEXT NULL,
    base_path TEXT NULL,
    auth_type TEXT NULL,
    rate_limit TEXT NULL,
    supported_formats TEXT NOT NULL DEFAULT '[]', -- JSON array
    api_design_style TEXT NULL,
    documentation_url TEXT NULL,
    swagger_url TEXT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_apis_service ON apis(service_id);
CREATE INDEX IF NOT EXISTS idx_apis_provider ON apis(provider_id);

CREATE TABLE IF NOT EXISTS api_categories (
    api_id TEXT NOT NULL,
    category_id TEXT NOT NULL,
    UNIQUE(api_id, category_id)
);

CREATE INDEX IF NOT EXISTS idx_api_categories_category ON api_categories(category_id);

-- ---------------------------------------------------------------------------
-- Endpoints and operations
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS endpoints (
    id TEXT PRIMARY KEY NOT NULL,
    api_id TEXT NOT NULL,
    name TEXT NOT NULL,
    path TEXT NOT NULL,
    description TEXT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_endpoints_api ON endpoints(api_id);

CREATE TABLE IF NOT EXISTS operations (
    id TEXT PRIMARY KEY NOT NULL,
    endpoint_id TEXT NOT NULL,
    method TEXT NOT NULL,
    operation_id TEXT NULL, -- caller-facing operation name
    summary TEXT NULL,
    description TEXT NULL,
    auth_required INTEGER NOT NULL DEFAULT 1,
    scopes TEXT NOT NULL DEFAULT '[]', -- JSON array
    rate_limit TEXT NULL,
    default_response_format TEXT NOT NULL DEFAULT 'json',
    cacheable INTEGER NOT NULL DEFAULT 0,
    cache_time INTEGER NULL, -- seconds
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_operations_endpoint ON operations(endpoint_id);

-- ---------------------------------------------------------------------------
-- Operation leaves: parameters and response schemas
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS parameters (
    id TEXT PRIMARY KEY NOT NULL,
    operation_id TEXT NOT NULL,
    name TEXT NOT NULL,
    param_type TEXT NOT NULL,
    location TEXT NOT NULL, -- query | path | header | body
    description TEXT NULL,
    required INTEGER NOT NULL DEFAULT 0,
    default_value TEXT NULL,
    example TEXT NULL,
    format TEXT NULL,
    pattern TEXT NULL,
    min_length INTEGER NULL,
    max_length INTEGER NULL,
    minimum INTEGER NULL,
    maximum INTEGER NULL,
    enum_values TEXT NOT NULL DEFAULT '[]', -- JSON array
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_parameters_operation ON parameters(operation_id);

CREATE TABLE IF NOT EXISTS response_schemas (
    id TEXT PRIMARY KEY NOT NULL,
    operation_id TEXT NOT NULL,
    status_code INTEGER NOT NULL,
    media_type TEXT NOT NULL DEFAULT 'application/json',
    schema TEXT NULL, -- JSON
    description TEXT NULL,
    example TEXT NULL, -- JSON
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_response_schemas_operation ON response_schemas(operation_id);
"#;
