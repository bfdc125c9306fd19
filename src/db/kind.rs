use serde::Serialize;
use std::fmt;

/// Every entity type the catalog stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Category,
    Provider,
    Environment,
    Service,
    Api,
    Endpoint,
    Operation,
    Parameter,
    ResponseSchema,
}

impl EntityKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Category => "categories",
            EntityKind::Provider => "providers",
            EntityKind::Environment => "environments",
            EntityKind::Service => "services",
            EntityKind::Api => "apis",
            EntityKind::Endpoint => "endpoints",
            EntityKind::Operation => "operations",
            EntityKind::Parameter => "parameters",
            EntityKind::ResponseSchema => "response_schemas",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Provider => "provider",
            EntityKind::Environment => "environment",
            EntityKind::Service => "service",
            EntityKind::Api => "api",
            EntityKind::Endpoint => "endpoint",
            EntityKind::Operation => "operation",
            EntityKind::Parameter => "parameter",
            EntityKind::ResponseSchema => "responseSchema",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EntityKind::Category => "Category",
            EntityKind::Provider => "Provider",
            EntityKind::Environment => "Environment",
            EntityKind::Service => "Service",
            EntityKind::Api => "API",
            EntityKind::Endpoint => "Endpoint",
            EntityKind::Operation => "Operation",
            EntityKind::Parameter => "Parameter",
            EntityKind::ResponseSchema => "Response schema",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
