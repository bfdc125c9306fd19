use atlas_schema::{
    ApiView, Category, EndpointView, Environment, OperationView, Parameter, ProviderView,
    ResponseSchema, ServiceView,
};
use serde::Serialize;

use crate::db::EntityKind;
use crate::error::CatalogError;

/// Assembled view of any single entity, as returned by the writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogRecord {
    Category(Category),
    Provider(ProviderView),
    Environment(Environment),
    Service(ServiceView),
    Api(ApiView),
    Endpoint(EndpointView),
    Operation(OperationView),
    Parameter(Parameter),
    ResponseSchema(ResponseSchema),
}

impl CatalogRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            CatalogRecord::Category(_) => EntityKind::Category,
            CatalogRecord::Provider(_) => EntityKind::Provider,
            CatalogRecord::Environment(_) => EntityKind::Environment,
            CatalogRecord::Service(_) => EntityKind::Service,
            CatalogRecord::Api(_) => EntityKind::Api,
            CatalogRecord::Endpoint(_) => EntityKind::Endpoint,
            CatalogRecord::Operation(_) => EntityKind::Operation,
            CatalogRecord::Parameter(_) => EntityKind::Parameter,
            CatalogRecord::ResponseSchema(_) => EntityKind::ResponseSchema,
        }
    }
}

macro_rules! record_conversions {
    ($($variant:ident => $view:ty),* $(,)?) => {
        $(
            impl TryFrom<CatalogRecord> for $view {
                type Error = CatalogError;

                fn try_from(record: CatalogRecord) -> Result<Self, Self::Error> {
                    match record {
                        CatalogRecord::$variant(view) => Ok(view),
                        other => Err(CatalogError::UnexpectedError(format!(
                            "expected {} record, got {}",
                            EntityKind::$variant.as_str(),
                            other.kind().as_str()
                        ))),
                    }
                }
            }
        )*
    };
}

record_conversions! {
    Category => Category,
    Provider => ProviderView,
    Environment => Environment,
    Service => ServiceView,
    Api => ApiView,
    Endpoint => EndpointView,
    Operation => OperationView,
    Parameter => Parameter,
    ResponseSchema => ResponseSchema,
}
