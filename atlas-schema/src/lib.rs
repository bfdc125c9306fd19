//! Wire types for the atlas catalog.
//!
//! Flat entity rows live in one module per branch of the hierarchy; the
//! assembled relation trees, search results and export snapshot are built
//! on top of them.

pub mod api;
pub mod category;
pub mod export;
pub mod operation;
pub mod provider;
pub mod search;
pub mod service;
pub mod tree;

pub use api::{Api, Endpoint};
pub use category::Category;
pub use export::{ExportSnapshot, ExportedEndpoint};
pub use operation::{Operation, Parameter, ParameterLocation, ResponseSchema};
pub use provider::Provider;
pub use search::SearchResults;
pub use service::{Environment, Service};
pub use tree::{ApiView, EndpointView, OperationView, ProviderView, ServiceView};
