mod catalog;

pub use catalog::{ApiErrorBody, ApiErrorObject, CatalogError, InvalidField};
