//! atlas: a catalog of API providers, their services, APIs, endpoints and
//! operations, with category tagging, free-text search and bulk export.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod seed;
pub mod server;

pub use db::{DbActorHandle, EntityKind};
pub use error::CatalogError;
