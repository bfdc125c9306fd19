//! Catalog store: schema, rows, writes and relation assembly.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `models.rs`: Rust structs mirroring DB rows
//! - `patch.rs`: create/patch payloads and their envelopes
//! - `actor.rs`: single-writer actor plus the cloneable handle
//! - `assemble.rs`, `search.rs`: read paths building nested views

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;

mod assemble;
mod cascade;
mod insert;
mod kind;
mod patch_impl;
mod record;
mod search;
mod tags;
mod validate;

pub use actor::{DbActorHandle, spawn};
pub use assemble::ListFilter;
pub use kind::EntityKind;
pub use patch::{
    ApiCreate, ApiPatch, CategoryCreate, CategoryPatch, DbPatchable, EndpointCreate,
    EndpointPatch, EntityCreate, EntityPatch, EnvironmentCreate, EnvironmentPatch,
    OperationCreate, OperationPatch, ParameterCreate, ParameterPatch, ProviderCreate,
    ProviderPatch, ResponseSchemaCreate, ResponseSchemaPatch, ServiceCreate, ServicePatch,
};
pub use record::CatalogRecord;
pub use schema::SQLITE_INIT;
