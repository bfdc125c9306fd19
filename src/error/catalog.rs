use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error as ThisError;

use crate::db::EntityKind;

/// One rejected input field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidField {
    pub field: String,
    pub reason: String,
}

impl InvalidField {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, "required")
    }
}

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("Validation failed: {}", describe_fields(.fields))]
    Validation { fields: Vec<InvalidField> },

    #[error("{entity} not found for id={id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl CatalogError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CatalogError::Validation {
            fields: vec![InvalidField::new(field, reason)],
        }
    }

    /// Names of the offending fields, when this is a validation failure.
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            CatalogError::Validation { fields } => {
                fields.iter().map(|f| f.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn describe_fields(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(|f| format!("{} ({})", f.field, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            CatalogError::Validation { fields } => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorObject {
                    code: "VALIDATION_ERROR".to_string(),
                    message: format!("Invalid input: {}", describe_fields(&fields)),
                    details: Some(json!({ "fields": fields })),
                };
                (status, body)
            }

            CatalogError::InvalidBody(message) => {
                let status = StatusCode::BAD_REQUEST;
                let body = ApiErrorObject {
                    code: "INVALID_BODY".to_string(),
                    message,
                    details: None,
                };
                (status, body)
            }

            CatalogError::NotFound { entity, id } => {
                let status = StatusCode::NOT_FOUND;
                let body = ApiErrorObject {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{entity} not found."),
                    details: Some(json!({ "entity": entity.as_str(), "id": id })),
                };
                (status, body)
            }

            CatalogError::DatabaseError(_)
            | CatalogError::RactorError(_)
            | CatalogError::JsonError(_)
            | CatalogError::UnexpectedError(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                };
                (status, body)
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
