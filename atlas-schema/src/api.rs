use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Api {
    pub id: String,
    pub service_id: String,
    /// Always the provider of `service_id`; kept on the row to skip a join.
    pub provider_id: String,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub base_path: Option<String>,
    pub auth_type: Option<String>,
    pub rate_limit: Option<String>,
    pub supported_formats: Vec<String>,
    pub api_design_style: Option<String>,
    pub documentation_url: Option<String>,
    pub swagger_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: String,
    pub api_id: String,
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
