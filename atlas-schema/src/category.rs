use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shared tag applied to providers and APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Name in the catalog's secondary language.
    #[serde(alias = "nameAr")]
    pub name_localized: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "descriptionAr")]
    pub description_localized: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
