use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level catalog entry: an organisation exposing one or more APIs.
///
/// Apart from `name`, `short_code` and `website_url` every attribute is
/// descriptive metadata with no validated structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub short_code: String,
    pub website_url: String,
    pub logo_url: Option<String>,
    pub documentation_url: Option<String>,

    // Coverage
    pub geographic_coverage: Option<String>,
    pub data_sources: Vec<String>,
    pub historical_data_available: bool,
    pub historical_data_depth: Option<String>,
    pub realtime_latency: Option<String>,
    pub data_granularity: Option<String>,
    pub data_completeness: Option<String>,
    pub data_refresh_rate: Option<String>,

    // Reliability
    pub uptime_guarantee: Option<String>,
    pub service_level_agreement: Option<String>,
    pub support_channels: Vec<String>,
    pub maintenance_windows: Option<String>,
    pub incident_response_time: Option<String>,

    // Business and compliance
    pub pricing_model: Option<String>,
    pub free_tier_available: bool,
    pub compliance_standards: Vec<String>,
    pub data_retention_policy: Option<String>,
    pub privacy_policy: Option<String>,
    pub terms_of_service: Option<String>,

    // Contact
    pub contact_info: Option<Value>,
    pub support_email: Option<String>,
    pub sales_contact: Option<String>,
    pub technical_contact: Option<String>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
