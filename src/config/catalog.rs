use serde::{Deserialize, Serialize};

/// Catalog behaviour managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Load the sample aviation catalog at startup when no provider exists.
    /// TOML: `catalog.seed_sample_data`. Default: `false`.
    #[serde(default)]
    pub seed_sample_data: bool,

    /// File name (without extension) offered by `/export`.
    /// TOML: `catalog.export_file_stem`. Default: `api-catalog`.
    #[serde(default = "default_export_file_stem")]
    pub export_file_stem: String,

    /// Origins allowed by the CORS layer; empty disables it.
    /// TOML: `catalog.cors_allow_origins`. Default: `[]`.
    #[serde(default)]
    pub cors_allow_origins: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: false,
            export_file_stem: default_export_file_stem(),
            cors_allow_origins: Vec::new(),
        }
    }
}

fn default_export_file_stem() -> String {
    "api-catalog".to_string()
}
