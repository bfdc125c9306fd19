//! Rendering of the export snapshot into a downloadable file body.

use atlas_schema::{ExportSnapshot, ProviderView};
use std::str::FromStr;

use crate::error::CatalogError;

const CSV_HEADER: &str = "Provider Name,Short Code,Website,APIs Count,Categories";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(CatalogError::invalid(
                "format",
                format!("unsupported export format {other:?}, expected json or csv"),
            )),
        }
    }
}

/// Serializes the snapshot in `format`.
pub fn render(snapshot: &ExportSnapshot, format: ExportFormat) -> Result<String, CatalogError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        ExportFormat::Csv => Ok(render_csv(&snapshot.providers)),
    }
}

/// One row per provider; lines joined by `\n` with no trailing newline.
pub fn render_csv(providers: &[ProviderView]) -> String {
    let mut lines = Vec::with_capacity(providers.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for view in providers {
        let categories = view
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "{},{},{},{},{}",
            quote(&view.provider.name),
            quote(&view.provider.short_code),
            quote(&view.provider.website_url),
            view.api_count(),
            quote(&categories),
        ));
    }
    lines.join("\n")
}

/// RFC 4180 field quoting: always wrapped, embedded quotes doubled.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        let err = "xml".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.invalid_fields(), vec!["format"]);
    }

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(quote("FR24"), "\"FR24\"");
        assert_eq!(quote("The \"Best\" Feed"), "\"The \"\"Best\"\" Feed\"");
        assert_eq!(quote("a, b"), "\"a, b\"");
    }

    #[test]
    fn empty_catalog_is_header_only() {
        assert_eq!(render_csv(&[]), CSV_HEADER);
    }
}
