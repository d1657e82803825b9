//! Settings Model

use serde::{Deserialize, Serialize};

/// Admin-level application settings from `/settings`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

/// Company-wide policy document from `/company-settings`
///
/// Sections (work hours, overrides, holidays) are edited field by field
/// and written back whole, so the document stays untyped.
pub type CompanySettings = serde_json::Map<String, serde_json::Value>;
