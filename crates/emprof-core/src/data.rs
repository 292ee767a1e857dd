//! Enrichment payload types.
//!
//! The provider's response is untrusted: every field is optional, wrong or
//! missing sub-fields are never an error, and unknown keys are preserved
//! through the flattened `extra` maps so exports round-trip the payload
//! verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured brand payload attached to a completed profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logos: Vec<Logo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<BrandColor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<BrandFont>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<BrandLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileData {
    /// Payload recorded when the provider responds but the body is not
    /// JSON: a bare `{"success": true}` marker. Network-level success is
    /// still treated as logical success.
    #[must_use]
    pub fn degenerate_success() -> Self {
        let mut extra = Map::new();
        extra.insert("success".to_owned(), Value::Bool(true));
        ProfileData {
            extra,
            ..ProfileData::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Logo {
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<LogoFormat>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandFont {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[path = "data_test.rs"]
mod tests;
