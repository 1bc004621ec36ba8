//! Request settings types.
//!
//! [`RequestSettings`] is the free-form settings object sent alongside a
//! document. Values are kept as raw strings so that an unrecognized speed
//! mode or domain is a validation warning rather than a parse failure; the
//! [`SettingsValidator`](super::validation::SettingsValidator) resolves them
//! into a [`SummarizerConfig`](crate::types::SummarizerConfig).
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "speedMode": "balanced",
//!   "domain": "academic",
//!   "useAbstractive": false,
//!   "summaryMode": "separate",
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Settings for a single or batch summarization request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSettings {
    #[serde(default)]
    pub speed_mode: Option<String>,

    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default)]
    pub use_abstractive: Option<bool>,

    /// Batch only: `"separate"` or `"merged"`.
    #[serde(default)]
    pub summary_mode: Option<String>,

    /// MMR relevance/diversity trade-off override.
    #[serde(default)]
    pub mmr_lambda: Option<f64>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl RequestSettings {
    /// Parse settings from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How a batch of documents is summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// One result per document
    #[default]
    Separate,
    /// Per-document results plus one summary of all documents combined
    Merged,
}

impl SummaryMode {
    pub fn try_parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "separate" => Some(SummaryMode::Separate),
            "merged" => Some(SummaryMode::Merged),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Separate => "separate",
            Self::Merged => "merged",
        }
    }
}
