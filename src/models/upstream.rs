//! Upstream DTOs
//!
//! Shapes of the payloads consumed from the regulatory API. The contract is
//! fixed and not owned by this service; unknown fields on titles are preserved
//! verbatim so responses stay faithful to the upstream document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope of `GET /api/versioner/v1/titles.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitlesResponse {
    /// All CFR titles known upstream
    pub titles: Vec<Title>,
}

/// A single CFR title as reported upstream, plus the derived word count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    /// Title number (1-50)
    pub number: u32,
    /// Human-readable title name
    pub name: String,
    /// Date of the most recent published issue, `YYYY-MM-DD`
    #[serde(default)]
    pub latest_issue_date: Option<String>,
    /// Derived approximate word count; 0 when the document was unavailable
    #[serde(default)]
    pub word_count: u64,
    /// Remaining upstream fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope of `GET /api/versioner/v1/versions/title-{n}.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionsResponse {
    /// Amendment history for the title
    #[serde(default)]
    pub content_versions: Vec<AmendmentRecord>,
}

/// One amendment to a title. Records without a date are excluded from
/// churn aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct AmendmentRecord {
    /// Date the amendment took effect, `YYYY-MM-DD`
    #[serde(default)]
    pub amendment_date: Option<String>,
}
