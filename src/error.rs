//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror. Every failure mode maps to a
//! degraded-but-valid response; nothing here is fatal to the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error Enum ==
/// Failures talking to the upstream regulatory API.
///
/// Both variants are recoverable: callers treat them as "upstream unavailable"
/// and fall back to a zero count, an empty map, or an `{error}` body.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, broken stream)
    #[error("upstream transport failure: {0}")]
    Transport(String),

    /// Upstream answered with a non-200 status
    #[error("upstream returned status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

// == Extract Error Enum ==
/// Failures extracting paragraph text from an upstream XML document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Malformed XML
    #[error("xml parse failure: {0}")]
    Xml(#[from] quick_xml::Error),
}

// == Cache Error Enum ==
/// Failures inside a cache backend.
///
/// Never surfaced to HTTP callers: the orchestrator logs a write failure and
/// serves the freshly computed result anyway.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Disk I/O failure on the persistent backend
    #[error("cache i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Cached payload could not be encoded or decoded
    #[error("cache serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Proxy Error Enum ==
/// Unified error type for the proxy operations exposed to the HTTP layer.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Upstream fetch failed for the whole operation
    #[error("failed to fetch upstream data: {0}")]
    Upstream(#[from] FetchError),

    /// Upstream payload did not match the expected contract
    #[error("failed to decode upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Upstream XML document could not be parsed
    #[error("failed to parse upstream document: {0}")]
    Parse(#[from] ExtractError),

    /// Requested title number does not exist upstream
    #[error("unknown title: {0}")]
    UnknownTitle(u32),

    /// Title exists but carries no issue date to resolve a document against
    #[error("no issue date recorded for title {0}")]
    NoIssueDate(u32),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Decode(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Parse(_) => StatusCode::BAD_GATEWAY,
            ProxyError::UnknownTitle(_) => StatusCode::NOT_FOUND,
            ProxyError::NoIssueDate(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for proxy operations.
pub type Result<T> = std::result::Result<T, ProxyError>;
