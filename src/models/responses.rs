//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

/// One (word, count) pair produced by the frequency aggregator.
///
/// Serialized as a two-element array so the wire shape matches the
/// `[["word", count], ...]` lists consumers already expect.
pub type WordFrequency = (String, u64);

/// Per-title amendment churn, bucketed by calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct ChurnResult {
    /// Title number
    pub title_number: u32,
    /// Title name
    pub title_name: String,
    /// Year string ("2020") to amendment count; empty when the title's
    /// amendment history was unavailable
    pub changes_per_year: BTreeMap<String, u64>,
}

/// Response body for the liveness endpoint (GET /ping)
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    /// Fixed liveness message
    pub message: String,
}

impl PingResponse {
    /// Creates the canonical pong response
    pub fn pong() -> Self {
        Self {
            message: "pong!".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
