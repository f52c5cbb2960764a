//! Data Models
//!
//! Serde DTOs for upstream payloads and the shapes this proxy serves.

pub mod responses;
pub mod upstream;

pub use responses::{ChurnResult, ErrorResponse, HealthResponse, PingResponse, WordFrequency};
pub use upstream::{AmendmentRecord, Title, TitlesResponse, VersionsResponse};
