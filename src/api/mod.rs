//! API Module
//!
//! HTTP handlers and routing for the proxy's REST surface.
//!
//! # Endpoints
//! - `GET /ping` - Liveness check
//! - `GET /health` - Health status with timestamp
//! - `GET /titles` - Raw upstream titles document
//! - `GET /words_by_title` - Titles with approximate word counts
//! - `GET /regulation_churn` - Per-title amendment churn by year
//! - `GET /common_words_by_title?title=N` - Top words for one title

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
