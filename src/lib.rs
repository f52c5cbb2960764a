//! eCFR Proxy - A read-through caching proxy for eCFR regulatory data
//!
//! Fans out to the public eCFR API, aggregates and transforms responses
//! (XML paragraph extraction, tokenization, word-frequency counting, per-year
//! amendment bucketing), and serves results through a TTL-bounded cache.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod tasks;
pub mod text;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
