//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::path::PathBuf;

// == Cache Backend Kind ==
/// Selects which cache backend the orchestrator is wired with.
///
/// The two backends are caller-indistinguishable apart from restart survival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    /// In-process HashMap, cleared on restart
    Memory,
    /// One JSON file per key, survives restarts
    File,
}

impl CacheBackendKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Some(CacheBackendKind::Memory),
            "file" => Some(CacheBackendKind::File),
            _ => None,
        }
    }
}

// == Config ==
/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream regulatory API
    pub upstream_base_url: String,
    /// Per-request upstream timeout in seconds
    pub upstream_timeout: u64,
    /// Which cache backend to use
    pub cache_backend: CacheBackendKind,
    /// Directory for the file backend's per-key JSON files
    pub cache_dir: PathBuf,
    /// Shared TTL in seconds for all cache entries
    pub cache_ttl: u64,
    /// Background expired-entry purge interval in seconds
    pub cleanup_interval: u64,
    /// Fixed chunk size in bytes for streamed upstream bodies
    pub chunk_size: usize,
    /// Ceiling on chunks consumed by the streaming word count
    pub max_chunks: usize,
    /// Filtered-token count above which frequency counting samples down
    pub sampling_threshold: usize,
    /// Empirical correction factor applied to raw streamed token counts
    pub scaling_factor: f64,
    /// Number of (word, count) pairs returned by the frequency aggregator
    pub top_words: usize,
    /// Optional RNG seed making frequency sampling deterministic
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `UPSTREAM_BASE_URL` - Upstream API root (default: https://www.ecfr.gov)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 30)
    /// - `CACHE_BACKEND` - "memory" or "file" (default: memory)
    /// - `CACHE_DIR` - File backend directory (default: cache)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 300)
    /// - `CHUNK_SIZE` - Stream chunk size in bytes (default: 8192)
    /// - `MAX_CHUNKS` - Streaming word-count chunk ceiling (default: 500)
    /// - `SAMPLING_THRESHOLD` - Frequency sampling cap (default: 250000)
    /// - `SCALING_FACTOR` - Streaming count correction factor (default: 0.2)
    /// - `TOP_WORDS` - Frequency result length (default: 50)
    /// - `RNG_SEED` - Optional sampling seed (default: unset)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://www.ecfr.gov".to_string()),
            upstream_timeout: env::var("UPSTREAM_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            cache_backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| CacheBackendKind::parse(&v))
                .unwrap_or(CacheBackendKind::Memory),
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("cache")),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            chunk_size: env::var("CHUNK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8192),
            max_chunks: env::var("MAX_CHUNKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            sampling_threshold: env::var("SAMPLING_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250_000),
            scaling_factor: env::var("SCALING_FACTOR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.2),
            top_words: env::var("TOP_WORDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            rng_seed: env::var("RNG_SEED").ok().and_then(|v| v.parse().ok()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            upstream_base_url: "https://www.ecfr.gov".to_string(),
            upstream_timeout: 30,
            cache_backend: CacheBackendKind::Memory,
            cache_dir: PathBuf::from("cache"),
            cache_ttl: 3600,
            cleanup_interval: 300,
            chunk_size: 8192,
            max_chunks: 500,
            sampling_threshold: 250_000,
            scaling_factor: 0.2,
            top_words: 50,
            rng_seed: None,
        }
    }
}
