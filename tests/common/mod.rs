//! Shared test fixtures: a call-counting mock upstream and state builders.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use serde_json::{json, Value};

use ecfr_proxy::cache::{self, MemoryCache, SharedCache};
use ecfr_proxy::error::FetchError;
use ecfr_proxy::pipeline::Pipeline;
use ecfr_proxy::upstream::{ByteStream, UpstreamClient};
use ecfr_proxy::{AppState, Config};

// == Mock Upstream ==

/// In-memory upstream with per-method call counters, so tests can assert
/// exactly how many fetches an operation performed.
#[derive(Default)]
pub struct MockUpstream {
    json_calls: AtomicUsize,
    stream_calls: AtomicUsize,
    json_responses: HashMap<String, Value>,
    stream_bodies: HashMap<String, Vec<u8>>,
    failing_paths: HashSet<String>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, value: Value) -> Self {
        self.json_responses.insert(path.to_string(), value);
        self
    }

    pub fn with_body(mut self, path: &str, body: &[u8]) -> Self {
        self.stream_bodies.insert(path.to_string(), body.to_vec());
        self
    }

    /// Makes both fetch kinds fail for `path` with a transport error.
    pub fn with_failure(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    pub fn json_call_count(&self) -> usize {
        self.json_calls.load(Ordering::SeqCst)
    }

    pub fn stream_call_count(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamClient for MockUpstream {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        self.json_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_paths.contains(path) {
            return Err(FetchError::Transport("mock transport failure".to_string()));
        }
        self.json_responses
            .get(path)
            .cloned()
            .ok_or(FetchError::Status(404))
    }

    async fn fetch_body_stream(&self, path: &str) -> Result<ByteStream, FetchError> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_paths.contains(path) {
            return Err(FetchError::Transport("mock transport failure".to_string()));
        }
        let body = self
            .stream_bodies
            .get(path)
            .cloned()
            .ok_or(FetchError::Status(404))?;

        // Two chunks to exercise the streaming path
        let mid = body.len() / 2;
        let chunks: Vec<Result<Bytes, FetchError>> = vec![
            Ok(Bytes::from(body[..mid].to_vec())),
            Ok(Bytes::from(body[mid..].to_vec())),
        ];
        Ok(Box::pin(stream::iter(chunks)))
    }
}

// == Fixtures ==

pub const TITLES_PATH: &str = "/api/versioner/v1/titles.json";
pub const TITLE_5_XML: &str = "/api/versioner/v1/full/2025-01-01/title-5.xml";
pub const TITLE_7_XML: &str = "/api/versioner/v1/full/2025-01-01/title-7.xml";
pub const TITLE_5_VERSIONS: &str = "/api/versioner/v1/versions/title-5.json";
pub const TITLE_7_VERSIONS: &str = "/api/versioner/v1/versions/title-7.json";

/// Two-title upstream catalog used by most tests.
pub fn titles_fixture() -> Value {
    json!({
        "titles": [
            {
                "number": 5,
                "name": "Administrative Personnel",
                "latest_issue_date": "2025-01-01"
            },
            {
                "number": 7,
                "name": "Agriculture",
                "latest_issue_date": "2025-01-01"
            }
        ]
    })
}

/// Deterministic test configuration over a memory cache.
pub fn test_config() -> Config {
    Config {
        cache_ttl: 3600,
        scaling_factor: 1.0,
        rng_seed: Some(7),
        ..Config::default()
    }
}

pub fn build_pipeline(client: Arc<MockUpstream>, config: Config) -> (Pipeline, SharedCache) {
    let shared = cache::shared(Box::new(MemoryCache::new(config.cache_ttl)));
    let pipeline = Pipeline::new(client, shared.clone(), config);
    (pipeline, shared)
}

pub fn build_state(client: Arc<MockUpstream>, config: Config) -> AppState {
    let (pipeline, shared) = build_pipeline(client, config);
    AppState::new(pipeline, shared)
}
