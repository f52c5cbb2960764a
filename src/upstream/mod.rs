//! Upstream Client Module
//!
//! Issues HTTP requests to the external regulatory API. Supports buffered JSON
//! responses and lazily streamed bodies so callers can bound how much of a very
//! large document they consume. Transport and status failures surface as typed
//! errors and are always recoverable.

mod ecfr;

pub use ecfr::EcfrClient;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde_json::Value;

use crate::error::FetchError;

// == Byte Stream Alias ==
/// Lazy, single-pass, finite sequence of body chunks.
///
/// Chunks from [`UpstreamClient::fetch_body_stream`] have a fixed size (the
/// configured chunk size) except the final one, which carries the remainder.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

// == Upstream Client Trait ==
/// Contract for talking to the upstream API.
///
/// A trait object so the orchestrator can be exercised against counting mocks.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// GET `path`, expecting a JSON body. Any non-200 status is
    /// [`FetchError::Status`].
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError>;

    /// GET `path`, returning the body as a chunk stream without buffering it.
    async fn fetch_body_stream(&self, path: &str) -> Result<ByteStream, FetchError>;
}

// == Collect Body ==
/// Drains a body stream into memory.
///
/// Used by the structured extraction path, which needs the whole document.
pub async fn collect_body(mut stream: ByteStream) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}
