//! eCFR HTTP Client
//!
//! reqwest-backed implementation of [`UpstreamClient`] with a per-request
//! timeout and fixed-size re-chunking of streamed bodies.

use async_trait::async_trait;
use bytes::BytesMut;
use futures::{stream, StreamExt, TryStreamExt};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::FetchError;
use crate::upstream::{ByteStream, UpstreamClient};

// == eCFR Client ==
/// Client for the public eCFR API.
#[derive(Debug, Clone)]
pub struct EcfrClient {
    http: reqwest::Client,
    base_url: String,
    chunk_size: usize,
}

impl EcfrClient {
    // == Constructor ==
    /// Builds a client from configuration. The timeout covers the whole
    /// request, so a hung upstream degrades into a transport error instead of
    /// stalling the pipeline.
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            chunk_size: config.chunk_size,
        })
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "upstream GET");

        let response = self.http.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl UpstreamClient for EcfrClient {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let response = self.get(path).await?;
        Ok(response.json().await?)
    }

    async fn fetch_body_stream(&self, path: &str) -> Result<ByteStream, FetchError> {
        let response = self.get(path).await?;
        let inner: ByteStream = Box::pin(response.bytes_stream().map_err(FetchError::from));
        Ok(rechunk(inner, self.chunk_size))
    }
}

// == Fixed-Size Rechunking ==
/// Normalizes an arbitrary chunk stream into fixed-size chunks.
///
/// Network reads arrive in whatever sizes the transport produced; downstream
/// consumers bound their work in chunks, so chunk size has to be a stable
/// unit. The final chunk carries the remainder and may be short. After a
/// stream error the output ends.
pub(crate) fn rechunk(inner: ByteStream, chunk_size: usize) -> ByteStream {
    debug_assert!(chunk_size > 0);

    struct State {
        inner: ByteStream,
        buf: BytesMut,
        done: bool,
        failed: bool,
    }

    let state = State {
        inner,
        buf: BytesMut::new(),
        done: false,
        failed: false,
    };

    Box::pin(stream::unfold(state, move |mut st| async move {
        if st.failed {
            return None;
        }
        loop {
            if st.buf.len() >= chunk_size {
                let chunk = st.buf.split_to(chunk_size).freeze();
                return Some((Ok(chunk), st));
            }
            if st.done {
                if st.buf.is_empty() {
                    return None;
                }
                let rest = st.buf.split().freeze();
                return Some((Ok(rest), st));
            }
            match st.inner.next().await {
                Some(Ok(bytes)) => st.buf.extend_from_slice(&bytes),
                Some(Err(err)) => {
                    st.failed = true;
                    return Some((Err(err), st));
                }
                None => st.done = true,
            }
        }
    }))
}
