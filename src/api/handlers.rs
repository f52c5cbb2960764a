//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint. Handlers are thin: every
//! operation delegates to the pipeline and serializes its result or error.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::cache::{self, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, PingResponse};
use crate::pipeline::Pipeline;
use crate::upstream::EcfrClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator for every cached operation
    pub pipeline: Arc<Pipeline>,
    /// Cache handle, shared with the background purge task
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState from an already wired pipeline.
    pub fn new(pipeline: Pipeline, cache: SharedCache) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            cache,
        }
    }

    /// Creates a new AppState from configuration: configured cache backend,
    /// real upstream client, canonical pipeline.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = cache::shared(cache::build_backend(config));
        let client = Arc::new(EcfrClient::new(config)?);
        let pipeline = Pipeline::new(client, cache.clone(), config.clone());
        Ok(Self::new(pipeline, cache))
    }
}

/// Handler for GET /ping
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /titles
pub async fn titles_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(state.pipeline.list_titles().await?))
}

/// Handler for GET /words_by_title
pub async fn words_by_title_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(state.pipeline.words_by_title().await?))
}

/// Handler for GET /regulation_churn
pub async fn regulation_churn_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(state.pipeline.regulation_churn().await?))
}

/// Query parameters for GET /common_words_by_title
#[derive(Debug, Deserialize)]
pub struct CommonWordsParams {
    /// Title number to analyze
    pub title: u32,
}

/// Handler for GET /common_words_by_title?title=N
pub async fn common_words_handler(
    State(state): State<AppState>,
    Query(params): Query<CommonWordsParams>,
) -> Result<Json<Value>> {
    Ok(Json(
        state.pipeline.common_words_by_title(params.title).await?,
    ))
}
