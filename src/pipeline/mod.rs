//! Pipeline Orchestrator
//!
//! One canonical pipeline per operation: check the cache, on miss drive the
//! upstream client and aggregators, write the result back, serve it. The cache
//! backend is a strategy parameter; the orchestration does not change with it.
//!
//! Per-title work inside a batch is independent, so fetches fan out
//! concurrently and results are collected in title order. A failing title
//! degrades to its documented default (zero count, empty churn map) instead of
//! failing the batch.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use crate::aggregate::{churn_by_year, top_words, FrequencyConfig};
use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{ChurnResult, Title, TitlesResponse, VersionsResponse, WordFrequency};
use crate::text::{approximate_word_count, extract_paragraph_text, tokenize};
use crate::upstream::{collect_body, UpstreamClient};

// == Cache Keys ==
const KEY_TITLES: &str = "titles";
const KEY_WORDS_BY_TITLE: &str = "words_by_title";
const KEY_REGULATION_CHURN: &str = "regulation_churn";

fn common_words_key(title: u32) -> String {
    format!("common_words_by_title:{}", title)
}

// == Upstream Paths ==
const TITLES_PATH: &str = "/api/versioner/v1/titles.json";

fn versions_path(title: u32) -> String {
    format!("/api/versioner/v1/versions/title-{}.json", title)
}

fn full_xml_path(date: &str, title: u32) -> String {
    format!("/api/versioner/v1/full/{}/title-{}.xml", date, title)
}

// == Pipeline ==
/// Drives every logical query the HTTP layer exposes.
pub struct Pipeline {
    client: Arc<dyn UpstreamClient>,
    cache: SharedCache,
    config: Config,
    frequency: FrequencyConfig,
}

impl Pipeline {
    // == Constructor ==
    /// Wires the orchestrator with its collaborators. The client and cache are
    /// injected so tests can count upstream calls and inspect the store.
    pub fn new(client: Arc<dyn UpstreamClient>, cache: SharedCache, config: Config) -> Self {
        let frequency = FrequencyConfig::from_config(&config);
        Self {
            client,
            cache,
            config,
            frequency,
        }
    }

    // == Cache Helpers ==
    async fn cache_get(&self, key: &str) -> Option<Value> {
        let hit = self.cache.write().await.get(key);
        if hit.is_some() {
            debug!(key, "cache hit");
        } else {
            debug!(key, "cache miss");
        }
        hit
    }

    /// Writes a computed result back. A backend failure is logged and
    /// swallowed; the fresh result is served regardless.
    async fn cache_put(&self, key: &str, value: &Value) {
        if let Err(err) = self.cache.write().await.put(key, value.clone()) {
            warn!(key, error = %err, "cache write failed, serving uncached result");
        }
    }

    // == List Titles ==
    /// Raw upstream titles document, cached under `titles`.
    pub async fn list_titles(&self) -> Result<Value> {
        if let Some(cached) = self.cache_get(KEY_TITLES).await {
            return Ok(cached);
        }

        let payload = self.client.fetch_json(TITLES_PATH).await?;
        self.cache_put(KEY_TITLES, &payload).await;
        Ok(payload)
    }

    /// Decoded titles list, served through the same cache as `list_titles`.
    async fn fetch_titles(&self) -> Result<TitlesResponse> {
        let payload = self.list_titles().await?;
        Ok(serde_json::from_value(payload)?)
    }

    // == Words By Title ==
    /// Titles list augmented with an approximate `word_count` per title,
    /// cached under `words_by_title`.
    pub async fn words_by_title(&self) -> Result<Value> {
        if let Some(cached) = self.cache_get(KEY_WORDS_BY_TITLE).await {
            return Ok(cached);
        }

        let titles = self.fetch_titles().await?;
        let augmented: Vec<Title> = join_all(
            titles
                .titles
                .into_iter()
                .map(|title| self.count_title_words(title)),
        )
        .await;

        let value = serde_json::to_value(augmented)?;
        self.cache_put(KEY_WORDS_BY_TITLE, &value).await;
        Ok(value)
    }

    /// Streams one title's latest document and fills in its word count.
    /// Any failure leaves the count at the documented default of 0.
    async fn count_title_words(&self, mut title: Title) -> Title {
        title.word_count = 0;

        let Some(date) = title.latest_issue_date.clone() else {
            debug!(title = title.number, "no issue date, word count stays 0");
            return title;
        };

        let path = full_xml_path(&date, title.number);
        let counted = match self.client.fetch_body_stream(&path).await {
            Ok(stream) => {
                approximate_word_count(
                    stream,
                    self.config.max_chunks,
                    self.config.scaling_factor,
                )
                .await
            }
            Err(err) => Err(err),
        };

        match counted {
            Ok(count) => title.word_count = count,
            Err(err) => {
                warn!(title = title.number, error = %err, "word count unavailable, defaulting to 0");
            }
        }
        title
    }

    // == Regulation Churn ==
    /// Per-title amendment counts bucketed by year, in upstream title order,
    /// cached under `regulation_churn`.
    pub async fn regulation_churn(&self) -> Result<Value> {
        if let Some(cached) = self.cache_get(KEY_REGULATION_CHURN).await {
            return Ok(cached);
        }

        let titles = self.fetch_titles().await?;
        let results: Vec<ChurnResult> =
            join_all(titles.titles.iter().map(|title| self.title_churn(title))).await;

        let value = serde_json::to_value(results)?;
        self.cache_put(KEY_REGULATION_CHURN, &value).await;
        Ok(value)
    }

    /// Fetches one title's amendment history. Fetch or decode failure
    /// degrades to an empty year map for that title only.
    async fn title_churn(&self, title: &Title) -> ChurnResult {
        let changes_per_year = match self.client.fetch_json(&versions_path(title.number)).await {
            Ok(payload) => match serde_json::from_value::<VersionsResponse>(payload) {
                Ok(versions) => churn_by_year(&versions.content_versions),
                Err(err) => {
                    warn!(title = title.number, error = %err, "undecodable amendment history, churn empty");
                    Default::default()
                }
            },
            Err(err) => {
                warn!(title = title.number, error = %err, "amendment history unavailable, churn empty");
                Default::default()
            }
        };

        ChurnResult {
            title_number: title.number,
            title_name: title.name.clone(),
            changes_per_year,
        }
    }

    // == Common Words By Title ==
    /// Top-K most frequent words in one title's latest document, cached under
    /// `common_words_by_title:<n>`.
    ///
    /// Uses structured extraction: the full document is buffered and parsed,
    /// trading memory for accurate tokenization.
    pub async fn common_words_by_title(&self, number: u32) -> Result<Value> {
        let key = common_words_key(number);
        if let Some(cached) = self.cache_get(&key).await {
            return Ok(cached);
        }

        let titles = self.fetch_titles().await?;
        let title = titles
            .titles
            .iter()
            .find(|t| t.number == number)
            .ok_or(ProxyError::UnknownTitle(number))?;
        let date = title
            .latest_issue_date
            .as_deref()
            .ok_or(ProxyError::NoIssueDate(number))?;

        let stream = self
            .client
            .fetch_body_stream(&full_xml_path(date, number))
            .await?;
        let body = collect_body(stream).await?;
        let text = extract_paragraph_text(&body)?;
        let result: Vec<WordFrequency> = top_words(tokenize(&text), &self.frequency);

        let value = serde_json::to_value(result)?;
        self.cache_put(&key, &value).await;
        Ok(value)
    }
}
