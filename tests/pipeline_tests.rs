//! Pipeline Tests
//!
//! Exercises the orchestrator against a counting mock upstream: read-through
//! caching, TTL refresh, fan-out aggregation, and per-title failure isolation.

mod common;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use common::{
    build_pipeline, test_config, titles_fixture, MockUpstream, TITLES_PATH, TITLE_5_VERSIONS,
    TITLE_5_XML, TITLE_7_VERSIONS, TITLE_7_XML,
};
use ecfr_proxy::cache::{self, CacheBackend, CacheStats};
use ecfr_proxy::error::{CacheError, ProxyError};
use ecfr_proxy::pipeline::Pipeline;
use ecfr_proxy::Config;

// == Caching Behavior ==

#[tokio::test]
async fn test_list_titles_idempotent_within_ttl() {
    let client = Arc::new(MockUpstream::new().with_json(TITLES_PATH, titles_fixture()));
    let (pipeline, _) = build_pipeline(client.clone(), test_config());

    let first = pipeline.list_titles().await.unwrap();
    let second = pipeline.list_titles().await.unwrap();

    // Byte-identical result, one upstream fetch
    assert_eq!(first, second);
    assert_eq!(client.json_call_count(), 1);
}

#[tokio::test]
async fn test_list_titles_refetches_after_ttl() {
    let client = Arc::new(MockUpstream::new().with_json(TITLES_PATH, titles_fixture()));
    let config = Config {
        cache_ttl: 1,
        ..test_config()
    };
    let (pipeline, _) = build_pipeline(client.clone(), config);

    pipeline.list_titles().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    pipeline.list_titles().await.unwrap();

    // Exactly one fresh fetch after expiry
    assert_eq!(client.json_call_count(), 2);
}

#[tokio::test]
async fn test_list_titles_upstream_failure_is_error() {
    let client = Arc::new(MockUpstream::new().with_failure(TITLES_PATH));
    let (pipeline, _) = build_pipeline(client, test_config());

    let result = pipeline.list_titles().await;
    assert!(matches!(result, Err(ProxyError::Upstream(_))));
}

#[tokio::test]
async fn test_cache_write_failure_still_serves_result() {
    // A backend whose writes always fail: the operation must still succeed.
    struct BrokenCache;

    impl CacheBackend for BrokenCache {
        fn get(&mut self, _key: &str) -> Option<Value> {
            None
        }
        fn put(&mut self, _key: &str, _value: Value) -> Result<(), CacheError> {
            Err(CacheError::Io(io::Error::new(
                io::ErrorKind::Other,
                "disk full",
            )))
        }
        fn purge_expired(&mut self) -> usize {
            0
        }
        fn stats(&self) -> CacheStats {
            CacheStats::new()
        }
    }

    let client = Arc::new(MockUpstream::new().with_json(TITLES_PATH, titles_fixture()));
    let shared = cache::shared(Box::new(BrokenCache));
    let pipeline = Pipeline::new(client.clone(), shared, test_config());

    let result = pipeline.list_titles().await.unwrap();
    assert_eq!(result, titles_fixture());

    // Nothing cached, so a second call fetches again
    pipeline.list_titles().await.unwrap();
    assert_eq!(client.json_call_count(), 2);
}

// == Words By Title ==

#[tokio::test]
async fn test_words_by_title_counts_with_scaling() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_body(TITLE_5_XML, b"alpha beta gamma delta epsilon zeta")
            .with_body(TITLE_7_XML, b"one two three four"),
    );
    // scaling_factor 1.0 in test_config makes raw counts observable
    let (pipeline, _) = build_pipeline(client, test_config());

    let value = pipeline.words_by_title().await.unwrap();
    let titles = value.as_array().unwrap();

    assert_eq!(titles[0]["number"], json!(5));
    assert!(titles[0]["word_count"].as_u64().unwrap() >= 6);
    assert!(titles[1]["word_count"].as_u64().unwrap() >= 4);
}

#[tokio::test]
async fn test_words_by_title_partial_failure_isolated() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_failure(TITLE_5_XML)
            .with_body(TITLE_7_XML, b"one two three four five six"),
    );
    let (pipeline, _) = build_pipeline(client, test_config());

    let value = pipeline.words_by_title().await.unwrap();
    let titles = value.as_array().unwrap();

    // Title 5 degrades to 0, title 7 is counted, the batch succeeds
    assert_eq!(titles[0]["number"], json!(5));
    assert_eq!(titles[0]["word_count"], json!(0));
    assert_eq!(titles[1]["number"], json!(7));
    assert!(titles[1]["word_count"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_words_by_title_cached_second_call() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_body(TITLE_5_XML, b"a b c")
            .with_body(TITLE_7_XML, b"d e f"),
    );
    let (pipeline, _) = build_pipeline(client.clone(), test_config());

    pipeline.words_by_title().await.unwrap();
    let streams_after_first = client.stream_call_count();
    pipeline.words_by_title().await.unwrap();

    assert_eq!(client.stream_call_count(), streams_after_first);
}

// == Regulation Churn ==

#[tokio::test]
async fn test_regulation_churn_buckets_and_order() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_json(
                TITLE_5_VERSIONS,
                json!({
                    "content_versions": [
                        {"amendment_date": "2020-01-01"},
                        {"amendment_date": "2020-06-01"},
                        {"amendment_date": "2021-03-01"},
                        {"amendment_date": null}
                    ]
                }),
            )
            .with_json(TITLE_7_VERSIONS, json!({"content_versions": []})),
    );
    let (pipeline, _) = build_pipeline(client, test_config());

    let value = pipeline.regulation_churn().await.unwrap();
    let results = value.as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title_number"], json!(5));
    assert_eq!(results[0]["changes_per_year"]["2020"], json!(2));
    assert_eq!(results[0]["changes_per_year"]["2021"], json!(1));
    assert_eq!(results[1]["title_number"], json!(7));
    assert_eq!(results[1]["changes_per_year"], json!({}));
}

#[tokio::test]
async fn test_regulation_churn_failed_title_degrades_to_empty() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_failure(TITLE_5_VERSIONS)
            .with_json(
                TITLE_7_VERSIONS,
                json!({"content_versions": [{"amendment_date": "2019-02-02"}]}),
            ),
    );
    let (pipeline, _) = build_pipeline(client, test_config());

    let value = pipeline.regulation_churn().await.unwrap();
    let results = value.as_array().unwrap();

    assert_eq!(results[0]["changes_per_year"], json!({}));
    assert_eq!(results[1]["changes_per_year"]["2019"], json!(1));
}

// == Common Words By Title ==

#[tokio::test]
async fn test_common_words_filters_stopwords() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_body(
                TITLE_5_XML,
                b"<DIV><P>The rule of the rule.</P><P>Rule text!</P></DIV>",
            ),
    );
    let (pipeline, _) = build_pipeline(client, test_config());

    let value = pipeline.common_words_by_title(5).await.unwrap();
    let pairs = value.as_array().unwrap();

    assert_eq!(pairs[0], json!(["rule", 3]));
    assert!(pairs
        .iter()
        .all(|p| p[0] != json!("the") && p[0] != json!("of")));
}

#[tokio::test]
async fn test_common_words_cached_within_ttl() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_body(TITLE_5_XML, b"<P>word word word</P>"),
    );
    let (pipeline, _) = build_pipeline(client.clone(), test_config());

    let first = pipeline.common_words_by_title(5).await.unwrap();
    let second = pipeline.common_words_by_title(5).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.stream_call_count(), 1);
}

#[tokio::test]
async fn test_common_words_unknown_title() {
    let client = Arc::new(MockUpstream::new().with_json(TITLES_PATH, titles_fixture()));
    let (pipeline, _) = build_pipeline(client, test_config());

    let result = pipeline.common_words_by_title(99).await;
    assert!(matches!(result, Err(ProxyError::UnknownTitle(99))));
}

#[tokio::test]
async fn test_common_words_malformed_xml_is_error() {
    let client = Arc::new(
        MockUpstream::new()
            .with_json(TITLES_PATH, titles_fixture())
            .with_body(TITLE_5_XML, b"<P>broken</DIV>"),
    );
    let (pipeline, _) = build_pipeline(client, test_config());

    let result = pipeline.common_words_by_title(5).await;
    assert!(matches!(result, Err(ProxyError::Parse(_))));
}
