use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::InMemoryWarmCache;
use crate::error::MediaError;
use crate::fetch::FetchResponse;

use super::*;

/// Records every GET; URLs containing "fail" return a 502.
#[derive(Default)]
struct RecordingFetcher {
    urls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for RecordingFetcher {
    async fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<FetchResponse, MediaError> {
        self.urls.lock().unwrap().push(url.to_owned());
        if url.contains("fail") {
            return Err(MediaError::UnexpectedStatus {
                status: 502,
                url: url.to_owned(),
            });
        }
        Ok(FetchResponse {
            status: 200,
            body: String::new(),
        })
    }
}

/// Wraps an in-memory cache and counts lookups.
struct CountingCache {
    inner: InMemoryWarmCache,
    single: AtomicUsize,
    batch: AtomicUsize,
}

impl CountingCache {
    fn new() -> Self {
        Self {
            inner: InMemoryWarmCache::new(Duration::from_secs(60)),
            single: AtomicUsize::new(0),
            batch: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WarmCache for CountingCache {
    async fn exists(&self, key: &str) -> Result<bool, MediaError> {
        self.single.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(key).await
    }

    async fn multi_exists(&self, keys: &[String]) -> Result<Vec<bool>, MediaError> {
        self.batch.fetch_add(1, Ordering::SeqCst);
        self.inner.multi_exists(keys).await
    }

    async fn mark_warm(&self, key: &str) -> Result<(), MediaError> {
        self.inner.mark_warm(key).await
    }
}

struct BrokenCache;

#[async_trait]
impl WarmCache for BrokenCache {
    async fn exists(&self, _key: &str) -> Result<bool, MediaError> {
        Err(MediaError::Cache("connection refused".to_string()))
    }

    async fn multi_exists(&self, _keys: &[String]) -> Result<Vec<bool>, MediaError> {
        Err(MediaError::Cache("connection refused".to_string()))
    }

    async fn mark_warm(&self, _key: &str) -> Result<(), MediaError> {
        Err(MediaError::Cache("connection refused".to_string()))
    }
}

fn setup() -> (Arc<RecordingFetcher>, Arc<CountingCache>, Prewarmer) {
    let fetcher = Arc::new(RecordingFetcher::default());
    let cache = Arc::new(CountingCache::new());
    let prewarmer = Prewarmer::new(fetcher.clone(), cache.clone());
    (fetcher, cache, prewarmer)
}

#[test]
fn cache_key_is_prefixed_sha256() {
    let key = cache_key("https://api.example.com/animate?id=1");
    assert!(key.starts_with("yysk:prewarm:"));
    assert_eq!(key.len(), "yysk:prewarm:".len() + 64);
    assert_eq!(key, cache_key("https://api.example.com/animate?id=1"));
    assert_ne!(key, cache_key("https://api.example.com/animate?id=2"));
}

#[tokio::test]
async fn cold_target_is_fetched_and_recorded() {
    let (fetcher, cache, prewarmer) = setup();
    let target = PrewarmTarget::for_url("https://svc/animate?id=1");

    let report = prewarmer.spawn(target.clone()).join().await;

    assert_eq!(report.warmed, 1);
    assert_eq!(fetcher.urls(), vec!["https://svc/animate?id=1"]);
    assert!(cache.inner.exists(&target.key).await.unwrap());
}

#[tokio::test]
async fn warm_target_is_skipped() {
    let (fetcher, _cache, prewarmer) = setup();
    let target = PrewarmTarget::for_url("https://svc/animate?id=1");

    prewarmer.warm(&target).await;
    let second = prewarmer.warm(&target).await;

    assert_eq!(second.skipped, 1);
    assert_eq!(fetcher.urls().len(), 1);
}

#[tokio::test]
async fn failed_fetch_is_reported_not_recorded() {
    let (_fetcher, cache, prewarmer) = setup();
    let target = PrewarmTarget::for_url("https://svc/fail");

    let report = prewarmer.warm(&target).await;

    assert_eq!(report.failed, 1);
    assert!(!cache.inner.exists(&target.key).await.unwrap());
}

#[tokio::test]
async fn batch_uses_one_lookup() {
    let (fetcher, cache, prewarmer) = setup();
    let targets = vec![
        PrewarmTarget::for_url("https://svc/animate?id=1"),
        PrewarmTarget::for_url("https://svc/waterfall?id=1"),
    ];

    let report = prewarmer.spawn_batch(targets).join().await;

    assert_eq!(report.warmed, 2);
    assert_eq!(cache.batch.load(Ordering::SeqCst), 1);
    assert_eq!(cache.single.load(Ordering::SeqCst), 0);
    assert_eq!(fetcher.urls().len(), 2);
}

#[tokio::test]
async fn batch_skips_warm_and_dedupes() {
    let (fetcher, _cache, prewarmer) = setup();
    let warm = PrewarmTarget::for_url("https://svc/animate?id=1");
    prewarmer.warm(&warm).await;

    let report = prewarmer
        .warm_batch(vec![
            warm.clone(),
            PrewarmTarget::for_url("https://svc/waterfall?id=1"),
            PrewarmTarget::for_url("https://svc/waterfall?id=1"),
        ])
        .await;

    assert_eq!(
        report,
        PrewarmReport {
            warmed: 1,
            skipped: 1,
            failed: 0,
        }
    );
    assert_eq!(fetcher.urls().len(), 2);
}

#[tokio::test]
async fn broken_cache_still_warms() {
    let fetcher = Arc::new(RecordingFetcher::default());
    let prewarmer = Prewarmer::new(fetcher.clone(), Arc::new(BrokenCache));

    let single = prewarmer.warm(&PrewarmTarget::for_url("https://svc/a")).await;
    let batch = prewarmer
        .warm_batch(vec![PrewarmTarget::for_url("https://svc/b")])
        .await;

    assert_eq!(single.warmed, 1);
    assert_eq!(batch.warmed, 1);
    assert_eq!(fetcher.urls().len(), 2);
}

#[tokio::test]
async fn empty_batch_is_not_scheduled() {
    let (_fetcher, _cache, prewarmer) = setup();
    let handle = prewarmer.spawn_batch(Vec::new());
    assert!(!handle.is_scheduled());
    assert_eq!(handle.join().await, PrewarmReport::default());
}

#[test]
fn spawn_without_runtime_is_skipped() {
    let (fetcher, _cache, prewarmer) = setup();
    let handle = prewarmer.spawn(PrewarmTarget::for_url("https://svc/a"));
    assert!(!handle.is_scheduled());
    assert!(fetcher.urls().is_empty());
}
