//! Best-effort cache warming for composition-service URLs.
//!
//! Warming runs on a detached tokio task. Every failure (cache lookup, HTTP,
//! recording the key) is logged and dropped; nothing flows back to the code
//! that built the URL. Callers that want to observe the outcome, such as a
//! short-lived CLI process, can await the returned [`PrewarmHandle`].

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;

use crate::cache::WarmCache;
use crate::fetch::Fetcher;

const KEY_PREFIX: &str = "yysk:prewarm:";

const WARM_HEADERS: [(&str, &str); 1] = [("accept", "image/webp,image/*,*/*;q=0.8")];

/// A service URL and the cache key that records it as warm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrewarmTarget {
    pub key: String,
    pub url: String,
}

impl PrewarmTarget {
    #[must_use]
    pub fn for_url(url: &str) -> Self {
        Self {
            key: cache_key(url),
            url: url.to_owned(),
        }
    }
}

/// `yysk:prewarm:` followed by the SHA-256 of `url`, hex encoded.
#[must_use]
pub fn cache_key(url: &str) -> String {
    format!("{KEY_PREFIX}{:x}", Sha256::digest(url.as_bytes()))
}

/// What a prewarm run did with its targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrewarmReport {
    pub warmed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PrewarmReport {
    fn merge(&mut self, other: PrewarmReport) {
        self.warmed += other.warmed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Handle to a spawned prewarm task.
///
/// Dropping it leaves the task running on its own.
#[derive(Debug)]
pub struct PrewarmHandle(Option<JoinHandle<PrewarmReport>>);

impl PrewarmHandle {
    /// A handle for work that was never scheduled.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.0.is_some()
    }

    /// Wait for the task. Unscheduled, cancelled or panicked tasks report nothing.
    pub async fn join(self) -> PrewarmReport {
        let Some(handle) = self.0 else {
            return PrewarmReport::default();
        };
        match handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "prewarm task did not complete");
                PrewarmReport::default()
            }
        }
    }
}

/// Issues warm-up GETs for service URLs that the cache does not know yet.
#[derive(Clone)]
pub struct Prewarmer {
    fetcher: Arc<dyn Fetcher>,
    cache: Arc<dyn WarmCache>,
}

impl Prewarmer {
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, cache: Arc<dyn WarmCache>) -> Self {
        Self { fetcher, cache }
    }

    /// Warm one URL in the background.
    pub fn spawn(&self, target: PrewarmTarget) -> PrewarmHandle {
        let this = self.clone();
        spawn_detached(async move { this.warm(&target).await })
    }

    /// Warm several URLs in the background with a single multi-key cache lookup.
    pub fn spawn_batch(&self, targets: Vec<PrewarmTarget>) -> PrewarmHandle {
        if targets.is_empty() {
            return PrewarmHandle::none();
        }
        let this = self.clone();
        spawn_detached(async move { this.warm_batch(targets).await })
    }

    /// Check the cache for one target and warm it if it is cold.
    pub async fn warm(&self, target: &PrewarmTarget) -> PrewarmReport {
        let already_warm = match self.cache.exists(&target.key).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(key = %target.key, error = %e, "warm cache lookup failed");
                false
            }
        };

        if already_warm {
            tracing::debug!(key = %target.key, "already warm, skipping");
            return PrewarmReport {
                skipped: 1,
                ..PrewarmReport::default()
            };
        }

        self.fire(target).await
    }

    /// Look up every target in one `multi_exists` call, then warm the cold
    /// ones concurrently. Targets sharing a key are warmed once.
    pub async fn warm_batch(&self, targets: Vec<PrewarmTarget>) -> PrewarmReport {
        let mut seen = HashSet::new();
        let targets: Vec<PrewarmTarget> = targets
            .into_iter()
            .filter(|t| seen.insert(t.key.clone()))
            .collect();
        let keys: Vec<String> = targets.iter().map(|t| t.key.clone()).collect();

        let flags = match self.cache.multi_exists(&keys).await {
            Ok(flags) if flags.len() == keys.len() => flags,
            Ok(flags) => {
                tracing::warn!(
                    expected = keys.len(),
                    got = flags.len(),
                    "warm cache returned the wrong number of answers; treating all as cold"
                );
                vec![false; keys.len()]
            }
            Err(e) => {
                tracing::warn!(count = keys.len(), error = %e, "warm cache batch lookup failed");
                vec![false; keys.len()]
            }
        };

        let mut report = PrewarmReport::default();
        let mut cold = Vec::new();
        for (target, warm) in targets.iter().zip(flags) {
            if warm {
                tracing::debug!(key = %target.key, "already warm, skipping");
                report.skipped += 1;
            } else {
                cold.push(self.fire(target));
            }
        }

        for outcome in join_all(cold).await {
            report.merge(outcome);
        }
        report
    }

    async fn fire(&self, target: &PrewarmTarget) -> PrewarmReport {
        match self.fetcher.get(&target.url, &WARM_HEADERS).await {
            Ok(response) => {
                tracing::debug!(key = %target.key, status = response.status, "prewarmed");
                if let Err(e) = self.cache.mark_warm(&target.key).await {
                    tracing::warn!(key = %target.key, error = %e, "failed to record warm key");
                }
                PrewarmReport {
                    warmed: 1,
                    ..PrewarmReport::default()
                }
            }
            Err(e) => {
                tracing::warn!(url = %target.url, error = %e, "prewarm request failed");
                PrewarmReport {
                    failed: 1,
                    ..PrewarmReport::default()
                }
            }
        }
    }
}

/// Spawn on the ambient tokio runtime; without one the work is skipped.
fn spawn_detached<F>(task: F) -> PrewarmHandle
where
    F: std::future::Future<Output = PrewarmReport> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => PrewarmHandle(Some(runtime.spawn(task))),
        Err(_) => {
            tracing::debug!("no async runtime available, skipping prewarm");
            PrewarmHandle::none()
        }
    }
}

#[cfg(test)]
#[path = "prewarm_test.rs"]
mod tests;
