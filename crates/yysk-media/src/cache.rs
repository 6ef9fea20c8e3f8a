//! Key-existence cache consulted before prewarming.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::MediaError;

/// Remembers which service URLs have already been warmed.
#[async_trait]
pub trait WarmCache: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, MediaError>;

    /// One answer per key, in input order.
    ///
    /// The default asks [`exists`](Self::exists) key by key; backends with a
    /// multi-key lookup should override it to save round-trips.
    async fn multi_exists(&self, keys: &[String]) -> Result<Vec<bool>, MediaError> {
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            found.push(self.exists(key).await?);
        }
        Ok(found)
    }

    async fn mark_warm(&self, key: &str) -> Result<(), MediaError>;
}

/// Process-local [`WarmCache`] whose entries expire after a fixed TTL.
#[derive(Debug)]
pub struct InMemoryWarmCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Instant>>,
}

impl InMemoryWarmCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Instant>>, MediaError> {
        self.entries
            .lock()
            .map_err(|_| MediaError::Cache("warm cache lock poisoned".to_string()))
    }

    fn is_live(&self, entries: &HashMap<String, Instant>, key: &str, now: Instant) -> bool {
        entries
            .get(key)
            .is_some_and(|warmed_at| now.duration_since(*warmed_at) < self.ttl)
    }
}

#[async_trait]
impl WarmCache for InMemoryWarmCache {
    async fn exists(&self, key: &str) -> Result<bool, MediaError> {
        let entries = self.lock()?;
        Ok(self.is_live(&entries, key, Instant::now()))
    }

    async fn multi_exists(&self, keys: &[String]) -> Result<Vec<bool>, MediaError> {
        let entries = self.lock()?;
        let now = Instant::now();
        Ok(keys
            .iter()
            .map(|key| self.is_live(&entries, key, now))
            .collect())
    }

    async fn mark_warm(&self, key: &str) -> Result<(), MediaError> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        entries.retain(|_, warmed_at| now.duration_since(*warmed_at) < self.ttl);
        entries.insert(key.to_string(), now);
        Ok(())
    }
}
