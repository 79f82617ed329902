//! In-process TTL cache store.

use crate::CacheStore;
use derive_getters::Getters;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sheetproxy_error::{BuilderError, SheetProxyResult};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache entry with value and expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    value: String,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    /// Check if this entry is expired. An entry is gone once its full TTL
    /// has elapsed.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

/// Configuration for the in-memory store.
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default, build_fn(error = "BuilderError"))]
pub struct CacheConfig {
    /// Maximum number of entries before the least recently used is evicted
    #[serde(default = "default_max_entries")]
    max_entries: usize,
}

fn default_max_entries() -> usize {
    1000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, CacheEntry>,
    access_order: Vec<String>,
}

impl Entries {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            let key = self.access_order.remove(pos);
            self.access_order.push(key);
        }
    }

    fn forget(&mut self, key: &str) {
        self.map.remove(key);
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    fn evict_lru(&mut self) {
        if !self.access_order.is_empty() {
            let key = self.access_order.remove(0);
            tracing::debug!(key = %key, "Evicting LRU entry");
            self.map.remove(&key);
        }
    }
}

/// Cache store kept in process memory.
///
/// Entries expire after their TTL and the store holds at most
/// `max_entries` values, evicting the least recently used first.
///
/// # Example
///
/// ```
/// use sheetproxy_cache::{CacheStore, InMemoryCacheStore};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryCacheStore::default();
/// store.put("doc1", "[]".to_string(), Duration::from_secs(60)).await?;
/// assert_eq!(store.get("doc1").await?.as_deref(), Some("[]"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InMemoryCacheStore {
    config: CacheConfig,
    entries: Mutex<Entries>,
}

impl InMemoryCacheStore {
    /// Create a new store with configuration.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            max_entries = config.max_entries,
            "Creating new InMemoryCacheStore"
        );
        Self {
            config,
            entries: Mutex::new(Entries::default()),
        }
    }

    /// Get the store configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Remove expired entries from the store.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.map.len();

        let expired: Vec<String> = entries
            .map
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.forget(key);
        }

        let removed = before - entries.map.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = entries.map.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Get number of stored entries, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().map.is_empty()
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        let entry = entries.map.get(key)?;
        if entry.is_expired() {
            tracing::debug!(key, "Cache entry expired, removing");
            entries.forget(key);
            return None;
        }

        tracing::debug!(key, time_remaining = ?entry.time_remaining(), "Cache hit");
        let value = entry.value.clone();
        entries.touch(key);
        Some(value)
    }

    fn store(&self, key: &str, value: String, ttl: Duration) {
        let mut entries = self.entries.lock();
        let replacing = entries.map.contains_key(key);
        if !replacing && entries.map.len() >= self.config.max_entries {
            entries.evict_lru();
        }
        if self.config.max_entries == 0 {
            return;
        }

        entries.forget(key);
        entries.access_order.push(key.to_string());
        entries.map.insert(
            key.to_string(),
            CacheEntry {
                value,
                created_at: Instant::now(),
                ttl,
            },
        );

        tracing::debug!(key, replacing, ttl = ?ttl, "Inserted entry into cache");
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[async_trait::async_trait]
impl CacheStore for InMemoryCacheStore {
    #[tracing::instrument(skip(self), fields(cache_size = self.len()))]
    async fn get(&self, key: &str) -> SheetProxyResult<Option<String>> {
        Ok(self.lookup(key))
    }

    #[tracing::instrument(skip(self, value), fields(bytes = value.len()))]
    async fn put(&self, key: &str, value: String, ttl: Duration) -> SheetProxyResult<()> {
        self.store(key, value, ttl);
        Ok(())
    }
}
