//! Read-through wrapper around a cache store.

use crate::CacheStore;
use serde::{Deserialize, Serialize};
use sheetproxy_error::SheetProxyResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Expiration applied when a write does not name one.
pub const DEFAULT_TTL_SECONDS: u64 = 60;

/// What a failed store read means to the caller.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CacheReadPolicy {
    /// Log the failure and treat it as a miss
    #[default]
    Degrade,
    /// Propagate the failure to the caller
    Required,
}

/// Cache access used by the request pipeline.
///
/// Reads follow the [`CacheReadPolicy`]; writes are always awaited and
/// their failures always propagate.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn CacheStore>,
    default_ttl: u64,
    read_policy: CacheReadPolicy,
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway")
            .field("default_ttl", &self.default_ttl)
            .field("read_policy", &self.read_policy)
            .finish_non_exhaustive()
    }
}

impl CacheGateway {
    /// Wrap a store with the default TTL and the degrading read policy.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            default_ttl: DEFAULT_TTL_SECONDS,
            read_policy: CacheReadPolicy::default(),
        }
    }

    /// Use `seconds` for writes that do not name a TTL.
    pub fn with_default_ttl(mut self, seconds: u64) -> Self {
        self.default_ttl = seconds;
        self
    }

    /// Set how store read failures are handled.
    pub fn with_read_policy(mut self, policy: CacheReadPolicy) -> Self {
        self.read_policy = policy;
        self
    }

    /// TTL applied to writes without an explicit one.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Current read policy.
    pub fn read_policy(&self) -> CacheReadPolicy {
        self.read_policy
    }

    /// Look up `key`.
    ///
    /// # Errors
    ///
    /// Under [`CacheReadPolicy::Required`] a store failure is returned as is.
    /// Under [`CacheReadPolicy::Degrade`] it is logged and reported as a miss.
    #[instrument(skip(self), fields(policy = %self.read_policy))]
    pub async fn get(&self, key: &str) -> SheetProxyResult<Option<String>> {
        info!(key, "Attempting to get cached data");
        match self.store.get(key).await {
            Ok(Some(value)) => {
                debug!(key, bytes = value.len(), "Cache hit");
                Ok(Some(value))
            }
            Ok(None) => {
                debug!(key, "Cache miss");
                Ok(None)
            }
            Err(e) => match self.read_policy {
                CacheReadPolicy::Degrade => {
                    warn!(key, error = %e, "Cache read failed, treating as miss");
                    Ok(None)
                }
                CacheReadPolicy::Required => Err(e),
            },
        }
    }

    /// Store `value` under `key` for `ttl_seconds`, or the default TTL.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails.
    #[instrument(skip(self, value), fields(bytes = value.len()))]
    pub async fn put(
        &self,
        key: &str,
        value: String,
        ttl_seconds: Option<u64>,
    ) -> SheetProxyResult<()> {
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);
        self.store.put(key, value, Duration::from_secs(ttl)).await?;
        info!(key, ttl_seconds = ttl, "Finished putting new data in cache");
        Ok(())
    }
}
