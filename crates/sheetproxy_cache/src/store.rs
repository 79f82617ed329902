//! Cache store trait definition.

use sheetproxy_error::SheetProxyResult;
use std::time::Duration;

/// Key/value store with per-entry expiration.
///
/// Implementations report an unreachable or failing backend as
/// [`CacheError`](sheetproxy_error::CacheError) with
/// [`CacheErrorKind::Unavailable`](sheetproxy_error::CacheErrorKind::Unavailable).
/// There is no locking or versioning: concurrent writers to one key race
/// and the last write wins.
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Stored value for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> SheetProxyResult<Option<String>>;

    /// Store `value` under `key`, expiring `ttl` from now. Replaces any
    /// existing value and its expiration.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> SheetProxyResult<()>;
}
