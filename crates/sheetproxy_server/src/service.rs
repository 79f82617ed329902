//! Cache-or-fetch pipeline for the configured sheet.

use crate::{ProxyConfig, SheetSource};
use sheetproxy_cache::CacheGateway;
use sheetproxy_core::format;
use sheetproxy_error::{CacheError, CacheErrorKind, SheetProxyResult};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Serves the formatted sheet, from cache when possible.
///
/// Holds no mutable state of its own; concurrent misses each fetch and the
/// last cache write wins.
#[derive(Clone)]
pub struct SheetService {
    document_id: String,
    cache: CacheGateway,
    source: Arc<dyn SheetSource>,
}

impl std::fmt::Debug for SheetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetService")
            .field("document_id", &self.document_id)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl SheetService {
    /// Create the service for the document named in `config`.
    ///
    /// The gateway's default TTL is set to the configured cache TTL.
    pub fn new(config: &ProxyConfig, cache: CacheGateway, source: Arc<dyn SheetSource>) -> Self {
        Self {
            document_id: config.document_id().clone(),
            cache: cache.with_default_ttl(*config.cache_ttl_seconds()),
            source,
        }
    }

    /// Document identifier used as the cache key.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// JSON text of the formatted sheet.
    ///
    /// A cached value is returned verbatim. On a miss the sheet is fetched,
    /// formatted, serialized and stored before being returned.
    ///
    /// # Errors
    ///
    /// Any fetch, parse, payload or cache write failure. Nothing is cached
    /// when one of these occurs.
    #[instrument(skip(self), fields(document_id = %self.document_id))]
    pub async fn sheet_json(&self) -> SheetProxyResult<String> {
        if let Some(cached) = self.cache.get(&self.document_id).await? {
            debug!(cache_hit = true, "Serving cached sheet");
            return Ok(cached);
        }
        self.refresh().await
    }

    /// Fetch, format and cache the sheet regardless of what is cached.
    ///
    /// # Errors
    ///
    /// See [`SheetService::sheet_json`].
    #[instrument(skip(self), fields(document_id = %self.document_id))]
    pub async fn refresh(&self) -> SheetProxyResult<String> {
        info!("No cached data found, doing a fresh pull");

        let payload = self.source.fetch_sheet().await?;
        let records = format(&payload)?;
        let body = serde_json::to_string(&records)
            .map_err(|e| CacheError::new(CacheErrorKind::Serialization(e.to_string())))?;

        self.cache.put(&self.document_id, body.clone(), None).await?;
        debug!(records = records.len(), bytes = body.len(), "Stored fresh sheet");
        Ok(body)
    }
}
