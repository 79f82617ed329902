//! HTTP front end for sheetproxy.
//!
//! Serves one Google Sheet as a JSON array of records. Each `GET` checks the
//! cache for the configured document; on a miss the sheet is fetched from the
//! Google Visualization endpoint, flattened with
//! [`sheetproxy_core::format`], stored for the configured TTL and returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetproxy_cache::{CacheGateway, InMemoryCacheStore};
//! use sheetproxy_server::{ProxyConfigBuilder, SheetFetcher, SheetService, create_router};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProxyConfigBuilder::default()
//!         .document_id("1AbCdEf")
//!         .sheet_name("Feature Toggles")
//!         .build()?;
//!
//!     let cache = CacheGateway::new(Arc::new(InMemoryCacheStore::default()));
//!     let fetcher = Arc::new(SheetFetcher::from_config(&config)?);
//!     let service = Arc::new(SheetService::new(&config, cache, fetcher));
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, create_router(service)).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod fetcher;
mod handler;
mod observability;
mod service;

pub use config::{ProxyConfig, ProxyConfigBuilder};
pub use fetcher::{SheetFetcher, SheetSource, parse_response, unwrap_callback};
pub use handler::{ApiError, METHOD_NOT_ALLOWED_MESSAGE, create_router};
pub use observability::init_logging;
pub use service::SheetService;
