//! Cache layer for sheetproxy.
//!
//! [`CacheStore`] is the key/value seam the hosting environment fills in;
//! [`InMemoryCacheStore`] is the bundled TTL implementation. [`CacheGateway`]
//! sits in front of a store and applies the default TTL and the policy for
//! store read failures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gateway;
mod memory;
mod store;

pub use gateway::{CacheGateway, CacheReadPolicy, DEFAULT_TTL_SECONDS};
pub use memory::{CacheConfig, CacheConfigBuilder, CacheEntry, InMemoryCacheStore};
pub use store::CacheStore;
