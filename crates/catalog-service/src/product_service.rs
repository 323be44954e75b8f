//! Product service trait and the types it exchanges.

use async_trait::async_trait;
use catalog_config::{CacheConfig, DEFAULT_CACHE_KEY_PREFIX, DEFAULT_CACHE_TTL_SECS};
use catalog_core::{CatalogResult, Interface, ProductId};
use std::time::Duration;

/// Where a served product body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Cache,
    Store,
}

/// A product serialized as its JSON response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPayload {
    /// JSON bytes, served verbatim.
    pub body: Vec<u8>,
    pub source: PayloadSource,
}

/// Key naming and lifetime of cached product bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadThroughPolicy {
    pub key_prefix: String,
    pub ttl: Duration,
}

impl Default for ReadThroughPolicy {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_CACHE_KEY_PREFIX.to_string(),
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl From<&CacheConfig> for ReadThroughPolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            key_prefix: config.key_prefix.clone(),
            ttl: config.ttl(),
        }
    }
}

/// Product service trait.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Returns the JSON body for a product, reading through the cache.
    ///
    /// Fails with `NotFound` when the store has no such product and with
    /// `Database` when the store cannot be queried. Cache failures never
    /// surface here.
    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductPayload>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> CatalogResult<()>;
}
