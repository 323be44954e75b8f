//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Interface};
use std::time::Duration;

/// Outcome of a cache lookup.
#[derive(Debug)]
pub enum CacheLookup {
    /// The key holds a live value.
    Hit(Vec<u8>),
    /// The key is absent or expired.
    Miss,
    /// The backend could not be reached or answered with an error.
    Unavailable(CatalogError),
}

/// Cache interface for storing and retrieving serialized values.
///
/// Values are opaque bytes. Implementations must be safe to share across
/// concurrent requests; no cross-request locking is expected of callers.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Looks up a previously stored value.
    async fn get(&self, key: &str) -> CacheLookup;

    /// Stores a value that expires `ttl` from now.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CatalogResult<()>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> CatalogResult<()>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}
