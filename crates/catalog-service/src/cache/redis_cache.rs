//! Redis-based cache implementation.

use super::{CacheInterface, CacheLookup};
use async_trait::async_trait;
use catalog_config::CacheConfig;
use catalog_core::{CatalogError, CatalogResult};
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Creates a Redis connection pool from configuration.
///
/// Pool creation does not open a connection; unreachable servers surface on
/// first use.
pub fn create_redis_pool(config: &CacheConfig) -> CatalogResult<Arc<Pool>> {
    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size.max(1)));

    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| CatalogError::cache(format!("Failed to create Redis pool: {}", e)))?;

    Ok(Arc::new(pool))
}

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when caching is disabled).
    ///
    /// Every lookup is a miss and every store is discarded.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CatalogError::cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CatalogError::cache("Cache is disabled")),
        }
    }
}

/// Converts a TTL to the whole seconds `SETEX` accepts, never below one.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get(&self, key: &str) -> CacheLookup {
        if !self.is_enabled() {
            return CacheLookup::Miss;
        }

        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return CacheLookup::Unavailable(e),
        };

        let value: Result<Option<Vec<u8>>, _> = conn.get(key).await;
        match value {
            Ok(Some(bytes)) => {
                debug!("Cache hit for key '{}'", key);
                CacheLookup::Hit(bytes)
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                CacheLookup::Miss
            }
            Err(e) => CacheLookup::Unavailable(CatalogError::cache(format!(
                "Failed to get key '{}': {}",
                key, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl_secs(ttl);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            CatalogError::cache(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn ping(&self) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CatalogError::cache(format!("PING failed: {}", e)))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        if self.is_enabled() {
            "redis"
        } else {
            "disabled"
        }
    }

    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
