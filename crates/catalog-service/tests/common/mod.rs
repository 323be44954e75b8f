//! Common test infrastructure for cache integration tests.

use catalog_config::{CacheBackend, CacheConfig};
use catalog_service::create_redis_pool;
use deadpool_redis::Pool;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;

/// Test Redis container wrapper.
///
/// Keeps the container alive for as long as the pool is in use.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    pool: Arc<Pool>,
}

impl TestRedis {
    /// Starts a fresh Redis container and builds a pool against it.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = CacheConfig {
            backend: CacheBackend::Redis,
            url: format!("redis://127.0.0.1:{}", port),
            ..CacheConfig::default()
        };
        let pool = create_redis_pool(&config).expect("Failed to create Redis pool");

        Self {
            _container: container,
            pool,
        }
    }

    /// Returns the shared pool.
    pub fn pool(&self) -> Arc<Pool> {
        Arc::clone(&self.pool)
    }

    /// Remaining TTL of `key` in seconds, as reported by `TTL`.
    pub async fn ttl(&self, key: &str) -> i64 {
        let mut conn = self.pool.get().await.expect("Failed to get Redis connection");
        deadpool_redis::redis::cmd("TTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .expect("TTL failed")
    }
}
