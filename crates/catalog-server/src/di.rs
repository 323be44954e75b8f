//! Dependency wiring for the catalog server.
//!
//! Every seam is a `shaku::Interface` trait object. The module is assembled
//! by hand because the pool and cache handles only exist after async
//! connection setup.

use catalog_config::{CacheBackend, CacheConfig};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{DatabasePoolInterface, PgProductRepository, ProductRepository};
use catalog_service::{
    create_redis_pool, CacheInterface, InMemoryCache, ProductService, ProductServiceImpl,
    ReadThroughPolicy, RedisCacheService,
};
use std::sync::Arc;
use tracing::info;

/// Builds the cache backend selected by configuration.
///
/// The in-memory backend gets a sweeper running once per TTL, so this must
/// be called from within a tokio runtime.
pub fn build_cache(config: &CacheConfig) -> CatalogResult<Arc<dyn CacheInterface>> {
    let cache: Arc<dyn CacheInterface> = match config.backend {
        CacheBackend::Redis => Arc::new(RedisCacheService::new(create_redis_pool(config)?)),
        CacheBackend::Memory => {
            let cache = Arc::new(InMemoryCache::new());
            cache.spawn_sweeper(config.ttl());
            cache
        }
        CacheBackend::Disabled => Arc::new(RedisCacheService::disabled()),
    };

    info!("Cache backend: {}", cache.backend());
    Ok(cache)
}

/// Resolved application components.
#[derive(Clone)]
pub struct AppModule {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    product_service: Arc<dyn ProductService>,
}

impl AppModule {
    /// Resolves the product service.
    pub fn product_service(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    /// Resolves the product repository.
    pub fn repository(&self) -> Arc<dyn ProductRepository> {
        self.repository.clone()
    }

    /// Resolves the cache.
    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.cache.clone()
    }
}

/// Builder for [`AppModule`].
#[derive(Default)]
pub struct AppModuleBuilder {
    database_pool: Option<Arc<dyn DatabasePoolInterface>>,
    repository: Option<Arc<dyn ProductRepository>>,
    cache: Option<Arc<dyn CacheInterface>>,
    policy: ReadThroughPolicy,
}

impl AppModuleBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database pool; the PostgreSQL repository is built on it.
    #[must_use]
    pub fn with_database_pool(mut self, pool: Arc<dyn DatabasePoolInterface>) -> Self {
        self.database_pool = Some(pool);
        self
    }

    /// Overrides the product repository.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn ProductRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Sets the cache backend. Defaults to a disabled cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheInterface>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the cache key prefix and TTL.
    #[must_use]
    pub fn with_policy(mut self, policy: ReadThroughPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the module.
    ///
    /// Fails with `Configuration` when neither a repository nor a database
    /// pool was supplied.
    pub fn build(self) -> CatalogResult<AppModule> {
        let repository: Arc<dyn ProductRepository> = match (self.repository, self.database_pool) {
            (Some(repository), _) => repository,
            (None, Some(pool)) => Arc::new(PgProductRepository::new(pool)),
            (None, None) => {
                return Err(CatalogError::Configuration(
                    "A database pool or repository is required".to_string(),
                ))
            }
        };

        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(RedisCacheService::disabled()));

        let product_service: Arc<dyn ProductService> = Arc::new(ProductServiceImpl::new(
            repository.clone(),
            cache.clone(),
            self.policy,
        ));

        Ok(AppModule {
            repository,
            cache,
            product_service,
        })
    }
}
