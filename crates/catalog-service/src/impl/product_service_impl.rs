//! Read-through product service implementation.

use crate::cache::{cache_keys, CacheInterface, CacheLookup};
use crate::product_service::{PayloadSource, ProductPayload, ProductService, ReadThroughPolicy};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, ProductId};
use catalog_repository::ProductRepository;
use std::sync::Arc;
use tracing::warn;

/// Product service that answers from the cache when it can and from the
/// store otherwise, writing store results back to the cache.
///
/// A cache that is down behaves exactly like an empty cache.
pub struct ProductServiceImpl {
    repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    policy: ReadThroughPolicy,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        policy: ReadThroughPolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductPayload> {
        let cache_key = cache_keys::product_by_id(&self.policy.key_prefix, id);

        // Backends log hits and misses themselves.
        match self.cache.get(&cache_key).await {
            CacheLookup::Hit(body) => {
                return Ok(ProductPayload {
                    body,
                    source: PayloadSource::Cache,
                });
            }
            CacheLookup::Miss => {}
            CacheLookup::Unavailable(e) => {
                warn!(product_id = %id, error = %e, "Cache unavailable, reading from store");
            }
        }

        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        let body = product.to_json_bytes()?;

        if let Err(e) = self.cache.set(&cache_key, &body, self.policy.ttl).await {
            warn!(product_id = %id, error = %e, "Error caching product data");
        }

        Ok(ProductPayload {
            body,
            source: PayloadSource::Store,
        })
    }

    async fn health_check(&self) -> CatalogResult<()> {
        self.repository.health_check().await
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl")
            .field("cache", &self.cache.backend())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use catalog_core::Product;
    use mockall::mock;
    use std::time::Duration;

    mock! {
        ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;
            async fn insert(&self, product: &Product) -> CatalogResult<()>;
            async fn health_check(&self) -> CatalogResult<()>;
        }
    }

    mock! {
        Cache {}

        #[async_trait]
        impl CacheInterface for Cache {
            async fn get(&self, key: &str) -> CacheLookup;
            async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CatalogResult<()>;
            async fn ping(&self) -> CatalogResult<()>;
            fn backend(&self) -> &'static str;
            fn is_enabled(&self) -> bool;
        }
    }

    const PRODUCT_1_JSON: &str =
        r#"{"id":1,"name":"Product 1","description":"Description 1","price":10.99}"#;

    fn product_id(id: i64) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn product_1() -> Product {
        Product::new(product_id(1), "Product 1", "Description 1", 10.99)
    }

    fn service(repo: MockProductRepo, cache: Arc<dyn CacheInterface>) -> ProductServiceImpl {
        ProductServiceImpl::new(Arc::new(repo), cache, ReadThroughPolicy::default())
    }

    fn repo_returning(product: Option<Product>, times: usize) -> MockProductRepo {
        let mut repo = MockProductRepo::new();
        repo.expect_find_by_id()
            .times(times)
            .returning(move |_| Ok(product.clone()));
        repo
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store_and_returns_bytes_verbatim() {
        let mut repo = MockProductRepo::new();
        repo.expect_find_by_id().never();

        let mut cache = MockCache::new();
        cache
            .expect_get()
            .withf(|key: &str| key == "product:1")
            .times(1)
            .returning(|_| CacheLookup::Hit(b"not even json".to_vec()));
        cache.expect_set().never();

        let payload = service(repo, Arc::new(cache))
            .get_product(product_id(1))
            .await
            .unwrap();

        assert_eq!(payload.body, b"not even json".to_vec());
        assert_eq!(payload.source, PayloadSource::Cache);
    }

    #[tokio::test]
    async fn test_cache_miss_reads_store_and_populates_cache() {
        let repo = repo_returning(Some(product_1()), 1);

        let mut cache = MockCache::new();
        cache.expect_get().times(1).returning(|_| CacheLookup::Miss);
        cache
            .expect_set()
            .withf(|key: &str, value: &[u8], ttl: &Duration| {
                key == "product:1"
                    && value == PRODUCT_1_JSON.as_bytes()
                    && *ttl == Duration::from_secs(600)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let payload = service(repo, Arc::new(cache))
            .get_product(product_id(1))
            .await
            .unwrap();

        assert_eq!(payload.body, PRODUCT_1_JSON.as_bytes());
        assert_eq!(payload.source, PayloadSource::Store);
    }

    #[tokio::test]
    async fn test_absent_product_is_not_found_and_not_cached() {
        let repo = repo_returning(None, 1);

        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Miss);
        cache.expect_set().never();

        let err = service(repo, Arc::new(cache))
            .get_product(product_id(999))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_store_error_is_database_error() {
        let mut repo = MockProductRepo::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|_| Err(CatalogError::Database("connection reset".to_string())));

        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Miss);
        cache.expect_set().never();

        let err = service(repo, Arc::new(cache))
            .get_product(product_id(1))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Database(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_unavailable_cache_falls_through_to_store() {
        let repo = repo_returning(Some(product_1()), 1);

        let mut cache = MockCache::new();
        cache
            .expect_get()
            .returning(|_| CacheLookup::Unavailable(CatalogError::cache("connection refused")));
        cache
            .expect_set()
            .times(1)
            .returning(|_, _, _| Err(CatalogError::cache("connection refused")));

        let payload = service(repo, Arc::new(cache))
            .get_product(product_id(1))
            .await
            .unwrap();

        assert_eq!(payload.body, PRODUCT_1_JSON.as_bytes());
        assert_eq!(payload.source, PayloadSource::Store);
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_request() {
        let repo = repo_returning(Some(product_1()), 1);

        let mut cache = MockCache::new();
        cache.expect_get().returning(|_| CacheLookup::Miss);
        cache
            .expect_set()
            .returning(|_, _, _| Err(CatalogError::cache("OOM command not allowed")));

        let result = service(repo, Arc::new(cache)).get_product(product_id(1)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache_byte_identical() {
        let repo = repo_returning(Some(product_1()), 1);
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache.clone());

        let first = service.get_product(product_id(1)).await.unwrap();
        let second = service.get_product(product_id(1)).await.unwrap();

        assert_eq!(first.source, PayloadSource::Store);
        assert_eq!(second.source, PayloadSource::Cache);
        assert_eq!(first.body, second.body);
        assert!(cache.contains_key("product:1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_requeries_store() {
        let repo = repo_returning(Some(product_1()), 2);
        let cache = Arc::new(InMemoryCache::new());
        let service = service(repo, cache);

        service.get_product(product_id(1)).await.unwrap();

        tokio::time::advance(Duration::from_secs(599)).await;
        let warm = service.get_product(product_id(1)).await.unwrap();
        assert_eq!(warm.source, PayloadSource::Cache);

        tokio::time::advance(Duration::from_secs(1)).await;
        let cold = service.get_product(product_id(1)).await.unwrap();
        assert_eq!(cold.source, PayloadSource::Store);
    }

    #[tokio::test]
    async fn test_custom_key_prefix_and_ttl() {
        let repo = repo_returning(Some(product_1()), 1);

        let mut cache = MockCache::new();
        cache
            .expect_get()
            .withf(|key: &str| key == "shop:product:1")
            .returning(|_| CacheLookup::Miss);
        cache
            .expect_set()
            .withf(|key: &str, _: &[u8], ttl: &Duration| {
                key == "shop:product:1" && *ttl == Duration::from_secs(30)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let policy = ReadThroughPolicy {
            key_prefix: "shop:product:".to_string(),
            ttl: Duration::from_secs(30),
        };
        let service = ProductServiceImpl::new(Arc::new(repo), Arc::new(cache), policy);

        service.get_product(product_id(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_repeated_reads_never_write_the_store() {
        let mut repo = repo_returning(Some(product_1()), 1);
        repo.expect_insert().never();
        let service = service(repo, Arc::new(InMemoryCache::new()));

        for _ in 0..5 {
            let payload = service.get_product(product_id(1)).await.unwrap();
            assert_eq!(payload.body, PRODUCT_1_JSON.as_bytes());
        }
    }

    #[tokio::test]
    async fn test_health_check_delegates_to_store() {
        let mut repo = MockProductRepo::new();
        repo.expect_health_check()
            .times(1)
            .returning(|| Err(CatalogError::Database("down".to_string())));

        let service = service(repo, Arc::new(InMemoryCache::new()));

        assert!(service.health_check().await.is_err());
    }

    /// Log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    #[tokio::test]
    async fn test_cache_hit_is_logged_once() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let repo = repo_returning(Some(product_1()), 1);
        let service = service(repo, Arc::new(InMemoryCache::new()));

        service.get_product(product_id(1)).await.unwrap();
        service.get_product(product_id(1)).await.unwrap();

        let output = logs.contents();
        assert_eq!(output.matches("Cache hit").count(), 1, "{}", output);
        assert_eq!(output.matches("Cache miss").count(), 1, "{}", output);
    }
}
