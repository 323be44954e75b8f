//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, Product, ProductId};

/// Product store trait.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Finds a product by primary key.
    ///
    /// Returns `Ok(None)` when no row matches; errors are reserved for
    /// connectivity and query failures.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Inserts a fully specified product row.
    ///
    /// Fails with [`CatalogError::Conflict`](catalog_core::CatalogError::Conflict)
    /// when the ID is already taken.
    async fn insert(&self, product: &Product) -> CatalogResult<()>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> CatalogResult<()>;
}
