//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Product, ProductId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
///
/// The projection casts `id` and `price` so INTEGER and NUMERIC columns
/// decode into `i64` and `f64`.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
}

impl TryFrom<ProductRow> for Product {
    type Error = CatalogError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = ProductId::new(row.id)
            .map_err(|_| CatalogError::internal(format!("Invalid product id in database: {}", row.id)))?;

        Ok(Product {
            id,
            name: row.name,
            description: row.description,
            price: row.price,
        })
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id::INT8 AS id, name, description, price::FLOAT8 AS price
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn insert(&self, product: &Product) -> CatalogResult<()> {
        debug!("Inserting product: {}", product.id);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.id.into_inner())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .execute(self.pool.inner())
        .await?;

        Ok(())
    }

    async fn health_check(&self) -> CatalogResult<()> {
        self.pool.health_check().await
    }
}

impl std::fmt::Debug for PgProductRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductRepository").finish_non_exhaustive()
    }
}
