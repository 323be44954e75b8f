//! Fixed product rows inserted at startup when seeding is enabled.

use crate::ProductRepository;
use catalog_core::{CatalogResult, Product, ProductId};
use tracing::{info, warn};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// The default seed list.
pub fn default_products() -> CatalogResult<Vec<Product>> {
    Ok(vec![
        Product::new(ProductId::new(1)?, "Product 1", "Description 1", 10.99),
        Product::new(ProductId::new(2)?, "Product 2", "Description 2", 20.49),
    ])
}

/// Inserts each product in turn.
///
/// A failed insert (typically a duplicate key from an earlier run) is logged
/// and counted as skipped; it never stops the remaining inserts.
pub async fn seed_products<R>(repository: &R, products: &[Product]) -> SeedReport
where
    R: ProductRepository + ?Sized,
{
    let mut report = SeedReport::default();

    for product in products {
        match repository.insert(product).await {
            Ok(()) => report.inserted += 1,
            Err(e) => {
                warn!(product_id = %product.id, error = %e, "Error creating product");
                report.skipped += 1;
            }
        }
    }

    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Product seeding finished"
    );
    report
}
