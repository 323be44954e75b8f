//! Cache key generators for consistent key naming.

use catalog_core::ProductId;

/// Generate the cache key for a product: the prefix followed by the
/// decimal ID, e.g. `product:42`.
#[must_use]
pub fn product_by_id(prefix: &str, id: ProductId) -> String {
    format!("{}{}", prefix, id)
}
