//! Application state for Axum handlers.

use catalog_service::ProductService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(product_service: Arc<dyn ProductService>) -> Self {
        Self { product_service }
    }
}
