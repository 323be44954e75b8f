//! Product lookup controller.

use crate::{
    responses::{json_bytes, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use catalog_core::{CatalogError, ProductId};
use tracing::debug;

/// Creates the product router.
///
/// Everything after `/products/` is the ID, so an empty suffix or one with
/// extra segments is rejected as an invalid ID rather than left unrouted.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products/", get(get_product_without_id))
        .route("/products/*id", get(get_product))
}

/// Get a product by ID.
///
/// The body is the cached or freshly serialized JSON, passed through
/// without re-encoding.
async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let product_id = parse_product_id(&id)?;

    let payload = state.product_service.get_product(product_id).await?;
    debug!("Served product {} from {:?}", product_id, payload.source);

    Ok(json_bytes(payload.body))
}

/// `/products/` with nothing after it.
async fn get_product_without_id() -> AppError {
    AppError(CatalogError::validation("Invalid product ID"))
}

/// Helper to parse a product ID from the path parameter.
fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    ProductId::parse(id).map_err(|_| AppError(CatalogError::validation("Invalid product ID")))
}
