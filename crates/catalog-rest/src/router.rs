//! Main application router.

use crate::{
    controllers::{health_controller, product_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(health_controller::router())
        .merge(product_controller::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with product and health endpoints");
    router
}
