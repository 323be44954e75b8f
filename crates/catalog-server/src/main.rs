//! # Catalog Server
//!
//! Entry point for the product catalog service: loads configuration,
//! connects the store and the cache, optionally seeds products and serves
//! `GET /products/{id}` until interrupted.

use catalog_config::{AppConfig, ConfigLoader};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{create_pool, default_products, seed_products, DatabasePoolInterface};
use catalog_rest::{create_router, AppState};
use catalog_server::{
    di::{build_cache, AppModuleBuilder},
    startup, telemetry,
};
use catalog_service::ReadThroughPolicy;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    telemetry::init_logging(&config.observability);

    info!("Starting Product Catalog Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> CatalogResult<()> {
    startup::print_banner();

    // Store first: without it nothing can be served.
    let db_pool = create_pool(&config.database).await?;
    db_pool.health_check().await?;
    info!("Database connection verified");

    let cache = build_cache(&config.cache)?;
    if cache.is_enabled() {
        match cache.ping().await {
            Ok(()) => info!("Cache connection verified"),
            Err(e) => warn!("Cache unreachable, continuing without it: {}", e),
        }
    }

    let module = AppModuleBuilder::new()
        .with_database_pool(db_pool.clone())
        .with_cache(cache.clone())
        .with_policy(ReadThroughPolicy::from(&config.cache))
        .build()?;

    if config.database.seed_on_startup {
        let products = default_products()?;
        let repository = module.repository();
        seed_products(repository.as_ref(), &products).await;
    }

    let router = create_router(AppState::new(module.product_service()));

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    startup::print_startup_info(&config, cache.backend());
    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CatalogError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
