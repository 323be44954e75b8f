//! Configuration loader with layered sources.

use crate::{AppConfig, CacheBackend};
use catalog_core::{CatalogError, CatalogResult};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CATALOG";

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `CATALOG_` prefix, `__` between sections
    pub fn new(config_dir: impl Into<String>) -> CatalogResult<Self> {
        let config = Self::load_config(&config_dir.into())?;

        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> CatalogResult<Self> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> CatalogResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{}_ENVIRONMENT", ENV_PREFIX))
            .unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_catalog_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_catalog_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> CatalogResult<()> {
    if config.database.url.is_empty() {
        return Err(CatalogError::Configuration("Database URL is required".to_string()));
    }

    if config.database.max_connections == 0 {
        return Err(CatalogError::Configuration(
            "database.max_connections must be at least 1".to_string(),
        ));
    }

    if config.cache.backend == CacheBackend::Redis && config.cache.url.is_empty() {
        return Err(CatalogError::Configuration(
            "Redis URL is required when cache.backend is redis".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(CatalogError::Configuration(
            "cache.ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.cache.key_prefix.is_empty() {
        return Err(CatalogError::Configuration(
            "cache.key_prefix must not be empty".to_string(),
        ));
    }

    if config.app.environment == "production" && config.cache.backend == CacheBackend::Memory {
        warn!("In-memory cache in production is not shared between instances");
    }

    Ok(())
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}
