//! Log subscriber setup.

use catalog_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives when `RUST_LOG` is unset.
fn default_directives(config: &ObservabilityConfig) -> String {
    format!("{},tower_http=debug", config.log_level)
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `observability.log_level`. Output is
/// JSON lines when `observability.log_format` is `json`.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
