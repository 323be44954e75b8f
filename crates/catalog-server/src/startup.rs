//! Server startup utilities.

use catalog_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#);
}

/// Builds the startup summary lines.
fn startup_lines(config: &AppConfig, cache_backend: &str) -> Vec<String> {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    vec![
        separator.clone(),
        format!("Products:  http://{}/products/{{id}}", addr),
        format!("Health:    http://{}/health", addr),
        format!(
            "Cache:     {} (ttl {}s, prefix '{}')",
            cache_backend, config.cache.ttl_secs, config.cache.key_prefix
        ),
        separator,
    ]
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig, cache_backend: &str) {
    for line in startup_lines(config, cache_backend) {
        info!("{}", line);
    }
}
