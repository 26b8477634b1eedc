use std::path::Path;

use tracing::{debug, info};

use super::ServerConfig;

pub fn log_defaults(path: &Path) {
    debug!(
        target: "mcp_registry::config",
        path = %path.display(),
        "Configuration file not found; using built-in defaults"
    );
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "mcp_registry::config",
        path = %config
            .source_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        host = %config.server.host,
        port = config.server.port,
        registry_base_url = %config.registry.base_url,
        "Configuration file loaded successfully"
    );
}
