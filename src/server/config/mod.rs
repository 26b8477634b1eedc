//! Load and validate server configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod registry;
pub mod server;
pub mod telemetry;

pub use registry::{parse_registry_section, RawRegistrySection, RegistrySection};
pub use server::{
    parse_server_section, RawServerSection, ServerSection, DEFAULT_HOST, DEFAULT_PORT,
};

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub registry: RegistrySection,
    /// File the configuration was read from; `None` when running on built-in defaults.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    registry: Option<RawRegistrySection>,
}

impl ServerConfig {
    /// Built-in defaults: public registry, TCP on 127.0.0.1:8787.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_raw(RawServerConfig::default(), Path::new("<defaults>"), None)
    }

    /// Load `path`, or fall back to defaults when it is absent and was not explicitly requested.
    pub fn load(path: PathBuf, required: bool) -> Result<Self, ConfigError> {
        if !required && !path.exists() {
            telemetry::log_defaults(&path);
            return Self::defaults();
        }
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "mcp_registry::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "mcp_registry::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "mcp_registry::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, &path, Some(path.clone())).map_err(|err| {
            error!(
                target: "mcp_registry::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(
        raw: RawServerConfig,
        path: &Path,
        source_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, path)?;
        let registry = parse_registry_section(raw.registry, path)?;

        Ok(Self {
            server,
            registry,
            source_path,
        })
    }
}
