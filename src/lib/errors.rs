use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Registry call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryOperation {
    ListServers,
    GetServer,
}

impl RegistryOperation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegistryOperation::ListServers => "list_servers",
            RegistryOperation::GetServer => "get_server",
        }
    }

    /// What the operation fetches, as used in upstream failure messages.
    const fn subject(&self) -> &'static str {
        match self {
            RegistryOperation::ListServers => "servers",
            RegistryOperation::GetServer => "server details",
        }
    }

    const fn empty_response_message(&self) -> &'static str {
        match self {
            RegistryOperation::ListServers => "Empty response from registry API",
            RegistryOperation::GetServer => "Empty response from registry API for server details",
        }
    }
}

/// Coarse classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Upstream,
    NotFound,
    MalformedResponse,
    Transport,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Upstream => "upstream",
            ErrorKind::NotFound => "not_found",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Transport => "transport",
        }
    }
}

/// Failures raised while talking to the registry API.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(
        "Failed to fetch {}: {status} {status_text}. Response: {body}",
        .operation.subject()
    )]
    Upstream {
        operation: RegistryOperation,
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("Server with ID \"{server_id}\" not found in the registry")]
    NotFound { server_id: String },
    #[error("{}", .operation.empty_response_message())]
    EmptyResponse { operation: RegistryOperation },
    #[error("Invalid JSON response from registry: {source}. Response text: {excerpt}...")]
    InvalidJson {
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to reach registry: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Upstream { .. } => ErrorKind::Upstream,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::EmptyResponse { .. } | RegistryError::InvalidJson { .. } => {
                ErrorKind::MalformedResponse
            }
            RegistryError::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// HTTP status attached to the failure, when upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Upstream { status, .. } => Some(*status),
            RegistryError::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(source: reqwest::Error) -> Self {
        RegistryError::Transport { source }
    }
}
