use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{lib::errors::ConfigError, tools::registry::REGISTRY_BASE_URL};

/// Upstream registry settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySection {
    pub base_url: Url,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawRegistrySection {
    pub base_url: Option<String>,
}

pub fn parse_registry_section(
    raw: Option<RawRegistrySection>,
    path: &Path,
) -> Result<RegistrySection, ConfigError> {
    let base_url = raw
        .unwrap_or_default()
        .base_url
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| REGISTRY_BASE_URL.to_string());

    let base_url = Url::parse(base_url.trim()).map_err(|err| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "registry.base_url",
        message: format!("not a valid URL: {err}"),
    })?;
    if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "registry.base_url",
            message: "Use an absolute http:// or https:// URL".into(),
        });
    }

    Ok(RegistrySection { base_url })
}
