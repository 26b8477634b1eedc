use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::lib::errors::{RegistryError, RegistryOperation};

use super::ListQuery;

/// Public MCP registry.
pub const REGISTRY_BASE_URL: &str = "https://registry.modelcontextprotocol.io";
/// Identifying user agent sent with every registry request.
pub const USER_AGENT: &str = "MCP-Registry-Client/1.0.0";
const SERVERS_PATH: [&str; 2] = ["v0", "servers"];
const BODY_EXCERPT_CHARS: usize = 200;
/// Characters left bare in a server id segment; everything else is escaped.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// HTTP client for the registry API.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    base_url: Url,
}

impl RegistryClient {
    pub fn new(base_url: Url) -> Result<Self, RegistryError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /v0/servers` with the filters from `query`.
    pub async fn list_servers(&self, query: &ListQuery) -> Result<Value, RegistryError> {
        let url = self.list_url(query);
        self.fetch_json(url, RegistryOperation::ListServers).await
    }

    /// `GET /v0/servers/{server_id}`.
    pub async fn get_server(&self, server_id: &str) -> Result<Value, RegistryError> {
        let not_found = || RegistryError::NotFound {
            server_id: server_id.to_string(),
        };
        let Some(url) = self.server_url(server_id) else {
            debug!(
                target: "mcp_registry::registry",
                server_id,
                "Server id cannot address a detail resource"
            );
            return Err(not_found());
        };
        self.fetch_json(url, RegistryOperation::GetServer)
            .await
            .map_err(|err| match err {
                RegistryError::Upstream { status: 404, .. } => not_found(),
                other => other,
            })
    }

    pub fn list_url(&self, query: &ListQuery) -> Url {
        let mut url = self.endpoint();
        if query.has_filters() {
            url.set_query(Some(&query.to_query_string()));
        }
        url
    }

    /// Detail URL with `server_id` percent-encoded as a single path segment.
    ///
    /// Returns `None` for `.` and `..`, which URL normalization would resolve
    /// to a different resource.
    pub fn server_url(&self, server_id: &str) -> Option<Url> {
        if matches!(server_id, "." | "..") {
            return None;
        }
        let mut url = self.endpoint();
        let path = format!(
            "{}/{}",
            url.path(),
            utf8_percent_encode(server_id, ID_SEGMENT)
        );
        url.set_path(&path);
        Some(url)
    }

    fn endpoint(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        // Base URLs are validated as http(s) when the config is loaded.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(SERVERS_PATH);
        }
        url
    }

    async fn fetch_json(
        &self,
        url: Url,
        operation: RegistryOperation,
    ) -> Result<Value, RegistryError> {
        info!(
            target: "mcp_registry::registry",
            operation = operation.as_str(),
            url = %url,
            "Requesting registry"
        );

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(
                target: "mcp_registry::registry",
                operation = operation.as_str(),
                status = status.as_u16(),
                body = %body,
                "Registry returned a non-success status"
            );
            return Err(upstream_error(operation, status, body));
        }

        parse_body(&body, operation)
    }
}

fn upstream_error(operation: RegistryOperation, status: StatusCode, body: String) -> RegistryError {
    RegistryError::Upstream {
        operation,
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    }
}

/// Parse a success body, rejecting blank and non-JSON payloads.
pub fn parse_body(body: &str, operation: RegistryOperation) -> Result<Value, RegistryError> {
    if body.trim().is_empty() {
        return Err(RegistryError::EmptyResponse { operation });
    }
    serde_json::from_str(body).map_err(|source| RegistryError::InvalidJson {
        excerpt: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        source,
    })
}
