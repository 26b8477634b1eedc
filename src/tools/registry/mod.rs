//! MCP tools backed by the official MCP registry API.
pub mod client;
pub mod format;
pub mod query;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use client::{parse_body, RegistryClient, REGISTRY_BASE_URL, USER_AGENT};
pub use format::{
    format_server_detail, format_server_list, AppliedFilters, ServerDetailResult,
    ServerListResult,
};
pub use query::ListQuery;

use crate::lib::errors::RegistryError;

pub const LIST_TOOL_ID: &str = "ListMCPServers";
pub const GET_TOOL_ID: &str = "GetMCPServer";
pub const LIST_ERROR_PREFIX: &str = "Error fetching MCP servers from registry: ";
pub const GET_ERROR_PREFIX: &str = "Error fetching server details: ";

/// Input for `GetMCPServer`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetServerRequest {
    /// The UUID or name of the server to retrieve. If using the output of the ListMCPServers
    /// tool, it is located under the path _meta.io.modelcontextprotocol.registry/official.id
    pub server_id: String,
}

/// List servers and shape the result.
pub async fn list_servers(
    client: &RegistryClient,
    query: &ListQuery,
) -> Result<ServerListResult, RegistryError> {
    let payload = client.list_servers(query).await?;
    Ok(format_server_list(payload, query))
}

/// Fetch a single server and shape the result.
pub async fn get_server(
    client: &RegistryClient,
    server_id: &str,
) -> Result<ServerDetailResult, RegistryError> {
    let payload = client.get_server(server_id).await?;
    Ok(format_server_detail(payload, server_id))
}

/// Render a tool outcome as the single text block returned to the client.
///
/// Successes become pretty-printed JSON; failures become `{error_prefix}{message}`.
pub fn render_outcome<T: Serialize>(
    outcome: &Result<T, RegistryError>,
    error_prefix: &str,
) -> String {
    match outcome {
        Ok(result) => match serde_json::to_string_pretty(result) {
            Ok(text) => text,
            Err(err) => format!("{error_prefix}{err}"),
        },
        Err(err) => format!("{error_prefix}{err}"),
    }
}
