use std::sync::Arc;

use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, ErrorData, Implementation, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use tracing::Instrument;

use crate::{
    lib::{
        errors::{RegistryError, RegistryOperation},
        telemetry::RequestSpan,
    },
    tools::{
        registry::{
            self, GetServerRequest, ListQuery, RegistryClient, GET_ERROR_PREFIX,
            LIST_ERROR_PREFIX,
        },
        ServerToolRouter,
    },
};

/// Name announced to clients during initialization.
pub const SERVER_NAME: &str = "MCP Registry Client";

/// MCP server exposing the registry tools.
///
/// Holds no per-call state; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct RegistryServer {
    client: RegistryClient,
    instructions: Arc<String>,
    tool_router: ServerToolRouter<Self>,
}

impl RegistryServer {
    pub fn new(client: RegistryClient, instructions: String) -> Self {
        Self {
            client,
            instructions: Arc::new(instructions),
            tool_router: Self::tool_router(),
        }
    }
}

/// Every outcome, including failures, travels back as a single text block.
fn text_result<T: serde::Serialize>(
    outcome: &Result<T, RegistryError>,
    error_prefix: &str,
) -> CallToolResult {
    CallToolResult::success(vec![Content::text(registry::render_outcome(
        outcome,
        error_prefix,
    ))])
}

#[tool_router(router = tool_router)]
impl RegistryServer {
    #[tool(
        name = "ListMCPServers",
        description = "Fetch and list MCP servers from the official MCP registry, optionally filtered by query, name, update time, or version"
    )]
    async fn list_mcp_servers(
        &self,
        Parameters(query): Parameters<ListQuery>,
    ) -> Result<CallToolResult, ErrorData> {
        let span = RequestSpan::start(RegistryOperation::ListServers);
        let outcome = registry::list_servers(&self.client, &query)
            .instrument(span.span().clone())
            .await;
        match &outcome {
            Ok(result) => span.succeed(result.total_count),
            Err(err) => span.fail(err),
        }
        Ok(text_result(&outcome, LIST_ERROR_PREFIX))
    }

    #[tool(
        name = "GetMCPServer",
        description = "Get detailed information about a specific MCP server from the official MCP registry"
    )]
    async fn get_mcp_server(
        &self,
        Parameters(request): Parameters<GetServerRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let span = RequestSpan::start(RegistryOperation::GetServer);
        let outcome = registry::get_server(&self.client, &request.server_id)
            .instrument(span.span().clone())
            .await;
        match &outcome {
            Ok(_) => span.succeed(1),
            Err(err) => span.fail(err),
        }
        Ok(text_result(&outcome, GET_ERROR_PREFIX))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RegistryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }
}
