//! MCP tools registered on the server.

pub mod registry;

use rmcp::handler::server::router::tool::ToolRouter;

/// Router type shared by the tool handlers of a server `S`.
pub type ServerToolRouter<S> = ToolRouter<S>;

pub use registry::{GET_TOOL_ID, LIST_TOOL_ID};
