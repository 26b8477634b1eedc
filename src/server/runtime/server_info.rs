use crate::{cli::LaunchProfile, server::config::ServerConfig};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &ServerConfig) -> String {
    format!(
        "Browse the MCP registry at {base_url} ({transport} mode). Call ListMCPServers to search published servers, then GetMCPServer with a server id from _meta.io.modelcontextprotocol.registry/official.id for full details.",
        base_url = config.registry.base_url,
        transport = profile.transport.as_str(),
    )
}
