use serde::Serialize;
use serde_json::Value;

use super::ListQuery;

/// Filters echoed back to the caller. Unset filters serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFilters {
    pub query: Option<String>,
    pub search: Option<String>,
    pub updated_since: Option<String>,
    pub version: Option<String>,
    pub limit: Option<i64>,
}

impl From<&ListQuery> for AppliedFilters {
    fn from(query: &ListQuery) -> Self {
        Self {
            query: query.query().map(str::to_string),
            search: query.search().map(str::to_string),
            updated_since: query.updated_since().map(str::to_string),
            version: query.version().map(str::to_string),
            limit: query.limit(),
        }
    }
}

/// Output of `ListMCPServers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerListResult {
    pub summary: String,
    pub applied_filters: AppliedFilters,
    pub total_count: usize,
    pub servers: Vec<Value>,
    pub pagination: Option<Value>,
}

/// Output of `GetMCPServer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerDetailResult {
    pub summary: String,
    pub server: Value,
}

/// Reshape a `/v0/servers` payload into a summary-first envelope.
pub fn format_server_list(payload: Value, query: &ListQuery) -> ServerListResult {
    let (servers, pagination) = match payload {
        Value::Object(mut map) => {
            let servers = match map.remove("servers") {
                Some(Value::Array(servers)) => servers,
                _ => Vec::new(),
            };
            let pagination = map.remove("pagination").filter(|value| !value.is_null());
            (servers, pagination)
        }
        _ => (Vec::new(), None),
    };

    let total_count = servers.len();
    let filters = describe_filters(query);
    let summary = if filters.is_empty() {
        format!("Found {total_count} MCP servers from the registry")
    } else {
        format!(
            "Found {total_count} MCP servers with filters: {}",
            filters.join(", ")
        )
    };

    ServerListResult {
        summary,
        applied_filters: AppliedFilters::from(query),
        total_count,
        servers,
        pagination,
    }
}

/// Wrap a `/v0/servers/{id}` payload, naming it by its `name` or the requested id.
pub fn format_server_detail(payload: Value, server_id: &str) -> ServerDetailResult {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(server_id);
    let summary = format!("Details for MCP server: {name}");

    ServerDetailResult {
        summary,
        server: payload,
    }
}

fn describe_filters(query: &ListQuery) -> Vec<String> {
    let mut filters = Vec::new();
    if let Some(value) = query.query() {
        filters.push(format!("query: \"{value}\""));
    }
    if let Some(value) = query.search() {
        filters.push(format!("search: \"{value}\""));
    }
    if let Some(value) = query.updated_since() {
        filters.push(format!("updated since: {value}"));
    }
    if let Some(value) = query.version() {
        filters.push(format!("version: {value}"));
    }
    if let Some(value) = query.limit() {
        filters.push(format!("limit: {value}"));
    }
    filters
}
