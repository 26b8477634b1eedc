use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Input for `ListMCPServers`.
///
/// Every field is optional and no defaults are filled in. Empty strings and a
/// zero `limit` count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListQuery {
    /// Optional search query to filter servers, usually a substring of the server name.
    #[serde(default)]
    pub query: Option<String>,
    /// Maximum number of servers to return.
    #[serde(default)]
    pub limit: Option<i64>,
    /// Search servers by name (substring match). Example: 'filesystem'.
    #[serde(default)]
    pub search: Option<String>,
    /// Filter servers updated since timestamp (RFC3339 datetime). Example: '2025-08-07T13:15:04.280Z'.
    #[serde(default)]
    pub updated_since: Option<String>,
    /// Filter by version ('latest' for latest version, or an exact version like '1.2.3'). Example: 'latest'.
    #[serde(default)]
    pub version: Option<String>,
}

impl ListQuery {
    pub fn query(&self) -> Option<&str> {
        present(&self.query)
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit.filter(|limit| *limit != 0)
    }

    pub fn search(&self) -> Option<&str> {
        present(&self.search)
    }

    pub fn updated_since(&self) -> Option<&str> {
        present(&self.updated_since)
    }

    pub fn version(&self) -> Option<&str> {
        present(&self.version)
    }

    /// True when at least one filter was supplied.
    pub fn has_filters(&self) -> bool {
        !self.query_pairs().is_empty()
    }

    /// Query-string entries for the present fields, in fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = self.query() {
            pairs.push(("q", query.to_string()));
        }
        if let Some(limit) = self.limit() {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(updated_since) = self.updated_since() {
            pairs.push(("updated_since", updated_since.to_string()));
        }
        if let Some(version) = self.version() {
            pairs.push(("version", version.to_string()));
        }
        pairs
    }

    /// Form-urlencoded query string without the leading `?`. Empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.query_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
