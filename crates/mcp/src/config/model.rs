//! Data models for MCP configuration.

use serde_json::Value;
use thiserror::Error;

/// Name of the server entry the Codex MCP server registers under.
pub const CODEX_SERVER_NAME: &str = "codex";

/// Key holding the server map in every MCP host config.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// A parsed MCP configuration document.
///
/// Only the `mcpServers.<name>.command` path is looked at; everything else
/// in the document is left as-is and never validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct McpConfig {
    document: Value,
}

/// What a config says about one named server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEntry<'a> {
    /// No entry under `mcpServers`, or `mcpServers` is not an object.
    Absent,
    /// The entry exists but has no string `command`.
    NoCommand,
    Command(&'a str),
}

impl McpConfig {
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    /// Look up a server entry by name.
    pub fn server(&self, name: &str) -> ServerEntry<'_> {
        let Some(entry) = self.document.get(MCP_SERVERS_KEY).and_then(|servers| servers.get(name)) else {
            return ServerEntry::Absent;
        };
        match entry.get("command").and_then(Value::as_str) {
            Some(command) => ServerEntry::Command(command),
            None => ServerEntry::NoCommand,
        }
    }

    /// The Codex server entry.
    pub fn codex(&self) -> ServerEntry<'_> {
        self.server(CODEX_SERVER_NAME)
    }
}

/// A stdio server entry as written into host configs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServer {
    pub command: String,
    pub args: Vec<String>,
}

impl McpServer {
    /// Entry that launches a compiled Codex MCP server with node.
    pub fn node(entry_point: impl Into<String>) -> Self {
        Self {
            command: "node".to_string(),
            args: vec![entry_point.into()],
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "command": self.command, "args": self.args })
    }
}

/// Errors that can occur while loading or saving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(document: Value) -> McpConfig {
        McpConfig::from_value(document)
    }

    #[test]
    fn command_is_found_whatever_else_the_file_holds() {
        let cfg = config(json!({
            "mcpServers": {
              "other": { "args": "--stdio" },
              "codex": {
                "command": "node",
                "args": ["/opt/codex-mcp/dist/index.js"],
                "env": { "PORT": 3000 }
              }
            },
            "unrelated": 1
        }));
        assert_eq!(cfg.codex(), ServerEntry::Command("node"));
        assert_eq!(cfg.server("other"), ServerEntry::NoCommand);
    }

    #[test]
    fn missing_or_odd_server_maps_have_no_entry() {
        assert_eq!(config(json!({})).codex(), ServerEntry::Absent);
        assert_eq!(config(json!({ "mcpServers": null })).codex(), ServerEntry::Absent);
        assert_eq!(config(json!({ "mcpServers": ["codex"] })).codex(), ServerEntry::Absent);
        assert_eq!(config(json!({ "mcpServers": {} })).codex(), ServerEntry::Absent);
        assert_eq!(config(json!([1, 2])).codex(), ServerEntry::Absent);
    }

    #[test]
    fn non_string_command_counts_as_missing() {
        assert_eq!(config(json!({ "mcpServers": { "codex": {} } })).codex(), ServerEntry::NoCommand);
        assert_eq!(
            config(json!({ "mcpServers": { "codex": { "command": 5 } } })).codex(),
            ServerEntry::NoCommand
        );
        assert_eq!(config(json!({ "mcpServers": { "codex": null } })).codex(), ServerEntry::NoCommand);
    }

    #[test]
    fn node_entry_serializes_command_and_args() {
        let server = McpServer::node("/work/codex-mcp/dist/index.js");
        assert_eq!(
            server.to_value(),
            json!({ "command": "node", "args": ["/work/codex-mcp/dist/index.js"] })
        );
    }
}
