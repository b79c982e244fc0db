//! Configuration management for MCP servers.
//! This module reads MCP host configuration documents such as the
//! `mcp_config_for_claude_code.json` template and the Claude config files.

mod io;
mod model;

pub use io::{CONFIG_TEMPLATE_FILE_NAME, load_config_from_path, load_document, parse_config, save_document};
pub use model::{CODEX_SERVER_NAME, ConfigError, MCP_SERVERS_KEY, McpConfig, McpServer, ServerEntry};
