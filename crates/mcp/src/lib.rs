//! Model Context Protocol (MCP) client configuration for codex-doctor.
//!
//! Claude Code and similar MCP hosts read a JSON document with a
//! `mcpServers` map. This crate looks the Codex entry up in that document
//! and registers the server for individual projects in Claude's own config
//! files.

pub mod config;
pub mod projects;

pub use config::{CODEX_SERVER_NAME, ConfigError, McpConfig, McpServer, ServerEntry, load_config_from_path};
pub use projects::{ChangeResult, ClaudeConfigPaths, ClaudeHost, ClaudeTarget, FileChange, ProjectError, ProjectRegistry};
