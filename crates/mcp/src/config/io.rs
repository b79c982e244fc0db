//! Configuration IO helpers for MCP host configuration files.

use crate::config::{ConfigError, McpConfig};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use tracing::debug;

/// File name of the template the Codex MCP server ships for Claude Code.
pub const CONFIG_TEMPLATE_FILE_NAME: &str = "mcp_config_for_claude_code.json";

/// Loads and parses MCP configuration from a specific path.
pub fn load_config_from_path(path: &Path) -> Result<McpConfig, ConfigError> {
    Ok(McpConfig::from_value(load_document(path)?))
}

/// Parses MCP configuration text. Only JSON syntax is checked.
pub fn parse_config(content: &str) -> Result<McpConfig, ConfigError> {
    Ok(McpConfig::from_value(serde_json::from_str(content)?))
}

/// Reads a JSON document from disk without interpreting it.
pub fn load_document(path: &Path) -> Result<Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "loaded json document");
    Ok(serde_json::from_str(&content)?)
}

/// Writes a JSON document with four-space indentation, keeping key order.
pub fn save_document(path: &Path, document: &Value) -> Result<(), ConfigError> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    buffer.push(b'\n');
    fs::write(path, buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerEntry;

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_TEMPLATE_FILE_NAME);
        fs::write(&path, r#"{"mcpServers":{"codex":{"command":"node"}}}"#).unwrap();

        let cfg = load_config_from_path(&path).unwrap();
        assert_eq!(cfg.codex(), ServerEntry::Command("node"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn only_syntax_errors_are_rejected() {
        assert!(matches!(parse_config("{\"mcpServers\": {"), Err(ConfigError::Json(_))));
        assert!(parse_config(r#"{"mcpServers": []}"#).is_ok());
        assert!(parse_config(r#"{"mcpServers": {"codex": {"command": 5}}}"#).is_ok());
    }

    #[test]
    fn save_keeps_key_order_and_indents_four_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".claude.json");
        let document: Value = serde_json::from_str(r#"{"zeta":1,"alpha":{"beta":true}}"#).unwrap();

        save_document(&path, &document).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n    \"zeta\": 1,\n    \"alpha\": {\n        \"beta\": true\n    }\n}\n");
        assert_eq!(load_document(&path).unwrap(), document);
    }
}
