use std::path::Path;

use codex_doctor_mcp::{CODEX_SERVER_NAME, ConfigError, ServerEntry, load_config_from_path};
use tracing::{debug, warn};

use crate::report::{CheckKind, CheckReport};

/// Report whether the MCP config template exists and registers the Codex server.
///
/// Only `mcpServers.codex.command` has to be a string; every other key may hold
/// anything. Unreadable or malformed files fail this check only; the run
/// carries on.
pub fn check_mcp_config(path: &Path) -> CheckReport {
    let mut report = CheckReport::new(CheckKind::McpConfig);
    debug!(path = %path.display(), "checking mcp config template");

    if !path.is_file() {
        report.missing("MCP config template not found!");
        return report;
    }

    report.ok("MCP config template found");
    report.info(format!("Location: {}", path.display()));

    let config = match load_config_from_path(path) {
        Ok(config) => config,
        Err(error) => {
            warn!(path = %path.display(), %error, "mcp config template is unusable");
            let line = match &error {
                ConfigError::Json(source) => format!("Invalid JSON: {source}"),
                ConfigError::Io(source) => format!("Cannot read config: {source}"),
            };
            report.missing(line);
            return report;
        }
    };

    match config.codex() {
        ServerEntry::Command(command) => {
            report.ok("Codex server configured");
            report.info(format!("Command: {command}"));
        }
        ServerEntry::NoCommand => {
            report.warn(format!("mcpServers.{CODEX_SERVER_NAME} has no command"));
        }
        ServerEntry::Absent => {
            report.warn(format!("No {CODEX_SERVER_NAME} entry under mcpServers"));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CheckStatus, Marker};
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp_config_for_claude_code.json");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn configured_codex_shows_command() {
        let (_dir, path) = write_config(r#"{"mcpServers":{"codex":{"command":"node"}}}"#);
        let report = check_mcp_config(&path);
        assert_eq!(report.status, CheckStatus::Passed);
        assert!(report.mentions("Codex server configured"));
        assert!(report.lines.iter().any(|line| line.text == "Command: node"));
    }

    #[test]
    fn empty_server_map_has_no_success_line() {
        let (_dir, path) = write_config(r#"{"mcpServers":{}}"#);
        let report = check_mcp_config(&path);
        assert!(report.mentions("MCP config template found"));
        assert!(!report.mentions("Codex server configured"));
        assert_eq!(report.status, CheckStatus::Warning);
    }

    #[test]
    fn malformed_json_fails_the_check() {
        let (_dir, path) = write_config("{\"mcpServers\": {\"codex\": ");
        let report = check_mcp_config(&path);
        assert_eq!(report.status, CheckStatus::Failed);
        assert_eq!(report.count(Marker::Missing), 1);
        assert!(report.mentions("Invalid JSON"));
    }

    #[test]
    fn extra_keys_of_any_type_are_ignored() {
        for content in [
            r#"{"mcpServers":{"codex":{"command":"node","env":{"PORT":3000}}}}"#,
            r#"{"mcpServers":{"other":{"args":"--stdio"},"codex":{"command":"node"}}}"#,
            r#"{"mcpServers":{"codex":{"command":"node","args":"dist/index.js","disabled":"no"}}}"#,
        ] {
            let (_dir, path) = write_config(content);
            let report = check_mcp_config(&path);
            assert_eq!(report.status, CheckStatus::Passed, "{content}");
            assert!(report.mentions("Codex server configured"), "{content}");
            assert!(report.lines.iter().any(|line| line.text == "Command: node"), "{content}");
        }
    }

    #[test]
    fn codex_entry_without_command_is_a_warning() {
        for content in [r#"{"mcpServers":{"codex":{}}}"#, r#"{"mcpServers":{"codex":{"command":42}}}"#] {
            let (_dir, path) = write_config(content);
            let report = check_mcp_config(&path);
            assert_eq!(report.status, CheckStatus::Warning, "{content}");
            assert!(!report.mentions("Codex server configured"), "{content}");
            assert!(report.mentions("mcpServers.codex has no command"), "{content}");
        }
    }

    #[test]
    fn non_object_server_map_is_a_warning() {
        for content in [r#"{"mcpServers":null}"#, r#"{"mcpServers":["codex"]}"#, "[]"] {
            let (_dir, path) = write_config(content);
            let report = check_mcp_config(&path);
            assert_eq!(report.status, CheckStatus::Warning, "{content}");
            assert_eq!(report.count(Marker::Missing), 0, "{content}");
            assert!(report.mentions("No codex entry under mcpServers"), "{content}");
        }
    }

    #[test]
    fn missing_template_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let report = check_mcp_config(&dir.path().join("mcp_config_for_claude_code.json"));
        assert_eq!(report.status, CheckStatus::Failed);
        assert!(report.mentions("MCP config template not found!"));
    }
}
