//! Per-project Codex registration in Claude's own config files.
//!
//! Claude CLI keeps its state in `~/.claude.json` and the Claude Code app in
//! `~/.claude/.claude.json`. Both hold a `projects` map keyed by absolute
//! project path, each with its own `mcpServers`. Edits go through
//! [`serde_json::Value`] so every key this crate does not touch survives a
//! rewrite, and each rewrite leaves a timestamped backup next to the file.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigError, MCP_SERVERS_KEY, McpServer, load_document, save_document};

/// Key of the per-project map inside a Claude config file.
pub const PROJECTS_KEY: &str = "projects";

/// Which Claude config files an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaudeTarget {
    Cli,
    Gui,
    /// Every config file that currently exists.
    Auto,
}

/// The Claude front end a config file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClaudeHost {
    Cli,
    Gui,
}

impl fmt::Display for ClaudeHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaudeHost::Cli => write!(f, "CLI"),
            ClaudeHost::Gui => write!(f, "GUI"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaudeConfigFile {
    pub host: ClaudeHost,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("could not determine the home directory")]
    NoHomeDirectory,

    #[error("no Claude config file found (CLI: {}, GUI: {}); run Claude CLI or Claude Code in a project first", cli.display(), gui.display())]
    NoClaudeConfig { cli: PathBuf, gui: PathBuf },

    #[error("failed to update {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// A key on the way to the server map is not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a JSON object")]
pub struct ShapeError(pub String);

/// Locations of the two Claude config files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaudeConfigPaths {
    pub cli: PathBuf,
    pub gui: PathBuf,
}

impl ClaudeConfigPaths {
    pub fn for_home(home: &Path) -> Self {
        Self {
            cli: home.join(".claude.json"),
            gui: home.join(".claude").join(".claude.json"),
        }
    }

    pub fn from_home_dir() -> Result<Self, ProjectError> {
        dirs_next::home_dir()
            .map(|home| Self::for_home(&home))
            .ok_or(ProjectError::NoHomeDirectory)
    }

    /// Resolve a target to concrete files. `Auto` keeps only files that exist
    /// and errors when there are none.
    pub fn select(&self, target: ClaudeTarget) -> Result<Vec<ClaudeConfigFile>, ProjectError> {
        let cli = ClaudeConfigFile {
            host: ClaudeHost::Cli,
            path: self.cli.clone(),
        };
        let gui = ClaudeConfigFile {
            host: ClaudeHost::Gui,
            path: self.gui.clone(),
        };
        match target {
            ClaudeTarget::Cli => Ok(vec![cli]),
            ClaudeTarget::Gui => Ok(vec![gui]),
            ClaudeTarget::Auto => {
                let existing: Vec<_> = [cli, gui].into_iter().filter(|file| file.path.exists()).collect();
                if existing.is_empty() {
                    return Err(ProjectError::NoClaudeConfig {
                        cli: self.cli.clone(),
                        gui: self.gui.clone(),
                    });
                }
                Ok(existing)
            }
        }
    }
}

/// Result of adding a server to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyConfigured,
}

/// Register `server` as `name` for `project`, creating the project entry
/// with Claude's defaults when it is new. An existing entry is left alone.
pub fn add_server(
    document: &mut Value,
    project: &str,
    name: &str,
    server: &McpServer,
) -> Result<AddOutcome, ShapeError> {
    let root = document.as_object_mut().ok_or_else(|| ShapeError("<root>".to_string()))?;
    let projects = object_entry(root, PROJECTS_KEY, PROJECTS_KEY)?;
    let project_entry = projects
        .entry(project.to_string())
        .or_insert_with(new_project_entry)
        .as_object_mut()
        .ok_or_else(|| ShapeError(format!("{PROJECTS_KEY}.{project}")))?;
    let servers = object_entry(project_entry, MCP_SERVERS_KEY, &format!("{PROJECTS_KEY}.{project}.{MCP_SERVERS_KEY}"))?;

    if servers.contains_key(name) {
        return Ok(AddOutcome::AlreadyConfigured);
    }
    servers.insert(name.to_string(), server.to_value());
    Ok(AddOutcome::Added)
}

/// Drop `name` from `project`'s servers. Returns whether anything was removed.
pub fn remove_server(document: &mut Value, project: &str, name: &str) -> bool {
    document
        .get_mut(PROJECTS_KEY)
        .and_then(|projects| projects.get_mut(project))
        .and_then(|entry| entry.get_mut(MCP_SERVERS_KEY))
        .and_then(Value::as_object_mut)
        .is_some_and(|servers| servers.shift_remove(name).is_some())
}

/// Projects whose server map contains `name`, in file order.
pub fn projects_with_server(document: &Value, name: &str) -> Vec<String> {
    let Some(projects) = document.get(PROJECTS_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };
    projects
        .iter()
        .filter(|(_, entry)| entry.get(MCP_SERVERS_KEY).and_then(|servers| servers.get(name)).is_some())
        .map(|(path, _)| path.clone())
        .collect()
}

fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    label: &str,
) -> Result<&'a mut Map<String, Value>, ShapeError> {
    map.entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| ShapeError(label.to_string()))
}

fn new_project_entry() -> Value {
    json!({
        "allowedTools": [],
        "mcpContextUris": [],
        "mcpServers": {},
        "enabledMcpjsonServers": [],
        "disabledMcpjsonServers": [],
        "hasTrustDialogAccepted": true,
        "ignorePatterns": [],
        "projectOnboardingSeenCount": 1
    })
}

/// What happened to one config file during an add or remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeResult {
    Added { backup: PathBuf },
    Removed { backup: PathBuf },
    AlreadyConfigured,
    NotConfigured,
    /// The file was missing, unreadable, or shaped unexpectedly; left untouched.
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub host: ClaudeHost,
    pub path: PathBuf,
    pub result: ChangeResult,
}

/// Adds, removes and lists one named server across a set of Claude config files.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    files: Vec<ClaudeConfigFile>,
    server_name: String,
}

impl ProjectRegistry {
    pub fn new(files: Vec<ClaudeConfigFile>, server_name: impl Into<String>) -> Self {
        Self {
            files,
            server_name: server_name.into(),
        }
    }

    pub fn files(&self) -> &[ClaudeConfigFile] {
        &self.files
    }

    pub fn add(&self, project: &str, server: &McpServer) -> Result<Vec<FileChange>, ProjectError> {
        let mut changes = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let result = match read_file(file) {
                Err(reason) => ChangeResult::Skipped(reason),
                Ok(mut document) => match add_server(&mut document, project, &self.server_name, server) {
                    Ok(AddOutcome::AlreadyConfigured) => ChangeResult::AlreadyConfigured,
                    Ok(AddOutcome::Added) => ChangeResult::Added {
                        backup: backup_and_save(&file.path, &document)?,
                    },
                    Err(error) => ChangeResult::Skipped(error.to_string()),
                },
            };
            changes.push(FileChange {
                host: file.host,
                path: file.path.clone(),
                result,
            });
        }
        Ok(changes)
    }

    pub fn remove(&self, project: &str) -> Result<Vec<FileChange>, ProjectError> {
        let mut changes = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let result = match read_file(file) {
                Err(reason) => ChangeResult::Skipped(reason),
                Ok(mut document) => {
                    if remove_server(&mut document, project, &self.server_name) {
                        ChangeResult::Removed {
                            backup: backup_and_save(&file.path, &document)?,
                        }
                    } else {
                        ChangeResult::NotConfigured
                    }
                }
            };
            changes.push(FileChange {
                host: file.host,
                path: file.path.clone(),
                result,
            });
        }
        Ok(changes)
    }

    /// Every project with the server configured, sorted by path, with the
    /// hosts that carry it. Unreadable files are ignored.
    pub fn list(&self) -> BTreeMap<String, Vec<ClaudeHost>> {
        let mut projects: BTreeMap<String, Vec<ClaudeHost>> = BTreeMap::new();
        for file in &self.files {
            let Ok(document) = read_file(file) else {
                continue;
            };
            for project in projects_with_server(&document, &self.server_name) {
                projects.entry(project).or_default().push(file.host);
            }
        }
        projects
    }
}

fn read_file(file: &ClaudeConfigFile) -> Result<Value, String> {
    match load_document(&file.path) {
        Ok(document) => Ok(document),
        Err(ConfigError::Io(error)) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %file.path.display(), "claude config not found");
            Err("file does not exist".to_string())
        }
        Err(error) => {
            warn!(path = %file.path.display(), %error, "claude config is unusable");
            Err(error.to_string())
        }
    }
}

/// Copy `path` to `<file name>.backup.<YYYYmmdd_HHMMSS>` and write `document` over it.
fn backup_and_save(path: &Path, document: &Value) -> Result<PathBuf, ProjectError> {
    let save_error = |source: ConfigError| ProjectError::Save {
        path: path.to_path_buf(),
        source,
    };
    let backup = backup_path(path, &Local::now().format("%Y%m%d_%H%M%S").to_string());
    fs::copy(path, &backup).map_err(|error| save_error(error.into()))?;
    save_document(path, document).map_err(save_error)?;
    debug!(path = %path.display(), backup = %backup.display(), "claude config updated");
    Ok(backup)
}

fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let mut file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    file_name.push(format!(".backup.{stamp}"));
    path.with_file_name(file_name)
}
