//! `codex-doctor project`: register the Codex server for individual projects
//! in Claude CLI / Claude Code config files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Subcommand, ValueEnum};
use codex_doctor_mcp::{
    CODEX_SERVER_NAME, ChangeResult, ClaudeConfigPaths, ClaudeTarget, FileChange, McpServer, ProjectRegistry,
};
use codex_doctor_util::expand_tilde;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Register the Codex server for a project.
    Add {
        /// Project directory.
        path: String,
        #[arg(long, value_enum, default_value_t = TargetArg::Auto)]
        target: TargetArg,
    },
    /// List projects that have the Codex server registered.
    List {
        #[arg(long, value_enum, default_value_t = TargetArg::Auto)]
        target: TargetArg,
    },
    /// Remove the Codex server from a project.
    Remove {
        /// Project directory.
        path: String,
        #[arg(long, value_enum, default_value_t = TargetArg::Auto)]
        target: TargetArg,
    },
}

/// Which Claude config to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    /// `~/.claude.json`
    Cli,
    /// `~/.claude/.claude.json`
    Gui,
    /// Every config file that exists.
    Auto,
}

impl From<TargetArg> for ClaudeTarget {
    fn from(value: TargetArg) -> Self {
        match value {
            TargetArg::Cli => ClaudeTarget::Cli,
            TargetArg::Gui => ClaudeTarget::Gui,
            TargetArg::Auto => ClaudeTarget::Auto,
        }
    }
}

impl ProjectCommand {
    fn target(&self) -> TargetArg {
        match self {
            ProjectCommand::Add { target, .. }
            | ProjectCommand::List { target }
            | ProjectCommand::Remove { target, .. } => *target,
        }
    }

    /// Run against the Claude configs in `paths`; `artifact` is the compiled
    /// server entry point registered by `add`. Returns false when nothing
    /// could be done.
    pub fn run<W: Write>(&self, paths: &ClaudeConfigPaths, artifact: &Path, out: &mut W) -> Result<bool> {
        let files = paths.select(self.target().into())?;
        let registry = ProjectRegistry::new(files, CODEX_SERVER_NAME);
        match self {
            ProjectCommand::Add { path, .. } => add(&registry, path, artifact, out),
            ProjectCommand::List { .. } => list(&registry, out),
            ProjectCommand::Remove { path, .. } => remove(&registry, path, out),
        }
    }
}

fn add<W: Write>(registry: &ProjectRegistry, path: &str, artifact: &Path, out: &mut W) -> Result<bool> {
    let project = expand_tilde(path);
    if !project.is_dir() {
        bail!("project directory does not exist: {}", project.display());
    }
    let project = canonical(&project)?;
    if !artifact.is_file() {
        bail!(
            "Codex MCP is not built: {} not found (run `npm run build` first)",
            artifact.display()
        );
    }
    let server = McpServer::node(canonical(artifact)?.display().to_string());
    debug!(project = %project.display(), "registering codex server");

    writeln!(out, "🔧 Adding Codex MCP to project: {}", project.display())?;
    writeln!(out, "   Server: {} {}", server.command, server.args.join(" "))?;
    writeln!(out)?;

    let changes = registry.add(&project.display().to_string(), &server)?;
    let mut usable = 0;
    for change in &changes {
        usable += usize::from(!matches!(change.result, ChangeResult::Skipped(_)));
        write_change(out, change)?;
    }
    writeln!(out)?;
    writeln!(out, "📊 Codex MCP configured in {usable} of {} config(s)", changes.len())?;
    if usable > 0 {
        writeln!(out, "   Restart Claude and open the project to use it.")?;
    }
    Ok(usable > 0)
}

fn list<W: Write>(registry: &ProjectRegistry, out: &mut W) -> Result<bool> {
    let projects = registry.list();
    if projects.is_empty() {
        writeln!(out, "No projects have Codex MCP configured.")?;
        return Ok(true);
    }
    writeln!(out, "📋 Projects with Codex MCP ({}):", projects.len())?;
    for (project, hosts) in &projects {
        let hosts: Vec<String> = hosts.iter().map(ToString::to_string).collect();
        writeln!(out, "  {project}")?;
        writeln!(out, "    └─ configured in: {}", hosts.join(", "))?;
    }
    Ok(true)
}

fn remove<W: Write>(registry: &ProjectRegistry, path: &str, out: &mut W) -> Result<bool> {
    // The directory may already be gone; fall back to the path as given.
    let project = expand_tilde(path);
    let project = fs::canonicalize(&project).unwrap_or(project);

    writeln!(out, "🗑️  Removing Codex MCP from project: {}", project.display())?;
    writeln!(out)?;

    let changes = registry.remove(&project.display().to_string())?;
    for change in &changes {
        write_change(out, change)?;
    }
    let removed = changes
        .iter()
        .filter(|change| matches!(change.result, ChangeResult::Removed { .. }))
        .count();
    writeln!(out)?;
    if removed == 0 {
        writeln!(out, "ℹ️  Project has no Codex MCP configured")?;
    } else {
        writeln!(out, "📊 Removed from {removed} config(s)")?;
    }
    Ok(true)
}

fn write_change<W: Write>(out: &mut W, change: &FileChange) -> Result<()> {
    let host = change.host;
    match &change.result {
        ChangeResult::Added { backup } => {
            writeln!(out, "✅ {host}: Codex MCP added")?;
            writeln!(out, "   Backup: {}", backup.display())?;
        }
        ChangeResult::Removed { backup } => {
            writeln!(out, "✅ {host}: Codex MCP removed")?;
            writeln!(out, "   Backup: {}", backup.display())?;
        }
        ChangeResult::AlreadyConfigured => writeln!(out, "ℹ️  {host}: Codex MCP already configured")?,
        ChangeResult::NotConfigured => writeln!(out, "ℹ️  {host}: Codex MCP not configured")?,
        ChangeResult::Skipped(reason) => {
            writeln!(out, "⚠️  {host}: skipping {} ({reason})", change.path.display())?
        }
    }
    Ok(())
}

fn canonical(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("cannot resolve {}", path.display()))
}
