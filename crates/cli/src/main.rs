use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codex_doctor_api::ApiCredentials;
use codex_doctor_checks::{Doctor, DoctorConfig};
use codex_doctor_mcp::ClaudeConfigPaths;
use codex_doctor_util::{expand_tilde, resolve_against};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::project::ProjectCommand;

mod project;

/// Verify that a local Codex MCP server checkout is ready to use.
#[derive(Debug, Parser)]
#[command(name = "codex-doctor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Project root the default paths are resolved against.
    #[arg(long, global = true, env = "CODEX_DOCTOR_ROOT", default_value = ".")]
    root: String,

    /// Environment file holding OPENAI_API_KEY and OPENAI_API_BASE.
    #[arg(long, value_name = "PATH")]
    env_file: Option<String>,

    /// Compiled server entry point.
    #[arg(long, global = true, value_name = "PATH")]
    artifact: Option<String>,

    /// Sibling project used to exercise the server.
    #[arg(long, value_name = "DIR")]
    test_project: Option<String>,

    /// MCP configuration template.
    #[arg(long, value_name = "PATH")]
    mcp_config: Option<String>,

    /// Endpoint probe timeout in milliseconds.
    #[arg(long, env = "CODEX_DOCTOR_PROBE_TIMEOUT_MS", default_value_t = 5000)]
    timeout_ms: u64,

    /// Do not contact the API endpoint.
    #[arg(long)]
    skip_probe: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the Codex server in Claude CLI / Claude Code project configs.
    #[command(subcommand)]
    Project(ProjectCommand),
}

impl Cli {
    fn doctor_config(&self) -> DoctorConfig {
        let root = expand_tilde(&self.root);
        let mut config = DoctorConfig::for_root(root.clone());
        let overrides: [(&Option<String>, &mut PathBuf); 4] = [
            (&self.env_file, &mut config.env_file),
            (&self.artifact, &mut config.artifact),
            (&self.test_project, &mut config.test_project),
            (&self.mcp_config, &mut config.mcp_config),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = resolve_against(&root, value);
            }
        }
        config.probe.enabled = !self.skip_probe;
        config.probe.timeout = Duration::from_millis(self.timeout_ms);
        config
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.doctor_config();

    if let Some(Command::Project(command)) = &cli.command {
        let paths = ClaudeConfigPaths::from_home_dir()?;
        let mut stdout = io::stdout().lock();
        let done = command.run(&paths, &config.artifact, &mut stdout)?;
        return Ok(if done { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let credentials = ApiCredentials::load(&config.env_file).unwrap_or_else(|error| {
        warn!(%error, "could not read env file; using process environment only");
        ApiCredentials::from_environment()
    });

    let doctor = Doctor::new(config, credentials);
    let mut stdout = io::stdout().lock();
    let report = doctor.run(&mut stdout).await.context("setup verification failed")?;
    Ok(ExitCode::from(report.exit_code()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_resolve_against_root() {
        let cli = Cli::try_parse_from([
            "codex-doctor",
            "--root",
            "/work/codex-mcp",
            "--artifact",
            "build/server.js",
            "--mcp-config",
            "/etc/claude/mcp.json",
            "--timeout-ms",
            "750",
            "--skip-probe",
        ])
        .unwrap();

        let config = cli.doctor_config();
        assert_eq!(config.env_file, PathBuf::from("/work/codex-mcp/.env"));
        assert_eq!(config.artifact, PathBuf::from("/work/codex-mcp/build/server.js"));
        assert_eq!(config.mcp_config, PathBuf::from("/etc/claude/mcp.json"));
        assert_eq!(config.probe.timeout, Duration::from_millis(750));
        assert!(!config.probe.enabled);
        assert!(cli.command.is_none());
    }

    #[test]
    fn project_subcommand_parses_target() {
        let cli = Cli::try_parse_from([
            "codex-doctor",
            "project",
            "add",
            "/work/app",
            "--target",
            "gui",
            "--root",
            "/work/codex-mcp",
        ])
        .unwrap();

        assert_eq!(cli.doctor_config().artifact, PathBuf::from("/work/codex-mcp/dist/index.js"));
        match cli.command {
            Some(Command::Project(ProjectCommand::Add { path, target })) => {
                assert_eq!(path, "/work/app");
                assert_eq!(target, project::TargetArg::Gui);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
