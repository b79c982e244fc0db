//! Setup checks for a local Codex MCP server checkout.
//!
//! The doctor runs five independent checks in a fixed order:
//!
//! 1. `.env` presence and the `OPENAI_API_KEY` / `OPENAI_API_BASE` markers
//! 2. the compiled `dist/index.js` artifact
//! 3. the sibling `test-codex-project` and its expected files
//! 4. the `mcp_config_for_claude_code.json` template
//! 5. an optional `GET <OPENAI_API_BASE>/models` probe
//!
//! Each check yields a [`CheckReport`]; the reports are collected into a
//! [`RunReport`] from which the summary and the process exit status are
//! derived. No check reads another's result, and a failure in one never
//! stops the rest.
//!
//! ```ignore
//! use codex_doctor_api::ApiCredentials;
//! use codex_doctor_checks::{Doctor, DoctorConfig};
//!
//! let config = DoctorConfig::for_root(".");
//! let credentials = ApiCredentials::load(&config.env_file)?;
//! let report = Doctor::new(config, credentials).run(&mut std::io::stdout()).await?;
//! std::process::exit(report.exit_code().into());
//! ```

pub mod checks;
pub mod config;
pub mod render;
pub mod report;

use std::io::{self, Write};

use codex_doctor_api::ApiCredentials;
use thiserror::Error;
use tracing::info;

pub use config::{DoctorConfig, ProbeSettings};
pub use report::{CheckKind, CheckReport, CheckStatus, Marker, ReportLine, RunReport};

/// Error surfaced when the report cannot be written.
#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Runs every check against one configuration.
#[derive(Debug, Clone)]
pub struct Doctor {
    config: DoctorConfig,
    credentials: ApiCredentials,
}

impl Doctor {
    pub fn new(config: DoctorConfig, credentials: ApiCredentials) -> Self {
        Self { config, credentials }
    }

    /// Run all checks, writing each block to `out` as soon as it completes,
    /// followed by the summary.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunReport, DoctorError> {
        let config = &self.config;
        let mut run = RunReport::default();
        render::write_header(out)?;

        record(out, &mut run, checks::check_env_file(&config.env_file))?;
        record(
            out,
            &mut run,
            checks::check_build_artifact(&config.artifact, &config.display_path(&config.artifact)),
        )?;
        record(out, &mut run, checks::check_test_project(&config.test_project))?;
        record(out, &mut run, checks::check_mcp_config(&config.mcp_config))?;
        record(out, &mut run, checks::check_api_endpoint(&self.credentials, &config.probe).await)?;

        render::write_summary(out, &run)?;
        info!(failed = run.failed_count(), "setup verification finished");
        Ok(run)
    }
}

fn record<W: Write>(out: &mut W, run: &mut RunReport, check: CheckReport) -> io::Result<()> {
    render::write_check(out, &check)?;
    run.push(check);
    Ok(())
}
