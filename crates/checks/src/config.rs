//! Locations and probe settings the doctor runs against.

use std::path::{Path, PathBuf};
use std::time::Duration;

use codex_doctor_api::DEFAULT_PROBE_TIMEOUT;
use codex_doctor_mcp::config::CONFIG_TEMPLATE_FILE_NAME;

/// Default `.env` location, relative to the project root.
pub const DEFAULT_ENV_FILE: &str = ".env";
/// Default build artifact, relative to the project root.
pub const DEFAULT_ARTIFACT: &str = "dist/index.js";
/// Default sibling test project, relative to the project root.
pub const DEFAULT_TEST_PROJECT: &str = "../test-codex-project";
/// Files the test project is expected to contain, checked in this order.
pub const EXPECTED_TEST_PROJECT_FILES: [&str; 4] = ["package.json", "src/calculator.js", "src/auth.js", "README.md"];

/// Endpoint probe settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub enabled: bool,
    pub timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Resolved configuration for one doctor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorConfig {
    pub root: PathBuf,
    pub env_file: PathBuf,
    pub artifact: PathBuf,
    pub test_project: PathBuf,
    pub mcp_config: PathBuf,
    pub probe: ProbeSettings,
}

impl DoctorConfig {
    /// Default layout for a Codex MCP server checkout at `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            env_file: root.join(DEFAULT_ENV_FILE),
            artifact: root.join(DEFAULT_ARTIFACT),
            test_project: root.join(DEFAULT_TEST_PROJECT),
            mcp_config: root.join(CONFIG_TEMPLATE_FILE_NAME),
            probe: ProbeSettings::default(),
            root,
        }
    }

    /// Path shown to the user: relative to the root when it lives below it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root).unwrap_or(path).display().to_string()
    }
}
