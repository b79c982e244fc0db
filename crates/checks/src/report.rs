//! Check results and the aggregate run report.

use std::fmt;

/// Identifies one of the doctor's checks, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    EnvFile,
    BuildArtifact,
    TestProject,
    McpConfig,
    ApiEndpoint,
}

impl CheckKind {
    /// All checks in the order they run.
    pub const ALL: [CheckKind; 5] = [
        CheckKind::EnvFile,
        CheckKind::BuildArtifact,
        CheckKind::TestProject,
        CheckKind::McpConfig,
        CheckKind::ApiEndpoint,
    ];

    /// Heading shown above the check's lines.
    pub fn title(self) -> &'static str {
        match self {
            CheckKind::EnvFile => ".env Configuration",
            CheckKind::BuildArtifact => "Compiled Files",
            CheckKind::TestProject => "Test Project",
            CheckKind::McpConfig => "MCP Configuration Template",
            CheckKind::ApiEndpoint => "API Endpoint Test",
        }
    }

    /// Label used for the check in the closing summary.
    pub fn summary_label(self) -> &'static str {
        match self {
            CheckKind::EnvFile => ".env configured with API credentials",
            CheckKind::BuildArtifact => "Code compiled successfully",
            CheckKind::TestProject => "Test project created",
            CheckKind::McpConfig => "MCP config template ready",
            CheckKind::ApiEndpoint => "API endpoint reachable",
        }
    }

    /// 1-based position used in headings.
    pub fn number(self) -> usize {
        CheckKind::ALL.iter().position(|kind| *kind == self).map_or(0, |index| index + 1)
    }
}

/// Overall verdict of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    /// Something looks off but the setup is still usable.
    Warning,
    Failed,
    /// The check did not run.
    Skipped,
}

impl CheckStatus {
    pub fn symbol(self) -> &'static str {
        match self {
            CheckStatus::Passed => "✓",
            CheckStatus::Warning => "⚠",
            CheckStatus::Failed => "✗",
            CheckStatus::Skipped => "-",
        }
    }

    pub fn heading_icon(self) -> &'static str {
        match self {
            CheckStatus::Passed => "✅",
            CheckStatus::Warning | CheckStatus::Skipped => "⚠️",
            CheckStatus::Failed => "❌",
        }
    }
}

/// Leading marker of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Missing,
    Warn,
    Info,
}

impl Marker {
    fn symbol(self) -> Option<&'static str> {
        match self {
            Marker::Ok => Some("✓"),
            Marker::Missing => Some("✗"),
            Marker::Warn => Some("⚠"),
            Marker::Info => None,
        }
    }
}

/// One human-readable line of check output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub marker: Marker,
    pub text: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.marker.symbol() {
            Some(symbol) => write!(f, "{} {}", symbol, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Lines and verdict produced by one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub kind: CheckKind,
    pub status: CheckStatus,
    pub lines: Vec<ReportLine>,
}

impl CheckReport {
    /// Start a report; the status defaults to passed until a line says otherwise.
    pub fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            status: CheckStatus::Passed,
            lines: Vec::new(),
        }
    }

    pub fn ok(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Marker::Ok, text)
    }

    pub fn info(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Marker::Info, text)
    }

    /// Add a missing/failed line and mark the check failed.
    pub fn missing(&mut self, text: impl Into<String>) -> &mut Self {
        self.escalate(CheckStatus::Failed);
        self.push(Marker::Missing, text)
    }

    /// Add a missing line that only warns: `✗` marker, warning status.
    pub fn missing_as_warning(&mut self, text: impl Into<String>) -> &mut Self {
        self.escalate(CheckStatus::Warning);
        self.push(Marker::Missing, text)
    }

    /// Add a warning line and mark the check as warning unless it already failed.
    pub fn warn(&mut self, text: impl Into<String>) -> &mut Self {
        self.escalate(CheckStatus::Warning);
        self.push(Marker::Warn, text)
    }

    /// Override the status outright.
    pub fn with_status(mut self, status: CheckStatus) -> Self {
        self.status = status;
        self
    }

    /// Count lines carrying `marker`.
    pub fn count(&self, marker: Marker) -> usize {
        self.lines.iter().filter(|line| line.marker == marker).count()
    }

    /// True when some line's text contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }

    fn push(&mut self, marker: Marker, text: impl Into<String>) -> &mut Self {
        self.lines.push(ReportLine {
            marker,
            text: text.into(),
        });
        self
    }

    fn escalate(&mut self, status: CheckStatus) {
        let rank = |status: CheckStatus| match status {
            CheckStatus::Passed => 0,
            CheckStatus::Skipped => 1,
            CheckStatus::Warning => 2,
            CheckStatus::Failed => 3,
        };
        if rank(status) > rank(self.status) {
            self.status = status;
        }
    }
}

/// Every check's report, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub checks: Vec<CheckReport>,
}

impl RunReport {
    pub fn push(&mut self, check: CheckReport) {
        self.checks.push(check);
    }

    pub fn get(&self, kind: CheckKind) -> Option<&CheckReport> {
        self.checks.iter().find(|check| check.kind == kind)
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|check| check.status == CheckStatus::Failed).count()
    }

    /// Warnings and skipped checks do not count against the run.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Process exit status for the run: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}
