//! Human-readable output of a run.

use std::io::{self, Write};

use crate::report::{CheckReport, CheckStatus, RunReport};

const RULE_WIDTH: usize = 50;
const INDENT: &str = "   ";

/// Closing guidance. Printed verbatim after every run.
pub const NEXT_STEPS: &[&str] = &[
    "1. Add MCP config to Claude Code",
    "2. Restart Claude Code",
    "3. Test Codex by saying:",
    "   \"让 Codex 列出 test-codex-project 的文件\"",
];

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "🧪 Codex MCP Server - Setup Verification\n")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn write_check<W: Write>(out: &mut W, check: &CheckReport) -> io::Result<()> {
    writeln!(
        out,
        "\n{} Test {}: {}",
        check.status.heading_icon(),
        check.kind.number(),
        check.kind.title()
    )?;
    for line in &check.lines {
        writeln!(out, "{INDENT}{line}")?;
    }
    out.flush()
}

/// Summary derived from the run; only the next-steps block is fixed.
pub fn write_summary<W: Write>(out: &mut W, run: &RunReport) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "\n📋 Summary:")?;

    let failed = run.failed_count();
    if run.is_success() {
        writeln!(out, "\n✅ Setup Complete:")?;
    } else {
        let noun = if failed == 1 { "check" } else { "checks" };
        writeln!(out, "\n❌ Setup Incomplete ({failed} {noun} failed):")?;
    }
    for check in &run.checks {
        writeln!(
            out,
            "{INDENT}{}. {} {}",
            check.kind.number(),
            check.status.symbol(),
            check.kind.summary_label()
        )?;
    }
    if run.checks.iter().any(|check| check.status == CheckStatus::Warning) {
        writeln!(out, "{INDENT}(⚠ = needs attention, not counted as a failure)")?;
    }

    writeln!(out, "\n⏳ Next Steps:")?;
    for step in NEXT_STEPS {
        writeln!(out, "{INDENT}{step}")?;
    }

    writeln!(out, "\n📖 See CONFIGURATION_GUIDE.md for detailed instructions\n")?;
    out.flush()
}
