use std::fs;
use std::path::Path;

use codex_doctor_util::format_local_timestamp;
use tracing::debug;

use crate::report::{CheckKind, CheckReport};

/// Report whether the compiled artifact exists, with its size and mtime.
///
/// `label` is the path as shown to the user.
pub fn check_build_artifact(path: &Path, label: &str) -> CheckReport {
    let mut report = CheckReport::new(CheckKind::BuildArtifact);
    debug!(path = %path.display(), "checking build artifact");

    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => {
            report.missing(format!("{label} is not a file"));
            return report;
        }
        Err(_) => {
            report.missing(format!("{label} not found! Run: npm run build"));
            return report;
        }
    };

    report.ok(format!("{label}: Found ({} bytes)", metadata.len()));
    match metadata.modified() {
        Ok(modified) => report.info(format!("Modified: {}", format_local_timestamp(modified))),
        Err(error) => {
            debug!(%error, "modification time unavailable");
            report.info("Modified: unknown")
        }
    };

    report
}
