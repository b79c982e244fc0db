use std::path::Path;

use tracing::debug;

use crate::config::EXPECTED_TEST_PROJECT_FILES;
use crate::report::{CheckKind, CheckReport};

/// Report whether the sibling test project exists and holds every expected file.
///
/// All files are checked even after one is missing. A missing directory
/// skips the per-file lines entirely.
pub fn check_test_project(path: &Path) -> CheckReport {
    let mut report = CheckReport::new(CheckKind::TestProject);
    debug!(path = %path.display(), "checking test project");

    if !path.is_dir() {
        report.missing("Test project not found!");
        return report;
    }

    report.ok(format!("Test project found at: {}", path.display()));
    for file in EXPECTED_TEST_PROJECT_FILES {
        if path.join(file).exists() {
            report.ok(file);
        } else {
            report.missing(format!("{file} missing"));
        }
    }

    report
}
